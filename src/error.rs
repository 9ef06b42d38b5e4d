use std::io;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by realization, window management and the dispatch bridge.
///
/// Configuration misuse (marking cells stretchy after realization, indices out
/// of range) is a programming error and panics instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("error adding control {index} to Stack: {source}")]
    MakeControl {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("error adding control at row {row}, column {column} to Grid: {source}")]
    MakeCell {
        row: usize,
        column: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("native toolkit error: {0}")]
    Native(String),

    #[error("native toolkit initialization failed: {0}")]
    Init(String),

    #[error("window has not been opened")]
    NotOpen,

    #[error("window is already open")]
    AlreadyOpen,

    #[error("the UI event loop has shut down")]
    Closed,

    #[error("timed out waiting for the UI thread")]
    Timeout,

    #[error("failed to spawn a UI bridge thread: {0}")]
    Spawn(#[from] io::Error),
}

impl Error {
    /// Wraps a failure reported by the native layer.
    pub fn native(message: impl Into<String>) -> Self {
        Error::Native(message.into())
    }
}
