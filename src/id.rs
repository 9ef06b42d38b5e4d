use std::{
    fmt,
    num::NonZeroU64,
    sync::atomic::{AtomicU64, Ordering},
};

static ID_COUNTER: AtomicU64 = AtomicU64::new(1);

fn next_nonzero() -> NonZeroU64 {
    let raw = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    NonZeroU64::new(raw).expect("id counter overflowed")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// A stable identifier for a layout participant.
pub struct ControlId(NonZeroU64);

impl ControlId {
    /// Allocate a new, unique `ControlId`.
    pub fn next() -> ControlId {
        ControlId(next_nonzero())
    }

    pub fn to_raw(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "control#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Identifies the native window a control tree is realized into.
pub struct WindowId(NonZeroU64);

impl WindowId {
    pub fn next() -> WindowId {
        WindowId(next_nonzero())
    }

    pub fn to_raw(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}
