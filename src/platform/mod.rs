//! Event loop backends for the dispatch bridge.
//!
//! The bridge only needs two things from a native toolkit: a loop that runs on
//! the thread that created it until it is told to quit, and a proxy that other
//! threads can use to wake it with a [`UserEvent`].

use crate::{app::UserEvent, error::Result};

mod headless;
pub use headless::{HeadlessLoop, HeadlessProxy};

#[cfg(feature = "winit")]
mod winit_loop;
#[cfg(feature = "winit")]
pub use winit_loop::{WinitLoop, WinitProxy};

pub trait EventLoop {
    type Proxy: EventLoopProxy;

    fn create_proxy(&self) -> Self::Proxy;

    /// Runs the loop on the calling thread until a [`UserEvent::QuitApp`]
    /// arrives. Every [`UserEvent::Idle`] is run on this thread.
    fn run(self) -> Result<()>;
}

pub trait EventLoopProxy: Send + 'static {
    /// Wakes the loop with `event`. Fails with
    /// [`Error::Closed`](crate::Error::Closed) once the loop has exited.
    fn send_event(&self, event: UserEvent) -> Result<()>;
}
