use std::{panic, sync::atomic::Ordering, thread};

use crossbeam::channel;
use tracing::debug;

use crate::{
    error::Result,
    ext_event::{IdleOp, UiHandle, relay},
    platform::EventLoop,
};

/// Events the bridge sends into the native event loop.
pub enum UserEvent {
    /// Run this work on the loop thread at the next opportunity.
    Idle(IdleOp),
    /// Exit the loop.
    QuitApp,
}

/// Owns the native event loop and the threads that feed it.
///
/// [`run`](Application::run) pins the UI to the calling thread: the event
/// loop runs there, application logic runs on a separate thread, and a relay
/// thread moves work submitted through [`UiHandle`] from one to the other.
/// When the application logic returns, the loop is told to quit and `run`
/// returns. If the application logic panics, the loop still quits and `run`
/// resumes the panic on the calling thread.
pub struct Application<L> {
    event_loop: L,
}

impl<L: EventLoop> Application<L> {
    pub fn new(event_loop: L) -> Self {
        Self { event_loop }
    }

    pub fn run<F>(self, main: F) -> Result<()>
    where
        F: FnOnce(UiHandle) + Send + 'static,
    {
        let (tx, rx) = channel::bounded(0);
        let proxy = self.event_loop.create_proxy();
        thread::Builder::new()
            .name("ui-relay".into())
            .spawn(move || relay(rx, proxy))?;

        let handle = UiHandle::new(tx, thread::current().id());
        let stopped = handle.stopped();
        let main_thread = thread::Builder::new()
            .name("ui-main".into())
            .spawn(move || {
                let _quit = QuitOnDrop(handle.clone());
                main(handle);
            })?;

        debug!("UI event loop starting");
        let result = self.event_loop.run();
        stopped.store(true, Ordering::SeqCst);
        debug!("UI event loop stopped");
        result?;

        // the loop only exits cleanly after the quit task, so main is done or unwinding
        if let Err(payload) = main_thread.join() {
            panic::resume_unwind(payload);
        }
        Ok(())
    }
}

// Sends the quit task even if the application logic panics.
struct QuitOnDrop(UiHandle);

impl Drop for QuitOnDrop {
    fn drop(&mut self) {
        let _ = self.0.quit();
    }
}

/// Runs `main` against the winit event loop on the current thread, which
/// should be the process's main thread.
#[cfg(feature = "winit")]
pub fn launch<F>(main: F) -> Result<()>
where
    F: FnOnce(UiHandle) + Send + 'static,
{
    Application::new(crate::platform::WinitLoop::new()?).run(main)
}
