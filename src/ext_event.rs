//! Running work on the UI thread from other threads.
//!
//! The native toolkit only accepts calls from the thread running its event
//! loop. A [`UiHandle`] hands closures to a relay thread over a rendezvous
//! channel; the relay forwards each one to the loop as an idle callback and
//! waits for it to finish before taking the next, so at most one unit of work
//! is in flight at any time. Submitters block until their own work is done.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::ThreadId,
    time::{Duration, Instant},
};

use crossbeam::channel::{self, Receiver, RecvTimeoutError, SendTimeoutError, Sender};
use tracing::{debug, trace, warn};

use crate::{
    app::UserEvent,
    error::{Error, Result},
    platform::EventLoopProxy,
};

pub(crate) type Job = Box<dyn FnOnce() + Send + 'static>;

pub(crate) enum Task {
    Run(Job),
    Quit,
}

/// A unit of work handed to the event loop, together with the signal the
/// relay waits on.
pub struct IdleOp {
    what: Job,
    done: Sender<()>,
}

impl IdleOp {
    /// Runs the work on the current thread, then signals completion. Event
    /// loops call this from their idle callback.
    pub fn run(self) {
        (self.what)();
        let _ = self.done.send(());
    }
}

/// Submits work to the UI thread. Cheap to clone and safe to send to any
/// thread.
#[derive(Clone)]
pub struct UiHandle {
    tx: Sender<Task>,
    ui_thread: ThreadId,
    stopped: Arc<AtomicBool>,
}

impl UiHandle {
    pub(crate) fn new(tx: Sender<Task>, ui_thread: ThreadId) -> Self {
        Self {
            tx,
            ui_thread,
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Set by the event loop's owner once the loop has exited.
    pub(crate) fn stopped(&self) -> Arc<AtomicBool> {
        self.stopped.clone()
    }

    fn run_inline<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce() -> R,
    {
        if self.stopped.load(Ordering::SeqCst) {
            return Err(Error::Closed);
        }
        Ok(f())
    }

    /// Whether the calling thread is the one running the event loop.
    pub fn is_ui_thread(&self) -> bool {
        std::thread::current().id() == self.ui_thread
    }

    /// Runs `f` on the UI thread and returns its result, blocking until it has
    /// finished. On the UI thread itself `f` runs immediately.
    ///
    /// Returns [`Error::Closed`] once the event loop has shut down.
    pub fn run<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        if self.is_ui_thread() {
            return self.run_inline(f);
        }
        let (job, result) = package(f);
        self.tx.send(Task::Run(job)).map_err(|_| Error::Closed)?;
        result.recv().map_err(|_| Error::Closed)
    }

    /// Like [`run`](UiHandle::run) for work without a result.
    pub fn submit(&self, f: impl FnOnce() + Send + 'static) -> Result<()> {
        self.run(f)
    }

    /// Like [`run`](UiHandle::run), but gives up waiting after `timeout`.
    ///
    /// Timing out does not cancel the work: if it was already handed over it
    /// still runs, and its result is discarded.
    pub fn run_timeout<F, R>(&self, f: F, timeout: Duration) -> Result<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        if self.is_ui_thread() {
            return self.run_inline(f);
        }
        let deadline = Instant::now() + timeout;
        let (job, result) = package(f);
        match self.tx.send_deadline(Task::Run(job), deadline) {
            Ok(()) => {}
            Err(SendTimeoutError::Timeout(_)) => return Err(Error::Timeout),
            Err(SendTimeoutError::Disconnected(_)) => return Err(Error::Closed),
        }
        match result.recv_deadline(deadline) {
            Ok(value) => Ok(value),
            Err(RecvTimeoutError::Timeout) => Err(Error::Timeout),
            Err(RecvTimeoutError::Disconnected) => Err(Error::Closed),
        }
    }

    /// Asks the event loop to exit once the work submitted before it is done.
    pub(crate) fn quit(&self) -> Result<()> {
        self.tx.send(Task::Quit).map_err(|_| Error::Closed)
    }
}

fn package<F, R>(f: F) -> (Job, Receiver<R>)
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let (tx, rx) = channel::bounded(1);
    let job: Job = Box::new(move || {
        let _ = tx.send(f());
    });
    (job, rx)
}

/// Forwards tasks to the event loop one at a time until the quit task arrives
/// or every handle is dropped.
pub(crate) fn relay<P: EventLoopProxy>(tasks: Receiver<Task>, proxy: P) {
    for task in tasks.iter() {
        match task {
            Task::Run(what) => {
                let (done_tx, done_rx) = channel::bounded(1);
                if let Err(err) = proxy.send_event(UserEvent::Idle(IdleOp {
                    what,
                    done: done_tx,
                })) {
                    warn!(%err, "event loop rejected UI task");
                    break;
                }
                // also returns if the loop drops the op without running it
                let _ = done_rx.recv();
                trace!("UI task completed");
            }
            Task::Quit => {
                if let Err(err) = proxy.send_event(UserEvent::QuitApp) {
                    warn!(%err, "event loop rejected quit request");
                }
                break;
            }
        }
    }
    debug!("UI relay stopped");
}
