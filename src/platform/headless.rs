use crossbeam::channel::{self, Receiver, Sender};
use tracing::trace;

use super::{EventLoop, EventLoopProxy};
use crate::{
    app::UserEvent,
    error::{Error, Result},
};

/// An event loop with no window system behind it.
///
/// Idle work runs in the order it arrives. Useful for tests, benchmarks and
/// tools that lay out controls without showing them.
pub struct HeadlessLoop {
    tx: Sender<UserEvent>,
    rx: Receiver<UserEvent>,
}

#[derive(Clone)]
pub struct HeadlessProxy {
    tx: Sender<UserEvent>,
}

impl HeadlessLoop {
    pub fn new() -> Self {
        let (tx, rx) = channel::unbounded();
        Self { tx, rx }
    }
}

impl Default for HeadlessLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop for HeadlessLoop {
    type Proxy = HeadlessProxy;

    fn create_proxy(&self) -> HeadlessProxy {
        HeadlessProxy {
            tx: self.tx.clone(),
        }
    }

    fn run(self) -> Result<()> {
        let HeadlessLoop { tx, rx } = self;
        // the loop also ends once every proxy is gone
        drop(tx);
        for event in rx.iter() {
            match event {
                UserEvent::Idle(op) => {
                    trace!("headless loop running idle op");
                    op.run();
                }
                UserEvent::QuitApp => break,
            }
        }
        Ok(())
    }
}

impl EventLoopProxy for HeadlessProxy {
    fn send_event(&self, event: UserEvent) -> Result<()> {
        self.tx.send(event).map_err(|_| Error::Closed)
    }
}
