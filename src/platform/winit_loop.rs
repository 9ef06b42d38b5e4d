use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{
        ActiveEventLoop, ControlFlow, EventLoop as NativeLoop, EventLoopProxy as NativeProxy,
    },
    window::WindowId,
};

use super::{EventLoop, EventLoopProxy};
use crate::{
    app::UserEvent,
    error::{Error, Result},
};

/// The winit event loop. It must be created, and run, on the main thread.
pub struct WinitLoop {
    event_loop: NativeLoop<UserEvent>,
}

#[derive(Clone)]
pub struct WinitProxy {
    proxy: NativeProxy<UserEvent>,
}

impl WinitLoop {
    pub fn new() -> Result<Self> {
        let event_loop = NativeLoop::with_user_event()
            .build()
            .map_err(|err| Error::Init(err.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);
        Ok(Self { event_loop })
    }
}

impl EventLoop for WinitLoop {
    type Proxy = WinitProxy;

    fn create_proxy(&self) -> WinitProxy {
        WinitProxy {
            proxy: self.event_loop.create_proxy(),
        }
    }

    fn run(self) -> Result<()> {
        self.event_loop
            .run_app(&mut IdleHandler)
            .map_err(|err| Error::Native(err.to_string()))
    }
}

impl EventLoopProxy for WinitProxy {
    fn send_event(&self, event: UserEvent) -> Result<()> {
        self.proxy.send_event(event).map_err(|_| Error::Closed)
    }
}

struct IdleHandler;

impl ApplicationHandler<UserEvent> for IdleHandler {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        _event: WindowEvent,
    ) {
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::Idle(op) => op.run(),
            UserEvent::QuitApp => event_loop.exit(),
        }
    }
}
