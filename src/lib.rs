//! # stackui
//! Box layout for native widget toolkits, and a bridge for running work on the
//! toolkit's UI thread.
//!
//! ## Layout
//! Every participant in a layout implements [`Control`]. Leaf widgets wrap a
//! native widget; the containers in [`views`] arrange other controls:
//!
//! - [`Stack`](views::Stack) lines controls up along one axis and gives them
//!   all the same extent on the other. Stretchy controls share the space left
//!   over after the others get their preferred size.
//! - [`Grid`](views::Grid) arranges controls in rows and columns.
//! - [`space`](views::space) is an empty control for pushing others apart.
//!
//! ```rust,ignore
//! use stackui::prelude::*;
//!
//! let buttons = h_stack(vec![space(), ok, cancel]);
//! buttons.set_stretchy(0);
//! let root = v_stack(vec![list, buttons as ControlRef]);
//! root.set_stretchy(0);
//!
//! let mut window = Window::new(root, WindowConfig::default().spaced(true));
//! window.open()?;
//! window.resize(640, 480)?;
//! ```
//!
//! Layout is configured while the tree is being built. Once a container has
//! been realized with [`Control::make`] its stretchy cells are fixed; changing
//! them afterwards panics.
//!
//! ## The UI thread
//! Native toolkits only accept calls from the thread running their event loop.
//! [`Application::run`] runs the loop on the calling thread and the
//! application logic on another, handing it a [`UiHandle`]:
//!
//! ```rust,ignore
//! use stackui::prelude::*;
//!
//! Application::new(HeadlessLoop::new()).run(|ui| {
//!     let title = ui.run(|| native_window_title()).unwrap();
//!     println!("{title}");
//! })?;
//! ```
//!
//! Work submitted through a handle runs on the UI thread one unit at a time,
//! in the order it reached the bridge, and the submitter waits for it to
//! finish.

pub mod app;
pub mod control;
pub mod error;
pub mod ext_event;
pub mod geometry;
pub mod id;
pub mod platform;
pub mod sizing;
pub mod views;
pub mod window;

#[cfg(feature = "winit")]
pub use app::launch;
pub use app::{Application, UserEvent};
pub use control::{Allocation, Control, ControlRef, WindowHandle};
pub use error::{Error, Result};
pub use ext_event::{IdleOp, UiHandle};
pub use geometry::{Rect, Size};
pub use id::{ControlId, WindowId};
pub use sizing::{SizingConfig, SizingContext};
pub use window::{Window, WindowConfig};

pub mod prelude {
    pub use crate::platform::{EventLoop, HeadlessLoop};
    pub use crate::views::{Grid, Orientation, Stack, h_stack, space, v_stack};
    pub use crate::{
        Allocation, Application, Control, ControlId, ControlRef, Error, Rect, Size,
        SizingConfig, SizingContext, UiHandle, Window, WindowConfig, WindowHandle, WindowId,
    };
}
