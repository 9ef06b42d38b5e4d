//! Testing utilities for stackui layouts.
//!
//! Real leaf controls wrap native widgets. [`TestControl`] stands in for them:
//! it has a fixed preferred size and records every call the layout machinery
//! makes on it into a shared [`CallLog`].
//!
//! # Example
//!
//! ```rust,ignore
//! use stackui_test::prelude::*;
//!
//! #[test]
//! fn test_stretchy_button() {
//!     let log = CallLog::new();
//!     let label = log.leaf("label", 40, 20);
//!     let button = log.leaf("button", 60, 20);
//!
//!     let root = h_stack(controls(&[&label, &button]));
//!     root.set_stretchy(1);
//!
//!     let mut window = Window::new(root, WindowConfig::default());
//!     window.open().unwrap();
//!     window.resize(200, 20).unwrap();
//!
//!     assert_eq!(log.committed_rect(button.id()), Some(Rect::new(40, 0, 160, 20)));
//! }
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use stackui::{
    Allocation, Application, Control, ControlId, ControlRef, Error, Rect, Result, Size,
    SizingContext, UiHandle, WindowHandle, WindowId, platform::HeadlessLoop,
};

/// Prelude module for convenient imports in tests.
pub mod prelude {
    pub use super::{Call, CallLog, TestControl, controls, rects, run_headless};
    pub use stackui::prelude::*;
}

/// One call made on a [`TestControl`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Make {
        control: ControlId,
        window: WindowId,
    },
    AuxResizeInfo {
        control: ControlId,
    },
    Commit {
        control: ControlId,
        rect: Rect,
        neighbor: Option<ControlId>,
    },
}

/// Records calls made on the leaves created from it, in order.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A leaf that prefers `width` by `height`.
    pub fn leaf(&self, name: &str, width: i32, height: i32) -> Arc<TestControl> {
        Arc::new(TestControl {
            id: ControlId::next(),
            name: name.to_string(),
            preferred: Size::new(width, height),
            fail_make: false,
            log: self.clone(),
        })
    }

    /// A leaf whose realization fails.
    pub fn failing_leaf(&self, name: &str) -> Arc<TestControl> {
        Arc::new(TestControl {
            id: ControlId::next(),
            name: name.to_string(),
            preferred: Size::ZERO,
            fail_make: true,
            log: self.clone(),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    /// Controls that were realized, in order.
    pub fn made(&self) -> Vec<ControlId> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                Call::Make { control, .. } => Some(*control),
                _ => None,
            })
            .collect()
    }

    /// Controls whose allocation was committed, in commit order.
    pub fn committed(&self) -> Vec<ControlId> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                Call::Commit { control, .. } => Some(*control),
                _ => None,
            })
            .collect()
    }

    /// The last rectangle committed for `control`.
    pub fn committed_rect(&self, control: ControlId) -> Option<Rect> {
        self.calls.lock().iter().rev().find_map(|call| match call {
            Call::Commit { control: c, rect, .. } if *c == control => Some(*rect),
            _ => None,
        })
    }

    fn push(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

/// A stand-in for a native leaf widget.
pub struct TestControl {
    id: ControlId,
    name: String,
    preferred: Size,
    fail_make: bool,
    log: CallLog,
}

impl TestControl {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Control for TestControl {
    fn id(&self) -> ControlId {
        self.id
    }

    fn make(&self, window: &WindowHandle) -> Result<()> {
        if self.fail_make {
            return Err(Error::native(format!("could not create {}", self.name)));
        }
        self.log.push(Call::Make {
            control: self.id,
            window: window.id(),
        });
        Ok(())
    }

    fn allocate(
        self: Arc<Self>,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        _d: &mut SizingContext,
    ) -> Vec<Allocation> {
        vec![Allocation::new(self, Rect::new(x, y, width, height))]
    }

    fn preferred_size(&self, _d: &SizingContext) -> Size {
        self.preferred
    }

    fn commit_resize(&self, a: &Allocation, _d: &SizingContext) {
        self.log.push(Call::Commit {
            control: self.id,
            rect: a.rect,
            neighbor: a.neighbor_id(),
        });
    }

    fn get_aux_resize_info(&self, _d: &mut SizingContext) {
        self.log.push(Call::AuxResizeInfo { control: self.id });
    }
}

/// Converts leaves into the shared handles containers take.
pub fn controls(leaves: &[&Arc<TestControl>]) -> Vec<ControlRef> {
    leaves.iter().map(|leaf| (*leaf).clone() as ControlRef).collect()
}

pub fn rects(allocations: &[Allocation]) -> Vec<Rect> {
    allocations.iter().map(|a| a.rect).collect()
}

/// Runs `main` against a headless event loop pinned to the calling thread.
pub fn run_headless<F>(main: F) -> Result<()>
where
    F: FnOnce(UiHandle) + Send + 'static,
{
    Application::new(HeadlessLoop::new()).run(main)
}
