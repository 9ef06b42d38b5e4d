//! The capability every layout participant implements.
//!
//! Containers ([`Stack`](crate::views::Stack), [`Grid`](crate::views::Grid))
//! and native leaf widgets share one trait so they nest freely. A layout pass
//! runs top-down: the window asks its root for an allocation, containers
//! split their rectangle among their children, and leaves answer with a single
//! [`Allocation`] naming themselves. The flattened list of leaf allocations is
//! what the native layer finally commits.

use std::{
    fmt,
    sync::{Arc, Weak},
};

use crate::{
    error::Result,
    geometry::{Rect, Size},
    id::{ControlId, WindowId},
    sizing::SizingContext,
};

/// Shared handle to a layout participant.
pub type ControlRef = Arc<dyn Control>;

/// The native window a control tree is realized into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowHandle {
    id: WindowId,
}

impl WindowHandle {
    pub fn new(id: WindowId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }
}

pub trait Control: Send + Sync {
    fn id(&self) -> ControlId;

    /// Realize native resources inside `window`.
    ///
    /// Calling this twice on the same control is not supported.
    fn make(&self, window: &WindowHandle) -> Result<()>;

    /// Position this control (and, for containers, its children) inside the
    /// given rectangle. Returns the flattened list of leaf allocations.
    fn allocate(
        self: Arc<Self>,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        d: &mut SizingContext,
    ) -> Vec<Allocation>;

    /// The size this control would like. Must not have side effects.
    fn preferred_size(&self, d: &SizingContext) -> Size;

    /// Apply a finalized allocation to the native widget.
    fn commit_resize(&self, _a: &Allocation, _d: &SizingContext) {}

    /// Hook for adjusting the sizing context before allocations are committed.
    fn get_aux_resize_info(&self, _d: &mut SizingContext) {}
}

/// The rectangle assigned to one leaf control during a layout pass.
#[derive(Clone)]
pub struct Allocation {
    pub rect: Rect,
    pub this: ControlRef,
    /// The control laid out directly after this one on the same line, if any.
    /// Native layers use it for adjacency hints such as label baselines.
    pub neighbor: Option<Weak<dyn Control>>,
}

impl Allocation {
    pub fn new(this: ControlRef, rect: Rect) -> Self {
        Self {
            rect,
            this,
            neighbor: None,
        }
    }

    pub fn neighbor(&self) -> Option<ControlRef> {
        self.neighbor.as_ref().and_then(Weak::upgrade)
    }

    pub fn neighbor_id(&self) -> Option<ControlId> {
        self.neighbor().map(|c| c.id())
    }
}

impl fmt::Debug for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Allocation")
            .field("rect", &self.rect)
            .field("this", &self.this.id())
            .field("neighbor", &self.neighbor_id())
            .finish()
    }
}
