//! The root of a control tree.
//!
//! A [`Window`] owns the root control, realizes it into a native window once,
//! and drives every resize: it builds a fresh [`SizingContext`], allocates the
//! root over the whole client area, then commits the resulting leaf
//! allocations.

use tracing::debug;

use crate::{
    control::{Allocation, ControlRef, WindowHandle},
    error::{Error, Result},
    geometry::Size,
    id::WindowId,
    sizing::{SizingConfig, SizingContext},
};

#[derive(Clone, Copy, Debug, Default)]
pub struct WindowConfig {
    pub(crate) spaced: bool,
    pub(crate) sizing: Option<SizingConfig>,
}

impl WindowConfig {
    /// Apply margins around the root and padding between controls.
    pub fn spaced(mut self, spaced: bool) -> Self {
        self.spaced = spaced;
        self
    }

    /// The spacing used when the window is spaced. Defaults to
    /// [`SizingConfig::SPACED`].
    pub fn sizing(mut self, sizing: SizingConfig) -> Self {
        self.sizing = Some(sizing);
        self
    }

    pub fn is_spaced(&self) -> bool {
        self.spaced
    }

    pub(crate) fn begin_resize(&self) -> SizingContext {
        if self.spaced {
            SizingContext::new(&self.sizing.unwrap_or(SizingConfig::SPACED))
        } else {
            SizingContext::default()
        }
    }
}

pub struct Window {
    handle: WindowHandle,
    root: ControlRef,
    config: WindowConfig,
    open: bool,
}

impl Window {
    pub fn new(root: ControlRef, config: WindowConfig) -> Self {
        Self {
            handle: WindowHandle::new(WindowId::next()),
            root,
            config,
            open: false,
        }
    }

    pub fn id(&self) -> WindowId {
        self.handle.id()
    }

    pub fn handle(&self) -> &WindowHandle {
        &self.handle
    }

    pub fn root(&self) -> &ControlRef {
        &self.root
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Realizes the control tree. If a control fails, the window stays closed
    /// and should be abandoned; controls made before the failure are not
    /// unmade.
    pub fn open(&mut self) -> Result<()> {
        if self.open {
            return Err(Error::AlreadyOpen);
        }
        self.root.make(&self.handle)?;
        self.open = true;
        debug!(window = %self.handle.id(), "window opened");
        Ok(())
    }

    /// Lays the tree out over a client area of `width` by `height` and commits
    /// every leaf allocation. Returns the allocations that were committed.
    pub fn resize(&self, width: i32, height: i32) -> Result<Vec<Allocation>> {
        if !self.open {
            return Err(Error::NotOpen);
        }
        let mut d = self.config.begin_resize();
        let allocations = self.root.clone().allocate(0, 0, width, height, &mut d);
        for a in &allocations {
            a.this.get_aux_resize_info(&mut d);
        }
        // reverse order approximates right to left, so neighbors are committed first
        for a in allocations.iter().rev() {
            a.this.commit_resize(a, &d);
        }
        debug!(
            window = %self.handle.id(),
            width,
            height,
            allocations = allocations.len(),
            "window resized"
        );
        Ok(allocations)
    }

    /// The size the root control would like, padding included but margins
    /// not.
    pub fn preferred_size(&self) -> Size {
        self.root.preferred_size(&self.config.begin_resize())
    }
}
