use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::{
    control::{Allocation, Control, ControlRef, WindowHandle},
    error::{Error, Result},
    geometry::Size,
    id::ControlId,
    sizing::SizingContext,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A Stack lines its controls up horizontally or vertically within its parent.
///
/// A horizontal Stack gives all controls the same height and their preferred
/// widths. A vertical Stack gives all controls the same width and their
/// preferred heights. Any extra space at the end of a Stack is left blank.
///
/// Controls may be marked stretchy with [`set_stretchy`](Stack::set_stretchy):
/// when the window changes size they take up the space remaining after the
/// other controls are laid out, split equally between them.
pub struct Stack {
    id: ControlId,
    orientation: Orientation,
    controls: Vec<ControlRef>,
    state: Mutex<StackState>,
}

struct StackState {
    created: bool,
    stretchy: Vec<bool>,
    // reused between allocation passes
    width: Vec<i32>,
    height: Vec<i32>,
}

impl Stack {
    pub fn new(
        orientation: Orientation,
        controls: impl IntoIterator<Item = ControlRef>,
    ) -> Arc<Stack> {
        let controls: Vec<ControlRef> = controls.into_iter().collect();
        let n = controls.len();
        Arc::new(Stack {
            id: ControlId::next(),
            orientation,
            controls,
            state: Mutex::new(StackState {
                created: false,
                stretchy: vec![false; n],
                width: vec![0; n],
                height: vec![0; n],
            }),
        })
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn controls(&self) -> &[ControlRef] {
        &self.controls
    }

    /// Marks the control at `index` as stretchy.
    ///
    /// # Panics
    ///
    /// Panics once the Stack has been realized, or if `index` is out of range.
    pub fn set_stretchy(&self, index: usize) {
        let mut state = self.state.lock();
        if state.created {
            panic!("call to Stack::set_stretchy() after Stack has been created");
        }
        match state.stretchy.get_mut(index) {
            Some(stretchy) => *stretchy = true,
            None => panic!("index {index} out of range in Stack::set_stretchy()"),
        }
    }

    pub fn is_stretchy(&self, index: usize) -> bool {
        self.state.lock().stretchy.get(index).copied().unwrap_or(false)
    }

    pub fn is_created(&self) -> bool {
        self.state.lock().created
    }

    fn padding(&self, d: &SizingContext) -> i32 {
        match self.orientation {
            Orientation::Horizontal => d.xpadding,
            Orientation::Vertical => d.ypadding,
        }
    }
}

/// A Stack that arranges the given controls horizontally.
pub fn h_stack(controls: impl IntoIterator<Item = ControlRef>) -> Arc<Stack> {
    Stack::new(Orientation::Horizontal, controls)
}

/// A Stack that arranges the given controls vertically.
pub fn v_stack(controls: impl IntoIterator<Item = ControlRef>) -> Arc<Stack> {
    Stack::new(Orientation::Vertical, controls)
}

// A Stack with no controls draws nothing and reports no errors; its parent
// still sizes it properly if it is made stretchy.
static SPACE: LazyLock<ControlRef> =
    LazyLock::new(|| Stack::new(Orientation::Horizontal, Vec::new()));

/// An empty control for padding layouts with blank space. It appears to its
/// owner as a control of size 0x0.
///
/// In a Stack, make the space stretchy to push the following controls to the
/// far end, or to insert a gap in the middle. In a Grid it fills an empty cell.
///
/// The value returned may or may not be shared with other callers.
pub fn space() -> ControlRef {
    SPACE.clone()
}

impl Control for Stack {
    fn id(&self) -> ControlId {
        self.id
    }

    fn make(&self, window: &WindowHandle) -> Result<()> {
        let mut state = self.state.lock();
        for (index, control) in self.controls.iter().enumerate() {
            control.make(window).map_err(|err| Error::MakeControl {
                index,
                source: Box::new(err),
            })?;
        }
        state.created = true;
        debug!(
            stack = %self.id,
            window = %window.id(),
            controls = self.controls.len(),
            "stack realized"
        );
        Ok(())
    }

    fn allocate(
        self: Arc<Self>,
        mut x: i32,
        mut y: i32,
        mut width: i32,
        mut height: i32,
        d: &mut SizingContext,
    ) -> Vec<Allocation> {
        if self.controls.is_empty() {
            return Vec::new();
        }
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let horizontal = self.orientation == Orientation::Horizontal;

        // steal the margins so nested containers don't apply them again
        let (xmargin, ymargin) = d.take_margins();
        x += xmargin;
        y += ymargin;
        width -= xmargin * 2;
        height -= ymargin * 2;
        let gaps = (self.controls.len() - 1) as i32;
        if horizontal {
            width -= gaps * d.xpadding;
        } else {
            height -= gaps * d.ypadding;
        }

        // non-stretchy controls get their preferred extent on the primary axis
        let mut stretchy_width = width;
        let mut stretchy_height = height;
        let mut n_stretchy = 0;
        for (i, control) in self.controls.iter().enumerate() {
            if state.stretchy[i] {
                n_stretchy += 1;
                continue;
            }
            let preferred = control.preferred_size(d);
            if horizontal {
                state.width[i] = preferred.width;
                state.height[i] = height;
                stretchy_width -= preferred.width;
            } else {
                state.width[i] = width;
                state.height[i] = preferred.height;
                stretchy_height -= preferred.height;
            }
        }

        // the remainder of an uneven split is left blank at the end
        if n_stretchy != 0 {
            if horizontal {
                stretchy_width /= n_stretchy;
            } else {
                stretchy_height /= n_stretchy;
            }
        }
        for i in 0..self.controls.len() {
            if state.stretchy[i] {
                state.width[i] = stretchy_width;
                state.height[i] = stretchy_height;
            }
        }

        let mut allocations: Vec<Allocation> = Vec::with_capacity(self.controls.len());
        let mut current: Option<usize> = None;
        for (i, control) in self.controls.iter().enumerate() {
            let child = Arc::clone(control).allocate(x, y, state.width[i], state.height[i], d);
            // only horizontal neighbors are linked
            if horizontal {
                if let Some(prev) = current {
                    allocations[prev].neighbor = Some(Arc::downgrade(control));
                }
                current = if child.is_empty() {
                    None
                } else {
                    Some(allocations.len())
                };
            }
            allocations.extend(child);
            if horizontal {
                x += state.width[i] + d.xpadding;
            } else {
                y += state.height[i] + d.ypadding;
            }
        }
        trace!(
            stack = %self.id,
            n_stretchy,
            allocations = allocations.len(),
            "stack allocated"
        );
        allocations
    }

    /// The sum of the preferred sizes of the non-stretchy controls, plus the
    /// number of stretchy controls times the largest preferred size among
    /// them. Margins are not included.
    fn preferred_size(&self, d: &SizingContext) -> Size {
        if self.controls.is_empty() {
            return Size::ZERO;
        }
        let state = self.state.lock();
        let horizontal = self.orientation == Orientation::Horizontal;

        let mut size = Size::ZERO;
        let gaps = (self.controls.len() - 1) as i32 * self.padding(d);
        if horizontal {
            size.width = gaps;
        } else {
            size.height = gaps;
        }

        let mut n_stretchy = 0;
        let mut max_stretchy = Size::ZERO;
        for (i, control) in self.controls.iter().enumerate() {
            let preferred = control.preferred_size(d);
            let stretchy = state.stretchy[i];
            if stretchy {
                n_stretchy += 1;
                max_stretchy.width = max_stretchy.width.max(preferred.width);
                max_stretchy.height = max_stretchy.height.max(preferred.height);
            }
            if horizontal {
                if !stretchy {
                    size.width += preferred.width;
                }
                size.height = size.height.max(preferred.height);
            } else {
                size.width = size.width.max(preferred.width);
                if !stretchy {
                    size.height += preferred.height;
                }
            }
        }
        if horizontal {
            size.width += n_stretchy * max_stretchy.width;
        } else {
            size.height += n_stretchy * max_stretchy.height;
        }
        size
    }
}
