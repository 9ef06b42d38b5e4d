use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::{
    control::{Allocation, Control, ControlRef, WindowHandle},
    error::{Error, Result},
    geometry::Size,
    id::ControlId,
    sizing::SizingContext,
};

/// A Grid arranges controls in rows and columns.
///
/// Each column is as wide as its widest control and each row as tall as its
/// tallest. Controls get their preferred size inside their cell unless the cell
/// is marked filling, in which case they take the whole cell.
///
/// One cell may be marked stretchy: its column takes whatever width the other
/// columns leave over and its row whatever height the other rows leave over.
/// A stretchy cell is always filling.
pub struct Grid {
    id: ControlId,
    columns: usize,
    controls: Vec<ControlRef>,
    state: Mutex<GridState>,
}

struct GridState {
    created: bool,
    filling: Vec<bool>,
    stretchy: Option<(usize, usize)>,
    // reused between allocation passes
    widths: Vec<i32>,
    heights: Vec<i32>,
    col_widths: Vec<i32>,
    row_heights: Vec<i32>,
}

impl Grid {
    /// Creates a Grid with `n_per_row` controls in each row, filled row by row.
    ///
    /// # Panics
    ///
    /// Panics if `n_per_row` is zero or does not evenly divide the number of
    /// controls.
    pub fn new(
        n_per_row: usize,
        controls: impl IntoIterator<Item = ControlRef>,
    ) -> Arc<Grid> {
        let controls: Vec<ControlRef> = controls.into_iter().collect();
        if n_per_row == 0 {
            panic!("Grid::new() called with zero controls per row");
        }
        if controls.len() % n_per_row != 0 {
            panic!(
                "incomplete grid given to Grid::new() ({} controls, {} per row)",
                controls.len(),
                n_per_row
            );
        }
        let n = controls.len();
        let rows = n / n_per_row;
        Arc::new(Grid {
            id: ControlId::next(),
            columns: n_per_row,
            controls,
            state: Mutex::new(GridState {
                created: false,
                filling: vec![false; n],
                stretchy: None,
                widths: vec![0; n],
                heights: vec![0; n],
                col_widths: vec![0; n_per_row],
                row_heights: vec![0; rows],
            }),
        })
    }

    pub fn rows(&self) -> usize {
        self.controls.len() / self.columns
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn control(&self, row: usize, column: usize) -> Option<&ControlRef> {
        if column >= self.columns {
            return None;
        }
        self.controls.get(row * self.columns + column)
    }

    /// Marks the control at the given cell as filling its whole cell.
    ///
    /// # Panics
    ///
    /// Panics once the Grid has been realized, or if the cell is out of range.
    pub fn set_filling(&self, row: usize, column: usize) {
        let mut state = self.state.lock();
        if state.created {
            panic!("Grid::set_filling() called on a Grid that has already been created");
        }
        let index = self.cell_index("Grid::set_filling()", row, column);
        state.filling[index] = true;
    }

    /// Marks the control at the given cell as the stretchy one. Only one cell
    /// can be stretchy; a later call replaces the earlier one.
    ///
    /// # Panics
    ///
    /// Panics once the Grid has been realized, or if the cell is out of range.
    pub fn set_stretchy(&self, row: usize, column: usize) {
        let mut state = self.state.lock();
        if state.created {
            panic!("Grid::set_stretchy() called on a Grid that has already been created");
        }
        let index = self.cell_index("Grid::set_stretchy()", row, column);
        state.stretchy = Some((row, column));
        state.filling[index] = true;
    }

    pub fn is_filling(&self, row: usize, column: usize) -> bool {
        if column >= self.columns {
            return false;
        }
        let state = self.state.lock();
        state
            .filling
            .get(row * self.columns + column)
            .copied()
            .unwrap_or(false)
    }

    pub fn stretchy(&self) -> Option<(usize, usize)> {
        self.state.lock().stretchy
    }

    fn cell_index(&self, caller: &str, row: usize, column: usize) -> usize {
        if row >= self.rows() || column >= self.columns {
            panic!("cell ({row}, {column}) out of range in {caller}");
        }
        row * self.columns + column
    }
}

impl GridState {
    /// Records every control's preferred size and derives the column widths
    /// and row heights from them.
    fn measure(&mut self, controls: &[ControlRef], columns: usize, d: &SizingContext) {
        self.col_widths.fill(0);
        self.row_heights.fill(0);
        for (i, control) in controls.iter().enumerate() {
            let (row, col) = (i / columns, i % columns);
            let preferred = control.preferred_size(d);
            self.widths[i] = preferred.width;
            self.heights[i] = preferred.height;
            self.row_heights[row] = self.row_heights[row].max(preferred.height);
            self.col_widths[col] = self.col_widths[col].max(preferred.width);
        }
    }
}

impl Control for Grid {
    fn id(&self) -> ControlId {
        self.id
    }

    fn make(&self, window: &WindowHandle) -> Result<()> {
        let mut state = self.state.lock();
        for (i, control) in self.controls.iter().enumerate() {
            control.make(window).map_err(|err| Error::MakeCell {
                row: i / self.columns,
                column: i % self.columns,
                source: Box::new(err),
            })?;
        }
        state.created = true;
        debug!(
            grid = %self.id,
            window = %window.id(),
            rows = self.rows(),
            columns = self.columns,
            "grid realized"
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

        let (xmargin, ymargin) = d.take_margins();
        x += xmargin;
        y += ymargin;
        width -= xmargin * 2;
        height -= ymargin * 2;
        width -= (self.columns as i32 - 1) * d.xpadding;
        height -= (self.rows() as i32 - 1) * d.ypadding;

        state.measure(&self.controls, self.columns, d);

        if let Some((stretchy_row, stretchy_col)) = state.stretchy {
            for (col, w) in state.col_widths.iter().enumerate() {
                if col != stretchy_col {
                    width -= w;
                }
            }
            for (row, h) in state.row_heights.iter().enumerate() {
                if row != stretchy_row {
                    height -= h;
                }
            }
            state.col_widths[stretchy_col] = width;
            state.row_heights[stretchy_row] = height;
        }

        let mut allocations: Vec<Allocation> = Vec::with_capacity(self.controls.len());
        let start_x = x;
        for (row, cells) in self.controls.chunks(self.columns).enumerate() {
            // neighbors never cross rows
            let mut current: Option<usize> = None;
            for (col, control) in cells.iter().enumerate() {
                let i = row * self.columns + col;
                let (w, h) = if state.filling[i] {
                    (state.col_widths[col], state.row_heights[row])
                } else {
                    (state.widths[i], state.heights[i])
                };
                let child = Arc::clone(control).allocate(x, y, w, h, d);
                if let Some(prev) = current {
                    allocations[prev].neighbor = Some(Arc::downgrade(control));
                }
                current = if child.is_empty() {
                    None
                } else {
                    Some(allocations.len())
                };
                allocations.extend(child);
                x += state.col_widths[col] + d.xpadding;
            }
            x = start_x;
            y += state.row_heights[row] + d.ypadding;
        }
        trace!(grid = %self.id, allocations = allocations.len(), "grid allocated");
        allocations
    }

    /// Column widths plus row heights plus padding. Filling and stretchiness
    /// are ignored; margins are not included.
    fn preferred_size(&self, d: &SizingContext) -> Size {
        if self.controls.is_empty() {
            return Size::ZERO;
        }
        let rows = self.rows();
        let mut col_widths = vec![0; self.columns];
        let mut row_heights = vec![0; rows];
        for (i, control) in self.controls.iter().enumerate() {
            let (row, col) = (i / self.columns, i % self.columns);
            let preferred = control.preferred_size(d);
            row_heights[row] = row_heights[row].max(preferred.height);
            col_widths[col] = col_widths[col].max(preferred.width);
        }
        Size::new(
            (self.columns as i32 - 1) * d.xpadding + col_widths.iter().sum::<i32>(),
            (rows as i32 - 1) * d.ypadding + row_heights.iter().sum::<i32>(),
        )
    }
}
