//! Windowed Diagonal Traversal
//!
//! Walks the diamond-shaped block of grid cells that an isometric viewport
//! covers, instead of the whole grid. Each row runs along one screen
//! diagonal (`x += 1, y += 1`); between rows the scan origin zig-zags:
//! odd rows bump `start_y`, even rows drop `start_x`.
//!
//! ```text
//! start = (3, 1), width = 4, height = 4
//!
//!  row 0: (3,1) (4,2) (5,3) (6,4)
//!  row 1: (3,2) (4,3) (5,4) (6,5)
//!  row 2: (2,2) (3,3) (4,4) (5,5)
//!  row 3: (2,3) (3,4) (4,5) (5,6)
//! ```
//!
//! No bounds checking: callers skip cells outside their grid.

/// One visited cell: position inside the window and position in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCell {
    pub local_x: i32,
    pub local_y: i32,
    pub grid_x: i32,
    pub grid_y: i32,
}

/// A `width x height` diagonal window anchored at `(start_x, start_y)`.
///
/// The window is plain data; `iter()` can be called any number of times and
/// every call restarts the walk from the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagonalWindow {
    pub start_x: i32,
    pub start_y: i32,
    pub width: i32,
    pub height: i32,
}

impl DiagonalWindow {
    pub const fn new(start_x: i32, start_y: i32, width: i32, height: i32) -> Self {
        Self { start_x, start_y, width, height }
    }

    /// Number of cells the traversal yields.
    pub fn len(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> DiagonalIter {
        DiagonalIter {
            window: *self,
            row_x: self.start_x,
            row_y: self.start_y,
            i: 0,
            j: 0,
        }
    }
}

impl IntoIterator for DiagonalWindow {
    type Item = WindowCell;
    type IntoIter = DiagonalIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &DiagonalWindow {
    type Item = WindowCell;
    type IntoIter = DiagonalIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over a `DiagonalWindow`.
#[derive(Debug, Clone)]
pub struct DiagonalIter {
    window: DiagonalWindow,
    /// Scan origin of the current row
    row_x: i32,
    row_y: i32,
    /// Step along the current row
    i: i32,
    /// Current row
    j: i32,
}

impl Iterator for DiagonalIter {
    type Item = WindowCell;

    fn next(&mut self) -> Option<WindowCell> {
        if self.window.width <= 0 {
            return None;
        }

        if self.i >= self.window.width {
            self.i = 0;
            self.j += 1;
            if self.j % 2 == 0 {
                self.row_x -= 1;
            } else {
                self.row_y += 1;
            }
        }

        if self.j >= self.window.height {
            return None;
        }

        let cell = WindowCell {
            local_x: self.i,
            local_y: self.j,
            grid_x: self.row_x + self.i,
            grid_y: self.row_y + self.i,
        };
        self.i += 1;
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let w = self.window.width.max(0) as usize;
        let h = self.window.height.max(0) as usize;
        let done = (self.j.max(0) as usize) * w + self.i.max(0) as usize;
        let left = (w * h).saturating_sub(done);
        (left, Some(left))
    }
}
