//! An occupancy grid of open and blocked cells.
//!
//! [`Grid`] keeps its cells in a shared backing buffer (`Rc<RefCell<...>>`):
//! cloning a grid hands out another view on the same cells. A search engine
//! holds one handle while the caller keeps another and may add obstacles
//! between steps.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::geom::{Area, Coord};

/// Traversability of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Open,
    Blocked,
}

impl Cell {
    /// Whether the cell can be entered.
    #[inline]
    pub const fn is_open(self) -> bool {
        matches!(self, Cell::Open)
    }

    /// ASCII form used by [`Grid`]'s `Display` and the map text format.
    pub const fn glyph(self) -> char {
        match self {
            Cell::Open => '.',
            Cell::Blocked => '#',
        }
    }
}

/// A `rows × cols` grid of [`Cell`] values with shared storage.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Rc<RefCell<Vec<Cell>>>,
    area: Area,
}

impl Grid {
    /// Create a new grid with every cell open.
    ///
    /// Negative dimensions are treated as zero.
    pub fn new(rows: i32, cols: i32) -> Self {
        let area = Area::new(rows.max(0), cols.max(0));
        Self {
            cells: Rc::new(RefCell::new(vec![Cell::Open; area.len()])),
            area,
        }
    }

    /// Returns the area covered by this grid.
    pub fn area(&self) -> Area {
        self.area
    }

    /// Number of rows.
    pub fn rows(&self) -> i32 {
        self.area.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> i32 {
        self.area.cols
    }

    /// Whether the grid contains the given coordinate.
    pub fn contains(&self, c: Coord) -> bool {
        self.area.contains(c)
    }

    /// Whether two handles share the same backing cells.
    pub fn shares_cells(&self, other: &Grid) -> bool {
        Rc::ptr_eq(&self.cells, &other.cells)
    }

    /// Get the cell at a coordinate, or `None` if out of bounds.
    pub fn at(&self, c: Coord) -> Option<Cell> {
        let idx = self.area.index(c)?;
        Some(self.cells.borrow()[idx])
    }

    /// Whether `c` cannot be entered. Out-of-bounds coordinates count as
    /// blocked.
    pub fn is_blocked(&self, c: Coord) -> bool {
        !matches!(self.at(c), Some(Cell::Open))
    }

    /// Set the cell at a coordinate. Does nothing if out of bounds.
    pub fn set(&self, c: Coord, cell: Cell) {
        if let Some(idx) = self.area.index(c) {
            self.cells.borrow_mut()[idx] = cell;
        }
    }

    /// Block a cell. Returns `true` if it was open before.
    pub fn block(&self, c: Coord) -> bool {
        let was_open = self.at(c) == Some(Cell::Open);
        self.set(c, Cell::Blocked);
        was_open
    }

    /// Fill the whole grid with the given cell.
    pub fn fill(&self, cell: Cell) {
        self.cells.borrow_mut().fill(cell);
    }

    /// Fill the grid using a function of each coordinate.
    pub fn fill_fn(&self, mut f: impl FnMut(Coord) -> Cell) {
        let mut cells = self.cells.borrow_mut();
        for (slot, c) in cells.iter_mut().zip(self.area.iter()) {
            *slot = f(c);
        }
    }

    /// Count how many cells equal the given cell.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.borrow().iter().filter(|&&c| c == cell).count()
    }

    /// Iterate over `(Coord, Cell)` pairs in row-major order.
    ///
    /// The iterator works on a snapshot, so the grid may be mutated while
    /// iterating.
    pub fn iter(&self) -> GridIter {
        let items: Vec<(Coord, Cell)> = self
            .area
            .iter()
            .zip(self.cells.borrow().iter().copied())
            .collect();
        GridIter {
            items: items.into_iter(),
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = self.cells.borrow();
        for (i, row) in cells.chunks(self.area.cols.max(1) as usize).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
        }
        Ok(())
    }
}

/// Iterator over (Coord, Cell) pairs of a Grid snapshot.
pub struct GridIter {
    items: std::vec::IntoIter<(Coord, Cell)>,
}

impl Iterator for GridIter {
    type Item = (Coord, Cell);

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl ExactSizeIterator for GridIter {}

impl IntoIterator for &Grid {
    type Item = (Coord, Cell);
    type IntoIter = GridIter;

    fn into_iter(self) -> GridIter {
        self.iter()
    }
}
