use std::collections::HashSet;

use wayfront_core::{Coord, Grid};

use crate::step::StepResult;

/// Read-only traversability query consumed by the searches.
pub trait GridView {
    /// Number of rows.
    fn rows(&self) -> i32;

    /// Number of columns.
    fn cols(&self) -> i32;

    /// Whether `c` cannot be entered. Only called for in-bounds coordinates.
    fn is_blocked(&self, c: Coord) -> bool;

    /// Whether `c` lies inside the grid.
    fn contains(&self, c: Coord) -> bool {
        c.row >= 0 && c.col >= 0 && c.row < self.rows() && c.col < self.cols()
    }

    /// Whether `c` lies inside the grid and is not blocked.
    fn is_passable(&self, c: Coord) -> bool {
        self.contains(c) && !self.is_blocked(c)
    }
}

impl GridView for Grid {
    fn rows(&self) -> i32 {
        Grid::rows(self)
    }

    fn cols(&self) -> i32 {
        Grid::cols(self)
    }

    fn is_blocked(&self, c: Coord) -> bool {
        Grid::is_blocked(self, c)
    }
}

impl<G: GridView + ?Sized> GridView for &G {
    fn rows(&self) -> i32 {
        (**self).rows()
    }

    fn cols(&self) -> i32 {
        (**self).cols()
    }

    fn is_blocked(&self, c: Coord) -> bool {
        (**self).is_blocked(c)
    }
}

/// Capability set shared by every stepwise search.
pub trait Search {
    /// Perform one expansion (or report the terminal outcome).
    ///
    /// Once a terminal result has been produced, further calls return it
    /// again without touching any state.
    fn step(&mut self) -> StepResult<'_>;

    /// Whether an obstacle placed at `cell` invalidates the last found path.
    fn notify_obstacle(&self, cell: Coord) -> bool {
        self.path().contains(&cell)
    }

    /// Number of accepted expansions so far.
    fn expansions(&self) -> usize;

    /// Whether a terminal result has been produced.
    fn is_done(&self) -> bool;

    /// The reconstructed path, empty until the goal is found.
    fn path(&self) -> &[Coord];

    /// Where the search started.
    fn start(&self) -> Coord;

    /// Where the search is heading.
    fn goal(&self) -> Coord;

    /// Fully expanded coordinates.
    fn visited(&self) -> &HashSet<Coord>;

    /// Coordinates waiting in the frontier.
    fn frontier(&self) -> &HashSet<Coord>;

    /// Number of moves in the found path.
    fn path_cost(&self) -> Option<usize> {
        self.path().len().checked_sub(1)
    }
}
