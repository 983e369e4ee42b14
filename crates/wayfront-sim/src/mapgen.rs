//! Random obstacle placement.

use rand::{Rng, RngExt};
use wayfront_core::{Cell, Coord, Grid};

/// Map generator operating on a [`Grid`].
pub struct MapGen<R: Rng> {
    pub rng: R,
    pub grid: Grid,
}

impl<R: Rng> MapGen<R> {
    /// Create a new MapGen with the given grid.
    pub fn with_grid(grid: Grid, rng: R) -> Self {
        Self { rng, grid }
    }

    /// Re-roll every cell: blocked with probability `density`, open
    /// otherwise. Cells listed in `keep_open` are always left open.
    ///
    /// `density` is clamped to `[0, 1]`; NaN counts as 0. Returns the number
    /// of blocked cells.
    pub fn scatter(&mut self, density: f64, keep_open: &[Coord]) -> usize {
        scatter_obstacles(&self.grid, density, keep_open, &mut self.rng)
    }
}

/// Free-function form of [`MapGen::scatter`].
pub fn scatter_obstacles(
    grid: &Grid,
    density: f64,
    keep_open: &[Coord],
    rng: &mut impl Rng,
) -> usize {
    let p = if density.is_nan() {
        0.0
    } else {
        density.clamp(0.0, 1.0)
    };
    let mut blocked = 0;
    grid.fill_fn(|c| {
        if !keep_open.contains(&c) && rng.random_bool(p) {
            blocked += 1;
            Cell::Blocked
        } else {
            Cell::Open
        }
    });
    log::debug!("scattered {blocked} obstacles at density {p}");
    blocked
}
