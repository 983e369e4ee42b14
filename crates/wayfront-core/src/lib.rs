//! **wayfront-core**: shared types for stepwise grid pathfinding.
//!
//! This crate provides the foundational types used across the *wayfront*
//! crates: `(row, col)` coordinates, the occupancy grid that searches read
//! from, and a small ASCII map format.

pub mod geom;
pub mod grid;
pub mod map;

pub use geom::{Area, Coord};
pub use grid::{Cell, Grid};
pub use map::{MapError, MapText};
