//! Interruptible pathfinding on 2D grids.
//!
//! This crate provides two best-first searches that advance one expansion per
//! call, so a caller can watch the search unfold, pause it, or add obstacles
//! between steps:
//!
//! - **A\*** ([`AstarSearch`]): `f = g + h`, returns a shortest path.
//! - **Greedy best-first** ([`GreedySearch`]): `f = h`, usually expands fewer
//!   cells but may return a longer path.
//!
//! Both read the map through [`GridView`] and share the [`Search`] interface.
//! [`Engine`] picks one of them from a [`SearchConfig`].
//!
//! ```
//! use wayfront_core::{Coord, Grid};
//! use wayfront_paths::{Engine, Search, SearchConfig, StepResult};
//!
//! let grid = Grid::new(5, 5);
//! let mut engine = Engine::new(&grid, Coord::new(4, 0), Coord::new(0, 4), SearchConfig::default())?;
//! loop {
//!     match engine.step() {
//!         StepResult::Expanded { .. } => continue,
//!         StepResult::Found { path, .. } => {
//!             assert_eq!(path.len() - 1, 8);
//!             break;
//!         }
//!         StepResult::Exhausted { .. } => unreachable!(),
//!     }
//! }
//! # Ok::<(), wayfront_paths::SearchError>(())
//! ```
//!
//! # Re-planning
//!
//! A search never mutates the grid. When the caller closes a cell it asks
//! [`Search::notify_obstacle`]; a `true` answer means the found path crosses
//! that cell and the caller should build a fresh engine from wherever its
//! agent stands.

mod astar;
mod engine;
mod error;
mod frontier;
mod greedy;
mod heuristic;
mod neighbors;
mod step;
mod traits;

pub use astar::AstarSearch;
pub use engine::{Algorithm, Engine, Outcome, SearchConfig, UnknownAlgorithm};
pub use error::{Endpoint, SearchError};
pub use greedy::GreedySearch;
pub use heuristic::{Heuristic, UnknownHeuristic, euclidean, manhattan};
pub use neighbors::Neighbors;
pub use step::{Snapshot, StepKind, StepResult};
pub use traits::{GridView, Search};
