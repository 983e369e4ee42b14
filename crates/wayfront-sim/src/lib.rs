//! Headless driver for wayfront searches: random obstacles, an agent that
//! walks the found path, and re-planning when the path gets cut.

pub mod agent;
pub mod mapgen;
pub mod session;

pub use agent::Agent;
pub use mapgen::{MapGen, scatter_obstacles};
pub use session::{Metrics, Session, SessionConfig, SessionError, SessionEvent, Status};
