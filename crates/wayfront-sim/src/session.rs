//! A headless search-and-walk session with dynamic obstacles.
//!
//! [`Session`] owns one handle on the [`Grid`] and hands another to each
//! engine it builds. Search steps, agent moves and obstacle placement happen
//! strictly one after another, so the engine only ever sees the grid between
//! steps. When a new obstacle lands on the part of the path the agent has not
//! walked yet, the current engine is dropped and a fresh one starts from the
//! agent's cell.

use std::fmt;

use rand::{Rng, RngExt};
use wayfront_core::{Cell, Coord, Grid};
use wayfront_paths::{Engine, Search, SearchConfig, SearchError, StepKind};

use crate::agent::Agent;

/// Where the session is in its search / walk cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Status {
    #[default]
    Idle,
    /// An engine is expanding cells.
    Running,
    /// A path was found and the agent is walking it.
    Moving,
    /// The agent stands on the goal.
    Arrived,
    /// The last search exhausted its frontier.
    NoPath,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Idle => "idle",
            Status::Running => "running",
            Status::Moving => "moving",
            Status::Arrived => "arrived",
            Status::NoPath => "no path",
        };
        f.write_str(s)
    }
}

/// Counters for the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    /// Expansions made by the current engine.
    pub nodes_visited: usize,
    /// Moves in the last found path.
    pub path_cost: usize,
    /// Engines discarded because an obstacle cut their path.
    pub replans: usize,
}

/// Session settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    pub search: SearchConfig,
    /// Chance per [`Session::tick`] that a random obstacle appears.
    pub obstacle_rate: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            obstacle_rate: 0.02,
        }
    }
}

/// Something that happened during one session call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Expanded(Coord),
    Found { cost: usize },
    NoPath,
    Moved(Coord),
    Arrived,
    /// An obstacle at `obstacle` cut the path; a new search starts at `from`.
    Replanned { obstacle: Coord, from: Coord },
}

/// Errors returned by [`Session`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Building an engine failed.
    Search(SearchError),
    /// The cell is outside the grid or already blocked.
    NotOpen(Coord),
    /// The cell is the start or the goal.
    Endpoint(Coord),
    /// The agent stands on the cell.
    Occupied(Coord),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Search(e) => write!(f, "search: {e}"),
            Self::NotOpen(c) => write!(f, "cell {c} is not open"),
            Self::Endpoint(c) => write!(f, "cell {c} is an endpoint"),
            Self::Occupied(c) => write!(f, "cell {c} is occupied by the agent"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Search(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SearchError> for SessionError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

/// Drives an [`Engine`] and an [`Agent`] over a shared grid.
pub struct Session {
    grid: Grid,
    start: Coord,
    goal: Coord,
    config: SessionConfig,
    engine: Option<Engine<Grid>>,
    agent: Option<Agent>,
    status: Status,
    metrics: Metrics,
}

impl Session {
    /// Create an idle session. Endpoints are checked by [`start`](Self::start).
    pub fn new(grid: Grid, start: Coord, goal: Coord, config: SessionConfig) -> Self {
        Self {
            grid,
            start,
            goal,
            config,
            engine: None,
            agent: None,
            status: Status::Idle,
            metrics: Metrics::default(),
        }
    }

    /// Begin a fresh search from the configured start.
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.metrics = Metrics::default();
        self.launch(self.start)
    }

    fn launch(&mut self, from: Coord) -> Result<(), SessionError> {
        let engine = Engine::new(self.grid.clone(), from, self.goal, self.config.search)?;
        self.engine = Some(engine);
        // The agent waits on the new start until a path is found.
        self.agent = Some(Agent::at(from));
        self.status = Status::Running;
        self.metrics.nodes_visited = 0;
        self.metrics.path_cost = 0;
        Ok(())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub fn engine(&self) -> Option<&Engine<Grid>> {
        self.engine.as_ref()
    }

    pub fn agent(&self) -> Option<&Agent> {
        self.agent.as_ref()
    }

    /// Advance the search by one expansion. Does nothing unless running.
    pub fn step_search(&mut self) -> Option<SessionEvent> {
        if self.status != Status::Running {
            return None;
        }
        let engine = self.engine.as_mut()?;
        let (kind, current, path) = {
            let r = engine.step();
            (r.kind(), r.current(), r.path().to_vec())
        };
        self.metrics.nodes_visited = engine.expansions();

        match kind {
            StepKind::Expanded => current.map(SessionEvent::Expanded),
            StepKind::Found => {
                let cost = path.len().saturating_sub(1);
                self.metrics.path_cost = cost;
                self.agent = Agent::follow(&path);
                self.status = if cost == 0 {
                    Status::Arrived
                } else {
                    Status::Moving
                };
                Some(SessionEvent::Found { cost })
            }
            StepKind::Exhausted => {
                self.status = Status::NoPath;
                Some(SessionEvent::NoPath)
            }
        }
    }

    /// Move the agent one cell. Does nothing unless walking.
    pub fn advance_agent(&mut self) -> Option<SessionEvent> {
        if self.status != Status::Moving {
            return None;
        }
        let agent = self.agent.as_mut()?;
        let pos = agent.advance()?;
        if agent.has_arrived() {
            self.status = Status::Arrived;
            return Some(SessionEvent::Arrived);
        }
        Some(SessionEvent::Moved(pos))
    }

    /// Close `cell`, re-planning if it cuts the path still ahead.
    ///
    /// Returns whether a new search was started.
    pub fn add_obstacle(&mut self, cell: Coord) -> Result<bool, SessionError> {
        if cell == self.start || cell == self.goal {
            return Err(SessionError::Endpoint(cell));
        }
        if self.agent.as_ref().is_some_and(|a| a.position() == cell) {
            return Err(SessionError::Occupied(cell));
        }
        if self.grid.at(cell) != Some(Cell::Open) {
            return Err(SessionError::NotOpen(cell));
        }
        self.grid.block(cell);

        let Some(engine) = &self.engine else {
            return Ok(false);
        };
        let cuts_path = engine.notify_obstacle(cell)
            && self.agent.as_ref().is_none_or(|a| a.is_ahead(cell));
        if !cuts_path {
            log::debug!("obstacle at {cell} leaves the path intact");
            return Ok(false);
        }

        let from = self.agent.as_ref().map_or(engine.start(), Agent::position);
        log::info!("obstacle at {cell} cuts the path, re-planning from {from}");
        if let Err(e) = self.launch(from) {
            self.grid.set(cell, Cell::Open);
            return Err(e);
        }
        self.metrics.replans += 1;
        Ok(true)
    }

    /// With probability `obstacle_rate`, close a random open cell.
    ///
    /// Only acts while searching or walking. Cells that cannot take an
    /// obstacle are skipped silently, like a missed roll.
    pub fn spawn_random_obstacle(
        &mut self,
        rng: &mut impl Rng,
    ) -> Result<Option<SessionEvent>, SessionError> {
        if !matches!(self.status, Status::Running | Status::Moving) {
            return Ok(None);
        }
        let rate = if self.config.obstacle_rate.is_nan() {
            0.0
        } else {
            self.config.obstacle_rate.clamp(0.0, 1.0)
        };
        if self.grid.area().is_empty() || !rng.random_bool(rate) {
            return Ok(None);
        }
        let cell = Coord::new(
            rng.random_range(0..self.grid.rows()),
            rng.random_range(0..self.grid.cols()),
        );
        match self.add_obstacle(cell) {
            Ok(true) => Ok(Some(SessionEvent::Replanned {
                obstacle: cell,
                from: self.engine.as_ref().map_or(self.start, |e| e.start()),
            })),
            Ok(false) => Ok(None),
            Err(SessionError::NotOpen(_) | SessionError::Endpoint(_) | SessionError::Occupied(_)) => {
                log::trace!("random obstacle at {cell} skipped");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// One round: maybe spawn an obstacle, then step the search or the
    /// agent.
    pub fn tick(&mut self, rng: &mut impl Rng) -> Result<Option<SessionEvent>, SessionError> {
        if let Some(event) = self.spawn_random_obstacle(rng)? {
            return Ok(Some(event));
        }
        Ok(match self.status {
            Status::Running => self.step_search(),
            Status::Moving => self.advance_agent(),
            Status::Idle | Status::Arrived | Status::NoPath => None,
        })
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_defaults_fill_missing_fields() {
        let cfg: SessionConfig = serde_json::from_str(r#"{"obstacle_rate":0.5}"#).unwrap();
        assert_eq!(cfg.obstacle_rate, 0.5);
        assert_eq!(cfg.search, SearchConfig::default());
    }

    #[test]
    fn status_names() {
        assert_eq!(serde_json::to_string(&Status::NoPath).unwrap(), r#""no_path""#);
        let s: Status = serde_json::from_str(r#""moving""#).unwrap();
        assert_eq!(s, Status::Moving);
    }
}
