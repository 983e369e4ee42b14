use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use wayfront_core::Coord;

use crate::astar::AstarSearch;
use crate::error::SearchError;
use crate::greedy::GreedySearch;
use crate::heuristic::Heuristic;
use crate::step::StepResult;
use crate::traits::{GridView, Search};

/// Frontier-expansion strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    /// Cost-aware best-first search, `f = g + h`.
    #[default]
    AStar,
    /// Heuristic-only best-first search, `f = h`.
    Greedy,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::AStar => write!(f, "astar"),
            Algorithm::Greedy => write!(f, "greedy"),
        }
    }
}

/// Error returned when an algorithm name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown algorithm {:?}", self.0)
    }
}

impl std::error::Error for UnknownAlgorithm {}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "astar" | "a*" => Ok(Algorithm::AStar),
            "greedy" | "gbfs" => Ok(Algorithm::Greedy),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Which search to build and how it estimates distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    pub heuristic: Heuristic,
}

impl SearchConfig {
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }
}

/// Result of driving an engine with [`Engine::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The goal was reached along this path.
    Found(Vec<Coord>),
    /// No path exists.
    Exhausted,
    /// The expansion limit was hit before a terminal result.
    Halted,
}

/// A search of either kind, selected by [`SearchConfig`].
pub enum Engine<G> {
    AStar(AstarSearch<G>),
    Greedy(GreedySearch<G>),
}

impl<G: GridView> Engine<G> {
    /// Build a search over `grid` from `start` to `goal`.
    ///
    /// Fails if either endpoint is out of bounds or blocked.
    pub fn new(
        grid: G,
        start: Coord,
        goal: Coord,
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        Ok(match config.algorithm {
            Algorithm::AStar => Engine::AStar(AstarSearch::new(grid, start, goal, config.heuristic)?),
            Algorithm::Greedy => {
                Engine::Greedy(GreedySearch::new(grid, start, goal, config.heuristic)?)
            }
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Engine::AStar(_) => Algorithm::AStar,
            Engine::Greedy(_) => Algorithm::Greedy,
        }
    }

    pub fn config(&self) -> SearchConfig {
        let heuristic = match self {
            Engine::AStar(s) => s.heuristic(),
            Engine::Greedy(s) => s.heuristic(),
        };
        SearchConfig {
            algorithm: self.algorithm(),
            heuristic,
        }
    }

    /// The grid this engine reads from.
    pub fn grid(&self) -> &G {
        match self {
            Engine::AStar(s) => s.grid(),
            Engine::Greedy(s) => s.grid(),
        }
    }

    /// Step until a terminal result or until `limit` more expansions have
    /// been made.
    pub fn run(&mut self, limit: usize) -> Outcome {
        for _ in 0..limit {
            match self.step() {
                StepResult::Expanded { .. } => {}
                StepResult::Found { path, .. } => return Outcome::Found(path.to_vec()),
                StepResult::Exhausted { .. } => return Outcome::Exhausted,
            }
        }
        Outcome::Halted
    }

    /// Step until a terminal result.
    pub fn run_to_end(&mut self) -> Outcome {
        self.run(usize::MAX)
    }
}

impl<G: GridView> Search for Engine<G> {
    fn step(&mut self) -> StepResult<'_> {
        match self {
            Engine::AStar(s) => s.step(),
            Engine::Greedy(s) => s.step(),
        }
    }

    fn expansions(&self) -> usize {
        match self {
            Engine::AStar(s) => s.expansions(),
            Engine::Greedy(s) => s.expansions(),
        }
    }

    fn is_done(&self) -> bool {
        match self {
            Engine::AStar(s) => s.is_done(),
            Engine::Greedy(s) => s.is_done(),
        }
    }

    fn path(&self) -> &[Coord] {
        match self {
            Engine::AStar(s) => s.path(),
            Engine::Greedy(s) => s.path(),
        }
    }

    fn start(&self) -> Coord {
        match self {
            Engine::AStar(s) => s.start(),
            Engine::Greedy(s) => s.start(),
        }
    }

    fn goal(&self) -> Coord {
        match self {
            Engine::AStar(s) => s.goal(),
            Engine::Greedy(s) => s.goal(),
        }
    }

    fn visited(&self) -> &HashSet<Coord> {
        match self {
            Engine::AStar(s) => s.visited(),
            Engine::Greedy(s) => s.visited(),
        }
    }

    fn frontier(&self) -> &HashSet<Coord> {
        match self {
            Engine::AStar(s) => s.frontier(),
            Engine::Greedy(s) => s.frontier(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepKind;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};
    use std::collections::VecDeque;
    use wayfront_core::{Cell, Grid, MapText};

    const ALL_CONFIGS: [SearchConfig; 4] = [
        SearchConfig {
            algorithm: Algorithm::AStar,
            heuristic: Heuristic::Manhattan,
        },
        SearchConfig {
            algorithm: Algorithm::AStar,
            heuristic: Heuristic::Euclidean,
        },
        SearchConfig {
            algorithm: Algorithm::Greedy,
            heuristic: Heuristic::Manhattan,
        },
        SearchConfig {
            algorithm: Algorithm::Greedy,
            heuristic: Heuristic::Euclidean,
        },
    ];

    fn random_grid(rng: &mut StdRng, rows: i32, cols: i32, density: f64) -> Grid {
        let g = Grid::new(rows, cols);
        g.fill_fn(|_| {
            if rng.random_bool(density) {
                Cell::Blocked
            } else {
                Cell::Open
            }
        });
        g
    }

    /// Cells reachable from `start` through open cells.
    fn flood(g: &Grid, start: Coord) -> HashSet<Coord> {
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(c) = queue.pop_front() {
            for n in c.neighbors_4() {
                if GridView::is_passable(g, n) && seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        seen
    }

    #[test]
    fn config_selects_variant() {
        let g = Grid::new(3, 3);
        let cfg = SearchConfig::default()
            .with_algorithm(Algorithm::Greedy)
            .with_heuristic(Heuristic::Euclidean);
        let e = Engine::new(&g, Coord::ZERO, Coord::new(2, 2), cfg).unwrap();
        assert_eq!(e.algorithm(), Algorithm::Greedy);
        assert_eq!(e.config(), cfg);
        assert!(matches!(e, Engine::Greedy(_)));
        assert_eq!(e.grid().rows(), 3);
    }

    #[test]
    fn construction_rejects_bad_endpoints() {
        let g = Grid::new(3, 3);
        g.block(Coord::new(1, 1));
        for cfg in ALL_CONFIGS {
            assert!(matches!(
                Engine::new(&g, Coord::new(1, 1), Coord::ZERO, cfg),
                Err(SearchError::Blocked { .. })
            ));
            assert!(matches!(
                Engine::new(&g, Coord::ZERO, Coord::new(0, 3), cfg),
                Err(SearchError::OutOfBounds { .. })
            ));
        }
    }

    #[test]
    fn run_halts_at_limit_and_resumes() {
        let g = Grid::new(5, 5);
        let mut e =
            Engine::new(&g, Coord::new(4, 0), Coord::new(0, 4), SearchConfig::default()).unwrap();
        assert_eq!(e.run(3), Outcome::Halted);
        assert_eq!(e.expansions(), 3);
        assert!(!e.is_done());
        let Outcome::Found(path) = e.run_to_end() else {
            panic!("expected a path");
        };
        assert_eq!(path.len(), 9);
        assert!(e.is_done());
        assert_eq!(e.path_cost(), Some(8));
    }

    #[test]
    fn run_reports_exhausted() {
        let m = MapText::parse("S#G").unwrap();
        for cfg in ALL_CONFIGS {
            let mut e = Engine::new(&m.grid, m.start.unwrap(), m.goal.unwrap(), cfg).unwrap();
            assert_eq!(e.run_to_end(), Outcome::Exhausted);
            assert_eq!(e.expansions(), 1);
            assert_eq!(e.step().kind(), StepKind::Exhausted);
        }
    }

    #[test]
    fn wall_gap_scenario_for_every_config() {
        let m = MapText::parse(
            "\
....G
.....
##.##
.....
S....",
        )
        .unwrap();
        for cfg in ALL_CONFIGS {
            let mut e = Engine::new(&m.grid, m.start.unwrap(), m.goal.unwrap(), cfg).unwrap();
            e.run_to_end();
            assert!(e.notify_obstacle(Coord::new(2, 2)), "{cfg:?}");
            assert!(!e.notify_obstacle(Coord::new(2, 0)));
        }
    }

    #[test]
    fn astar_never_longer_than_greedy_on_random_grids() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut compared = 0;
        for _ in 0..200 {
            let g = random_grid(&mut rng, 12, 15, 0.3);
            let start = Coord::new(11, 0);
            let goal = Coord::new(0, 14);
            g.set(start, Cell::Open);
            g.set(goal, Cell::Open);
            for h in [Heuristic::Manhattan, Heuristic::Euclidean] {
                let cfg = SearchConfig::default().with_heuristic(h);
                let mut a = Engine::new(&g, start, goal, cfg).unwrap();
                let mut b =
                    Engine::new(&g, start, goal, cfg.with_algorithm(Algorithm::Greedy)).unwrap();
                match (a.run_to_end(), b.run_to_end()) {
                    (Outcome::Found(pa), Outcome::Found(pb)) => {
                        assert!(pa.len() <= pb.len());
                        compared += 1;
                    }
                    (Outcome::Exhausted, Outcome::Exhausted) => {}
                    other => panic!("variants disagree on reachability: {other:?}"),
                }
            }
        }
        assert!(compared > 0);
    }

    #[test]
    fn visited_cells_are_reachable_and_paths_valid() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let g = random_grid(&mut rng, 10, 10, 0.35);
            let start = Coord::new(rng.random_range(0..10), rng.random_range(0..10));
            let goal = Coord::new(rng.random_range(0..10), rng.random_range(0..10));
            g.set(start, Cell::Open);
            g.set(goal, Cell::Open);
            let reachable = flood(&g, start);
            for cfg in ALL_CONFIGS {
                let mut e = Engine::new(&g, start, goal, cfg).unwrap();
                let mut count = 0;
                loop {
                    let r = e.step();
                    let snap = r.snapshot();
                    assert!(snap.visited.is_subset(&reachable));
                    if r.kind() != StepKind::Exhausted {
                        count += 1;
                    }
                    assert_eq!(snap.visited.len(), count);
                    if r.is_terminal() {
                        break;
                    }
                }
                if reachable.contains(&goal) {
                    let path = e.path();
                    assert_eq!(path.first(), Some(&start));
                    assert_eq!(path.last(), Some(&goal));
                    for w in path.windows(2) {
                        assert!(w[0].is_adjacent(w[1]));
                    }
                    assert!(path.iter().all(|&c| GridView::is_passable(&g, c)));
                } else {
                    // Every reachable cell visited once, then nothing left.
                    assert!(e.path().is_empty());
                    assert_eq!(e.visited(), &reachable);
                }
            }
        }
    }

    #[test]
    fn parse_names() {
        assert_eq!("A*".parse(), Ok(Algorithm::AStar));
        assert_eq!("greedy".parse(), Ok(Algorithm::Greedy));
        let err = "dijkstra".parse::<Algorithm>().unwrap_err();
        assert_eq!(err.to_string(), r#"unknown algorithm "dijkstra""#);
        assert_eq!(Algorithm::Greedy.to_string(), "greedy");
    }
}
