use std::collections::{HashMap, HashSet};

use wayfront_core::Coord;

use crate::error::{SearchError, check_endpoints};
use crate::frontier::Frontier;
use crate::heuristic::Heuristic;
use crate::neighbors::Neighbors;
use crate::step::{Snapshot, StepResult, Terminal, reconstruct_path};
use crate::traits::{GridView, Search};

/// Interruptible A* search.
///
/// Every call to [`step`](Search::step) accepts exactly one node. The frontier
/// is ordered by `f = g + h`, ties broken by smaller `g` and then by
/// insertion order. Each move costs 1, so with an admissible heuristic the
/// first `Found` carries a shortest path.
pub struct AstarSearch<G> {
    grid: G,
    start: Coord,
    goal: Coord,
    heuristic: Heuristic,
    frontier: Frontier,
    visited: HashSet<Coord>,
    parents: HashMap<Coord, Coord>,
    best_g: HashMap<Coord, u32>,
    expansions: usize,
    terminal: Option<Terminal>,
    path: Vec<Coord>,
    nbuf: Neighbors,
}

impl<G: GridView> AstarSearch<G> {
    /// Create a search from `start` to `goal`, seeding the frontier with the
    /// start.
    pub fn new(
        grid: G,
        start: Coord,
        goal: Coord,
        heuristic: Heuristic,
    ) -> Result<Self, SearchError> {
        check_endpoints(&grid, start, goal)?;
        log::debug!("astar: {start} -> {goal} using {heuristic}");

        let mut frontier = Frontier::new();
        frontier.push(start, heuristic.estimate(start, goal), 0);
        Ok(Self {
            grid,
            start,
            goal,
            heuristic,
            frontier,
            visited: HashSet::new(),
            parents: HashMap::new(),
            best_g: HashMap::from([(start, 0)]),
            expansions: 0,
            terminal: None,
            path: Vec::new(),
            nbuf: Neighbors::new(),
        })
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    /// Best accumulated cost discovered so far for `c`.
    pub fn best_cost(&self, c: Coord) -> Option<u32> {
        self.best_g.get(&c).copied()
    }

    /// The grid this search reads from.
    pub fn grid(&self) -> &G {
        &self.grid
    }

    fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            visited: &self.visited,
            frontier: self.frontier.members(),
        }
    }

    fn terminal_result(&self, terminal: Terminal) -> StepResult<'_> {
        match terminal {
            Terminal::Found => StepResult::Found {
                current: self.goal,
                path: &self.path,
                snapshot: self.snapshot(),
            },
            Terminal::Exhausted => StepResult::Exhausted {
                snapshot: self.snapshot(),
            },
        }
    }

    /// Relax the passable, unvisited neighbors of `current`.
    fn relax(&mut self, current: Coord, g: u32) {
        let grid = &self.grid;
        let visited = &self.visited;
        let neighbors = self
            .nbuf
            .cardinal(current, |n| grid.is_passable(n) && !visited.contains(&n));

        let tentative_g = g + 1;
        for &n in neighbors {
            if self.best_g.get(&n).is_some_and(|&known| tentative_g >= known) {
                continue;
            }
            self.parents.insert(n, current);
            self.best_g.insert(n, tentative_g);
            let f = f64::from(tentative_g) + self.heuristic.estimate(n, self.goal);
            self.frontier.push(n, f, tentative_g);
        }
    }
}

impl<G: GridView> Search for AstarSearch<G> {
    fn step(&mut self) -> StepResult<'_> {
        if let Some(terminal) = self.terminal {
            return self.terminal_result(terminal);
        }

        loop {
            let Some(entry) = self.frontier.pop() else {
                log::debug!(
                    "astar: no path {} -> {} after {} expansions",
                    self.start,
                    self.goal,
                    self.expansions
                );
                self.terminal = Some(Terminal::Exhausted);
                return self.terminal_result(Terminal::Exhausted);
            };

            let current = entry.coord;
            // Stale entry: the node was accepted through a cheaper push.
            if !self.visited.insert(current) {
                continue;
            }
            self.frontier.settle(current);
            self.expansions += 1;

            if current == self.goal {
                self.path = reconstruct_path(&self.parents, self.start, self.goal);
                log::debug!(
                    "astar: found path of {} moves after {} expansions",
                    self.path.len() - 1,
                    self.expansions
                );
                self.terminal = Some(Terminal::Found);
                return self.terminal_result(Terminal::Found);
            }

            self.relax(current, entry.g);
            log::trace!("astar: expanded {current} (g = {}, f = {})", entry.g, entry.priority);
            return StepResult::Expanded {
                current,
                snapshot: self.snapshot(),
            };
        }
    }

    fn expansions(&self) -> usize {
        self.expansions
    }

    fn is_done(&self) -> bool {
        self.terminal.is_some()
    }

    fn path(&self) -> &[Coord] {
        &self.path
    }

    fn start(&self) -> Coord {
        self.start
    }

    fn goal(&self) -> Coord {
        self.goal
    }

    fn visited(&self) -> &HashSet<Coord> {
        &self.visited
    }

    fn frontier(&self) -> &HashSet<Coord> {
        self.frontier.members()
    }
}
