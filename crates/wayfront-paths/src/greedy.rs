use std::collections::{HashMap, HashSet};

use wayfront_core::Coord;

use crate::error::{SearchError, check_endpoints};
use crate::frontier::Frontier;
use crate::heuristic::Heuristic;
use crate::neighbors::Neighbors;
use crate::step::{Snapshot, StepResult, Terminal, reconstruct_path};
use crate::traits::{GridView, Search};

/// Interruptible greedy best-first search.
///
/// The frontier is ordered by the heuristic alone (ties in insertion order).
/// A cell is pushed once, on first discovery, and keeps the parent that
/// discovered it. This is usually quicker than A* but the path it returns
/// may be longer than necessary.
pub struct GreedySearch<G> {
    grid: G,
    start: Coord,
    goal: Coord,
    heuristic: Heuristic,
    frontier: Frontier,
    visited: HashSet<Coord>,
    parents: HashMap<Coord, Coord>,
    expansions: usize,
    terminal: Option<Terminal>,
    path: Vec<Coord>,
    nbuf: Neighbors,
}

impl<G: GridView> GreedySearch<G> {
    /// Create a search from `start` to `goal`, seeding the frontier with the
    /// start.
    pub fn new(
        grid: G,
        start: Coord,
        goal: Coord,
        heuristic: Heuristic,
    ) -> Result<Self, SearchError> {
        check_endpoints(&grid, start, goal)?;
        log::debug!("greedy: {start} -> {goal} using {heuristic}");

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
            expansions: 0,
            terminal: None,
            path: Vec::new(),
            nbuf: Neighbors::new(),
        })
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
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

    /// Push every passable neighbor that is neither visited nor queued.
    fn discover(&mut self, current: Coord) {
        let grid = &self.grid;
        let visited = &self.visited;
        let frontier = &self.frontier;
        let neighbors = self.nbuf.cardinal(current, |n| {
            grid.is_passable(n) && !visited.contains(&n) && !frontier.contains(n)
        });

        for &n in neighbors {
            self.parents.insert(n, current);
            self.frontier
                .push(n, self.heuristic.estimate(n, self.goal), 0);
        }
    }
}

impl<G: GridView> Search for GreedySearch<G> {
    fn step(&mut self) -> StepResult<'_> {
        if let Some(terminal) = self.terminal {
            return self.terminal_result(terminal);
        }

        loop {
            let Some(entry) = self.frontier.pop() else {
                log::debug!(
                    "greedy: no path {} -> {} after {} expansions",
                    self.start,
                    self.goal,
                    self.expansions
                );
                self.terminal = Some(Terminal::Exhausted);
                return self.terminal_result(Terminal::Exhausted);
            };

            let current = entry.coord;
            if !self.visited.insert(current) {
                continue;
            }
            self.frontier.settle(current);
            self.expansions += 1;

            if current == self.goal {
                self.path = reconstruct_path(&self.parents, self.start, self.goal);
                log::debug!(
                    "greedy: found path of {} moves after {} expansions",
                    self.path.len() - 1,
                    self.expansions
                );
                self.terminal = Some(Terminal::Found);
                return self.terminal_result(Terminal::Found);
            }

            self.discover(current);
            log::trace!("greedy: expanded {current} (h = {})", entry.priority);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astar::AstarSearch;
    use crate::step::StepKind;
    use wayfront_core::{Grid, MapText};

    fn run<G: GridView>(s: &mut GreedySearch<G>) -> StepKind {
        loop {
            let r = s.step();
            if r.is_terminal() {
                return r.kind();
            }
        }
    }

    #[test]
    fn heads_straight_for_the_goal_on_open_grid() {
        let g = Grid::new(5, 5);
        let mut s =
            GreedySearch::new(&g, Coord::new(4, 0), Coord::new(0, 4), Heuristic::Manhattan)
                .unwrap();
        assert_eq!(run(&mut s), StepKind::Found);
        // Nothing distracts the greedy walk, so it only expands path cells.
        assert_eq!(s.path_cost(), Some(8));
        assert_eq!(s.expansions(), 9);
    }

    #[test]
    fn can_return_a_longer_path_than_astar() {
        // The wall in column 4 lures the greedy search into the top-left
        // room before it has to double back.
        let m = MapText::parse(
            "\
....#G
#...#.
......
......
......
S..#..",
        )
        .unwrap();
        let (start, goal) = (m.start.unwrap(), m.goal.unwrap());
        let mut s = GreedySearch::new(&m.grid, start, goal, Heuristic::Manhattan).unwrap();
        assert_eq!(run(&mut s), StepKind::Found);
        assert_eq!(s.path_cost(), Some(14));

        let mut a = AstarSearch::new(&m.grid, start, goal, Heuristic::Manhattan).unwrap();
        while !a.step().is_terminal() {}
        assert_eq!(a.path_cost(), Some(10));
        assert!(s.expansions() < a.expansions());
    }

    #[test]
    fn never_pushes_a_cell_twice() {
        let g = Grid::new(6, 6);
        let mut s =
            GreedySearch::new(&g, Coord::ZERO, Coord::new(5, 5), Heuristic::Euclidean).unwrap();
        let mut seen = HashSet::new();
        seen.insert(Coord::ZERO);
        loop {
            let before: HashSet<Coord> = s.frontier().clone();
            let r = s.step();
            let terminal = r.is_terminal();
            for c in r.snapshot().frontier {
                if !before.contains(c) {
                    assert!(seen.insert(*c), "{c} pushed twice");
                }
            }
            if terminal {
                break;
            }
        }
        assert_eq!(s.path_cost(), Some(10));
    }

    #[test]
    fn parents_follow_first_discovery() {
        let m = MapText::parse(
            "\
S...
.##.
...G",
        )
        .unwrap();
        let mut s =
            GreedySearch::new(&m.grid, m.start.unwrap(), m.goal.unwrap(), Heuristic::Manhattan)
                .unwrap();
        assert_eq!(run(&mut s), StepKind::Found);
        let path = s.path();
        assert_eq!(path.first(), m.start.as_ref());
        assert_eq!(path.last(), m.goal.as_ref());
        for w in path.windows(2) {
            assert!(w[0].is_adjacent(w[1]));
            assert!(!m.grid.is_blocked(w[1]));
        }
    }

    #[test]
    fn enclosed_goal_exhausts() {
        let m = MapText::parse(
            "\
S..#.
...#G
...##",
        )
        .unwrap();
        let mut s =
            GreedySearch::new(&m.grid, m.start.unwrap(), m.goal.unwrap(), Heuristic::Manhattan)
                .unwrap();
        assert_eq!(run(&mut s), StepKind::Exhausted);
        assert_eq!(s.expansions(), 9);
        // Idempotent afterwards.
        assert_eq!(s.step().kind(), StepKind::Exhausted);
        assert_eq!(s.expansions(), 9);
        assert!(!s.notify_obstacle(Coord::new(0, 1)));
    }

    #[test]
    fn rejects_out_of_bounds_goal() {
        let g = Grid::new(2, 2);
        let err = GreedySearch::new(&g, Coord::ZERO, Coord::new(2, 0), Heuristic::Manhattan)
            .err()
            .unwrap();
        assert!(matches!(err, SearchError::OutOfBounds { .. }));
    }
}
