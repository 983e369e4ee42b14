use std::collections::{HashMap, HashSet};

use wayfront_core::Coord;

/// View of the search state as of one step.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Fully expanded coordinates.
    pub visited: &'a HashSet<Coord>,
    /// Coordinates pushed and not yet expanded.
    pub frontier: &'a HashSet<Coord>,
}

/// Discriminant of a [`StepResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepKind {
    Expanded,
    Found,
    Exhausted,
}

/// Event emitted by one call to [`Search::step`](crate::Search::step).
#[derive(Debug, Clone, Copy)]
pub enum StepResult<'a> {
    /// `current` was expanded and its neighbors relaxed.
    Expanded {
        current: Coord,
        snapshot: Snapshot<'a>,
    },
    /// `current` is the goal; `path` runs from start to goal inclusive.
    Found {
        current: Coord,
        path: &'a [Coord],
        snapshot: Snapshot<'a>,
    },
    /// The frontier ran dry without reaching the goal.
    Exhausted { snapshot: Snapshot<'a> },
}

impl<'a> StepResult<'a> {
    pub fn kind(&self) -> StepKind {
        match self {
            StepResult::Expanded { .. } => StepKind::Expanded,
            StepResult::Found { .. } => StepKind::Found,
            StepResult::Exhausted { .. } => StepKind::Exhausted,
        }
    }

    /// The coordinate just processed; `None` for `Exhausted`.
    pub fn current(&self) -> Option<Coord> {
        match *self {
            StepResult::Expanded { current, .. } | StepResult::Found { current, .. } => {
                Some(current)
            }
            StepResult::Exhausted { .. } => None,
        }
    }

    pub fn snapshot(&self) -> Snapshot<'a> {
        match *self {
            StepResult::Expanded { snapshot, .. }
            | StepResult::Found { snapshot, .. }
            | StepResult::Exhausted { snapshot } => snapshot,
        }
    }

    /// The found path; empty unless this is `Found`.
    pub fn path(&self) -> &'a [Coord] {
        match *self {
            StepResult::Found { path, .. } => path,
            _ => &[],
        }
    }

    /// Whether this ends the search.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StepResult::Expanded { .. })
    }
}

/// Terminal state a search settles into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Terminal {
    Found,
    Exhausted,
}

/// Walk `parents` back from `goal` and return the path from `start` to `goal`
/// inclusive.
pub(crate) fn reconstruct_path(
    parents: &HashMap<Coord, Coord>,
    start: Coord,
    goal: Coord,
) -> Vec<Coord> {
    let mut path = Vec::new();
    let mut c = goal;
    while let Some(&p) = parents.get(&c) {
        path.push(c);
        c = p;
        // A chain longer than the map means a cycle.
        if path.len() > parents.len() {
            break;
        }
    }
    debug_assert_eq!(c, start, "parent chain from {goal} ended at {c}, not {start}");
    if c != start {
        log::warn!("parent chain from {goal} ended at {c}, not at start {start}");
    }
    path.push(start);
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconstructs_in_start_to_goal_order() {
        let mut parents = HashMap::new();
        parents.insert(Coord::new(0, 1), Coord::new(0, 0));
        parents.insert(Coord::new(1, 1), Coord::new(0, 1));
        parents.insert(Coord::new(2, 1), Coord::new(1, 1));
        let path = reconstruct_path(&parents, Coord::new(0, 0), Coord::new(2, 1));
        assert_eq!(
            path,
            vec![
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(1, 1),
                Coord::new(2, 1),
            ]
        );
    }

    #[test]
    fn start_equal_goal_is_single_cell() {
        let path = reconstruct_path(&HashMap::new(), Coord::new(3, 3), Coord::new(3, 3));
        assert_eq!(path, vec![Coord::new(3, 3)]);
    }

    #[test]
    fn accessors() {
        let visited = HashSet::from([Coord::new(0, 0)]);
        let frontier = HashSet::new();
        let snapshot = Snapshot {
            visited: &visited,
            frontier: &frontier,
        };
        let path = [Coord::new(0, 0)];
        let found = StepResult::Found {
            current: Coord::new(0, 0),
            path: &path,
            snapshot,
        };
        assert_eq!(found.kind(), StepKind::Found);
        assert!(found.is_terminal());
        assert_eq!(found.path().len(), 1);

        let exhausted = StepResult::Exhausted { snapshot };
        assert_eq!(exhausted.current(), None);
        assert!(exhausted.path().is_empty());
        assert_eq!(exhausted.snapshot().visited.len(), 1);

        let expanded = StepResult::Expanded {
            current: Coord::new(0, 0),
            snapshot,
        };
        assert!(!expanded.is_terminal());
        assert_eq!(expanded.current(), Some(Coord::new(0, 0)));
    }
}
