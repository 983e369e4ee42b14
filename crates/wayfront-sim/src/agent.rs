//! An agent walking a found path one cell at a time.

use std::collections::VecDeque;

use wayfront_core::Coord;

/// Walks a path one cell per [`advance`](Agent::advance).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    position: Coord,
    ahead: VecDeque<Coord>,
}

impl Agent {
    /// An agent standing still at `position`.
    pub fn at(position: Coord) -> Self {
        Self {
            position,
            ahead: VecDeque::new(),
        }
    }

    /// Place an agent on the first cell of `path`, ready to walk the rest.
    /// Returns `None` for an empty path.
    pub fn follow(path: &[Coord]) -> Option<Self> {
        let (&first, rest) = path.split_first()?;
        Some(Self {
            position: first,
            ahead: rest.iter().copied().collect(),
        })
    }

    pub fn position(&self) -> Coord {
        self.position
    }

    /// Number of moves left.
    pub fn remaining(&self) -> usize {
        self.ahead.len()
    }

    /// The cell the next move goes to.
    pub fn next_cell(&self) -> Option<Coord> {
        self.ahead.front().copied()
    }

    /// Whether `cell` is still ahead on the path.
    pub fn is_ahead(&self, cell: Coord) -> bool {
        self.ahead.contains(&cell)
    }

    pub fn has_arrived(&self) -> bool {
        self.ahead.is_empty()
    }

    /// Move one cell forward. Returns the new position, or `None` once the
    /// end of the path has been reached.
    pub fn advance(&mut self) -> Option<Coord> {
        self.position = self.ahead.pop_front()?;
        Some(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: i32) -> Vec<Coord> {
        (0..n).map(|c| Coord::new(0, c)).collect()
    }

    #[test]
    fn follow_skips_first_cell() {
        let a = Agent::follow(&line(4)).unwrap();
        assert_eq!(a.position(), Coord::new(0, 0));
        assert_eq!(a.remaining(), 3);
        assert_eq!(a.next_cell(), Some(Coord::new(0, 1)));
        assert!(!a.is_ahead(Coord::new(0, 0)));
        assert!(a.is_ahead(Coord::new(0, 3)));
    }

    #[test]
    fn walks_to_the_end() {
        let mut a = Agent::follow(&line(3)).unwrap();
        assert_eq!(a.advance(), Some(Coord::new(0, 1)));
        assert_eq!(a.advance(), Some(Coord::new(0, 2)));
        assert!(a.has_arrived());
        assert_eq!(a.advance(), None);
        assert_eq!(a.position(), Coord::new(0, 2));
    }

    #[test]
    fn empty_and_single_paths() {
        assert!(Agent::follow(&[]).is_none());
        let a = Agent::follow(&[Coord::new(2, 2)]).unwrap();
        assert!(a.has_arrived());
        assert_eq!(Agent::at(Coord::new(2, 2)), a);
    }
}
