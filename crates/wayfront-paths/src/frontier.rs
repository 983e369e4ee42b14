//! Priority frontier with lazy deletion.
//!
//! Entries are stored in a min-heap keyed by `(priority, g, insertion_order)`.
//! Lower priorities are popped first; ties prefer the smaller `g`, then the
//! entry pushed first (FIFO). A coordinate may sit in the heap several times;
//! callers discard stale pops themselves.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

use wayfront_core::Coord;

/// An entry popped from the frontier.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Entry {
    pub(crate) coord: Coord,
    pub(crate) priority: f64,
    pub(crate) g: u32,
    seq: u64,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Natural order; the heap wraps entries in Reverse.
        self.priority
            .total_cmp(&other.priority)
            .then(self.g.cmp(&other.g))
            .then(self.seq.cmp(&other.seq))
    }
}

/// Min-heap of candidate coordinates plus their membership set.
///
/// Membership holds every coordinate pushed and not yet accepted, so it
/// reflects what a caller would see as "the open set".
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Reverse<Entry>>,
    members: HashSet<Coord>,
    seq: u64,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Push a coordinate with the given priority and accumulated cost.
    pub(crate) fn push(&mut self, coord: Coord, priority: f64, g: u32) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry {
            coord,
            priority,
            g,
            seq,
        }));
        self.members.insert(coord);
    }

    /// Pop the minimum entry, stale or not.
    pub(crate) fn pop(&mut self) -> Option<Entry> {
        self.heap.pop().map(|Reverse(e)| e)
    }

    /// Drop a coordinate from the membership set once it has been accepted.
    pub(crate) fn settle(&mut self, coord: Coord) {
        self.members.remove(&coord);
    }

    pub(crate) fn contains(&self, coord: Coord) -> bool {
        self.members.contains(&coord)
    }

    pub(crate) fn members(&self) -> &HashSet<Coord> {
        &self.members
    }

    /// Number of heap entries, stale ones included.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}
