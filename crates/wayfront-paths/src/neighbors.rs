use wayfront_core::Coord;

/// Cached neighbor computation helper.
///
/// Enumerates the orthogonal neighbors of a cell in the fixed order up,
/// down, left, right, filtered by a predicate. The buffer is reused between
/// calls so expansions do not allocate.
pub struct Neighbors {
    buf: Vec<Coord>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4),
        }
    }

    /// Return the 4-directional neighbors of `c`, keeping only those for
    /// which `keep` returns `true`.
    pub fn cardinal(&mut self, c: Coord, keep: impl Fn(Coord) -> bool) -> &[Coord] {
        self.buf.clear();
        for n in c.neighbors_4() {
            if keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_fixed_order() {
        let mut nb = Neighbors::new();
        let got = nb.cardinal(Coord::new(1, 1), |_| true).to_vec();
        assert_eq!(
            got,
            vec![
                Coord::new(0, 1),
                Coord::new(2, 1),
                Coord::new(1, 0),
                Coord::new(1, 2),
            ]
        );
    }

    #[test]
    fn filters_with_predicate() {
        let mut nb = Neighbors::new();
        let got = nb.cardinal(Coord::new(0, 0), |c| c.row >= 0 && c.col >= 0);
        assert_eq!(got, &[Coord::new(1, 0), Coord::new(0, 1)]);
    }
}
