//! Geometry primitives: [`Coord`] and [`Area`].
//!
//! Coordinates are `(row, col)` pairs. Rows grow downwards, columns grow to
//! the right, and every grid is anchored at `(0, 0)`.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// A grid coordinate.
///
/// Fields are signed so that neighbor arithmetic on the border never
/// underflows; a negative coordinate is simply outside every [`Area`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Unit offsets in expansion order: up, down, left, right.
    pub const CARDINALS: [Coord; 4] = [
        Coord::new(-1, 0),
        Coord::new(1, 0),
        Coord::new(0, -1),
        Coord::new(0, 1),
    ];

    /// Create a new coordinate.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a coordinate shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// Whether the coordinate lies inside `area`.
    #[inline]
    pub fn in_area(self, area: &Area) -> bool {
        area.contains(self)
    }

    /// The four orthogonal neighbours, in the order up, down, left, right.
    #[inline]
    pub fn neighbors_4(self) -> [Coord; 4] {
        Self::CARDINALS.map(|d| self + d)
    }

    /// Whether `other` is one orthogonal step away.
    #[inline]
    pub fn is_adjacent(self, other: Coord) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add for Coord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Coord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

// ---------------------------------------------------------------------------
// Area
// ---------------------------------------------------------------------------

/// A `rows × cols` rectangle anchored at the origin.
///
/// Non-positive dimensions describe an empty area.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Area {
    pub rows: i32,
    pub cols: i32,
}

impl Area {
    /// Create a new area.
    #[inline]
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    /// Whether the area contains no cells.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.rows <= 0 || self.cols <= 0
    }

    /// Number of cells in the area.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.rows as usize * self.cols as usize
        }
    }

    /// Whether the coordinate lies inside the area.
    #[inline]
    pub fn contains(self, c: Coord) -> bool {
        c.row >= 0 && c.col >= 0 && c.row < self.rows && c.col < self.cols
    }

    /// Flat row-major index of `c`, or `None` when outside.
    #[inline]
    pub fn index(self, c: Coord) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some(c.row as usize * self.cols as usize + c.col as usize)
    }

    /// Iterate over all coordinates in row-major order.
    pub fn iter(self) -> AreaIter {
        AreaIter {
            area: self,
            next: if self.is_empty() { None } else { Some(Coord::ZERO) },
        }
    }
}

/// Row-major iterator over an [`Area`].
pub struct AreaIter {
    area: Area,
    next: Option<Coord>,
}

impl Iterator for AreaIter {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        let cur = self.next?;
        let mut n = cur.shift(0, 1);
        if n.col >= self.area.cols {
            n = Coord::new(cur.row + 1, 0);
        }
        self.next = if n.row < self.area.rows { Some(n) } else { None };
        Some(cur)
    }
}

impl IntoIterator for Area {
    type Item = Coord;
    type IntoIter = AreaIter;

    fn into_iter(self) -> AreaIter {
        self.iter()
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn coord_round_trip() {
        let c = Coord::new(3, 7);
        let json = serde_json::to_string(&c).unwrap();
        let back: Coord = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
