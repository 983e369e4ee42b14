use std::fmt;
use std::str::FromStr;

use wayfront_core::Coord;

/// Manhattan (L1) distance between two coordinates.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}

/// Euclidean (L2) distance between two coordinates.
#[inline]
pub fn euclidean(a: Coord, b: Coord) -> f64 {
    let dr = f64::from(a.row - b.row);
    let dc = f64::from(a.col - b.col);
    (dr * dr + dc * dc).sqrt()
}

/// Distance estimate used to order the frontier.
///
/// Both estimators never overestimate the number of orthogonal unit moves,
/// so A* stays optimal with either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Heuristic {
    #[default]
    Manhattan,
    Euclidean,
}

impl Heuristic {
    /// Estimated distance from `from` to `to`.
    #[inline]
    pub fn estimate(self, from: Coord, to: Coord) -> f64 {
        match self {
            Heuristic::Manhattan => f64::from(manhattan(from, to)),
            Heuristic::Euclidean => euclidean(from, to),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heuristic::Manhattan => write!(f, "manhattan"),
            Heuristic::Euclidean => write!(f, "euclidean"),
        }
    }
}

/// Error returned when a heuristic name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownHeuristic(pub String);

impl fmt::Display for UnknownHeuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown heuristic {:?}", self.0)
    }
}

impl std::error::Error for UnknownHeuristic {}

impl FromStr for Heuristic {
    type Err = UnknownHeuristic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manhattan" => Ok(Heuristic::Manhattan),
            "euclidean" => Ok(Heuristic::Euclidean),
            _ => Err(UnknownHeuristic(s.to_string())),
        }
    }
}
