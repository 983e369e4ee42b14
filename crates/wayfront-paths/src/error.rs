use std::fmt;

use wayfront_core::Coord;

use crate::traits::GridView;

/// Which end of the search a construction error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

/// Errors that can occur when constructing a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The endpoint lies outside the `rows × cols` grid.
    OutOfBounds {
        endpoint: Endpoint,
        at: Coord,
        rows: i32,
        cols: i32,
    },
    /// The endpoint is a blocked cell.
    Blocked { endpoint: Endpoint, at: Coord },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                endpoint,
                at,
                rows,
                cols,
            } => write!(f, "{endpoint} {at} is outside the {rows}x{cols} grid"),
            Self::Blocked { endpoint, at } => write!(f, "{endpoint} {at} is blocked"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Reject endpoints that are out of bounds or blocked.
pub(crate) fn check_endpoints<G: GridView>(
    grid: &G,
    start: Coord,
    goal: Coord,
) -> Result<(), SearchError> {
    for (endpoint, at) in [(Endpoint::Start, start), (Endpoint::Goal, goal)] {
        if !grid.contains(at) {
            return Err(SearchError::OutOfBounds {
                endpoint,
                at,
                rows: grid.rows(),
                cols: grid.cols(),
            });
        }
        if grid.is_blocked(at) {
            return Err(SearchError::Blocked { endpoint, at });
        }
    }
    Ok(())
}
