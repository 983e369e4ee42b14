//! ASCII maps.
//!
//! One line per row: `#` is blocked, `.` is open, `S` marks the start and
//! `G` the goal (both open). Leading and trailing blank lines are ignored.
//!
//! ```text
//! ....G
//! .###.
//! S....
//! ```

use std::fmt;

use crate::geom::Coord;
use crate::grid::{Cell, Grid};

/// A parsed map: the grid plus optional start/goal markers.
#[derive(Debug, Clone)]
pub struct MapText {
    pub grid: Grid,
    pub start: Option<Coord>,
    pub goal: Option<Coord>,
}

impl MapText {
    /// Parse a map from its text form.
    pub fn parse(s: &str) -> Result<Self, MapError> {
        let lines: Vec<&str> = s
            .trim_matches('\n')
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .collect();
        let Some(first) = lines.first() else {
            return Err(MapError::Empty);
        };
        let cols = first.chars().count();
        if cols == 0 {
            return Err(MapError::Empty);
        }

        let grid = Grid::new(lines.len() as i32, cols as i32);
        let mut start = None;
        let mut goal = None;

        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(MapError::InconsistentSize {
                    row: row as i32,
                    expected: cols,
                    found: line.chars().count(),
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let at = Coord::new(row as i32, col as i32);
                let cell = match ch {
                    '.' => Cell::Open,
                    '#' => Cell::Blocked,
                    'S' => {
                        set_marker(&mut start, ch, at)?;
                        Cell::Open
                    }
                    'G' => {
                        set_marker(&mut goal, ch, at)?;
                        Cell::Open
                    }
                    _ => return Err(MapError::InvalidRune { ch, at }),
                };
                grid.set(at, cell);
            }
        }

        Ok(Self { grid, start, goal })
    }
}

fn set_marker(slot: &mut Option<Coord>, ch: char, at: Coord) -> Result<(), MapError> {
    if let Some(first) = *slot {
        return Err(MapError::DuplicateMarker {
            ch,
            first,
            second: at,
        });
    }
    *slot = Some(at);
    Ok(())
}

impl fmt::Display for MapText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let area = self.grid.area();
        for row in 0..area.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..area.cols {
                let c = Coord::new(row, col);
                let ch = if Some(c) == self.start {
                    'S'
                } else if Some(c) == self.goal {
                    'G'
                } else {
                    self.grid.at(c).unwrap_or(Cell::Blocked).glyph()
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

/// Errors that can occur when parsing a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// No rows, or an empty first row.
    Empty,
    /// A row has a different width from the first row.
    InconsistentSize {
        row: i32,
        expected: usize,
        found: usize,
    },
    /// A character outside `#.SG` was found.
    InvalidRune { ch: char, at: Coord },
    /// `S` or `G` appears more than once.
    DuplicateMarker { ch: char, first: Coord, second: Coord },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "map: no cells"),
            Self::InconsistentSize {
                row,
                expected,
                found,
            } => write!(
                f,
                "map: row {row} has {found} cells, expected {expected}"
            ),
            Self::InvalidRune { ch, at } => {
                write!(f, "map contains invalid rune \u{201c}{ch}\u{201d} at {at}")
            }
            Self::DuplicateMarker { ch, first, second } => {
                write!(f, "map: marker {ch} at {second} already placed at {first}")
            }
        }
    }
}

impl std::error::Error for MapError {}
