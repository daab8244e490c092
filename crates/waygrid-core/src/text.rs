//! Plain-text grid maps.
//!
//! Each line is a row of the grid:
//!
//! - `.` empty
//! - `#` obstacle
//! - `0`-`9`, then `A`-`Z`, then `a`-`z`: waypoints, visited in label order
//!
//! All lines must have the same width. Surrounding whitespace of the whole
//! text is trimmed, but not of individual lines.

use crate::geom::{Bounds, Cell};
use crate::grid::{CellKind, Grid};

const LABELS: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Errors that can occur when parsing a text map.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("map row {row} has width {found}, expected {expected}")]
    InconsistentSize {
        row: i32,
        expected: usize,
        found: usize,
    },
    #[error("map contains invalid rune \u{201c}{ch}\u{201d} at {cell}")]
    InvalidRune { ch: char, cell: Cell },
    #[error("waypoint label \u{201c}{label}\u{201d} appears at both {first} and {second}")]
    DuplicateWaypoint {
        label: char,
        first: Cell,
        second: Cell,
    },
    #[error("map is empty")]
    Empty,
}

/// The rank of a waypoint label, or `None` if `ch` is not one.
fn label_rank(ch: char) -> Option<usize> {
    LABELS.find(ch)
}

/// The label for the `i`-th waypoint. Waypoints past the last label are
/// written as `?`.
fn label_for(i: usize) -> char {
    LABELS.chars().nth(i).unwrap_or('?')
}

impl Grid {
    /// Parse a grid from its text form.
    pub fn parse(s: &str) -> Result<Self, MapError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MapError::Empty);
        }

        let rows: Vec<&str> = s.lines().collect();
        let width = rows[0].chars().count();
        for (r, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MapError::InconsistentSize {
                    row: r as i32,
                    expected: width,
                    found,
                });
            }
        }

        let mut grid = Grid::new(Bounds::new(rows.len() as i32, width as i32));
        let mut labelled: Vec<(usize, char, Cell)> = Vec::new();

        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                let cell = Cell::new(r as i32, c as i32);
                match ch {
                    '.' => {}
                    // In bounds by construction.
                    '#' => {
                        let _ = grid.add_obstacle(cell);
                    }
                    _ => {
                        let Some(rank) = label_rank(ch) else {
                            return Err(MapError::InvalidRune { ch, cell });
                        };
                        if let Some(&(_, _, first)) = labelled.iter().find(|(k, _, _)| *k == rank) {
                            return Err(MapError::DuplicateWaypoint {
                                label: ch,
                                first,
                                second: cell,
                            });
                        }
                        labelled.push((rank, ch, cell));
                    }
                }
            }
        }

        labelled.sort_by_key(|&(rank, _, _)| rank);
        for (_, _, cell) in labelled {
            let _ = grid.add_waypoint(cell);
        }
        Ok(grid)
    }

    /// Render the grid in the text form accepted by [`Grid::parse`].
    ///
    /// Waypoints are relabelled by their position in the route order.
    pub fn to_text(&self) -> String {
        let bounds = self.bounds();
        let mut out = String::with_capacity(bounds.len() + bounds.height.max(0) as usize);
        for cell in bounds.iter() {
            if cell.col == 0 && cell.row > 0 {
                out.push('\n');
            }
            let ch = match self.at(cell).unwrap_or_default() {
                CellKind::Empty => '.',
                CellKind::Obstacle => '#',
                CellKind::Waypoint => {
                    let i = self.waypoints().iter().position(|&w| w == cell).unwrap_or(usize::MAX);
                    label_for(i)
                }
            };
            out.push(ch);
        }
        out
    }
}
