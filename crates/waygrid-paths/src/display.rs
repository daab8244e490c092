//! Per-cell display states for drawing a grid with its route.
//!
//! This is the boundary to whatever front end draws the grid: it only maps
//! a [`Grid`] and a [`Route`] to one [`DisplayState`] per cell.

use std::collections::HashSet;

use waygrid_core::{Bounds, Cell, CellKind, Grid};

use crate::chain::{Route, StopReason};

/// How a single cell should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisplayState {
    #[default]
    Empty,
    Waypoint,
    Obstacle,
    /// Part of a found segment.
    Route,
    /// Part of the segment that could not be completed.
    RouteUnavailable,
}

impl DisplayState {
    /// Single-character form used by [`DisplayMap::to_text`].
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Waypoint => 'W',
            Self::Obstacle => '#',
            Self::Route => '*',
            Self::RouteUnavailable => 'X',
        }
    }
}

impl From<CellKind> for DisplayState {
    fn from(kind: CellKind) -> Self {
        match kind {
            CellKind::Empty => Self::Empty,
            CellKind::Waypoint => Self::Waypoint,
            CellKind::Obstacle => Self::Obstacle,
        }
    }
}

/// A display state for every cell of a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayMap {
    bounds: Bounds,
    states: Vec<DisplayState>,
}

impl DisplayMap {
    /// Classify every cell of `grid`, overlaid with `route`.
    ///
    /// Cells of found segments become [`DisplayState::Route`], except
    /// waypoints. When the route stopped on an obstacle, that obstacle and
    /// the partial segment leading to it, its starting waypoint included,
    /// become [`DisplayState::RouteUnavailable`]. When it stopped without
    /// approaching anything, the unreachable waypoint is marked instead.
    pub fn paint(grid: &Grid, route: &Route) -> Self {
        let bounds = grid.bounds();
        let mut map = Self {
            bounds,
            states: bounds
                .iter()
                .map(|c| grid.at(c).unwrap_or_default().into())
                .collect(),
        };
        let waypoints: HashSet<Cell> = grid.waypoints().iter().copied().collect();
        let failed = route.stop.map(|s| s.segment);

        for (i, seg) in route.segments.iter().enumerate() {
            if Some(i) == failed {
                continue;
            }
            for &c in seg {
                if !waypoints.contains(&c) {
                    map.set(c, DisplayState::Route);
                }
            }
        }

        if let Some(stop) = route.stop {
            match stop.reason {
                StopReason::ApproachedObstacle { .. } => {
                    if let Some(seg) = route.segments.get(stop.segment) {
                        for &c in seg {
                            map.set(c, DisplayState::RouteUnavailable);
                        }
                    }
                    map.set(stop.at, DisplayState::RouteUnavailable);
                }
                StopReason::Unreachable { target } => {
                    map.set(target, DisplayState::RouteUnavailable);
                }
            }
        }
        map
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// The state at `c`, or `None` if out of bounds.
    pub fn at(&self, c: Cell) -> Option<DisplayState> {
        self.bounds.index(c).map(|i| self.states[i])
    }

    /// Count the cells in the given state.
    pub fn count(&self, state: DisplayState) -> usize {
        self.states.iter().filter(|&&s| s == state).count()
    }

    /// One line per row, one [`DisplayState::glyph`] per cell.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.states.len() + self.bounds.height.max(0) as usize);
        for (c, s) in self.bounds.iter().zip(self.states.iter()) {
            if c.col == 0 && c.row > 0 {
                out.push('\n');
            }
            out.push(s.glyph());
        }
        out
    }

    fn set(&mut self, c: Cell, state: DisplayState) {
        if let Some(i) = self.bounds.index(c) {
            self.states[i] = state;
        }
    }
}
