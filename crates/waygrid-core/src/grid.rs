//! The editable grid: a classification per cell plus the ordered waypoint
//! list.
//!
//! A [`Grid`] is plain owned state. Searches never hold on to it; callers
//! derive the obstacle set and waypoint list from it and pass those in.

use std::collections::HashSet;

use crate::geom::{Bounds, Cell};

/// Classification of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Empty,
    Waypoint,
    Obstacle,
}

/// Editing tools that change a cell's classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tool {
    Waypoint,
    Obstacle,
    Erase,
}

/// Errors from editing a [`Grid`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("cell {cell} is outside the {bounds} grid")]
    OutOfBounds { cell: Cell, bounds: Bounds },
}

/// A grid of [`CellKind`]s and the waypoints to route through, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    bounds: Bounds,
    cells: Vec<CellKind>,
    waypoints: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell [`CellKind::Empty`].
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            cells: vec![CellKind::Empty; bounds.len()],
            waypoints: Vec::new(),
        }
    }

    /// Build a grid whose only non-empty cells are the given obstacles.
    ///
    /// Obstacles outside `bounds` are rejected.
    pub fn from_obstacles<'a>(
        bounds: Bounds,
        obstacles: impl IntoIterator<Item = &'a Cell>,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(bounds);
        for &c in obstacles {
            grid.add_obstacle(c)?;
        }
        Ok(grid)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// The classification at `c`, or `None` if out of bounds.
    pub fn at(&self, c: Cell) -> Option<CellKind> {
        self.bounds.index(c).map(|i| self.cells[i])
    }

    /// Waypoints in the order they were added.
    pub fn waypoints(&self) -> &[Cell] {
        &self.waypoints
    }

    /// The set of obstacle cells.
    pub fn obstacles(&self) -> HashSet<Cell> {
        self.bounds
            .iter()
            .zip(self.cells.iter())
            .filter(|&(_, &k)| k == CellKind::Obstacle)
            .map(|(c, _)| c)
            .collect()
    }

    /// Mark `c` as a waypoint and append it to the route order.
    ///
    /// A cell that already is a waypoint keeps its original position.
    pub fn add_waypoint(&mut self, c: Cell) -> Result<(), GridError> {
        let i = self.index(c)?;
        if self.cells[i] != CellKind::Waypoint {
            self.cells[i] = CellKind::Waypoint;
            self.waypoints.push(c);
        }
        Ok(())
    }

    /// Mark `c` as an obstacle, dropping it from the waypoints if needed.
    pub fn add_obstacle(&mut self, c: Cell) -> Result<(), GridError> {
        let i = self.index(c)?;
        self.forget_waypoint(i, c);
        self.cells[i] = CellKind::Obstacle;
        Ok(())
    }

    /// Reset `c` to empty.
    pub fn erase(&mut self, c: Cell) -> Result<(), GridError> {
        let i = self.index(c)?;
        self.forget_waypoint(i, c);
        self.cells[i] = CellKind::Empty;
        Ok(())
    }

    /// Apply an editing tool at `c`.
    pub fn apply(&mut self, c: Cell, tool: Tool) -> Result<(), GridError> {
        match tool {
            Tool::Waypoint => self.add_waypoint(c),
            Tool::Obstacle => self.add_obstacle(c),
            Tool::Erase => self.erase(c),
        }
    }

    /// Reset every cell and forget all waypoints.
    pub fn clear(&mut self) {
        self.cells.fill(CellKind::Empty);
        self.waypoints.clear();
    }

    /// Count the cells of the given kind.
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&k| k == kind).count()
    }

    fn index(&self, c: Cell) -> Result<usize, GridError> {
        self.bounds.index(c).ok_or(GridError::OutOfBounds {
            cell: c,
            bounds: self.bounds,
        })
    }

    fn forget_waypoint(&mut self, i: usize, c: Cell) {
        if self.cells[i] == CellKind::Waypoint {
            self.waypoints.retain(|&w| w != c);
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let mut g = Grid::new(Bounds::new(3, 4));
        g.add_waypoint(Cell::new(1, 1)).unwrap();
        g.add_obstacle(Cell::new(2, 3)).unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }
}
