use std::collections::HashSet;

use waygrid_core::{Bounds, Cell};

use crate::distance::euclidean;
use crate::error::SearchError;
use crate::traits::{AstarPather, Pather};

/// How diagonal steps interact with obstacles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagonalRule {
    /// A diagonal step is rejected when either orthogonal cell of the corner
    /// it crosses is an obstacle.
    #[default]
    NoCornerCutting,
    /// Diagonal steps only need the destination to be free.
    AllowCornerCutting,
}

/// Whether one step from `from` to the adjacent cell `to` is allowed.
///
/// The destination must be passable (see [`Bounds::is_passable`]) and not an
/// obstacle. Under [`DiagonalRule::NoCornerCutting`], a diagonal step also
/// needs both `(to.row, from.col)` and `(from.row, to.col)` to be free.
pub fn is_step_allowed(
    from: Cell,
    to: Cell,
    obstacles: &HashSet<Cell>,
    bounds: Bounds,
    rule: DiagonalRule,
) -> bool {
    if obstacles.contains(&to) || !bounds.is_passable(to) {
        return false;
    }
    if rule == DiagonalRule::NoCornerCutting && from.is_diagonal_to(to) {
        let corner_a = Cell::new(to.row, from.col);
        let corner_b = Cell::new(from.row, to.col);
        if obstacles.contains(&corner_a) || obstacles.contains(&corner_b) {
            return false;
        }
    }
    true
}

/// The valid 8-directional neighbours of `c`, with corner cutting disallowed.
pub fn neighbors(c: Cell, obstacles: &HashSet<Cell>, bounds: Bounds) -> Vec<Cell> {
    let mut nb = Neighbors::new();
    nb.all(c, obstacles, bounds, DiagonalRule::NoCornerCutting).to_vec()
}

/// Cached neighbour computation helper.
///
/// Reuses one buffer across calls so repeated expansion does not allocate.
pub struct Neighbors {
    buf: Vec<Cell>,
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
            buf: Vec::with_capacity(8),
        }
    }

    /// Return the 8-directional neighbours of `c` that a route may step onto.
    pub fn all(
        &mut self,
        c: Cell,
        obstacles: &HashSet<Cell>,
        bounds: Bounds,
        rule: DiagonalRule,
    ) -> &[Cell] {
        self.buf.clear();
        push_allowed(c, obstacles, bounds, rule, &mut self.buf);
        &self.buf
    }
}

fn push_allowed(
    c: Cell,
    obstacles: &HashSet<Cell>,
    bounds: Bounds,
    rule: DiagonalRule,
    buf: &mut Vec<Cell>,
) {
    for n in c.neighbors_8() {
        if is_step_allowed(c, n, obstacles, bounds, rule) {
            buf.push(n);
        }
    }
}

/// An obstacle set over grid bounds, searchable with Euclidean costs.
#[derive(Debug, Clone, Copy)]
pub struct ObstacleMap<'a> {
    obstacles: &'a HashSet<Cell>,
    bounds: Bounds,
    rule: DiagonalRule,
}

impl<'a> ObstacleMap<'a> {
    pub fn new(obstacles: &'a HashSet<Cell>, bounds: Bounds, rule: DiagonalRule) -> Self {
        Self {
            obstacles,
            bounds,
            rule,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn obstacles(&self) -> &'a HashSet<Cell> {
        self.obstacles
    }

    /// Reject cells that cannot start or end a search.
    pub fn check_endpoint(&self, c: Cell) -> Result<(), SearchError> {
        if self.bounds.is_empty() {
            return Err(SearchError::EmptyBounds {
                bounds: self.bounds,
            });
        }
        if !self.bounds.is_passable(c) {
            return Err(SearchError::OutOfBounds {
                cell: c,
                bounds: self.bounds,
            });
        }
        if self.obstacles.contains(&c) {
            return Err(SearchError::BlockedEndpoint { cell: c });
        }
        Ok(())
    }
}

impl Pather for ObstacleMap<'_> {
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>) {
        push_allowed(c, self.obstacles, self.bounds, self.rule, buf);
    }
}

impl AstarPather for ObstacleMap<'_> {
    fn cost(&self, from: Cell, to: Cell) -> f64 {
        euclidean(from, to)
    }

    fn estimate(&self, from: Cell, to: Cell) -> f64 {
        euclidean(from, to)
    }
}
