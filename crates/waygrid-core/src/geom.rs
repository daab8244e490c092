//! Geometry primitives: [`Cell`] and [`Bounds`].
//!
//! Coordinates are `(row, col)`: rows grow downward, columns grow right.

use std::fmt;

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A grid coordinate. Identity, equality and hashing are by value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

/// The eight neighbour offsets as `(drow, dcol)`: orthogonal moves first,
/// then diagonals. Search results depend on this order for tie-breaking.
pub const OFFSETS_8: [(i32, i32); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

impl Cell {
    /// Create a new cell.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return the cell shifted by `(drow, dcol)`.
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// All eight neighbours, in [`OFFSETS_8`] order.
    #[inline]
    pub fn neighbors_8(self) -> [Cell; 8] {
        OFFSETS_8.map(|(dr, dc)| self.shift(dr, dc))
    }

    /// Whether `other` is one diagonal step away from `self`.
    #[inline]
    pub fn is_diagonal_to(self, other: Cell) -> bool {
        (self.row - other.row).abs() == 1 && (self.col - other.col).abs() == 1
    }

    /// Whether `other` is one of the eight cells around `self`.
    #[inline]
    pub fn is_adjacent_to(self, other: Cell) -> bool {
        self != other && (self.row - other.row).abs() <= 1 && (self.col - other.col).abs() <= 1
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Cell {
    #[inline]
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl From<Cell> for (i32, i32) {
    #[inline]
    fn from(c: Cell) -> Self {
        (c.row, c.col)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// The extent of a grid: rows `[0, height)` and columns `[0, width)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub height: i32,
    pub width: i32,
}

impl Bounds {
    /// Create new bounds.
    #[inline]
    pub const fn new(height: i32, width: i32) -> Self {
        Self { height, width }
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.height as usize) * (self.width as usize)
    }

    /// Whether the bounds have zero or negative area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.height <= 0 || self.width <= 0
    }

    /// Whether `c` lies inside `[0, height) × [0, width)`.
    #[inline]
    pub fn contains(self, c: Cell) -> bool {
        c.row >= 0 && c.row < self.height && c.col >= 0 && c.col < self.width
    }

    /// Whether a route may step onto `c`.
    ///
    /// Row 0 and column 0 are a reserved border: only rows `1..height` and
    /// columns `1..width` are passable.
    #[inline]
    pub fn is_passable(self, c: Cell) -> bool {
        c.row > 0 && c.row < self.height && c.col > 0 && c.col < self.width
    }

    /// Row-major index of `c`, or `None` if outside the bounds.
    #[inline]
    pub fn index(self, c: Cell) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some((c.row as usize) * (self.width as usize) + (c.col as usize))
    }

    /// Row-major iterator over every cell.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            cur: Cell::new(0, 0),
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Cell;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

// ---------------------------------------------------------------------------
// BoundsIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the cells of a [`Bounds`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    cur: Cell,
}

impl Iterator for BoundsIter {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Cell> {
        if self.bounds.is_empty() || self.cur.row >= self.bounds.height {
            return None;
        }
        let c = self.cur;
        self.cur.col += 1;
        if self.cur.col >= self.bounds.width {
            self.cur.col = 0;
            self.cur.row += 1;
        }
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.bounds.is_empty() || self.cur.row >= self.bounds.height {
            return (0, Some(0));
        }
        let w = self.bounds.width as usize;
        let remaining_in_row = (self.bounds.width - self.cur.col) as usize;
        let remaining_rows = (self.bounds.height - self.cur.row - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for BoundsIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn cell_shift_and_order() {
        let c = Cell::new(2, 3);
        assert_eq!(c.shift(-1, 2), Cell::new(1, 5));
        assert!(Cell::new(1, 9) < Cell::new(2, 0));
        assert!(Cell::new(2, 0) < Cell::new(2, 1));
    }

    #[test]
    fn cell_hash_by_value() {
        let set: HashSet<Cell> = [Cell::new(1, 1), Cell::from((1, 1))].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn neighbors_8_orthogonal_first() {
        let n = Cell::new(5, 5).neighbors_8();
        assert_eq!(n[0], Cell::new(5, 6));
        assert_eq!(n[3], Cell::new(4, 5));
        assert_eq!(n[4], Cell::new(6, 6));
        assert!(n.iter().all(|&m| Cell::new(5, 5).is_adjacent_to(m)));
        assert_eq!(n.iter().filter(|&&m| Cell::new(5, 5).is_diagonal_to(m)).count(), 4);
    }

    #[test]
    fn bounds_contains_vs_passable() {
        let b = Bounds::new(5, 4);
        assert!(b.contains(Cell::new(0, 0)));
        assert!(!b.is_passable(Cell::new(0, 2)));
        assert!(!b.is_passable(Cell::new(2, 0)));
        assert!(b.is_passable(Cell::new(4, 3)));
        assert!(!b.contains(Cell::new(5, 0)));
        assert!(!b.is_passable(Cell::new(2, 4)));
    }

    #[test]
    fn bounds_iter_row_major() {
        let b = Bounds::new(2, 3);
        let cells: Vec<_> = b.iter().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(b.iter().len(), 6);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[3], Cell::new(1, 0));
        assert_eq!(b.index(Cell::new(1, 2)), Some(5));
        assert_eq!(b.index(Cell::new(2, 0)), None);
    }

    #[test]
    fn empty_bounds() {
        let b = Bounds::new(0, 7);
        assert!(b.is_empty());
        assert_eq!(b.len(), 0);
        assert_eq!(b.iter().next(), None);
    }
}
