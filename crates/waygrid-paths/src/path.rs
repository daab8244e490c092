use waygrid_core::Cell;

use crate::distance::euclidean;

/// An ordered sequence of cells from a start to an end, both inclusive.
///
/// Paths returned by a search are never empty. A [`Route`](crate::Route)
/// may hold an empty path for a segment that could not be found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Path(Vec<Cell>);

impl Path {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self(cells)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.0
    }

    pub fn start(&self) -> Option<Cell> {
        self.0.first().copied()
    }

    pub fn end(&self) -> Option<Cell> {
        self.0.last().copied()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total Euclidean length of the steps.
    pub fn length(&self) -> f64 {
        self.0.windows(2).map(|w| euclidean(w[0], w[1])).sum()
    }

    /// Whether every consecutive pair of cells is 8-adjacent.
    pub fn is_connected(&self) -> bool {
        self.0.windows(2).all(|w| w[0].is_adjacent_to(w[1]))
    }

    pub fn contains(&self, c: Cell) -> bool {
        self.0.contains(&c)
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.0
    }
}

impl From<Vec<Cell>> for Path {
    fn from(cells: Vec<Cell>) -> Self {
        Self(cells)
    }
}

impl AsRef<[Cell]> for Path {
    fn as_ref(&self) -> &[Cell] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_and_connectivity() {
        let p = Path::new(vec![Cell::new(1, 1), Cell::new(2, 2), Cell::new(2, 3)]);
        assert!((p.length() - (std::f64::consts::SQRT_2 + 1.0)).abs() < 1e-12);
        assert!(p.is_connected());
        assert_eq!(p.start(), Some(Cell::new(1, 1)));
        assert_eq!(p.end(), Some(Cell::new(2, 3)));

        let gap = Path::new(vec![Cell::new(1, 1), Cell::new(1, 3)]);
        assert!(!gap.is_connected());
    }

    #[test]
    fn single_and_empty() {
        let one = Path::new(vec![Cell::new(4, 4)]);
        assert_eq!(one.length(), 0.0);
        assert!(one.is_connected());
        assert_eq!(one.start(), one.end());

        let none = Path::default();
        assert!(none.is_empty());
        assert_eq!(none.start(), None);
    }
}
