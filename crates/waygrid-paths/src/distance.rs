use waygrid_core::Cell;

/// Euclidean (straight-line) distance between two cells.
#[inline]
pub fn euclidean(a: Cell, b: Cell) -> f64 {
    f64::from(a.row - b.row).hypot(f64::from(a.col - b.col))
}
