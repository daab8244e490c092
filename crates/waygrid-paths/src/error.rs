use waygrid_core::{Bounds, Cell};

/// Requests the search engine refuses to run, and searches it abandons.
///
/// A search that simply finds no route is not an error: it yields `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("grid bounds {bounds} have no cells")]
    EmptyBounds { bounds: Bounds },
    #[error("cell {cell} is outside the passable area of the {bounds} grid")]
    OutOfBounds { cell: Cell, bounds: Bounds },
    #[error("cell {cell} is an obstacle")]
    BlockedEndpoint { cell: Cell },
    #[error("a route needs at least two waypoints, got {count}")]
    TooFewWaypoints { count: usize },
    #[error("search from {from} to {to} gave up after {limit} expansions")]
    ExpansionLimit { from: Cell, to: Cell, limit: usize },
}
