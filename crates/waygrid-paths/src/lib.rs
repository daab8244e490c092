//! Shortest paths and waypoint routes on obstacle grids.
//!
//! - **A\*** search between two cells ([`AStar::navigate`], [`navigate`]),
//!   with Euclidean step costs and heuristic over 8-directional moves.
//! - **Waypoint chaining** ([`Router::find_path`], [`find_path`]): one
//!   search per consecutive waypoint pair, assembled into a [`Route`] that
//!   degrades gracefully when a pair cannot be joined.
//! - **Display mapping** ([`DisplayMap::paint`]) for front ends that draw
//!   the grid.
//!
//! Row 0 and column 0 are a reserved border: routes never step onto them.
//! Diagonal steps may not cut between obstacle corners unless
//! [`DiagonalRule::AllowCornerCutting`] is configured.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | neighbour enumeration |
//! | [`AstarPather`] : [`Pather`] | A* |

mod astar;
mod chain;
mod config;
mod display;
mod distance;
mod error;
mod neighbors;
mod path;
mod traits;

pub use astar::{AStar, NodeStatus, SearchNode, SearchStats, navigate};
pub use chain::{Route, Router, Stop, StopReason, find_path};
pub use config::{ChainPolicy, SearchConfig};
pub use display::{DisplayMap, DisplayState};
pub use distance::euclidean;
pub use error::SearchError;
pub use neighbors::{DiagonalRule, Neighbors, ObstacleMap, is_step_allowed, neighbors};
pub use path::Path;
pub use traits::{AstarPather, Pather};
