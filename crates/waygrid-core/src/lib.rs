//! **waygrid-core** — grid model for waypoint routing.
//!
//! This crate provides the types shared across the *waygrid* workspace:
//! [`Cell`] coordinates, grid [`Bounds`], the editable [`Grid`] with its
//! per-cell [`CellKind`] and ordered waypoint list, and a plain-text map
//! format.

pub mod geom;
pub mod grid;
pub mod text;

pub use geom::{Bounds, BoundsIter, Cell, OFFSETS_8};
pub use grid::{CellKind, Grid, GridError, Tool};
pub use text::MapError;
