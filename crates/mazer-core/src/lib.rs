//! **mazer-core**: the maze grid model.
//!
//! This crate provides the types shared by the generator and the search
//! crates: geometry primitives, the two-state [`Cell`], and the [`Grid`]
//! that carries Start/End markers plus the visited set and path written by
//! a search.

pub mod cell;
pub mod geom;
pub mod grid;

pub use cell::Cell;
pub use geom::{Bounds, BoundsIter, Position};
pub use grid::{Grid, GridError};
