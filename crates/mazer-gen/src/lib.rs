//! Maze generation for mazer grids.
//!
//! [`generate`] builds a perfect maze with a randomized backtracker and then
//! opens extra walls to create loops. [`fixtures`] provides hand-built best,
//! worst and unsolvable layouts for tests and benchmarks.

pub mod config;
pub mod fixtures;
pub mod maze;

pub use config::MazeConfig;
pub use maze::{DEFAULT_EXTRA_OPEN_FRACTION, GenError, MazeGen, generate};
