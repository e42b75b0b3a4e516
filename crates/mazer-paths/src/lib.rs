//! Search algorithms over maze grids.
//!
//! - **Solvability** checks by flood fill ([`is_solvable`], [`reachable_from`])
//! - **BFS** unweighted distance maps ([`bfs_distances`], [`shortest_distance`])
//! - **A\*** shortest-path search, one expansion per step ([`solve`], [`AstarSearch`])
//!
//! All searches move orthogonally with unit cost and only enter open cells.

mod astar;
mod bfs;
mod distance;
mod reachable;

pub use astar::{AstarSearch, SearchStatus, SearchStep, SolveError, shortest_path, solve};
pub use bfs::{DistanceMap, UNREACHABLE, bfs_distances, shortest_distance};
pub use distance::manhattan;
pub use reachable::{is_solvable, reachable_from};
