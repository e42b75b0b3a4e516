//! Shared pieces of the `mazer` command-line tool.
//!
//! Maze presets, benchmark layouts and the trial runner live here so the
//! binary stays a thin argument-parsing shell.

pub mod bench;

use std::fmt;
use std::io;

use clap::ValueEnum;
use mazer_core::Grid;
use mazer_gen::{GenError, fixtures, generate};
use mazer_paths::SolveError;

pub use bench::{Experiment, Summary, TrialResult, run_experiment, run_trial};

/// Size presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Requested `(rows, cols)` before odd normalization.
    pub const fn size(self) -> (usize, usize) {
        match self {
            Difficulty::Easy => (10, 10),
            Difficulty::Medium => (20, 20),
            Difficulty::Hard => (30, 30),
        }
    }
}

/// Layout used by a benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Case {
    /// Generated maze with loop injection.
    Random,
    /// Fully open room.
    Best,
    /// Concentric rings with End in the centre.
    Worst,
    /// Generated maze with End sealed off.
    Unsolvable,
    /// Solid walls apart from Start and End.
    Blocked,
}

impl Case {
    /// Build one grid for this case.
    pub fn build(
        self,
        rows: usize,
        cols: usize,
        extra_open_fraction: f64,
        seed: Option<u64>,
    ) -> Result<Grid, GenError> {
        match self {
            Case::Random => generate(rows, cols, extra_open_fraction, seed),
            Case::Best => fixtures::open_room(rows, cols),
            Case::Worst => fixtures::spiral(rows, cols),
            Case::Unsolvable => fixtures::walled_end(rows, cols, extra_open_fraction, seed),
            Case::Blocked => fixtures::blocked(rows, cols),
        }
    }

    /// Whether trials that turn out unsolvable should be dropped.
    pub const fn skips_unsolvable(self) -> bool {
        matches!(self, Case::Random)
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Case::Random => "random",
            Case::Best => "best",
            Case::Worst => "worst",
            Case::Unsolvable => "unsolvable",
            Case::Blocked => "blocked",
        };
        f.write_str(name)
    }
}

/// Parse a `ROWSxCOLS` size such as `10x10`.
pub fn parse_size(s: &str) -> Result<(usize, usize), String> {
    let (rows, cols) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("invalid size \u{201c}{s}\u{201d}: use ROWSxCOLS, e.g. 10x10"))?;
    let rows: usize = rows
        .trim()
        .parse()
        .map_err(|e| format!("invalid row count in \u{201c}{s}\u{201d}: {e}"))?;
    let cols: usize = cols
        .trim()
        .parse()
        .map_err(|e| format!("invalid column count in \u{201c}{s}\u{201d}: {e}"))?;
    if rows == 0 || cols == 0 {
        return Err(format!("rows and columns must be positive in \u{201c}{s}\u{201d}"));
    }
    Ok((rows, cols))
}

/// Errors reported by the command-line tool.
#[derive(Debug)]
pub enum DemoError {
    Gen(GenError),
    Solve(SolveError),
    Io(io::Error),
    Json(serde_json::Error),
    /// A* and BFS disagree on the shortest path length.
    Mismatch { astar: usize, bfs: Option<u32> },
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gen(e) => write!(f, "{e}"),
            Self::Solve(e) => write!(f, "{e}"),
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::Json(e) => write!(f, "json error: {e}"),
            Self::Mismatch { astar, bfs } => match bfs {
                Some(d) => write!(f, "A* path has {astar} cells but BFS distance is {d} moves"),
                None => write!(f, "A* path has {astar} cells but BFS found no route"),
            },
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gen(e) => Some(e),
            Self::Solve(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Mismatch { .. } => None,
        }
    }
}

impl From<GenError> for DemoError {
    fn from(e: GenError) -> Self {
        Self::Gen(e)
    }
}

impl From<SolveError> for DemoError {
    fn from(e: SolveError) -> Self {
        Self::Solve(e)
    }
}

impl From<io::Error> for DemoError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for DemoError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Check an A* path length against the BFS distance on the same grid.
pub fn verify_path(grid: &Grid) -> Result<(), DemoError> {
    let bfs = mazer_paths::shortest_distance(grid);
    let astar = grid.path().len();
    let agrees = match bfs {
        Some(d) => astar == d as usize + 1,
        None => astar == 0,
    };
    if agrees {
        Ok(())
    } else {
        Err(DemoError::Mismatch { astar, bfs })
    }
}
