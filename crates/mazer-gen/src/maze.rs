//! Perfect-maze generation with optional loop injection.
//!
//! Generation runs in three passes:
//! 1. **Carve**: a randomized depth-first backtracker over the odd lattice
//!    (cells whose row and column are both odd), opening the wall between
//!    each pair of lattice cells it links. The result is a spanning tree.
//! 2. **Connect endpoints**: Start is the top-left corner and End the
//!    bottom-right corner; both sit on the border, so each gets a short
//!    connector into the carved tree.
//! 3. **Add loops**: a shuffled sample of the remaining walls is opened
//!    when at least two orthogonal neighbours are already open, creating
//!    cycles and therefore alternative solutions.

use std::fmt;

use log::{debug, warn};
use mazer_core::{Cell, Grid, GridError, Position};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Fraction of the grid area tried for loop injection when none is given.
pub const DEFAULT_EXTRA_OPEN_FRACTION: f64 = 0.1;

/// Lattice steps: up, right, down, left, two cells at a time.
const STEPS: [Position; 4] = [
    Position::new(-2, 0),
    Position::new(0, 2),
    Position::new(2, 0),
    Position::new(0, -2),
];

/// One pending level of the depth-first carve.
struct Frame {
    pos: Position,
    dirs: [Position; 4],
    next: usize,
}

/// Maze generator driven by a random number generator.
pub struct MazeGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MazeGen<R> {
    /// Create a generator using `rng` for every random choice.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a maze of at least `rows x cols` cells.
    ///
    /// Even dimensions are bumped to the next odd number. Start is set to
    /// `(0, 0)` and End to the bottom-right corner, both open.
    /// `extra_open_fraction` is clamped to `[0, 1]`; it bounds how many
    /// walls are considered for loop injection, as a share of the area.
    pub fn generate(
        &mut self,
        rows: usize,
        cols: usize,
        extra_open_fraction: f64,
    ) -> Result<Grid, GenError> {
        if rows == 0 || cols == 0 {
            return Err(GenError::InvalidDimensions { rows, cols });
        }
        let (rows, cols) = (rows | 1, cols | 1);
        let fraction = clamp_fraction(extra_open_fraction);

        let mut grid = Grid::new(rows, cols)?;
        let carved = self.carve(&mut grid, Position::new(1, 1));
        self.connect_start(&mut grid)?;
        self.connect_end(&mut grid, &carved)?;
        let opened = self.add_loops(&mut grid, fraction);

        debug!(
            "generated {rows}x{cols} maze: {} open cells, {opened} extra walls opened",
            grid.count(Cell::Open)
        );
        Ok(grid)
    }

    /// Carve a spanning tree over the odd lattice reachable from `seed`.
    ///
    /// Returns the carve's visited mask (lattice cells only), indexed by the
    /// grid's flat index. An out-of-bounds seed carves nothing.
    pub fn carve(&mut self, grid: &mut Grid, seed: Position) -> Vec<bool> {
        let bounds = grid.bounds();
        let mut visited = vec![false; bounds.len()];
        let Some(si) = bounds.index(seed) else {
            return visited;
        };

        grid.set(seed, Cell::Open);
        visited[si] = true;
        let mut stack = vec![self.frame(seed)];

        while let Some(frame) = stack.last_mut() {
            let Some(&step) = frame.dirs.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;
            let cur = frame.pos;

            let dest = cur + step;
            let Some(di) = bounds.index(dest) else {
                continue;
            };
            if visited[di] {
                continue;
            }
            grid.set(cur.shift(step.row / 2, step.col / 2), Cell::Open);
            grid.set(dest, Cell::Open);
            visited[di] = true;
            stack.push(self.frame(dest));
        }

        visited
    }

    /// Open as many as `budget_fraction * area` shuffled walls, each only if
    /// it has at least two open orthogonal neighbours at that point.
    ///
    /// Returns the number of walls actually opened.
    pub fn add_loops(&mut self, grid: &mut Grid, budget_fraction: f64) -> usize {
        let mut walls: Vec<Position> = grid
            .iter()
            .filter(|(_, c)| c.is_wall())
            .map(|(p, _)| p)
            .collect();
        walls.shuffle(&mut self.rng);

        let budget = (clamp_fraction(budget_fraction) * grid.len() as f64) as usize;
        let mut opened = 0;
        for p in walls.into_iter().take(budget) {
            if grid.open_neighbors(p).count() >= 2 {
                grid.set(p, Cell::Open);
                opened += 1;
            }
        }
        opened
    }

    fn frame(&mut self, pos: Position) -> Frame {
        let mut dirs = STEPS;
        dirs.shuffle(&mut self.rng);
        Frame { pos, dirs, next: 0 }
    }

    /// Open Start and make sure it has an open neighbour.
    fn connect_start(&mut self, grid: &mut Grid) -> Result<(), GridError> {
        let start = Position::ZERO;
        grid.set(start, Cell::Open);
        grid.set_start(start)?;

        let candidates: Vec<Position> = [start.shift(0, 1), start.shift(1, 0)]
            .into_iter()
            .filter(|&p| grid.contains(p))
            .collect();
        if !candidates.is_empty() && !candidates.iter().any(|&p| grid.is_open(p)) {
            let p = candidates[self.rng.random_range(0..candidates.len())];
            grid.set(p, Cell::Open);
        }
        Ok(())
    }

    /// Open End and link it to the carved region if the carve missed it.
    fn connect_end(&mut self, grid: &mut Grid, carved: &[bool]) -> Result<(), GridError> {
        let end = Position::new(grid.rows() as i32 - 1, grid.cols() as i32 - 1);
        grid.set(end, Cell::Open);
        grid.set_end(end)?;

        let reached = grid.bounds().index(end).is_some_and(|i| carved[i]);
        if reached || end == Position::ZERO || grid.open_neighbors(end).next().is_some() {
            return Ok(());
        }

        for link in [end.shift(-1, 0), end.shift(0, -1)] {
            let joins = grid.contains(link)
                && link
                    .neighbors_4()
                    .into_iter()
                    .any(|n| n != end && grid.is_open(n));
            if joins {
                grid.set(link, Cell::Open);
                return Ok(());
            }
        }

        self.edge_connector(grid, end);
        Ok(())
    }

    /// Open cells from `end` along the bottom edge (or the left edge for a
    /// single column) until the corridor meets an open cell.
    fn edge_connector(&mut self, grid: &mut Grid, end: Position) {
        let step = if end.col > 0 {
            Position::new(0, -1)
        } else {
            Position::new(-1, 0)
        };
        let mut prev = end;
        let mut cur = end + step;
        while grid.contains(cur) {
            let joins = grid.is_open(cur)
                || cur
                    .neighbors_4()
                    .into_iter()
                    .any(|n| n != prev && grid.is_open(n));
            grid.set(cur, Cell::Open);
            if joins {
                break;
            }
            prev = cur;
            cur = cur + step;
        }
        debug!("opened edge connector from {end} to {cur}");
    }
}

impl MazeGen<StdRng> {
    /// Generator with a reproducible seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

/// Generate a maze. With `Some(seed)` the result is reproducible; with
/// `None` the thread-local RNG is used.
pub fn generate(
    rows: usize,
    cols: usize,
    extra_open_fraction: f64,
    seed: Option<u64>,
) -> Result<Grid, GenError> {
    match seed {
        Some(seed) => MazeGen::seeded(seed).generate(rows, cols, extra_open_fraction),
        None => MazeGen::new(rand::rng()).generate(rows, cols, extra_open_fraction),
    }
}

fn clamp_fraction(f: f64) -> f64 {
    if f.is_nan() {
        warn!("extra open fraction is NaN, using 0");
        return 0.0;
    }
    let clamped = f.clamp(0.0, 1.0);
    if clamped != f {
        warn!("extra open fraction {f} clamped to {clamped}");
    }
    clamped
}

/// Errors that can occur when generating a maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    /// Rows or columns is zero.
    InvalidDimensions { rows: usize, cols: usize },
    /// The grid could not be built or addressed.
    Grid(GridError),
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => {
                write!(f, "invalid maze dimensions {rows}x{cols}: both must be at least 1")
            }
            Self::Grid(e) => write!(f, "maze grid: {e}"),
        }
    }
}

impl std::error::Error for GenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidDimensions { .. } => None,
            Self::Grid(e) => Some(e),
        }
    }
}

impl From<GridError> for GenError {
    fn from(e: GridError) -> Self {
        match e {
            GridError::InvalidDimensions { rows, cols } => Self::InvalidDimensions { rows, cols },
            other => Self::Grid(other),
        }
    }
}
