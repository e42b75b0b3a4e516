//! Hand-built layouts for benchmarks and tests.
//!
//! These complement [`generate`](crate::generate) with known best and
//! worst cases for the search, plus two layouts where End cannot be
//! reached.

use mazer_core::{Cell, Grid, Position};

use crate::maze::{GenError, generate};

/// Every cell open, Start top-left, End bottom-right.
///
/// The search heads straight for End here, so this is the best case.
pub fn open_room(rows: usize, cols: usize) -> Result<Grid, GenError> {
    let mut grid = Grid::filled(rows, cols, Cell::Open)?;
    set_corners(&mut grid)?;
    Ok(grid)
}

/// Concentric corridors linked by single gaps, with End at the centre.
///
/// Dimensions are normalized to odd numbers like [`generate`]. Every other
/// ring is open; neighbouring open rings are joined through the wall ring
/// between them, alternating top and bottom, so reaching the centre means
/// walking around most of each ring.
pub fn spiral(rows: usize, cols: usize) -> Result<Grid, GenError> {
    if rows == 0 || cols == 0 {
        return Err(GenError::InvalidDimensions { rows, cols });
    }
    let (rows, cols) = ((rows | 1) as i32, (cols | 1) as i32);
    let mut grid = Grid::new(rows as usize, cols as usize)?;
    let depth = rows.min(cols) / 2;
    let mid = Position::new(rows / 2, cols / 2);

    let mut innermost = 0;
    for ring in (0..=depth).step_by(2) {
        open_ring(&mut grid, ring);
        innermost = ring;
        if ring + 2 <= depth {
            let gap = if (ring / 2) % 2 == 0 {
                Position::new(ring + 1, mid.col)
            } else {
                Position::new(rows - 2 - ring, mid.col)
            };
            grid.set(gap, Cell::Open);
        }
    }
    // Drop a corridor from the innermost ring's top edge to the centre.
    for row in innermost..=mid.row {
        grid.set(Position::new(row, mid.col), Cell::Open);
    }

    grid.set_start(Position::ZERO)?;
    grid.set_end(mid)?;
    Ok(grid)
}

/// A generated maze whose End has been sealed off: End stays open but all
/// of its orthogonal neighbours are walls.
pub fn walled_end(
    rows: usize,
    cols: usize,
    extra_open_fraction: f64,
    seed: Option<u64>,
) -> Result<Grid, GenError> {
    let mut grid = generate(rows, cols, extra_open_fraction, seed)?;
    if let Some(end) = grid.end() {
        for n in end.neighbors_4() {
            if Some(n) != grid.start() {
                grid.set(n, Cell::Wall);
            }
        }
    }
    Ok(grid)
}

/// Solid walls with only Start and End open.
pub fn blocked(rows: usize, cols: usize) -> Result<Grid, GenError> {
    let mut grid = Grid::new(rows, cols)?;
    set_corners(&mut grid)?;
    Ok(grid)
}

fn set_corners(grid: &mut Grid) -> Result<(), GenError> {
    let end = Position::new(grid.rows() as i32 - 1, grid.cols() as i32 - 1);
    grid.set(Position::ZERO, Cell::Open);
    grid.set(end, Cell::Open);
    grid.set_start(Position::ZERO)?;
    grid.set_end(end)?;
    Ok(())
}

fn open_ring(grid: &mut Grid, ring: i32) {
    let (top, left) = (ring, ring);
    let bottom = grid.rows() as i32 - 1 - ring;
    let right = grid.cols() as i32 - 1 - ring;
    if top > bottom || left > right {
        return;
    }
    for col in left..=right {
        grid.set(Position::new(top, col), Cell::Open);
        grid.set(Position::new(bottom, col), Cell::Open);
    }
    for row in top..=bottom {
        grid.set(Position::new(row, left), Cell::Open);
        grid.set(Position::new(row, right), Cell::Open);
    }
}
