//! The maze grid shared between generation, validation and search.
//!
//! A [`Grid`] is a row-major matrix of [`Cell`] values with two designated
//! endpoints and two result fields written by a search: the set of
//! expanded cells and the final path. Presentation code reads those
//! fields to show progress; the search owns all of its other state.

use std::fmt;

use crate::cell::Cell;
use crate::geom::{Bounds, BoundsIter, Position};

/// A rectangular maze with Start/End markers and search results.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "GridData", try_from = "GridData")
)]
pub struct Grid {
    bounds: Bounds,
    cells: Vec<Cell>,
    start: Option<Position>,
    end: Option<Position>,
    path: Vec<Position>,
    visited: Vec<bool>,
    visited_count: usize,
}

impl Grid {
    /// Create a `rows x cols` grid filled with walls.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        Self::filled(rows, cols, Cell::Wall)
    }

    /// Create a `rows x cols` grid filled with `cell`.
    pub fn filled(rows: usize, cols: usize, cell: Cell) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 || rows > i32::MAX as usize || cols > i32::MAX as usize {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        let bounds = Bounds::new(rows as i32, cols as i32);
        let len = bounds.len();
        Ok(Self {
            bounds,
            cells: vec![cell; len],
            start: None,
            end: None,
            path: Vec::new(),
            visited: vec![false; len],
            visited_count: 0,
        })
    }

    /// Parse a grid from ASCII art.
    ///
    /// `#` is a wall, `.` is open, `S` and `E` are open cells marking Start
    /// and End. Lines are separated by `'\n'` and must all have the same
    /// width. Surrounding whitespace of the whole string is trimmed.
    pub fn from_ascii(s: &str) -> Result<Self, GridError> {
        let s = s.trim();
        let lines: Vec<&str> = s.lines().map(str::trim_end).collect();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        if lines.iter().any(|l| l.chars().count() != cols) {
            return Err(GridError::InconsistentSize(s.to_string()));
        }
        let mut grid = Self::new(lines.len(), cols)?;
        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let p = Position::new(row as i32, col as i32);
                let cell = match ch {
                    'S' => {
                        grid.start = Some(p);
                        Cell::Open
                    }
                    'E' => {
                        grid.end = Some(p);
                        Cell::Open
                    }
                    _ => Cell::from_glyph(ch).ok_or(GridError::InvalidChar { ch, pos: p })?,
                };
                grid.set(p, cell);
            }
        }
        Ok(grid)
    }

    /// The rectangle covered by this grid.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.bounds.rows() as usize
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.bounds.cols() as usize
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: construction rejects empty grids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Position) -> bool {
        self.bounds.contains(p)
    }

    /// Cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Position) -> Option<Cell> {
        self.bounds.index(p).map(|i| self.cells[i])
    }

    /// Whether `p` is in bounds and open.
    #[inline]
    pub fn is_open(&self, p: Position) -> bool {
        self.at(p).is_some_and(Cell::is_open)
    }

    /// Set the cell at `p`. Does nothing if out of bounds.
    pub fn set(&mut self, p: Position, cell: Cell) {
        if let Some(i) = self.bounds.index(p) {
            self.cells[i] = cell;
        }
    }

    /// Overwrite every cell with `cell`.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Count how many cells equal `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Iterate over `(Position, Cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }

    /// Row-major iterator over all positions.
    pub fn positions(&self) -> BoundsIter {
        self.bounds.iter()
    }

    /// In-bounds open orthogonal neighbours of `p`, in up/right/down/left order.
    pub fn open_neighbors(&self, p: Position) -> impl Iterator<Item = Position> + '_ {
        p.neighbors_4().into_iter().filter(|&n| self.is_open(n))
    }

    /// Start position, if set.
    #[inline]
    pub fn start(&self) -> Option<Position> {
        self.start
    }

    /// End position, if set.
    #[inline]
    pub fn end(&self) -> Option<Position> {
        self.end
    }

    /// Designate the Start cell.
    pub fn set_start(&mut self, p: Position) -> Result<(), GridError> {
        if !self.contains(p) {
            return Err(GridError::OutOfBounds(p));
        }
        self.start = Some(p);
        Ok(())
    }

    /// Designate the End cell.
    pub fn set_end(&mut self, p: Position) -> Result<(), GridError> {
        if !self.contains(p) {
            return Err(GridError::OutOfBounds(p));
        }
        self.end = Some(p);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Search results
    // -----------------------------------------------------------------------

    /// The last path found, Start first. Empty if no search succeeded.
    #[inline]
    pub fn path(&self) -> &[Position] {
        &self.path
    }

    /// Whether `p` was expanded by the current or last search.
    #[inline]
    pub fn is_visited(&self, p: Position) -> bool {
        self.bounds.index(p).is_some_and(|i| self.visited[i])
    }

    /// Number of expanded cells.
    #[inline]
    pub fn visited_count(&self) -> usize {
        self.visited_count
    }

    /// Expanded cells in row-major order.
    pub fn visited(&self) -> impl Iterator<Item = Position> + '_ {
        self.bounds
            .iter()
            .zip(self.visited.iter())
            .filter_map(|(p, &v)| v.then_some(p))
    }

    /// Record `p` as expanded. Returns `false` if it already was, or if it
    /// is out of bounds.
    pub fn mark_visited(&mut self, p: Position) -> bool {
        let Some(i) = self.bounds.index(p) else {
            return false;
        };
        if self.visited[i] {
            return false;
        }
        self.visited[i] = true;
        self.visited_count += 1;
        true
    }

    /// Store a reconstructed path.
    pub fn set_path(&mut self, path: Vec<Position>) {
        self.path = path;
    }

    /// Clear the visited set and the path.
    pub fn reset_search(&mut self) {
        self.path.clear();
        self.visited.fill(false);
        self.visited_count = 0;
    }
}

impl fmt::Display for Grid {
    /// Draws the maze as ASCII. Start and End are `S`/`E`, path cells `*`,
    /// other expanded cells `o`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut on_path = vec![false; self.len()];
        for &p in &self.path {
            if let Some(i) = self.bounds.index(p) {
                on_path[i] = true;
            }
        }
        for (i, (p, cell)) in self.iter().enumerate() {
            if p.col == 0 && p.row > 0 {
                writeln!(f)?;
            }
            let ch = if Some(p) == self.start {
                'S'
            } else if Some(p) == self.end {
                'E'
            } else if on_path[i] {
                '*'
            } else if self.visited[i] {
                'o'
            } else {
                cell.glyph()
            };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

/// Serialized form of a [`Grid`]: dimensions, row-major cells, endpoints.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GridData {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    start: Option<Position>,
    end: Option<Position>,
}

#[cfg(feature = "serde")]
impl From<Grid> for GridData {
    fn from(g: Grid) -> Self {
        Self {
            rows: g.rows(),
            cols: g.cols(),
            cells: g.cells,
            start: g.start,
            end: g.end,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<GridData> for Grid {
    type Error = GridError;

    fn try_from(d: GridData) -> Result<Self, GridError> {
        let mut g = Grid::new(d.rows, d.cols)?;
        if d.cells.len() != g.len() {
            return Err(GridError::InconsistentSize(format!(
                "{} cells for a {}x{} grid",
                d.cells.len(),
                d.rows,
                d.cols
            )));
        }
        g.cells = d.cells;
        if let Some(p) = d.start {
            g.set_start(p)?;
        }
        if let Some(p) = d.end {
            g.set_end(p)?;
        }
        Ok(g)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when building or addressing a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Rows or columns is zero (or too large to address).
    InvalidDimensions { rows: usize, cols: usize },
    /// A position lies outside the grid.
    OutOfBounds(Position),
    /// Lines of an ASCII grid have different widths.
    InconsistentSize(String),
    /// An ASCII grid contains an unknown character.
    InvalidChar { ch: char, pos: Position },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => {
                write!(f, "invalid grid dimensions {rows}x{cols}")
            }
            Self::OutOfBounds(p) => write!(f, "position {p} is outside the grid"),
            Self::InconsistentSize(s) => write!(f, "grid: inconsistent size:\n{s}"),
            Self::InvalidChar { ch, pos } => {
                write!(f, "grid contains invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "\
S.#
#..
##E";

    #[test]
    fn new_is_all_walls() {
        let g = Grid::new(3, 4).unwrap();
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 4);
        assert_eq!(g.count(Cell::Wall), 12);
        assert_eq!(g.start(), None);
        assert_eq!(g.end(), None);
        assert!(g.path().is_empty());
        assert_eq!(g.visited_count(), 0);
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert_eq!(
            Grid::new(0, 5),
            Err(GridError::InvalidDimensions { rows: 0, cols: 5 })
        );
        assert!(Grid::filled(4, 0, Cell::Open).is_err());
    }

    #[test]
    fn set_and_at() {
        let mut g = Grid::new(4, 4).unwrap();
        let p = Position::new(2, 3);
        g.set(p, Cell::Open);
        assert_eq!(g.at(p), Some(Cell::Open));
        assert!(g.is_open(p));
        assert_eq!(g.at(Position::new(0, 0)), Some(Cell::Wall));
        assert_eq!(g.at(Position::new(10, 10)), None);
        assert!(!g.is_open(Position::new(-1, 0)));
        // Out-of-bounds writes are ignored.
        g.set(Position::new(4, 0), Cell::Open);
        assert_eq!(g.count(Cell::Open), 1);
    }

    #[test]
    fn endpoints_must_be_in_bounds() {
        let mut g = Grid::new(2, 2).unwrap();
        assert!(g.set_start(Position::new(0, 0)).is_ok());
        assert_eq!(
            g.set_end(Position::new(2, 0)),
            Err(GridError::OutOfBounds(Position::new(2, 0)))
        );
        assert_eq!(g.end(), None);
    }

    #[test]
    fn parse_ascii() {
        let g = Grid::from_ascii(ROOM).unwrap();
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 3);
        assert_eq!(g.start(), Some(Position::new(0, 0)));
        assert_eq!(g.end(), Some(Position::new(2, 2)));
        assert!(g.is_open(Position::new(0, 1)));
        assert!(!g.is_open(Position::new(0, 2)));
        assert_eq!(g.to_string(), ROOM);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(
            Grid::from_ascii("..\n..."),
            Err(GridError::InconsistentSize(_))
        ));
        assert_eq!(
            Grid::from_ascii("..\n.x"),
            Err(GridError::InvalidChar {
                ch: 'x',
                pos: Position::new(1, 1)
            })
        );
    }

    #[test]
    fn open_neighbors_filters_walls_and_bounds() {
        let g = Grid::from_ascii(ROOM).unwrap();
        let ns: Vec<_> = g.open_neighbors(Position::new(1, 1)).collect();
        assert_eq!(ns, vec![Position::new(0, 1), Position::new(1, 2)]);
        let corner: Vec<_> = g.open_neighbors(Position::new(0, 0)).collect();
        assert_eq!(corner, vec![Position::new(0, 1)]);
    }

    #[test]
    fn visited_bookkeeping() {
        let mut g = Grid::filled(3, 3, Cell::Open).unwrap();
        assert!(g.mark_visited(Position::new(1, 1)));
        assert!(!g.mark_visited(Position::new(1, 1)));
        assert!(!g.mark_visited(Position::new(5, 5)));
        assert!(g.mark_visited(Position::new(0, 2)));
        assert_eq!(g.visited_count(), 2);
        let v: Vec<_> = g.visited().collect();
        assert_eq!(v, vec![Position::new(0, 2), Position::new(1, 1)]);

        g.set_path(vec![Position::new(0, 0), Position::new(0, 1)]);
        assert_eq!(g.path().len(), 2);
        g.reset_search();
        assert!(g.path().is_empty());
        assert_eq!(g.visited_count(), 0);
        assert!(!g.is_visited(Position::new(1, 1)));
    }

    #[test]
    fn display_overlays_results() {
        let mut g = Grid::from_ascii("S..\n...\n..E").unwrap();
        g.mark_visited(Position::new(2, 0));
        g.set_path(vec![
            Position::new(0, 0),
            Position::new(0, 1),
            Position::new(1, 1),
            Position::new(2, 1),
            Position::new(2, 2),
        ]);
        assert_eq!(g.to_string(), "S*.\n.*.\no*E");
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let mut g = Grid::from_ascii("S.#\n#.E").unwrap();
        g.mark_visited(Position::new(0, 1));
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        // Search results are not serialized.
        g.reset_search();
        assert_eq!(back, g);
    }

    #[test]
    fn mismatched_cell_count_rejected() {
        let json = r#"{"rows":2,"cols":2,"cells":["Open"],"start":null,"end":null}"#;
        assert!(serde_json::from_str::<Grid>(json).is_err());
    }
}
