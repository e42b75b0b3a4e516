//! Geometry primitives: [`Position`] and [`Bounds`].
//!
//! Positions are `(row, col)` pairs; rows grow downward, columns grow to the
//! right. Coordinates are signed so that neighbour arithmetic can step
//! outside the grid and be rejected by a bounds check afterwards.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A 0-indexed `(row, col)` grid coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a position shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The four orthogonal neighbours (up, right, down, left).
    #[inline]
    pub fn neighbors_4(self) -> [Position; 4] {
        [
            self.shift(-1, 0),
            self.shift(0, 1),
            self.shift(1, 0),
            self.shift(0, -1),
        ]
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add for Position {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Position {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// The half-open rectangle `[0, rows) x [0, cols)` covered by a grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    rows: i32,
    cols: i32,
}

impl Bounds {
    /// Create bounds for a `rows x cols` grid. Negative sizes collapse to zero.
    #[inline]
    pub fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows: rows.max(0),
            cols: cols.max(0),
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(self) -> i32 {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    /// Whether the bounds have zero area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether `p` lies inside the bounds.
    #[inline]
    pub fn contains(self, p: Position) -> bool {
        p.row >= 0 && p.row < self.rows && p.col >= 0 && p.col < self.cols
    }

    /// Row-major flat index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(self, p: Position) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.row as usize * self.cols as usize + p.col as usize)
    }

    /// Convert a flat index back to a position.
    #[inline]
    pub fn position(self, idx: usize) -> Position {
        let cols = self.cols.max(1) as usize;
        Position::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Row-major iterator over every position.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            cur: Position::ZERO,
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Position;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

// ---------------------------------------------------------------------------
// BoundsIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the positions in a [`Bounds`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    cur: Position,
}

impl Iterator for BoundsIter {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Position> {
        if self.cur.row >= self.bounds.rows || self.bounds.is_empty() {
            return None;
        }
        let p = self.cur;
        self.cur.col += 1;
        if self.cur.col >= self.bounds.cols {
            self.cur.col = 0;
            self.cur.row += 1;
        }
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.bounds.is_empty() || self.cur.row >= self.bounds.rows {
            return (0, Some(0));
        }
        let w = self.bounds.cols as usize;
        let remaining_in_row = (self.bounds.cols - self.cur.col) as usize;
        let remaining_rows = (self.bounds.rows - self.cur.row - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for BoundsIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_arithmetic() {
        let a = Position::new(1, 2);
        let b = Position::new(3, 4);
        assert_eq!(a + b, Position::new(4, 6));
        assert_eq!(b - a, Position::new(2, 2));
        assert_eq!(a.shift(-1, 1), Position::new(0, 3));
    }

    #[test]
    fn position_orders_row_major() {
        let mut ps = vec![
            Position::new(1, 0),
            Position::new(0, 2),
            Position::new(0, 1),
        ];
        ps.sort();
        assert_eq!(
            ps,
            vec![Position::new(0, 1), Position::new(0, 2), Position::new(1, 0)]
        );
    }

    #[test]
    fn neighbors_are_orthogonal() {
        let p = Position::new(5, 5);
        for n in p.neighbors_4() {
            let d = n - p;
            assert_eq!(d.row.abs() + d.col.abs(), 1);
        }
    }

    #[test]
    fn bounds_contains_and_index() {
        let b = Bounds::new(3, 4);
        assert_eq!(b.len(), 12);
        assert!(b.contains(Position::new(2, 3)));
        assert!(!b.contains(Position::new(3, 0)));
        assert!(!b.contains(Position::new(0, -1)));
        assert_eq!(b.index(Position::new(1, 2)), Some(6));
        assert_eq!(b.index(Position::new(0, 4)), None);
        assert_eq!(b.position(6), Position::new(1, 2));
    }

    #[test]
    fn bounds_iter_is_row_major() {
        let b = Bounds::new(2, 3);
        let it = b.iter();
        assert_eq!(it.len(), 6);
        let ps: Vec<_> = it.collect();
        assert_eq!(ps[0], Position::new(0, 0));
        assert_eq!(ps[2], Position::new(0, 2));
        assert_eq!(ps[3], Position::new(1, 0));
        for (i, p) in b.iter().enumerate() {
            assert_eq!(b.index(p), Some(i));
        }
    }

    #[test]
    fn empty_bounds_iter() {
        let b = Bounds::new(0, 5);
        assert!(b.is_empty());
        assert_eq!(b.iter().count(), 0);
        assert_eq!(Bounds::new(-2, 3), Bounds::new(0, 3));
    }
}
