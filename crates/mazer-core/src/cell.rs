//! The state of a single maze cell.

/// A maze cell: either a wall or an open corridor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Wall,
    Open,
}

impl Cell {
    /// Whether the cell can be walked through.
    #[inline]
    pub const fn is_open(self) -> bool {
        matches!(self, Cell::Open)
    }

    /// Whether the cell blocks movement.
    #[inline]
    pub const fn is_wall(self) -> bool {
        matches!(self, Cell::Wall)
    }

    /// ASCII glyph used when rendering or parsing grids.
    pub const fn glyph(self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Open => '.',
        }
    }

    /// Parse a glyph produced by [`glyph`](Self::glyph).
    pub fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            '#' => Some(Cell::Wall),
            '.' => Some(Cell::Open),
            _ => None,
        }
    }
}
