use mazer_core::Position;

/// Manhattan (L1) distance between two positions.
///
/// Admissible and consistent for 4-directional unit-cost movement.
#[inline]
pub fn manhattan(a: Position, b: Position) -> u32 {
    (a.row - b.row).unsigned_abs() + (a.col - b.col).unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_is_symmetric() {
        let a = Position::new(0, 0);
        let b = Position::new(4, 4);
        assert_eq!(manhattan(a, b), 8);
        assert_eq!(manhattan(b, a), 8);
        assert_eq!(manhattan(a, a), 0);
        assert_eq!(manhattan(Position::new(2, 7), Position::new(5, 1)), 9);
    }
}
