//! Flood-fill reachability and the solvability check.

use log::debug;
use mazer_core::{Grid, Position};

/// Flood-fill from `p` and return every cell connected to it through open
/// cells, `p` included.
///
/// The seed is accepted whenever it is in bounds; an out-of-bounds seed
/// yields an empty result.
pub fn reachable_from(grid: &Grid, p: Position) -> Vec<Position> {
    let bounds = grid.bounds();
    let mut result = Vec::new();
    let Some(si) = bounds.index(p) else {
        return result;
    };

    let mut seen = vec![false; bounds.len()];
    let mut stack = vec![p];
    seen[si] = true;
    result.push(p);

    // Iterative DFS.
    while let Some(cp) = stack.pop() {
        for np in grid.open_neighbors(cp) {
            if let Some(ni) = bounds.index(np) {
                if !seen[ni] {
                    seen[ni] = true;
                    stack.push(np);
                    result.push(np);
                }
            }
        }
    }

    result
}

/// Whether End can be reached from Start by orthogonal moves over open
/// cells.
///
/// Returns `false` if either endpoint is unset. The grid is never modified.
pub fn is_solvable(grid: &Grid) -> bool {
    let (Some(start), Some(end)) = (grid.start(), grid.end()) else {
        return false;
    };
    if start == end {
        return true;
    }
    let bounds = grid.bounds();
    let (Some(si), Some(ei)) = (bounds.index(start), bounds.index(end)) else {
        return false;
    };

    let mut seen = vec![false; bounds.len()];
    let mut stack = vec![start];
    seen[si] = true;

    while let Some(cp) = stack.pop() {
        for np in grid.open_neighbors(cp) {
            let Some(ni) = bounds.index(np) else {
                continue;
            };
            if ni == ei {
                return true;
            }
            if !seen[ni] {
                seen[ni] = true;
                stack.push(np);
            }
        }
    }

    debug!("end {end} is not reachable from start {start}");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazer_core::Cell;

    #[test]
    fn open_grid_is_solvable() {
        let mut g = Grid::filled(5, 5, Cell::Open).unwrap();
        g.set_start(Position::new(0, 0)).unwrap();
        g.set_end(Position::new(4, 4)).unwrap();
        assert!(is_solvable(&g));
        assert_eq!(reachable_from(&g, Position::new(2, 2)).len(), 25);
    }

    #[test]
    fn walled_off_end_is_not_solvable() {
        let g = Grid::from_ascii(
            "\
S...
.#..
..##
..#E",
        )
        .unwrap();
        assert!(!is_solvable(&g));
        let comp = reachable_from(&g, g.start().unwrap());
        assert_eq!(comp.len(), 11);
        assert!(!comp.contains(&Position::new(3, 3)));
    }

    #[test]
    fn unset_endpoints_are_not_solvable() {
        let mut g = Grid::filled(3, 3, Cell::Open).unwrap();
        assert!(!is_solvable(&g));
        g.set_start(Position::new(0, 0)).unwrap();
        assert!(!is_solvable(&g));
        g.set_end(Position::new(0, 0)).unwrap();
        assert!(is_solvable(&g));
    }

    #[test]
    fn check_does_not_mutate() {
        let mut g = Grid::from_ascii("S.#\n#..\n##E").unwrap();
        g.mark_visited(Position::new(0, 1));
        let before = g.clone();
        assert!(is_solvable(&g));
        assert!(!is_solvable(&Grid::from_ascii("S#\n#E").unwrap()));
        assert_eq!(g, before);
    }

    #[test]
    fn reachable_from_wall_seed() {
        let g = Grid::from_ascii("#.\n..").unwrap();
        // Seed is a wall: it is included, and its open neighbours are explored.
        assert_eq!(reachable_from(&g, Position::new(0, 0)).len(), 4);
        assert!(reachable_from(&g, Position::new(-1, 0)).is_empty());
    }
}
