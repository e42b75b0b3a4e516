use std::collections::VecDeque;

use mazer_core::{Bounds, Grid, Position};

/// Sentinel value meaning "unreachable" in a [`DistanceMap`].
pub const UNREACHABLE: u32 = u32::MAX;

/// Unweighted move counts from a single source, as computed by [`bfs_distances`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceMap {
    bounds: Bounds,
    dist: Vec<u32>,
    reached: usize,
}

impl DistanceMap {
    /// Number of moves from the source to `p`, or `None` if `p` was not
    /// reached or is out of bounds.
    pub fn at(&self, p: Position) -> Option<u32> {
        let i = self.bounds.index(p)?;
        let d = self.dist[i];
        (d != UNREACHABLE).then_some(d)
    }

    /// Number of cells reached, the source included.
    pub fn reached(&self) -> usize {
        self.reached
    }

    /// Largest finite distance in the map.
    pub fn max_distance(&self) -> Option<u32> {
        self.dist.iter().copied().filter(|&d| d != UNREACHABLE).max()
    }
}

/// Compute a breadth-first distance map from `source` over open cells.
///
/// Each step has cost 1. The source itself is seeded whenever it is in
/// bounds, even if its own cell is a wall; only open neighbours are
/// entered from there.
pub fn bfs_distances(grid: &Grid, source: Position) -> DistanceMap {
    let bounds = grid.bounds();
    let mut map = DistanceMap {
        bounds,
        dist: vec![UNREACHABLE; bounds.len()],
        reached: 0,
    };
    let Some(si) = bounds.index(source) else {
        return map;
    };

    let mut queue: VecDeque<Position> = VecDeque::new();
    map.dist[si] = 0;
    map.reached = 1;
    queue.push_back(source);

    while let Some(cp) = queue.pop_front() {
        let Some(ci) = bounds.index(cp) else {
            continue;
        };
        let nd = map.dist[ci] + 1;
        for np in grid.open_neighbors(cp) {
            let Some(ni) = bounds.index(np) else {
                continue;
            };
            if map.dist[ni] != UNREACHABLE {
                continue;
            }
            map.dist[ni] = nd;
            map.reached += 1;
            queue.push_back(np);
        }
    }

    map
}

/// Number of moves on a shortest Start→End route, or `None` if the grid has
/// no Start/End or End cannot be reached.
pub fn shortest_distance(grid: &Grid) -> Option<u32> {
    let (start, end) = (grid.start()?, grid.end()?);
    bfs_distances(grid, start).at(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_room_distances() {
        let g = Grid::from_ascii("S....\n.....\n.....\n.....\n....E").unwrap();
        let m = bfs_distances(&g, Position::new(0, 0));
        assert_eq!(m.reached(), 25);
        assert_eq!(m.at(Position::new(0, 0)), Some(0));
        assert_eq!(m.at(Position::new(4, 4)), Some(8));
        assert_eq!(m.max_distance(), Some(8));
        assert_eq!(shortest_distance(&g), Some(8));
    }

    #[test]
    fn walls_force_detour() {
        let g = Grid::from_ascii(
            "\
S.#..
#.#.#
#...E",
        )
        .unwrap();
        assert_eq!(shortest_distance(&g), Some(6));
        let m = bfs_distances(&g, Position::new(0, 0));
        assert_eq!(m.at(Position::new(0, 3)), Some(7));
        assert_eq!(m.at(Position::new(1, 0)), None);
    }

    #[test]
    fn unreachable_end() {
        let g = Grid::from_ascii("S.#\n..#\n##E").unwrap();
        assert_eq!(shortest_distance(&g), None);
        assert_eq!(bfs_distances(&g, Position::new(0, 0)).reached(), 4);
    }

    #[test]
    fn source_out_of_bounds() {
        let g = Grid::from_ascii("S.\n.E").unwrap();
        let m = bfs_distances(&g, Position::new(5, 5));
        assert_eq!(m.reached(), 0);
        assert_eq!(m.max_distance(), None);
    }

    #[test]
    fn missing_endpoints() {
        let g = Grid::from_ascii("..\n..").unwrap();
        assert_eq!(shortest_distance(&g), None);
    }
}
