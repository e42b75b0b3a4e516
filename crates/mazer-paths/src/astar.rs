//! Stepwise A* search.
//!
//! [`solve`] returns an [`AstarSearch`], a resumable state machine that
//! expands exactly one node per [`step`](AstarSearch::step). Between steps
//! the caller can read the grid's visited set (through
//! [`grid`](AstarSearch::grid)) to display progress, or simply stop
//! stepping to cancel. When the goal is popped the path is written onto the
//! grid and the search ends.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use log::{debug, trace};
use mazer_core::{Grid, Position};

use crate::distance::manhattan;

/// Sentinel for "no cost recorded yet".
const UNSEEN: u32 = u32::MAX;
/// Sentinel for "no predecessor".
const NO_PARENT: usize = usize::MAX;

/// Per-cell search bookkeeping: cost from Start, estimated total cost, and
/// predecessor index.
#[derive(Clone, Copy)]
struct Node {
    g: u32,
    f: u32,
    parent: usize,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNSEEN,
            f: UNSEEN,
            parent: NO_PARENT,
        }
    }
}

/// Frontier entry, ordered for `BinaryHeap` so that the smallest `f` pops
/// first. Among equal `f`, the deeper entry (larger `g`, hence closer to
/// End) wins, then the earlier insertion.
#[derive(Clone, Copy, Eq, PartialEq)]
struct NodeRef {
    idx: usize,
    f: u32,
    g: u32,
    seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // f and seq reversed: BinaryHeap is a max-heap.
        other
            .f
            .cmp(&self.f)
            .then_with(|| self.g.cmp(&other.g))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Outcome of a single [`AstarSearch::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStep {
    /// One node was expanded and added to the visited set.
    Expanded(Position),
    /// End was reached; the grid's path is populated.
    Found,
    /// The frontier ran dry without reaching End.
    Exhausted,
}

/// Lifecycle of an [`AstarSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    Running,
    Found,
    Exhausted,
}

/// An in-flight A* search over a borrowed grid.
///
/// The search holds the grid mutably for its whole lifetime, so a second
/// search cannot be started on the same grid until this one is dropped.
pub struct AstarSearch<'g> {
    grid: &'g mut Grid,
    start: Position,
    end: Position,
    end_idx: usize,
    nodes: Vec<Node>,
    frontier: BinaryHeap<NodeRef>,
    seq: u64,
    expanded: usize,
    status: SearchStatus,
}

/// Start an A* search from the grid's Start to its End.
///
/// The grid's previous visited set and path are cleared. Fails with
/// [`SolveError::UninitializedGrid`] if Start or End is unset.
pub fn solve(grid: &mut Grid) -> Result<AstarSearch<'_>, SolveError> {
    AstarSearch::new(grid)
}

/// Run a full search and return the path, or `None` if End is unreachable.
pub fn shortest_path(grid: &mut Grid) -> Result<Option<Vec<Position>>, SolveError> {
    let status = solve(grid)?.run();
    Ok((status == SearchStatus::Found).then(|| grid.path().to_vec()))
}

impl<'g> AstarSearch<'g> {
    /// Prepare a fresh search on `grid`. See [`solve`].
    pub fn new(grid: &'g mut Grid) -> Result<Self, SolveError> {
        let (Some(start), Some(end)) = (grid.start(), grid.end()) else {
            return Err(SolveError::UninitializedGrid);
        };
        let bounds = grid.bounds();
        let (Some(start_idx), Some(end_idx)) = (bounds.index(start), bounds.index(end)) else {
            return Err(SolveError::UninitializedGrid);
        };
        grid.reset_search();

        let mut nodes = vec![Node::default(); bounds.len()];
        let h = manhattan(start, end);
        nodes[start_idx] = Node {
            g: 0,
            f: h,
            parent: NO_PARENT,
        };

        let mut frontier = BinaryHeap::new();
        frontier.push(NodeRef {
            idx: start_idx,
            f: h,
            g: 0,
            seq: 0,
        });

        Ok(Self {
            grid,
            start,
            end,
            end_idx,
            nodes,
            frontier,
            seq: 1,
            expanded: 0,
            status: SearchStatus::Running,
        })
    }

    /// Advance the search by one node expansion.
    ///
    /// Once the search has finished, further calls keep returning the same
    /// terminal step without doing any work.
    pub fn step(&mut self) -> SearchStep {
        match self.status {
            SearchStatus::Found => return SearchStep::Found,
            SearchStatus::Exhausted => return SearchStep::Exhausted,
            SearchStatus::Running => {}
        }

        let bounds = self.grid.bounds();
        loop {
            let Some(current) = self.frontier.pop() else {
                self.status = SearchStatus::Exhausted;
                debug!(
                    "search exhausted after {} expansions, {} unreachable from {}",
                    self.expanded, self.end, self.start
                );
                return SearchStep::Exhausted;
            };

            let ci = current.idx;
            let cp = bounds.position(ci);

            // Skip stale entries.
            if self.grid.is_visited(cp) || current.g != self.nodes[ci].g {
                continue;
            }

            if ci == self.end_idx {
                let path = self.reconstruct();
                debug!(
                    "path of {} cells found after {} expansions",
                    path.len(),
                    self.expanded
                );
                self.grid.set_path(path);
                self.status = SearchStatus::Found;
                return SearchStep::Found;
            }

            self.grid.mark_visited(cp);
            self.expanded += 1;
            trace!("expand {cp} g={} f={}", current.g, self.nodes[ci].f);

            let tentative_g = self.nodes[ci].g + 1;
            for np in self.grid.open_neighbors(cp) {
                if self.grid.is_visited(np) {
                    continue;
                }
                let Some(ni) = bounds.index(np) else {
                    continue;
                };
                let n = &mut self.nodes[ni];
                if n.g != UNSEEN && tentative_g >= n.g {
                    continue;
                }
                n.g = tentative_g;
                n.f = tentative_g + manhattan(np, self.end);
                n.parent = ci;
                self.frontier.push(NodeRef {
                    idx: ni,
                    f: n.f,
                    g: n.g,
                    seq: self.seq,
                });
                self.seq += 1;
            }

            return SearchStep::Expanded(cp);
        }
    }

    /// Step until the search finishes and return the final status.
    pub fn run(&mut self) -> SearchStatus {
        while self.status == SearchStatus::Running {
            self.step();
        }
        self.status
    }

    /// Current lifecycle state.
    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Whether the search has finished, successfully or not.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.status != SearchStatus::Running
    }

    /// Number of nodes expanded so far (one per [`SearchStep::Expanded`]).
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Number of frontier entries, stale ones included.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Best known cost from Start to `p`, if any.
    pub fn cost_to(&self, p: Position) -> Option<u32> {
        let i = self.grid.bounds().index(p)?;
        let g = self.nodes[i].g;
        (g != UNSEEN).then_some(g)
    }

    /// Read-only view of the grid, with the visited set and path so far.
    #[inline]
    pub fn grid(&self) -> &Grid {
        self.grid
    }

    /// Walk predecessors back from End and return the path Start→End.
    fn reconstruct(&self) -> Vec<Position> {
        let bounds = self.grid.bounds();
        let mut path = Vec::new();
        let mut ci = self.end_idx;
        while ci != NO_PARENT {
            path.push(bounds.position(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        path
    }
}

impl Iterator for AstarSearch<'_> {
    type Item = Position;

    /// Yields each expanded position; ends when the search finishes.
    fn next(&mut self) -> Option<Position> {
        match self.step() {
            SearchStep::Expanded(p) => Some(p),
            SearchStep::Found | SearchStep::Exhausted => None,
        }
    }
}

/// Errors that can prevent a search from starting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// The grid has no Start or no End.
    UninitializedGrid,
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UninitializedGrid => write!(f, "grid has no start or end set"),
        }
    }
}

impl std::error::Error for SolveError {}
