use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use thiserror::Error;

use crate::sliding::SlidingBoard;

/// Upper bound on node expansions before the search gives up.
pub const DEFAULT_EXPANSION_BUDGET: usize = 500_000;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("search space exhausted without reaching the goal")]
    Exhausted,
    #[error("expansion budget of {0} exceeded")]
    BudgetExceeded(usize),
}

#[derive(Debug, Clone)]
pub struct Solution {
    /// Tile indices to slide into the gap, in order from start to goal.
    pub moves: Vec<usize>,
    pub expanded: usize,
}

/// Frontier entry; the heap yields the lowest f first, FIFO on ties.
#[derive(Debug, PartialEq, Eq)]
struct OpenEntry {
    f: u32,
    serial: u64,
    node: usize,
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f
            .cmp(&self.f)
            .then_with(|| other.serial.cmp(&self.serial))
    }
}

struct SearchNode {
    tiles: Vec<u8>,
    g: u32,
    parent: Option<usize>,
    /// Index slid to reach this state; meaningless for the root.
    moved: usize,
    empty: usize,
}

/// Sum of Manhattan distances of every non-gap tile to its goal cell.
/// Never overestimates the true move count.
pub fn manhattan(tiles: &[u8], size: usize) -> u32 {
    let mut total = 0u32;
    for (i, &t) in tiles.iter().enumerate() {
        if t == 0 { continue; }
        let goal = t as usize - 1;
        let (r, c) = (i / size, i % size);
        let (gr, gc) = (goal / size, goal % size);
        total += (r.abs_diff(gr) + c.abs_diff(gc)) as u32;
    }
    total
}

fn is_goal(tiles: &[u8]) -> bool {
    let n = tiles.len();
    tiles[n - 1] == 0 && tiles[..n - 1].iter().enumerate().all(|(i, &t)| t as usize == i + 1)
}

/// A* over sliding-board states. With the Manhattan heuristic the returned
/// move sequence has minimal length.
pub struct AStarSolver {
    budget: usize,
}

impl AStarSolver {
    pub fn new() -> Self { Self { budget: DEFAULT_EXPANSION_BUDGET } }

    pub fn with_budget(budget: usize) -> Self { Self { budget } }

    pub fn solve(&self, start: &SlidingBoard) -> Result<Solution, SearchError> {
        let size = start.size();
        if start.is_solved() {
            return Ok(Solution { moves: Vec::new(), expanded: 0 });
        }

        let mut nodes: Vec<SearchNode> = Vec::new();
        let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();
        let mut closed: HashSet<Vec<u8>> = HashSet::new();
        let mut serial = 0u64;
        let mut expanded = 0usize;

        nodes.push(SearchNode {
            tiles: start.tiles().to_vec(),
            g: 0,
            parent: None,
            moved: 0,
            empty: start.empty_index(),
        });
        open.push(OpenEntry { f: manhattan(start.tiles(), size), serial, node: 0 });

        while let Some(entry) = open.pop() {
            let (tiles, g, empty) = {
                let n = &nodes[entry.node];
                (n.tiles.clone(), n.g, n.empty)
            };
            if !closed.insert(tiles.clone()) {
                continue; // stale frontier entry for an already-expanded state
            }
            if is_goal(&tiles) {
                return Ok(Solution { moves: reconstruct(&nodes, entry.node), expanded });
            }
            expanded += 1;
            if expanded > self.budget {
                log::warn!("A* gave up after {} expansions", self.budget);
                return Err(SearchError::BudgetExceeded(self.budget));
            }

            for &target in &SlidingBoard::neighbors(size, empty) {
                let mut next = tiles.clone();
                next.swap(target, empty);
                if closed.contains(&next) { continue; }
                let h = manhattan(&next, size);
                serial += 1;
                nodes.push(SearchNode { tiles: next, g: g + 1, parent: Some(entry.node), moved: target, empty: target });
                open.push(OpenEntry { f: g + 1 + h, serial, node: nodes.len() - 1 });
            }
        }
        Err(SearchError::Exhausted)
    }
}

impl Default for AStarSolver {
    fn default() -> Self { Self::new() }
}

fn reconstruct(nodes: &[SearchNode], goal: usize) -> Vec<usize> {
    let mut moves = Vec::new();
    let mut at = goal;
    while let Some(parent) = nodes[at].parent {
        moves.push(nodes[at].moved);
        at = parent;
    }
    moves.reverse();
    moves
}
