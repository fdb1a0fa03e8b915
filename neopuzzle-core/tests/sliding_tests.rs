use std::collections::{HashMap, VecDeque};

use neopuzzle_core::astar::{manhattan, AStarSolver, SearchError};
use neopuzzle_core::generator::PuzzleGenerator;
use neopuzzle_core::session::Difficulty;
use neopuzzle_core::sliding::SlidingBoard;
use pretty_assertions::assert_eq;

#[test]
fn neighbor_counts_on_three_by_three() {
    for corner in [0, 2, 6, 8] {
        assert_eq!(SlidingBoard::neighbors(3, corner).len(), 2, "corner {corner}");
    }
    for edge in [1, 3, 5, 7] {
        assert_eq!(SlidingBoard::neighbors(3, edge).len(), 3, "edge {edge}");
    }
    assert_eq!(SlidingBoard::neighbors(3, 4).len(), 4);
}

#[test]
fn neighbor_counts_on_four_by_four() {
    assert_eq!(SlidingBoard::neighbors(4, 0).len(), 2);
    assert_eq!(SlidingBoard::neighbors(4, 1).len(), 3);
    assert_eq!(SlidingBoard::neighbors(4, 5).len(), 4);
}

#[test]
fn slide_rejects_illegal_moves() {
    let mut b = SlidingBoard::goal(3);
    assert_eq!(b.empty_index(), 8);
    let before = b.clone();
    assert!(!b.slide(0), "0 is not adjacent to the gap");
    assert!(!b.slide(42), "out of range");
    assert_eq!(b, before);

    assert!(b.slide(5));
    assert_eq!(b.empty_index(), 5);
    assert!(!b.is_solved());
    assert!(b.slide(8));
    assert!(b.is_solved());
}

#[test]
fn goal_is_solved() {
    assert!(SlidingBoard::goal(3).is_solved());
    assert!(SlidingBoard::goal(4).is_solved());
    assert_eq!(SlidingBoard::goal(3).tiles(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
}

#[test]
fn parse_validates_permutations() {
    assert!(SlidingBoard::parse(3, "1 2 3 4 5 6 7 8 0").is_ok());
    assert!(SlidingBoard::parse(3, "1,2,3,4,5,6,7,8,0").is_ok());
    assert!(SlidingBoard::parse(3, "1 2 3 4 5 6 7 8").is_err(), "wrong count");
    assert!(SlidingBoard::parse(3, "1 2 3 4 5 6 7 8 8").is_err(), "duplicate");
    assert!(SlidingBoard::parse(3, "1 2 3 4 5 6 7 8 9").is_err(), "out of range");
    assert!(SlidingBoard::parse(3, "1 2 3 4 5 6 7 8 x").is_err(), "not a number");
}

#[test]
fn scrambles_are_always_solvable() {
    for (i, difficulty) in Difficulty::all().iter().enumerate() {
        let mut gen = PuzzleGenerator::new(Some(100 + i as u64));
        let start = gen.sliding(3, *difficulty);
        let found = AStarSolver::new().solve(&start).expect("scramble must be solvable");
        let mut replay = start.clone();
        for &index in &found.moves {
            assert!(replay.slide(index), "solution contains an illegal move");
        }
        assert!(replay.is_solved(), "{}", difficulty.label());
    }
}

#[test]
fn four_by_four_easy_scramble_solves() {
    let mut gen = PuzzleGenerator::new(Some(11));
    let start = gen.sliding(4, Difficulty::Easy);
    let found = AStarSolver::with_budget(1_000_000).solve(&start).expect("solvable");
    let mut replay = start.clone();
    for &index in &found.moves {
        assert!(replay.slide(index));
    }
    assert!(replay.is_solved());
}

#[test]
fn short_scrambles_solve_optimally() {
    let mut b = SlidingBoard::goal(3);
    for index in [5, 2, 1, 4, 7] {
        assert!(b.slide(index));
    }
    let found = AStarSolver::new().solve(&b).expect("solvable");
    assert!(found.moves.len() <= 5, "five scramble moves bound the optimum");
    let mut replay = b.clone();
    for &index in &found.moves {
        assert!(replay.slide(index));
    }
    assert!(replay.is_solved());
}

#[test]
fn solved_input_needs_no_moves() {
    let found = AStarSolver::new().solve(&SlidingBoard::goal(4)).expect("already solved");
    assert!(found.moves.is_empty());
    assert_eq!(found.expanded, 0);
}

#[test]
fn heuristic_never_exceeds_true_distance() {
    // Exhaustive BFS outward from the goal; the Manhattan estimate must
    // stay at or below the real distance for every reached state.
    let goal = SlidingBoard::goal(3);
    let mut dist: HashMap<Vec<u8>, u32> = HashMap::new();
    let mut queue: VecDeque<(SlidingBoard, u32)> = VecDeque::new();
    dist.insert(goal.tiles().to_vec(), 0);
    queue.push_back((goal, 0));
    let horizon = 10;
    while let Some((state, d)) = queue.pop_front() {
        if d == horizon { continue; }
        for index in state.possible_moves() {
            let mut next = state.clone();
            next.slide(index);
            if !dist.contains_key(next.tiles()) {
                dist.insert(next.tiles().to_vec(), d + 1);
                queue.push_back((next, d + 1));
            }
        }
    }
    assert!(dist.len() > 100, "BFS should reach a real neighborhood");
    for (tiles, d) in &dist {
        assert!(manhattan(tiles, 3) <= *d, "heuristic overestimates at {:?}", tiles);
    }
}

#[test]
fn manhattan_basics() {
    assert_eq!(manhattan(SlidingBoard::goal(3).tiles(), 3), 0);
    // Tile 8 one cell left of home.
    assert_eq!(manhattan(&[1, 2, 3, 4, 5, 6, 7, 0, 8], 3), 1);
    // Tile 1 in the far corner: two rows and two columns away.
    assert_eq!(manhattan(&[0, 2, 3, 4, 5, 6, 7, 8, 1], 3), 4);
}

#[test]
fn unreachable_permutation_exhausts_search() {
    // Swapping one tile pair flips parity; no legal sequence reaches the goal.
    let start = SlidingBoard::from_tiles(3, vec![2, 1, 3, 4, 5, 6, 7, 8, 0]).unwrap();
    let result = AStarSolver::new().solve(&start);
    assert_eq!(result.unwrap_err(), SearchError::Exhausted);
}

#[test]
fn tiny_budget_reports_exhaustion() {
    let mut gen = PuzzleGenerator::new(Some(3));
    let start = gen.sliding(3, Difficulty::Expert);
    let result = AStarSolver::with_budget(1).solve(&start);
    assert_eq!(result.unwrap_err(), SearchError::BudgetExceeded(1));
}
