use neopuzzle::{AStarSolver, BacktrackingSolver, Board, Difficulty, PuzzleGenerator};
use neopuzzle_core::solver::SolverOutcome;
use pretty_assertions::assert_eq;

#[test]
fn parse_and_format() {
    let s = "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
    let b = Board::parse(s).unwrap();
    assert_eq!(b.to_line(), s);
}

#[test]
fn solve_easy_through_the_public_surface() {
    let s = "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
    let b = Board::parse(s).unwrap();
    let run = BacktrackingSolver::new().solve(&b);
    assert_eq!(run.outcome, SolverOutcome::Solved);
    assert!(run.board.is_complete());
}

#[test]
fn generated_slides_solve_end_to_end() {
    let mut gen = PuzzleGenerator::new(Some(77));
    let start = gen.sliding(3, Difficulty::Medium);
    let found = AStarSolver::new().solve(&start).expect("solvable by construction");
    let mut replay = start;
    for &index in &found.moves {
        assert!(replay.slide(index));
    }
    assert!(replay.is_solved());
}
