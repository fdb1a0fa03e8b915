use rand::{seq::SliceRandom, Rng, SeedableRng};

use crate::board::Board;
use crate::session::Difficulty;
use crate::sliding::SlidingBoard;
use crate::solver::{BacktrackingSolver, SolverOutcome};

#[derive(Debug, Clone)]
pub struct SudokuPuzzle {
    pub puzzle: Board,
    /// The full reference grid the puzzle was carved from.
    pub solution: Board,
}

pub struct PuzzleGenerator {
    rng: rand::rngs::StdRng,
}

impl PuzzleGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => rand::rngs::StdRng::seed_from_u64(s),
            None => rand::rngs::StdRng::from_rng(rand::thread_rng()).unwrap(),
        };
        Self { rng }
    }

    /// Derive a deterministic child RNG from this generator's stream.
    pub fn fork_rng(&mut self) -> rand::rngs::StdRng {
        rand::rngs::StdRng::seed_from_u64(self.rng.gen())
    }

    /// A complete valid grid: the three diagonal 3x3 boxes are seeded with
    /// independent random permutations (they share no row, column, or box),
    /// then the rest is completed by backtracking.
    pub fn solved_sudoku(&mut self) -> Board {
        loop {
            let mut b = Board::empty();
            for band in 0..3 {
                let mut digits: Vec<u8> = (1..=9).collect();
                digits.shuffle(&mut self.rng);
                let base = band * 3;
                let mut it = digits.into_iter();
                for r in base..base + 3 {
                    for c in base..base + 3 {
                        b.cells[r][c].value = it.next().unwrap();
                    }
                }
            }
            let run = BacktrackingSolver::new().solve(&b);
            if run.outcome == SolverOutcome::Solved {
                let mut solved = run.board;
                solved.mark_fixed();
                return solved;
            }
            // A seeded diagonal always admits a completion; reseed if the
            // guess budget somehow ran out first.
        }
    }

    /// Carve a puzzle by blanking `cells_removed(difficulty)` distinct random
    /// cells of a fresh solved grid. No uniqueness check is made, so hard
    /// scrambles may admit more than one completion.
    pub fn sudoku(&mut self, difficulty: Difficulty) -> SudokuPuzzle {
        let solution = self.solved_sudoku();
        let mut puzzle = solution.clone();
        let mut positions: Vec<usize> = (0..81).collect();
        positions.shuffle(&mut self.rng);
        for &idx in positions.iter().take(difficulty.cells_removed()) {
            let (r, c) = (idx / 9, idx % 9);
            puzzle.cells[r][c].value = 0;
            puzzle.cells[r][c].fixed = false;
        }
        SudokuPuzzle { puzzle, solution }
    }

    /// Scramble the goal board with uniformly random legal slides. Every
    /// intermediate state is reachable by construction, so the result is
    /// always solvable.
    pub fn sliding(&mut self, size: usize, difficulty: Difficulty) -> SlidingBoard {
        let mut board = SlidingBoard::goal(size);
        for _ in 0..difficulty.scramble_moves(size) {
            let moves = board.possible_moves();
            let &target = moves.choose(&mut self.rng).unwrap();
            board.slide(target);
        }
        board
    }
}
