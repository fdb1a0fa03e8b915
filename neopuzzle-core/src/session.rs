use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::astar::{AStarSolver, SearchError};
use crate::board::Board;
use crate::generator::PuzzleGenerator;
use crate::sliding::SlidingBoard;
use crate::solver::{BacktrackingSolver, SolverOutcome};

pub const STARTING_HINTS: u8 = 3;
/// Seconds under which finishing still earns a time bonus.
pub const TIME_BONUS_CEILING: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PuzzleKind {
    Sudoku,
    EightPuzzle,
    Sliding,
}

impl PuzzleKind {
    pub fn label(&self) -> &'static str {
        match self {
            PuzzleKind::Sudoku => "Sudoku",
            PuzzleKind::EightPuzzle => "8-Puzzle",
            PuzzleKind::Sliding => "Sliding Puzzle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }

    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard, Difficulty::Expert]
    }

    /// Cells blanked when carving a Sudoku puzzle. Expert leaves 17 clues.
    pub fn cells_removed(&self) -> usize {
        match self {
            Difficulty::Easy => 30,
            Difficulty::Medium => 45,
            Difficulty::Hard => 55,
            Difficulty::Expert => 64,
        }
    }

    /// Random legal slides applied when scrambling a sliding board. The 3x3
    /// board takes a deeper scramble than larger boards.
    pub fn scramble_moves(&self, size: usize) -> usize {
        if size == 3 {
            match self {
                Difficulty::Easy => 50,
                Difficulty::Medium => 100,
                Difficulty::Hard => 150,
                Difficulty::Expert => 200,
            }
        } else {
            match self {
                Difficulty::Easy => 30,
                Difficulty::Medium => 50,
                Difficulty::Hard => 80,
                Difficulty::Expert => 120,
            }
        }
    }

    pub fn score_bonus(&self) -> u32 {
        match self {
            Difficulty::Easy => 100,
            Difficulty::Medium => 200,
            Difficulty::Hard => 300,
            Difficulty::Expert => 500,
        }
    }
}

/// Whether a fresh puzzle refills the hint budget or carries over whatever
/// the stored profile has left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintPolicy {
    RefillEachPuzzle,
    CarryOver,
}

impl HintPolicy {
    pub fn hints_for_new_puzzle(&self, stored: Option<u8>) -> u8 {
        match self {
            HintPolicy::RefillEachPuzzle => STARTING_HINTS,
            HintPolicy::CarryOver => stored.unwrap_or(STARTING_HINTS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub score: u32,
    pub elapsed_seconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    Reveal { r: usize, c: usize, v: u8 },
    Slide { index: usize },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HintError {
    #[error("no hints remaining")]
    Exhausted,
    #[error("nothing left to reveal")]
    NothingToReveal,
    #[error("current position cannot be solved")]
    Unsolvable,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    #[error("no solution for the current position")]
    Unsolvable,
    #[error("solve budget exhausted before a result")]
    BudgetExceeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditRejection {
    WrongKind,
    AlreadyComplete,
    OutOfRange,
    FixedCell,
    Conflict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    Cleared,
    Rejected(EditRejection),
    Completed(Completion),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideRejection {
    WrongKind,
    AlreadyComplete,
    Illegal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideOutcome {
    Moved,
    Rejected(SlideRejection),
    Completed(Completion),
}

#[derive(Debug, Clone)]
pub enum SolveReport {
    Sudoku { guesses: usize },
    Sliding { moves: Vec<usize>, expanded: usize },
}

enum PuzzleState {
    Sudoku { puzzle: Board, solution: Board },
    SlidingTiles { board: SlidingBoard, initial: SlidingBoard },
}

/// One active puzzle round, owned by the frontend and driven through its
/// methods. Grid state lives only here; nothing of it is persisted.
pub struct GameSession {
    id: Uuid,
    kind: PuzzleKind,
    difficulty: Difficulty,
    state: PuzzleState,
    elapsed_seconds: u64,
    hints_remaining: u8,
    last_completion: Option<Completion>,
    rng: rand::rngs::StdRng,
}

impl GameSession {
    pub fn new(kind: PuzzleKind, difficulty: Difficulty, seed: Option<u64>, hints: u8) -> Self {
        let mut generator = PuzzleGenerator::new(seed);
        let state = match kind {
            PuzzleKind::Sudoku => {
                let carved = generator.sudoku(difficulty);
                PuzzleState::Sudoku { puzzle: carved.puzzle, solution: carved.solution }
            }
            PuzzleKind::EightPuzzle => {
                let board = generator.sliding(3, difficulty);
                PuzzleState::SlidingTiles { initial: board.clone(), board }
            }
            PuzzleKind::Sliding => {
                let board = generator.sliding(4, difficulty);
                PuzzleState::SlidingTiles { initial: board.clone(), board }
            }
        };
        let rng = generator.fork_rng();
        Self {
            id: Uuid::new_v4(),
            kind,
            difficulty,
            state,
            elapsed_seconds: 0,
            hints_remaining: hints,
            last_completion: None,
            rng,
        }
    }

    /// Unseeded session with the default hint budget.
    pub fn start(kind: PuzzleKind, difficulty: Difficulty) -> Self {
        Self::new(kind, difficulty, None, STARTING_HINTS)
    }

    pub fn id(&self) -> Uuid { self.id }
    pub fn kind(&self) -> PuzzleKind { self.kind }
    pub fn difficulty(&self) -> Difficulty { self.difficulty }
    pub fn elapsed_seconds(&self) -> u64 { self.elapsed_seconds }
    pub fn hints_remaining(&self) -> u8 { self.hints_remaining }
    pub fn is_completed(&self) -> bool { self.last_completion.is_some() }
    pub fn completion(&self) -> Option<Completion> { self.last_completion }
    pub fn score(&self) -> u32 { self.last_completion.map(|c| c.score).unwrap_or(0) }

    pub fn board(&self) -> Option<&Board> {
        match &self.state {
            PuzzleState::Sudoku { puzzle, .. } => Some(puzzle),
            PuzzleState::SlidingTiles { .. } => None,
        }
    }

    pub fn solution(&self) -> Option<&Board> {
        match &self.state {
            PuzzleState::Sudoku { solution, .. } => Some(solution),
            PuzzleState::SlidingTiles { .. } => None,
        }
    }

    pub fn sliding(&self) -> Option<&SlidingBoard> {
        match &self.state {
            PuzzleState::Sudoku { .. } => None,
            PuzzleState::SlidingTiles { board, .. } => Some(board),
        }
    }

    /// Advance the round timer. The clock stops once the puzzle completes.
    pub fn tick(&mut self, seconds: u64) {
        if self.last_completion.is_none() {
            self.elapsed_seconds += seconds;
        }
    }

    /// Enter (or clear, with v = 0) a Sudoku cell. Values violating a
    /// row/column/box constraint are rejected, not stored.
    pub fn apply_edit(&mut self, r: usize, c: usize, v: u8) -> EditOutcome {
        if self.last_completion.is_some() {
            return EditOutcome::Rejected(EditRejection::AlreadyComplete);
        }
        let PuzzleState::Sudoku { puzzle, .. } = &mut self.state else {
            return EditOutcome::Rejected(EditRejection::WrongKind);
        };
        if r >= 9 || c >= 9 || v > 9 {
            return EditOutcome::Rejected(EditRejection::OutOfRange);
        }
        if puzzle.cells[r][c].fixed {
            return EditOutcome::Rejected(EditRejection::FixedCell);
        }
        if v == 0 {
            puzzle.cells[r][c].value = 0;
            return EditOutcome::Cleared;
        }
        if !puzzle.is_valid_move(r, c, v) {
            return EditOutcome::Rejected(EditRejection::Conflict);
        }
        puzzle.cells[r][c].value = v;
        if puzzle.is_complete() {
            return EditOutcome::Completed(self.finish());
        }
        EditOutcome::Applied
    }

    /// Slide the tile at `index` into the gap.
    pub fn attempt_slide(&mut self, index: usize) -> SlideOutcome {
        if self.last_completion.is_some() {
            return SlideOutcome::Rejected(SlideRejection::AlreadyComplete);
        }
        let PuzzleState::SlidingTiles { board, .. } = &mut self.state else {
            return SlideOutcome::Rejected(SlideRejection::WrongKind);
        };
        if !board.slide(index) {
            return SlideOutcome::Rejected(SlideRejection::Illegal);
        }
        if board.is_solved() {
            return SlideOutcome::Completed(self.finish());
        }
        SlideOutcome::Moved
    }

    /// Solve the current position and apply the result. On failure the
    /// puzzle is left unchanged.
    pub fn request_solve(&mut self) -> Result<(SolveReport, Completion), SolveError> {
        let report = match &mut self.state {
            PuzzleState::Sudoku { puzzle, .. } => {
                let run = BacktrackingSolver::new().solve(puzzle);
                match run.outcome {
                    SolverOutcome::Solved => *puzzle = run.board,
                    SolverOutcome::Unsolvable => return Err(SolveError::Unsolvable),
                    SolverOutcome::BudgetExceeded => return Err(SolveError::BudgetExceeded),
                }
                SolveReport::Sudoku { guesses: run.guesses }
            }
            PuzzleState::SlidingTiles { board, .. } => {
                let found = AStarSolver::new().solve(board).map_err(|e| match e {
                    SearchError::Exhausted => SolveError::Unsolvable,
                    SearchError::BudgetExceeded(_) => SolveError::BudgetExceeded,
                })?;
                for &index in &found.moves {
                    board.slide(index);
                }
                SolveReport::Sliding { moves: found.moves, expanded: found.expanded }
            }
        };
        let completion = match self.last_completion {
            Some(c) => c,
            None => self.finish(),
        };
        Ok((report, completion))
    }

    /// Spend one hint and apply the next correct action: reveal a random
    /// empty Sudoku cell from the solution, or make the first move of the
    /// shortest sliding solution. Rejected without side effect when the
    /// budget is empty.
    pub fn request_hint(&mut self) -> Result<Hint, HintError> {
        if self.hints_remaining == 0 {
            return Err(HintError::Exhausted);
        }
        let hint = match &mut self.state {
            PuzzleState::Sudoku { puzzle, solution } => {
                let empties = puzzle.empty_cells();
                let Some(&(r, c)) = empties.choose(&mut self.rng) else {
                    return Err(HintError::NothingToReveal);
                };
                let v = solution.cells[r][c].value;
                puzzle.cells[r][c].value = v;
                Hint::Reveal { r, c, v }
            }
            PuzzleState::SlidingTiles { board, .. } => {
                if board.is_solved() {
                    return Err(HintError::NothingToReveal);
                }
                let found = AStarSolver::new().solve(board).map_err(|_| HintError::Unsolvable)?;
                let &index = found.moves.first().ok_or(HintError::NothingToReveal)?;
                board.slide(index);
                Hint::Slide { index }
            }
        };
        self.hints_remaining -= 1;
        let completed = match &self.state {
            PuzzleState::Sudoku { puzzle, .. } => puzzle.is_complete(),
            PuzzleState::SlidingTiles { board, .. } => board.is_solved(),
        };
        if completed && self.last_completion.is_none() {
            self.finish();
        }
        Ok(hint)
    }

    /// Back to the starting position: Sudoku keeps its givens, sliding
    /// boards return to the initial scramble. Timer and completion reset;
    /// the hint budget is untouched.
    pub fn reset(&mut self) {
        match &mut self.state {
            PuzzleState::Sudoku { puzzle, .. } => puzzle.clear_unfixed(),
            PuzzleState::SlidingTiles { board, initial } => *board = initial.clone(),
        }
        self.elapsed_seconds = 0;
        self.last_completion = None;
    }

    fn finish(&mut self) -> Completion {
        let score = self.difficulty.score_bonus()
            + TIME_BONUS_CEILING.saturating_sub(self.elapsed_seconds) as u32;
        let completion = Completion { score, elapsed_seconds: self.elapsed_seconds };
        self.last_completion = Some(completion);
        completion
    }
}
