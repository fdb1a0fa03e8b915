use serde::{Deserialize, Serialize};

use crate::board::Board;

/// Upper bound on tentative placements before the solver gives up.
pub const DEFAULT_GUESS_BUDGET: usize = 250_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StepKind {
    Guess { r: usize, c: usize, v: u8 },
    Backtrack { r: usize, c: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub index: usize,
    pub kind: StepKind,
    pub board: Board,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverOutcome { Solved, Unsolvable, BudgetExceeded }

#[derive(Debug, Clone)]
pub struct SolveRun {
    pub outcome: SolverOutcome,
    /// Solved grid on success; the untouched input otherwise.
    pub board: Board,
    pub steps: Vec<Step>,
    pub guesses: usize,
}

/// Depth-first backtracking over empty cells in row-major order, digits
/// tried ascending. Output is deterministic for a given input grid.
pub struct BacktrackingSolver {
    budget: usize,
}

impl BacktrackingSolver {
    pub fn new() -> Self { Self { budget: DEFAULT_GUESS_BUDGET } }

    pub fn with_budget(budget: usize) -> Self { Self { budget } }

    pub fn solve(&mut self, board: &Board) -> SolveRun { self.run(board, false) }

    /// Like `solve`, but records every guess and backtrack with a board
    /// snapshot for step-by-step playback.
    pub fn solve_traced(&mut self, board: &Board) -> SolveRun { self.run(board, true) }

    fn run(&mut self, board: &Board, trace: bool) -> SolveRun {
        // None = budget exhausted, Some(true) = solved, Some(false) = dead end
        fn rec(b: &mut Board, trace: bool, steps: &mut Vec<Step>, guesses: &mut usize, budget: usize) -> Option<bool> {
            let Some((r, c)) = b.first_empty() else { return Some(true) };
            for v in 1..=9u8 {
                if !b.is_valid_move(r, c, v) { continue; }
                if *guesses >= budget { return None; }
                *guesses += 1;
                b.cells[r][c].value = v;
                if trace {
                    steps.push(Step { index: steps.len() + 1, kind: StepKind::Guess { r, c, v }, board: b.clone() });
                }
                match rec(b, trace, steps, guesses, budget) {
                    Some(true) => return Some(true),
                    Some(false) => {
                        b.cells[r][c].value = 0;
                        if trace {
                            steps.push(Step { index: steps.len() + 1, kind: StepKind::Backtrack { r, c }, board: b.clone() });
                        }
                    }
                    None => {
                        b.cells[r][c].value = 0;
                        return None;
                    }
                }
            }
            Some(false)
        }

        let mut work = board.clone();
        let mut steps = Vec::new();
        let mut guesses = 0usize;
        let outcome = match rec(&mut work, trace, &mut steps, &mut guesses, self.budget) {
            Some(true) => SolverOutcome::Solved,
            Some(false) => SolverOutcome::Unsolvable,
            None => {
                log::warn!("backtracking gave up after {} guesses", self.budget);
                SolverOutcome::BudgetExceeded
            }
        };
        let board = if outcome == SolverOutcome::Solved { work } else { board.clone() };
        SolveRun { outcome, board, steps, guesses }
    }
}

impl Default for BacktrackingSolver {
    fn default() -> Self { Self::new() }
}

/// Count solutions up to `limit`. Useful for spotting scrambles that admit
/// more than one completion.
pub fn count_solutions(board: &Board, limit: usize) -> usize {
    fn backtrack(b: &mut Board, count: &mut usize, limit: usize) {
        if *count >= limit { return; }
        let Some((r, c)) = b.first_empty() else { *count += 1; return };
        for v in 1..=9u8 {
            if !b.is_valid_move(r, c, v) { continue; }
            b.cells[r][c].value = v;
            backtrack(b, count, limit);
            b.cells[r][c].value = 0;
            if *count >= limit { return; }
        }
    }
    let mut work = board.clone();
    let mut count = 0;
    backtrack(&mut work, &mut count, limit);
    count
}
