use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use itertools::Itertools;
use once_cell::sync::Lazy;
use std::{fs, path::PathBuf, thread, time::{Duration, Instant}};

use neopuzzle::logger::ConsoleLogger;
use neopuzzle_core::astar::AStarSolver;
use neopuzzle_core::board::Board;
use neopuzzle_core::generator::PuzzleGenerator;
use neopuzzle_core::profile;
use neopuzzle_core::session::{Difficulty, GameSession, HintPolicy, Hint, PuzzleKind, SolveReport};
use neopuzzle_core::sliding::SlidingBoard;
use neopuzzle_core::solvelog::{self, SessionLog, SolveLogger};
use neopuzzle_core::solver::{self, BacktrackingSolver, SolverOutcome, StepKind};

#[derive(Parser, Debug)]
#[command(name = "neopuzzle", version, about = "Sudoku and sliding-tile puzzles: generate, solve, play back")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate and print a fresh puzzle
    New {
        #[arg(short, long, value_enum, default_value = "sudoku")]
        kind: KindArg,
        #[arg(short, long, value_enum, default_value = "medium")]
        difficulty: DifficultyArg,
        /// Reproducible generation
        #[arg(long)]
        seed: Option<u64>,
        /// Also print the reference solution (Sudoku only)
        #[arg(long)]
        with_solution: bool,
    },
    /// Solve a Sudoku read from a file, stdin, or a built-in sample
    Solve {
        /// Path to a puzzle file (81 chars with 0 or . for blanks). If omitted, reads from stdin.
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Use built-in sample puzzle N instead of reading input
        #[arg(long)]
        sample: Option<usize>,
        /// Pause for Enter after each logged step
        #[arg(long)]
        step: bool,
        /// Colored console output
        #[arg(long)]
        color: bool,
        /// Maximum steps echoed to console/files (0 = unlimited)
        #[arg(long, default_value_t = 40)]
        max_logs: usize,
        #[arg(long, default_value = "solvelogs")]
        log_dir: PathBuf,
        /// Write the full trace as a markdown session log
        #[arg(long)]
        markdown: bool,
    },
    /// Count solutions of a Sudoku: unsolvable, unique, or ambiguous
    Check {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Solve a sliding-tile board with A* and play the moves back
    Slide {
        #[arg(long, default_value_t = 3)]
        size: usize,
        #[arg(short, long, value_enum, default_value = "easy")]
        difficulty: DifficultyArg,
        #[arg(long)]
        seed: Option<u64>,
        /// Tile list ("1 2 3 4 0 5 7 8 6"); generated when omitted
        #[arg(long)]
        board: Option<String>,
        /// Pause between played-back moves, printing each board
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,
        /// Override the expansion budget
        #[arg(long)]
        budget: Option<usize>,
        /// Write the move list to a numbered log file in this directory
        #[arg(long)]
        log_dir: Option<PathBuf>,
    },
    /// Full scored round: load profile, hint, solve, persist profile
    Demo {
        #[arg(short, long, value_enum, default_value = "sudoku")]
        kind: KindArg,
        #[arg(short, long, value_enum, default_value = "easy")]
        difficulty: DifficultyArg,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = "profile.json")]
        profile: PathBuf,
        /// Refill the hint budget instead of carrying the stored count over
        #[arg(long)]
        refill_hints: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum KindArg { Sudoku, EightPuzzle, Sliding }

impl KindArg {
    fn into_kind(self) -> PuzzleKind {
        match self {
            KindArg::Sudoku => PuzzleKind::Sudoku,
            KindArg::EightPuzzle => PuzzleKind::EightPuzzle,
            KindArg::Sliding => PuzzleKind::Sliding,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum DifficultyArg { Easy, Medium, Hard, Expert }

impl DifficultyArg {
    fn into_difficulty(self) -> Difficulty {
        match self {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
            DifficultyArg::Expert => Difficulty::Expert,
        }
    }
}

const SAMPLE_STRINGS: [&str; 2] = [
    "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79",
    "..9748...7.........2.1.9.....7...24..64.1.59..98...3.....8.3.2.........6...2759..",
];

static SAMPLE_BOARDS: Lazy<Vec<Board>> = Lazy::new(|| {
    SAMPLE_STRINGS
        .iter()
        .map(|s| Board::parse(s).expect("built-in sample parses"))
        .collect()
});

fn read_board(input: &Option<PathBuf>) -> Result<Board> {
    let raw = match input {
        Some(p) => fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?,
        None => {
            use std::io::Read;
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let filtered: String = raw.chars().filter(|ch| matches!(ch, '0'..='9' | '.')).collect();
    if filtered.len() < 81 {
        bail!("expected at least 81 digits/dots in input (have {})", filtered.len());
    }
    Board::parse(&filtered.chars().take(81).collect::<String>())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::New { kind, difficulty, seed, with_solution } => {
            let difficulty = difficulty.into_difficulty();
            let mut generator = PuzzleGenerator::new(seed);
            match kind.into_kind() {
                PuzzleKind::Sudoku => {
                    let carved = generator.sudoku(difficulty);
                    println!("{}", carved.puzzle);
                    println!("{}", carved.puzzle.to_line());
                    if with_solution {
                        println!("\nSolution:\n{}", carved.solution);
                    }
                }
                other => {
                    let size = if other == PuzzleKind::EightPuzzle { 3 } else { 4 };
                    let board = generator.sliding(size, difficulty);
                    println!("{}", board);
                    println!("{}", board.to_line());
                }
            }
        }

        Command::Solve { input, sample, step, color, max_logs, log_dir, markdown } => {
            let board = match sample {
                Some(i) => SAMPLE_BOARDS
                    .get(i)
                    .cloned()
                    .with_context(|| format!("sample index must be below {}", SAMPLE_BOARDS.len()))?,
                None => read_board(&input)?,
            };
            let conflicts = board.conflict_mask();
            if conflicts.iter().any(|row| row.iter().any(|&c| c)) {
                bail!("input grid has conflicting givens; nothing to solve");
            }
            let mut logger = ConsoleLogger::new(&log_dir, color, step, max_logs)?;
            logger.log("Initial grid", &board.to_string())?;
            let run = BacktrackingSolver::new().solve_traced(&board);
            for s in &run.steps {
                match &s.kind {
                    StepKind::Guess { r, c, v } => {
                        logger.log(&format!("Step {}: try {} at r{},c{}", s.index, v, r + 1, c + 1), &s.board.to_string())?;
                    }
                    StepKind::Backtrack { r, c } => {
                        logger.log(&format!("Step {}: backtrack at r{},c{}", s.index, r + 1, c + 1), &s.board.to_string())?;
                    }
                }
            }
            match run.outcome {
                SolverOutcome::Solved => println!("\nSolved in {} guesses:\n{}", run.guesses, run.board),
                SolverOutcome::Unsolvable => println!("\nNo solution exists for this grid."),
                SolverOutcome::BudgetExceeded => println!("\nGave up after {} guesses.", run.guesses),
            }
            if markdown {
                let log = SessionLog {
                    title: "Backtracking session".into(),
                    puzzle: board.to_line(),
                    solver_name: "Backtracking".into(),
                    steps: run.steps,
                };
                let path = solvelog::write_session_markdown(&log_dir, &log)?;
                println!("Session log written to {}", path.display());
            }
        }

        Command::Check { input } => {
            let board = read_board(&input)?;
            match solver::count_solutions(&board, 2) {
                0 => println!("unsolvable"),
                1 => println!("unique solution"),
                _ => println!("multiple solutions"),
            }
        }

        Command::Slide { size, difficulty, seed, board, delay_ms, budget, log_dir } => {
            if !(2..=10).contains(&size) {
                bail!("size must be in 2..=10, got {size}");
            }
            let start = match board {
                Some(text) => SlidingBoard::parse(size, &text)?,
                None => PuzzleGenerator::new(seed).sliding(size, difficulty.into_difficulty()),
            };
            println!("Start:\n{}", start);
            let searcher = match budget {
                Some(b) => AStarSolver::with_budget(b),
                None => AStarSolver::new(),
            };
            let t0 = Instant::now();
            match searcher.solve(&start) {
                Ok(found) => {
                    println!(
                        "Solved: {} moves, {} expansions, {:?}",
                        found.moves.len(),
                        found.expanded,
                        t0.elapsed()
                    );
                    println!("Moves: {}", found.moves.iter().join(" "));
                    let mut playback = start.clone();
                    for &index in &found.moves {
                        playback.slide(index);
                        if delay_ms > 0 {
                            thread::sleep(Duration::from_millis(delay_ms));
                            println!("slide {}\n{}", index, playback);
                        }
                    }
                    println!("Final:\n{}", playback);
                    if let Some(dir) = log_dir {
                        let mut log = SolveLogger::new(dir)?;
                        let lines = vec![
                            format!("board: {}", start.to_line()),
                            format!("moves: {}", found.moves.iter().join(" ")),
                            format!("expansions: {}", found.expanded),
                        ];
                        let path = log.write_log("A* solution", &lines)?;
                        println!("Move log written to {}", path.display());
                    }
                }
                Err(e) => println!("Solve failed: {e}"),
            }
        }

        Command::Demo { kind, difficulty, seed, profile: profile_path, refill_hints } => {
            let kind = kind.into_kind();
            let difficulty = difficulty.into_difficulty();
            let mut record = profile::load(&profile_path);
            let policy = if refill_hints { HintPolicy::RefillEachPuzzle } else { HintPolicy::CarryOver };
            let hints = policy.hints_for_new_puzzle(Some(record.hints_remaining));
            let mut session = GameSession::new(kind, difficulty, seed, hints);
            log::info!("session {} started: {} / {}", session.id(), kind.label(), difficulty.label());
            println!("{} ({}) — {} hints available", kind.label(), difficulty.label(), session.hints_remaining());
            if let Some(b) = session.board() {
                println!("{}", b);
            }
            if let Some(s) = session.sliding() {
                println!("{}", s);
            }

            let t0 = Instant::now();
            match session.request_hint() {
                Ok(Hint::Reveal { r, c, v }) => println!("Hint: {} belongs at r{},c{}", v, r + 1, c + 1),
                Ok(Hint::Slide { index }) => println!("Hint: slide tile index {}", index),
                Err(e) => println!("Hint rejected: {e}"),
            }
            session.tick(t0.elapsed().as_secs());
            match session.request_solve() {
                Ok((report, completion)) => {
                    match report {
                        SolveReport::Sudoku { guesses } => println!("Solved with {} guesses", guesses),
                        SolveReport::Sliding { moves, expanded } => {
                            println!("Solved in {} moves ({} expansions): {}", moves.len(), expanded, moves.iter().join(" "));
                        }
                    }
                    if let Some(b) = session.board() {
                        println!("{}", b);
                    }
                    if let Some(s) = session.sliding() {
                        println!("{}", s);
                    }
                    println!("Score: {} ({}s elapsed)", completion.score, completion.elapsed_seconds);
                }
                Err(e) => bail!("solve failed: {e}"),
            }
            record.apply_session(&session);
            profile::save(&profile_path, &record).context("saving profile")?;
            println!("Profile: {}", serde_json::to_string_pretty(&record)?);
        }
    }
    Ok(())
}
