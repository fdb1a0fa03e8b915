pub mod logger;

pub use logger::ConsoleLogger;
pub use neopuzzle_core::{
    AStarSolver, BacktrackingSolver, Board, Difficulty, GameSession, HintPolicy, PuzzleGenerator,
    PuzzleKind, SlidingBoard,
};
