pub mod astar;
pub mod board;
pub mod generator;
pub mod profile;
pub mod session;
pub mod sliding;
pub mod solvelog;
pub mod solver;

pub use astar::AStarSolver;
pub use board::Board;
pub use generator::PuzzleGenerator;
pub use session::{Difficulty, GameSession, HintPolicy, PuzzleKind};
pub use sliding::SlidingBoard;
pub use solver::BacktrackingSolver;
