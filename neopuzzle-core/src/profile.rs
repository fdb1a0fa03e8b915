use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::session::{Difficulty, GameSession, PuzzleKind, STARTING_HINTS};

/// The single durable record kept per installation. Grid contents are never
/// persisted; reloading always starts a fresh puzzle of the recorded kind
/// and difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub puzzle_type: PuzzleKind,
    pub difficulty: Difficulty,
    pub score: u32,
    #[serde(default = "default_hints")]
    pub hints_remaining: u8,
}

fn default_hints() -> u8 { STARTING_HINTS }

impl Default for Profile {
    fn default() -> Self {
        Self {
            puzzle_type: PuzzleKind::Sudoku,
            difficulty: Difficulty::Easy,
            score: 0,
            hints_remaining: STARTING_HINTS,
        }
    }
}

impl Profile {
    /// Fold a session back into the record after a round.
    pub fn apply_session(&mut self, session: &GameSession) {
        self.puzzle_type = session.kind();
        self.difficulty = session.difficulty();
        if let Some(completion) = session.completion() {
            self.score = completion.score;
        }
        self.hints_remaining = session.hints_remaining();
    }
}

/// Missing or unreadable files yield the default record.
pub fn load<P: AsRef<Path>>(path: P) -> Profile {
    match fs::read_to_string(path) {
        Ok(s) => serde_json::from_str::<Profile>(&s).unwrap_or_default(),
        Err(_) => Profile::default(),
    }
}

pub fn save<P: AsRef<Path>>(path: P, profile: &Profile) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(profile).unwrap();
    fs::write(path, json)
}
