//! Per-game settings chosen before play starts.

use std::time::Duration;

use crate::game_state::draughts_rules::AI_THINK_TIME;
use crate::game_state::draughts_types::{Difficulty, GameMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    /// Pause a presentation layer waits before committing the AI's move.
    pub think_time: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            difficulty: Difficulty::default(),
            think_time: AI_THINK_TIME,
        }
    }
}

impl GameConfig {
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }
}
