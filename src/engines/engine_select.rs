//! Maps a difficulty tier to its engine and exposes the one-shot
//! `choose_ai_move` entry point used by the game controller.

use crate::engines::engine_greedy::GreedyEngine;
use crate::engines::engine_minimax::MinimaxEngine;
use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::Engine;
use crate::errors::DraughtsResult;
use crate::game_state::board::Board;
use crate::game_state::draughts_types::{Difficulty, Move, Player};

pub fn build_engine(difficulty: Difficulty) -> Box<dyn Engine> {
    match difficulty {
        Difficulty::Beginner => Box::new(RandomEngine::new()),
        Difficulty::Intermediate => Box::new(GreedyEngine::new()),
        Difficulty::Advanced => Box::new(MinimaxEngine::new()),
    }
}

/// Like `build_engine`, with reproducible randomness for the random tiers.
pub fn build_seeded_engine(difficulty: Difficulty, seed: u64) -> Box<dyn Engine> {
    match difficulty {
        Difficulty::Beginner => Box::new(RandomEngine::with_seed(seed)),
        Difficulty::Intermediate => Box::new(GreedyEngine::with_seed(seed)),
        Difficulty::Advanced => Box::new(MinimaxEngine::new()),
    }
}

/// Move for `player` under `difficulty`, or `None` when `player` cannot move
/// anywhere (a loss for `player`).
pub fn choose_ai_move(
    board: &Board,
    player: Player,
    difficulty: Difficulty,
) -> DraughtsResult<Option<Move>> {
    Ok(build_engine(difficulty).choose_move(board, player)?.best_move)
}
