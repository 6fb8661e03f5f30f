//! Beginner tier: uniformly random legal move.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::DraughtsResult;
use crate::game_state::board::Board;
use crate::game_state::draughts_types::Player;
use crate::move_generation::legal_move_generator::all_legal_moves;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "PlumDraughts Random"
    }

    fn choose_move(&mut self, board: &Board, player: Player) -> DraughtsResult<EngineOutput> {
        let legal_moves = all_legal_moves(board, player);
        let picked = legal_moves.as_slice().choose(&mut self.rng).copied();

        debug!(
            %player,
            candidates = legal_moves.len(),
            picked = ?picked.map(|m| m.to_string()),
            "random engine move"
        );

        Ok(EngineOutput {
            best_move: picked,
            candidates: legal_moves.len(),
            ..EngineOutput::default()
        })
    }
}
