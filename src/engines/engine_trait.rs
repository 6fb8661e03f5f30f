//! Engine abstraction shared by every difficulty tier.
//!
//! The game controller and the match harness pick an engine at runtime and
//! drive it through this trait without knowing which policy is behind it.

use crate::errors::DraughtsResult;
use crate::game_state::board::Board;
use crate::game_state::draughts_types::{Move, Player};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineOutput {
    /// `None` when `player` has no legal move anywhere on the board.
    pub best_move: Option<Move>,
    /// Candidate moves the policy chose between.
    pub candidates: usize,
    /// Search score of `best_move`, for engines that search.
    pub score: Option<f64>,
    pub nodes: u64,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn choose_move(&mut self, board: &Board, player: Player) -> DraughtsResult<EngineOutput>;
}
