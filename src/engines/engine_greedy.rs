//! Intermediate tier: random capture when one exists, otherwise any random
//! move. No look-ahead.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::DraughtsResult;
use crate::game_state::board::Board;
use crate::game_state::draughts_types::Player;
use crate::move_generation::legal_move_generator::{all_legal_moves, restrict_to_captures};

pub struct GreedyEngine {
    rng: StdRng,
}

impl GreedyEngine {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for GreedyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for GreedyEngine {
    fn name(&self) -> &str {
        "PlumDraughts Greedy"
    }

    fn choose_move(&mut self, board: &Board, player: Player) -> DraughtsResult<EngineOutput> {
        let best_moves = restrict_to_captures(all_legal_moves(board, player));
        let picked = best_moves.as_slice().choose(&mut self.rng).copied();

        debug!(
            %player,
            candidates = best_moves.len(),
            capture = picked.is_some_and(|m| m.is_jump()),
            "greedy engine move"
        );

        Ok(EngineOutput {
            best_move: picked,
            candidates: best_moves.len(),
            ..EngineOutput::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::draughts_types::{Move, Position};

    fn pos(row: i32, col: i32) -> Position {
        Position::new(row, col).expect("test square should be on board")
    }

    #[test]
    fn always_takes_the_only_capture() {
        // Black has several quiet moves and exactly one jump.
        let board = Board::from_layout("8/8/1b3b2/2r5/8/8/8/8").expect("layout");
        let all = all_legal_moves(&board, Player::Black);
        assert!(all.len() > 2);
        assert_eq!(all.iter().filter(|m| m.is_jump()).count(), 1);

        let mut engine = GreedyEngine::with_seed(3);
        for _ in 0..50 {
            let out = engine.choose_move(&board, Player::Black).expect("engine should run");
            assert_eq!(out.best_move, Some(Move::jump(pos(2, 1), pos(4, 3), pos(3, 2))));
        }
    }

    #[test]
    fn falls_back_to_any_move_without_captures() {
        let board = Board::starting();
        let legal = all_legal_moves(&board, Player::Red);
        let out = GreedyEngine::with_seed(5)
            .choose_move(&board, Player::Red)
            .expect("engine should run");
        assert_eq!(out.candidates, legal.len());
        assert!(legal.contains(&out.best_move.expect("moves exist")));
    }
}
