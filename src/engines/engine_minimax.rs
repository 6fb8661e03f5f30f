//! Advanced tier: capture-first minimax with alpha-beta pruning.
//!
//! Deterministic for a given board: ties resolve to the first candidate in
//! generation order.

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::DraughtsResult;
use crate::game_state::board::Board;
use crate::game_state::draughts_types::Player;
use crate::search::board_scoring::{BoardScorer, PositionalScorer};
use crate::search::minimax::{search_best_move, SearchConfig};

pub struct MinimaxEngine<S: BoardScorer = PositionalScorer> {
    scorer: S,
    config: SearchConfig,
}

impl MinimaxEngine<PositionalScorer> {
    pub fn new() -> Self {
        Self::with_scorer(PositionalScorer, SearchConfig::default())
    }
}

impl Default for MinimaxEngine<PositionalScorer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BoardScorer> MinimaxEngine<S> {
    pub fn with_scorer(scorer: S, config: SearchConfig) -> Self {
        Self { scorer, config }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }
}

impl<S: BoardScorer> Engine for MinimaxEngine<S> {
    fn name(&self) -> &str {
        "PlumDraughts Minimax"
    }

    fn choose_move(&mut self, board: &Board, player: Player) -> DraughtsResult<EngineOutput> {
        let result = search_best_move(board, player, &self.scorer, self.config)?;

        Ok(EngineOutput {
            best_move: result.best_move,
            candidates: result.candidates,
            score: result.best_move.map(|_| result.best_score),
            nodes: result.nodes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::board_scoring::MaterialScorer;

    #[test]
    fn repeated_searches_agree() {
        let board = Board::starting();
        let mut engine = MinimaxEngine::new();
        let first = engine.choose_move(&board, Player::Red).expect("engine should run");
        let second = engine.choose_move(&board, Player::Red).expect("engine should run");
        assert!(first.best_move.is_some());
        assert_eq!(first, second);
        assert!(first.nodes > 0);
    }

    #[test]
    fn custom_scorer_and_depth() {
        let engine = MinimaxEngine::with_scorer(
            MaterialScorer,
            SearchConfig {
                depth: 1,
                pruning: false,
            },
        );
        assert_eq!(engine.config().depth, 1);
        let mut engine = engine;
        let out = engine
            .choose_move(&Board::starting(), Player::Black)
            .expect("engine should run");
        assert_eq!(out.score, Some(0.0));
        assert_eq!(out.candidates, 7);
    }
}
