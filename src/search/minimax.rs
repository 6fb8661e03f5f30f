//! Fixed-depth minimax search with alpha-beta pruning.
//!
//! The root restricts candidates to captures when any exist, then scores each
//! candidate with a minimax search of `depth` further plies starting with the
//! opponent's reply. Every root candidate is searched with a full window, so
//! pruning only affects speed and never the chosen move. Ties keep the first
//! candidate in generation order.

use tracing::debug;

use crate::errors::DraughtsResult;
use crate::game_state::board::Board;
use crate::game_state::draughts_rules::{MINIMAX_DEPTH, TERMINAL_SCORE};
use crate::game_state::draughts_types::{Move, Player};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::{all_legal_moves, restrict_to_captures};
use crate::search::board_scoring::BoardScorer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched below each root candidate.
    pub depth: u8,
    /// Disable to run the plain full-width search.
    pub pruning: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: MINIMAX_DEPTH,
            pruning: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: f64,
    /// Root moves searched after capture restriction.
    pub candidates: usize,
    pub nodes: u64,
}

pub fn search_best_move<S: BoardScorer>(
    board: &Board,
    player: Player,
    scorer: &S,
    config: SearchConfig,
) -> DraughtsResult<SearchResult> {
    let candidates = restrict_to_captures(all_legal_moves(board, player));
    let mut search = Minimax {
        player,
        scorer,
        pruning: config.pruning,
        nodes: 0,
    };

    let mut best_move = None;
    let mut best_score = f64::NEG_INFINITY;

    for mv in &candidates {
        let child = apply_move(board, mv)?;
        let score =
            search.minimax(&child, config.depth, f64::NEG_INFINITY, f64::INFINITY, false)?;

        if score > best_score {
            best_score = score;
            best_move = Some(*mv);
        }
    }

    debug!(
        %player,
        candidates = candidates.len(),
        nodes = search.nodes,
        best_score,
        best_move = ?best_move.map(|m| m.to_string()),
        "minimax search finished"
    );

    Ok(SearchResult {
        best_move,
        best_score: if best_move.is_some() { best_score } else { 0.0 },
        candidates: candidates.len(),
        nodes: search.nodes,
    })
}

/// Minimax value of `board` from `player`'s point of view, searched `depth`
/// plies with the maximizing side to move when `maximizing` is set.
pub fn minimax_value<S: BoardScorer>(
    board: &Board,
    player: Player,
    scorer: &S,
    depth: u8,
    maximizing: bool,
    pruning: bool,
) -> DraughtsResult<f64> {
    let mut search = Minimax {
        player,
        scorer,
        pruning,
        nodes: 0,
    };
    search.minimax(board, depth, f64::NEG_INFINITY, f64::INFINITY, maximizing)
}

struct Minimax<'a, S: BoardScorer> {
    player: Player,
    scorer: &'a S,
    pruning: bool,
    nodes: u64,
}

impl<S: BoardScorer> Minimax<'_, S> {
    fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> DraughtsResult<f64> {
        self.nodes += 1;

        if depth == 0 {
            return Ok(self.scorer.score(board, self.player));
        }

        let side = if maximizing {
            self.player
        } else {
            self.player.opposite()
        };
        let moves = all_legal_moves(board, side);

        // A stuck side loses regardless of the remaining depth.
        if moves.is_empty() {
            return Ok(if maximizing {
                -TERMINAL_SCORE
            } else {
                TERMINAL_SCORE
            });
        }

        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for mv in &moves {
            let child = apply_move(board, mv)?;
            let score = self.minimax(&child, depth - 1, alpha, beta, !maximizing)?;

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if self.pruning && beta <= alpha {
                break;
            }
        }

        Ok(best)
    }
}
