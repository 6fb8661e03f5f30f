//! Pluggable board evaluation.
//!
//! Search delegates static scoring to `BoardScorer`, so alternate heuristics
//! can be swapped without touching search code. The standard heuristic sums
//! three per-player subtotals:
//!
//! - **material**: 3 per man, 5 per king
//! - **power**: 0.5 per row a man has advanced, plus 2 for a man one step
//!   from crowning
//! - **strategy**: 0.5 per piece in columns 2-5
//!
//! `evaluate` is own subtotals minus the opponent's, so scores from the two
//! perspectives are exact negatives of each other.

use crate::game_state::board::Board;
use crate::game_state::draughts_rules::{
    ADVANCEMENT_WEIGHT, BOARD_SIZE, CENTER_COLUMNS, CENTER_CONTROL_BONUS, KING_VALUE, MAN_VALUE,
    NEAR_CROWNING_BONUS,
};
use crate::game_state::draughts_types::{Piece, Player, Position};

pub trait BoardScorer: Send + Sync {
    /// Score from `perspective`'s point of view; higher is better for them.
    fn score(&self, board: &Board, perspective: Player) -> f64;
}

/// Per-player subtotals shown by presentation layers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub material: f64,
    pub power: f64,
    pub strategy: f64,
}

impl ScoreBreakdown {
    #[inline]
    pub fn total(&self) -> f64 {
        self.material + self.power + self.strategy
    }

    fn add_piece(&mut self, pos: Position, piece: Piece) {
        if piece.is_king {
            self.material += KING_VALUE;
        } else {
            self.material += MAN_VALUE;
            self.power += ADVANCEMENT_WEIGHT * f64::from(piece.color.advancement(pos.row()));
            if piece.color.advancement(pos.row()) == BOARD_SIZE - 2 {
                self.power += NEAR_CROWNING_BONUS;
            }
        }
        if CENTER_COLUMNS.contains(&pos.col()) {
            self.strategy += CENTER_CONTROL_BONUS;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerScores {
    pub red: ScoreBreakdown,
    pub black: ScoreBreakdown,
}

impl PlayerScores {
    #[inline]
    pub fn for_player(&self, player: Player) -> &ScoreBreakdown {
        match player {
            Player::Red => &self.red,
            Player::Black => &self.black,
        }
    }

    fn for_player_mut(&mut self, player: Player) -> &mut ScoreBreakdown {
        match player {
            Player::Red => &mut self.red,
            Player::Black => &mut self.black,
        }
    }

    /// `player`'s total minus the opponent's.
    #[inline]
    pub fn balance(&self, player: Player) -> f64 {
        self.for_player(player).total() - self.for_player(player.opposite()).total()
    }
}

/// Subtotals for both sides in one pass over the board.
pub fn player_scores(board: &Board) -> PlayerScores {
    let mut scores = PlayerScores::default();
    for (pos, piece) in board.pieces() {
        scores.for_player_mut(piece.color).add_piece(pos, piece);
    }
    scores
}

/// Desirability of `board` for `perspective`.
pub fn evaluate(board: &Board, perspective: Player) -> f64 {
    player_scores(board).balance(perspective)
}

/// Material, advancement and centre control.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalScorer;

impl BoardScorer for PositionalScorer {
    fn score(&self, board: &Board, perspective: Player) -> f64 {
        evaluate(board, perspective)
    }
}

/// Piece count only; a weaker baseline for engine matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &Board, perspective: Player) -> f64 {
        let scores = player_scores(board);
        scores.for_player(perspective).material - scores.for_player(perspective.opposite()).material
    }
}
