//! Canonical rule and tuning constants for English draughts on an 8x8 board.

use std::time::Duration;

/// Rows and columns on the board.
pub const BOARD_SIZE: u8 = 8;

/// Starting layout in the crate's board text format (row 0 first).
///
/// Black occupies the dark squares of rows 0-2, Red those of rows 5-7.
pub const STARTING_LAYOUT: &str = "1b1b1b1b/b1b1b1b1/1b1b1b1b/8/8/r1r1r1r1/1r1r1r1r/r1r1r1r1";

/// Cosmetic pause before the AI commits its move.
pub const AI_THINK_TIME: Duration = Duration::from_millis(1000);

/// Plies searched below each root candidate by the advanced tier.
pub const MINIMAX_DEPTH: u8 = 3;

/// Score of a searched position where one side has no legal move.
pub const TERMINAL_SCORE: f64 = 1000.0;

pub const MAN_VALUE: f64 = 3.0;
pub const KING_VALUE: f64 = 5.0;

/// Bonus per row a man has advanced from its own back rank.
pub const ADVANCEMENT_WEIGHT: f64 = 0.5;

/// Bonus for a man one step away from being crowned.
pub const NEAR_CROWNING_BONUS: f64 = 2.0;

/// Bonus for any piece standing in columns 2-5.
pub const CENTER_CONTROL_BONUS: f64 = 0.5;
pub const CENTER_COLUMNS: std::ops::RangeInclusive<u8> = 2..=5;
