//! Errors used at the edges of the draughts engine.
//!
//! Game transitions never fail: a rejected selection, move or undo returns the
//! unchanged state. `DraughtsError` covers the places where untrusted input
//! enters the crate (coordinates, board layout text, front-end commands) and
//! the one internal precondition the move applier checks.

use thiserror::Error;

/// Unified error type for the draughts engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraughtsError {
    /// Coordinates outside the 8x8 grid.
    #[error("square ({row}, {col}) is off the board (rows and columns must be 0-7)")]
    OutOfBounds { row: i32, col: i32 },

    /// Pieces may only stand on dark squares.
    #[error("square ({row}, {col}) is a light square and cannot hold a piece")]
    LightSquare { row: u8, col: u8 },

    /// A move was applied whose origin square is empty.
    #[error("no piece at square ({row}, {col})")]
    NoPieceAtSquare { row: u8, col: u8 },

    /// Board layout text could not be parsed.
    #[error("invalid board layout: {0}")]
    InvalidBoardLayout(String),

    #[error("unknown difficulty '{0}' (expected beginner, intermediate or advanced)")]
    UnknownDifficulty(String),

    #[error("unknown player '{0}' (expected red or black)")]
    UnknownPlayer(String),

    /// An engine proposed a move that is not legal in the position it was given.
    #[error("engine '{engine}' returned illegal move {mv}")]
    IllegalEngineMove { engine: String, mv: String },

    /// A front-end command line could not be parsed.
    #[error("invalid command: {0}")]
    InvalidCommand(String),
}

/// Result alias for fallible engine operations.
pub type DraughtsResult<T> = Result<T, DraughtsError>;
