//! Applies a move to a copy of the board.
//!
//! The moving piece leaves `from`, lands on `to`, the jumped piece (if any) is
//! removed, and a man reaching its far rank is crowned. The input board is
//! never modified.

use crate::errors::{DraughtsError, DraughtsResult};
use crate::game_state::board::Board;
use crate::game_state::draughts_types::{Move, Piece};

pub fn apply_move(board: &Board, mv: &Move) -> DraughtsResult<Board> {
    let mut next = *board;

    let piece = next
        .remove(mv.from)
        .ok_or(DraughtsError::NoPieceAtSquare {
            row: mv.from.row(),
            col: mv.from.col(),
        })?;

    if let Some(captured) = mv.captured {
        next.remove(captured);
    }

    next.place(mv.to, crowned_on_landing(piece, mv))?;

    Ok(next)
}

/// True when `mv` turns the moving man into a king.
#[inline]
pub fn is_crowning_move(piece: Piece, mv: &Move) -> bool {
    !piece.is_king && mv.to.row() == piece.color.crowning_row()
}

#[inline]
fn crowned_on_landing(piece: Piece, mv: &Move) -> Piece {
    if is_crowning_move(piece, mv) {
        Piece::king(piece.color)
    } else {
        piece
    }
}
