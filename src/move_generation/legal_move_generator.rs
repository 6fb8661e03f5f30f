//! Legal move generation for English draughts.
//!
//! Men step or jump diagonally forward (Red toward row 0, Black toward row 7);
//! kings use all four diagonals. Simple moves and single captures are both
//! returned. Capture is not mandatory and jumps do not chain: each move
//! removes at most one opposing piece.
//!
//! Output order is fixed: directions in `DIRECTIONS` order, and within each
//! direction the simple move before the jump. Whole-side generation scans the
//! board row-major.

use crate::game_state::board::Board;
use crate::game_state::draughts_types::{Move, Piece, Player, Position};

/// Diagonal steps as `(d_row, d_col)`. The first two point toward row 0.
const DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

#[inline]
fn directions_for(piece: Piece) -> &'static [(i8, i8)] {
    match (piece.is_king, piece.color) {
        (true, _) => &DIRECTIONS,
        (false, Player::Red) => &DIRECTIONS[..2],
        (false, Player::Black) => &DIRECTIONS[2..],
    }
}

/// Moves available to `piece` standing on `from`.
pub fn legal_moves(board: &Board, piece: Piece, from: Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(8);
    legal_moves_into(board, piece, from, &mut out);
    out
}

pub fn legal_moves_into(board: &Board, piece: Piece, from: Position, out: &mut Vec<Move>) {
    for &(d_row, d_col) in directions_for(piece) {
        let Some(step) = from.offset(d_row, d_col, 1) else {
            continue;
        };

        if board.is_empty_at(step) {
            out.push(Move::simple(from, step));
        }

        let Some(landing) = from.offset(d_row, d_col, 2) else {
            continue;
        };
        if !board.is_empty_at(landing) {
            continue;
        }
        if board
            .piece_at(step)
            .is_some_and(|jumped| jumped.color != piece.color)
        {
            out.push(Move::jump(from, landing, step));
        }
    }
}

/// Every candidate move for `player`, scanning its pieces row-major.
pub fn all_legal_moves(board: &Board, player: Player) -> Vec<Move> {
    let mut out = Vec::with_capacity(32);
    for (pos, piece) in board.pieces_of(player) {
        legal_moves_into(board, piece, pos, &mut out);
    }
    out
}

pub fn has_any_legal_move(board: &Board, player: Player) -> bool {
    let mut scratch = Vec::with_capacity(8);
    board.pieces_of(player).any(|(pos, piece)| {
        scratch.clear();
        legal_moves_into(board, piece, pos, &mut scratch);
        !scratch.is_empty()
    })
}

/// Keeps only the jumps when at least one exists, preserving order.
pub fn restrict_to_captures(moves: Vec<Move>) -> Vec<Move> {
    if moves.iter().any(Move::is_jump) {
        moves.into_iter().filter(Move::is_jump).collect()
    } else {
        moves
    }
}
