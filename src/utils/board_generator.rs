//! Board-to-layout text generator.
//!
//! Inverse of `board_parser`: rows are emitted top (row 0) to bottom, runs of
//! empty squares collapse into a digit.

use crate::game_state::board::Board;
use crate::game_state::draughts_rules::BOARD_SIZE;
use crate::game_state::draughts_types::{Piece, Player, Position};

pub fn generate_layout(board: &Board) -> String {
    let mut out = String::with_capacity(72);
    let mut empty_count = 0u8;

    for pos in Position::all() {
        if let Some(piece) = board.piece_at(pos) {
            if empty_count > 0 {
                out.push(char::from(b'0' + empty_count));
                empty_count = 0;
            }
            out.push(piece_to_layout_char(piece));
        } else {
            empty_count += 1;
        }

        if pos.col() == BOARD_SIZE - 1 {
            if empty_count > 0 {
                out.push(char::from(b'0' + empty_count));
                empty_count = 0;
            }
            if pos.row() + 1 < BOARD_SIZE {
                out.push('/');
            }
        }
    }

    out
}

pub fn piece_to_layout_char(piece: Piece) -> char {
    match (piece.color, piece.is_king) {
        (Player::Red, false) => 'r',
        (Player::Red, true) => 'R',
        (Player::Black, false) => 'b',
        (Player::Black, true) => 'B',
    }
}
