//! Terminal-oriented board renderer.
//!
//! Produces a human-readable diagram with row numbers down the side and
//! column numbers along the top and bottom, matching the coordinates the
//! console front-end accepts.

use crate::game_state::board::Board;
use crate::game_state::draughts_types::{Piece, Player, Position};

/// Render the board to a string for terminal output.
///
/// Row 0 (Black's back rank) is printed first. Empty dark squares show as `·`,
/// light squares as a blank.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("  0 1 2 3 4 5 6 7\n");

    for pos in Position::all() {
        if pos.col() == 0 {
            out.push(char::from(b'0' + pos.row()));
            out.push(' ');
        }

        match board.piece_at(pos) {
            Some(piece) => out.push(piece_to_glyph(piece)),
            None if pos.is_dark() => out.push('·'),
            None => out.push(' '),
        }

        if pos.col() < 7 {
            out.push(' ');
        } else {
            out.push(' ');
            out.push(char::from(b'0' + pos.row()));
            out.push('\n');
        }
    }

    out.push_str("  0 1 2 3 4 5 6 7");

    out
}

fn piece_to_glyph(piece: Piece) -> char {
    match (piece.color, piece.is_king) {
        (Player::Red, false) => '⛀',
        (Player::Red, true) => '⛁',
        (Player::Black, false) => '⛂',
        (Player::Black, true) => '⛃',
    }
}

#[cfg(test)]
mod tests {
    use super::render_board;
    use crate::game_state::board::Board;

    #[test]
    fn renders_ten_lines_with_all_pieces() {
        let text = render_board(&Board::starting());
        assert_eq!(text.lines().count(), 10);
        assert_eq!(text.matches('⛀').count(), 12);
        assert_eq!(text.matches('⛂').count(), 12);
        assert!(text.lines().nth(4).is_some_and(|l| l.starts_with("3 ") && !l.contains('⛀')));
    }
}
