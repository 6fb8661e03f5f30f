//! Layout-text-to-Board parser.
//!
//! The layout is eight `/`-separated rows, row 0 first. `r`/`R` are a red
//! man/king, `b`/`B` a black man/king, and a digit 1-8 skips that many empty
//! squares. Pieces on light squares are rejected so every parsed board keeps
//! the dark-square invariant.

use crate::errors::{DraughtsError, DraughtsResult};
use crate::game_state::board::Board;
use crate::game_state::draughts_rules::BOARD_SIZE;
use crate::game_state::draughts_types::{Piece, Player, Position};

pub fn parse_layout(layout: &str) -> DraughtsResult<Board> {
    let rows: Vec<&str> = layout.trim().split('/').collect();
    if rows.len() != usize::from(BOARD_SIZE) {
        return Err(invalid(format!(
            "expected {BOARD_SIZE} rows, found {}",
            rows.len()
        )));
    }

    let mut board = Board::empty();

    for (row, row_str) in rows.iter().enumerate() {
        let mut col = 0i32;

        for ch in row_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=u32::from(BOARD_SIZE)).contains(&empty_count) {
                    return Err(invalid(format!("invalid empty-square count '{ch}'")));
                }
                col += empty_count as i32;
                continue;
            }

            let piece = piece_from_layout_char(ch)
                .ok_or_else(|| invalid(format!("invalid piece character '{ch}' in row {row}")))?;

            if col >= i32::from(BOARD_SIZE) {
                return Err(invalid(format!("row {row} has too many squares")));
            }

            let pos = Position::new(row as i32, col)?;
            board.place(pos, piece)?;
            col += 1;
        }

        if col != i32::from(BOARD_SIZE) {
            return Err(invalid(format!(
                "row {row} covers {col} squares instead of {BOARD_SIZE}"
            )));
        }
    }

    Ok(board)
}

pub fn piece_from_layout_char(ch: char) -> Option<Piece> {
    match ch {
        'r' => Some(Piece::man(Player::Red)),
        'R' => Some(Piece::king(Player::Red)),
        'b' => Some(Piece::man(Player::Black)),
        'B' => Some(Piece::king(Player::Black)),
        _ => None,
    }
}

fn invalid(msg: String) -> DraughtsError {
    DraughtsError::InvalidBoardLayout(msg)
}

#[cfg(test)]
mod tests {
    use super::parse_layout;
    use crate::errors::DraughtsError;
    use crate::game_state::draughts_types::{Player, Position};

    #[test]
    fn parses_kings_and_men() {
        let board = parse_layout("8/2b5/8/8/8/8/8/R7").expect("layout should parse");
        let man = board
            .piece_at(Position::new(1, 2).expect("on board"))
            .expect("black man");
        assert_eq!(man.color, Player::Black);
        assert!(!man.is_king);
        let king = board
            .piece_at(Position::new(7, 0).expect("on board"))
            .expect("red king");
        assert!(king.is_king);
    }

    #[test]
    fn rejects_wrong_row_count() {
        let err = parse_layout("8/8/8").expect_err("three rows is not a board");
        assert!(matches!(err, DraughtsError::InvalidBoardLayout(_)));
    }

    #[test]
    fn rejects_short_and_long_rows() {
        assert!(parse_layout("7/8/8/8/8/8/8/8").is_err());
        assert!(parse_layout("8b/8/8/8/8/8/8/8").is_err());
        assert!(parse_layout("44b/8/8/8/8/8/8/8").is_err());
    }

    #[test]
    fn rejects_unknown_characters() {
        assert!(parse_layout("1q6/8/8/8/8/8/8/8").is_err());
        assert!(parse_layout("0b7/8/8/8/8/8/8/8").is_err());
    }

    #[test]
    fn rejects_pieces_on_light_squares() {
        let err = parse_layout("r7/8/8/8/8/8/8/8").expect_err("(0,0) is light");
        assert_eq!(err, DraughtsError::LightSquare { row: 0, col: 0 });
    }
}
