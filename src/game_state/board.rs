//! Fixed 8x8 board of optional pieces.
//!
//! `Board` is a small `Copy` value. Search and the game controller derive new
//! positions by applying a move to a copy, never by editing a board another
//! branch still holds.

use crate::errors::{DraughtsError, DraughtsResult};
use crate::game_state::draughts_rules::{BOARD_SIZE, STARTING_LAYOUT};
use crate::game_state::draughts_types::{Piece, Player, Position};
use crate::utils::board_generator::generate_layout;
use crate::utils::board_parser::parse_layout;

const SIZE: usize = BOARD_SIZE as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Option<Piece>; SIZE]; SIZE],
}

impl Board {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Twelve men per side on the dark squares of the three nearest rows.
    pub fn starting() -> Self {
        let mut board = Self::empty();
        for pos in Position::all().filter(|p| p.is_dark()) {
            let color = match pos.row() {
                0..=2 => Player::Black,
                5..=7 => Player::Red,
                _ => continue,
            };
            board.cells[pos.row() as usize][pos.col() as usize] = Some(Piece::man(color));
        }
        board
    }

    #[inline]
    pub fn from_layout(layout: &str) -> DraughtsResult<Self> {
        parse_layout(layout)
    }

    #[inline]
    pub fn layout(&self) -> String {
        generate_layout(self)
    }

    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.cells[pos.row() as usize][pos.col() as usize]
    }

    #[inline]
    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.piece_at(pos).is_none()
    }

    /// Puts `piece` on `pos`, replacing whatever stood there.
    pub fn place(&mut self, pos: Position, piece: Piece) -> DraughtsResult<()> {
        if !pos.is_dark() {
            return Err(DraughtsError::LightSquare {
                row: pos.row(),
                col: pos.col(),
            });
        }
        self.cells[pos.row() as usize][pos.col() as usize] = Some(piece);
        Ok(())
    }

    #[inline]
    pub fn remove(&mut self, pos: Position) -> Option<Piece> {
        self.cells[pos.row() as usize][pos.col() as usize].take()
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| self.piece_at(pos).map(|piece| (pos, piece)))
    }

    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == player)
    }

    pub fn count(&self, player: Player) -> usize {
        self.pieces_of(player).count()
    }

    pub fn king_count(&self, player: Player) -> usize {
        self.pieces_of(player).filter(|(_, p)| p.is_king).count()
    }
}
