use crate::game_state::board::Board;
use crate::game_state::draughts_types::{Move, Player};

/// One applied move and the board it was played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub mover: Player,
    pub board_before: Board,
}
