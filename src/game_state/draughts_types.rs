//! Value types shared by every subsystem: players, pieces, squares and moves.

use std::fmt;
use std::str::FromStr;

use crate::errors::{DraughtsError, DraughtsResult};
use crate::game_state::draughts_rules::BOARD_SIZE;

pub use crate::game_state::board::Board;
pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::UndoState;

/// Side to move. Red starts at the bottom (rows 5-7) and moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Red,
    Black,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::Red, Player::Black];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Player::Red => 0,
            Player::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Player::Red => Player::Black,
            Player::Black => Player::Red,
        }
    }

    /// Far rank: a man of this colour landing here is crowned.
    #[inline]
    pub const fn crowning_row(self) -> u8 {
        match self {
            Player::Red => 0,
            Player::Black => BOARD_SIZE - 1,
        }
    }

    /// Rows a man of this colour has advanced from its own back rank.
    #[inline]
    pub const fn advancement(self, row: u8) -> u8 {
        match self {
            Player::Red => BOARD_SIZE - 1 - row,
            Player::Black => row,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Player::Red => "red",
            Player::Black => "black",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Player {
    type Err = DraughtsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" | "r" => Ok(Player::Red),
            "black" | "b" => Ok(Player::Black),
            _ => Err(DraughtsError::UnknownPlayer(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Player,
    pub is_king: bool,
}

impl Piece {
    #[inline]
    pub const fn man(color: Player) -> Self {
        Self {
            color,
            is_king: false,
        }
    }

    #[inline]
    pub const fn king(color: Player) -> Self {
        Self {
            color,
            is_king: true,
        }
    }
}

/// A square on the board. Always on-board once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    pub fn new(row: i32, col: i32) -> DraughtsResult<Self> {
        let size = i32::from(BOARD_SIZE);
        if !(0..size).contains(&row) || !(0..size).contains(&col) {
            return Err(DraughtsError::OutOfBounds { row, col });
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Dark squares are the only ones pieces may occupy.
    #[inline]
    pub const fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// Square `steps` diagonal steps away in direction `(d_row, d_col)`, if on-board.
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8, steps: i8) -> Option<Self> {
        let row = i32::from(self.row) + i32::from(d_row) * i32::from(steps);
        let col = i32::from(self.col) + i32::from(d_col) * i32::from(steps);
        Self::new(row, col).ok()
    }

    /// Every square in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position { row, col }))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// A proposed move. Jumps carry the square of the single piece they capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub captured: Option<Position>,
}

impl Move {
    #[inline]
    pub const fn simple(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            captured: None,
        }
    }

    #[inline]
    pub const fn jump(from: Position, to: Position, captured: Position) -> Self {
        Self {
            from,
            to,
            captured: Some(captured),
        }
    }

    #[inline]
    pub const fn is_jump(&self) -> bool {
        self.captured.is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_jump() { 'x' } else { '-' };
        write!(f, "{}{}{}", self.from, sep, self.to)
    }
}

/// Move-choice policy of the non-human player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    /// Uniformly random legal move.
    Beginner,
    /// Random capture when one exists, otherwise any random move.
    #[default]
    Intermediate,
    /// Capture-first minimax with alpha-beta pruning.
    Advanced,
}

impl Difficulty {
    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = DraughtsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" | "easy" | "1" => Ok(Difficulty::Beginner),
            "intermediate" | "medium" | "2" => Ok(Difficulty::Intermediate),
            "advanced" | "hard" | "3" => Ok(Difficulty::Advanced),
            _ => Err(DraughtsError::UnknownDifficulty(s.to_owned())),
        }
    }
}

/// Terminal result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Winner(Player),
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "{player} wins"),
            Outcome::Draw => f.write_str("draw"),
        }
    }
}

/// Who controls each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// One human against the AI playing `ai_player`.
    VsAi { ai_player: Player },
    /// Two humans sharing the board.
    VsHuman,
}

impl GameMode {
    #[inline]
    pub const fn is_ai(self, player: Player) -> bool {
        match self {
            GameMode::VsAi { ai_player } => ai_player.index() == player.index(),
            GameMode::VsHuman => false,
        }
    }
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::VsAi {
            ai_player: Player::Black,
        }
    }
}
