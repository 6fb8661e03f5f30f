//! Turn state machine for one game of draughts.
//!
//! `GameState` is an immutable snapshot. Every transition (`select_tile`,
//! `apply_move`, `run_ai_turn`, `undo`, `restart`) returns a new snapshot and
//! either fully succeeds or returns an unchanged copy; there is no partially
//! applied move. Rejected input is silent by design of the game surface and
//! only shows up in `trace` logs.
//!
//! AI turns are deferred: after a human move hands the turn to the AI the
//! state sits in `Phase::AiThinking` holding an `AiTicket`. The presentation
//! layer waits the configured think time and then calls `run_ai_turn` with
//! that ticket. A ticket from an older game or an already-finished turn no
//! longer matches and its result is discarded.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tracing::{info, trace, warn};

use crate::engines::engine_select::choose_ai_move;
use crate::game_state::board::Board;
use crate::game_state::clocks::Clocks;
use crate::game_state::draughts_types::{Difficulty, Move, Outcome, Player, Position};
use crate::game_state::game_config::GameConfig;
use crate::game_state::undo_state::UndoState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::{
    all_legal_moves, has_any_legal_move, legal_moves,
};
use crate::search::board_scoring::{player_scores, PlayerScores};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Identity of one scheduled AI turn: the game it belongs to and the ply it
/// was scheduled at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AiTicket {
    generation: u64,
    ply: usize,
    player: Player,
}

impl AiTicket {
    #[inline]
    pub fn player(&self) -> Player {
        self.player
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// The human on move may pick one of their pieces.
    Selecting,
    /// A piece is selected; `legal_moves` is exactly its generator output.
    PendingMove {
        selected: Position,
        legal_moves: Vec<Move>,
    },
    /// The AI is on move; human input is ignored until the ticket resolves.
    AiThinking { ticket: AiTicket },
    /// Terminal.
    GameOver { outcome: Outcome },
}

/// Why an undo request would be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoBlocked {
    NotBeginner,
    NotEnoughHistory,
    AiThinking,
    GameOver,
}

impl fmt::Display for UndoBlocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            UndoBlocked::NotBeginner => "undo is only available at beginner difficulty",
            UndoBlocked::NotEnoughHistory => "nothing to undo yet",
            UndoBlocked::AiThinking => "cannot undo while the AI is thinking",
            UndoBlocked::GameOver => "the game is over",
        };
        f.write_str(msg)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub board: Board,
    pub current_player: Player,
    pub phase: Phase,
    pub config: GameConfig,
    /// Material / power / strategy subtotals of `board`.
    pub scores: PlayerScores,
    pub clocks: Clocks,
    pub history: Vec<UndoState>,
    /// Human move taken back by the most recent undo.
    pub last_undone: Option<Move>,
    generation: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game(GameConfig::default())
    }
}

impl GameState {
    pub fn new_game(config: GameConfig) -> Self {
        Self::new_game_at(config, Utc::now())
    }

    pub fn new_game_at(config: GameConfig, now: DateTime<Utc>) -> Self {
        Self::from_board_at(Board::starting(), Player::Red, config, now)
    }

    /// Game starting from an arbitrary position with `to_move` on move.
    pub fn from_board_at(
        board: Board,
        to_move: Player,
        config: GameConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let mut state = Self {
            board,
            current_player: to_move,
            phase: Phase::Selecting,
            config,
            scores: player_scores(&board),
            clocks: Clocks::start(to_move, now),
            history: Vec::new(),
            last_undone: None,
            generation: next_generation(),
        };
        info!(
            generation = state.generation,
            mode = ?config.mode,
            difficulty = %config.difficulty,
            %to_move,
            "new game"
        );
        state.settle(now);
        state
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn selected_position(&self) -> Option<Position> {
        match &self.phase {
            Phase::PendingMove { selected, .. } => Some(*selected),
            _ => None,
        }
    }

    pub fn legal_moves_for_selection(&self) -> &[Move] {
        match &self.phase {
            Phase::PendingMove { legal_moves, .. } => legal_moves,
            _ => &[],
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::GameOver { outcome } => Some(outcome),
            _ => None,
        }
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }

    #[inline]
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.phase, Phase::AiThinking { .. })
    }

    /// Ticket of the pending AI turn, if the AI is on move.
    pub fn ai_ticket(&self) -> Option<AiTicket> {
        match self.phase {
            Phase::AiThinking { ticket } => Some(ticket),
            _ => None,
        }
    }

    pub fn select_tile(&self, pos: Position) -> Self {
        self.select_tile_at(pos, Utc::now())
    }

    /// Click on `pos`: selects an own piece, moves the selected piece if `pos`
    /// is one of its destinations, and otherwise clears the selection.
    pub fn select_tile_at(&self, pos: Position, now: DateTime<Utc>) -> Self {
        if !self.accepts_human_input() {
            trace!(%pos, phase = ?self.phase, "ignoring tile click");
            return self.clone();
        }

        if let Some(piece) = self
            .board
            .piece_at(pos)
            .filter(|piece| piece.color == self.current_player)
        {
            let mut next = self.clone();
            next.phase = Phase::PendingMove {
                selected: pos,
                legal_moves: legal_moves(&self.board, piece, pos),
            };
            return next;
        }

        if let Phase::PendingMove {
            selected,
            legal_moves,
        } = &self.phase
        {
            if let Some(mv) = legal_moves
                .iter()
                .find(|mv| mv.from == *selected && mv.to == pos)
            {
                return self.commit_move(*mv, now);
            }
        }

        self.deselect()
    }

    /// Drops the current selection, if any.
    pub fn deselect(&self) -> Self {
        let mut next = self.clone();
        if matches!(next.phase, Phase::PendingMove { .. }) {
            next.phase = Phase::Selecting;
        }
        next
    }

    pub fn apply_move(&self, from: Position, to: Position) -> Self {
        self.apply_move_at(from, to, Utc::now())
    }

    /// Moves the selected piece from `from` to `to` if that pair is in the
    /// current legal set; otherwise returns the state unchanged.
    pub fn apply_move_at(&self, from: Position, to: Position, now: DateTime<Utc>) -> Self {
        let Phase::PendingMove {
            selected,
            legal_moves,
        } = &self.phase
        else {
            trace!(%from, %to, phase = ?self.phase, "ignoring move without a selection");
            return self.clone();
        };

        match legal_moves
            .iter()
            .find(|mv| *selected == from && mv.from == from && mv.to == to)
        {
            Some(mv) => self.commit_move(*mv, now),
            None => {
                trace!(%from, %to, "ignoring move outside the legal set");
                self.clone()
            }
        }
    }

    pub fn run_ai_turn(&self, ticket: AiTicket) -> Self {
        self.run_ai_turn_at(ticket, Utc::now())
    }

    /// Lets the AI choose and play its move for `ticket`.
    pub fn run_ai_turn_at(&self, ticket: AiTicket, now: DateTime<Utc>) -> Self {
        if !self.is_current_ticket(ticket) {
            trace!(?ticket, "discarding stale AI turn");
            return self.clone();
        }

        match choose_ai_move(&self.board, ticket.player, self.config.difficulty) {
            Ok(choice) => self.commit_ai_move_at(ticket, choice, now),
            Err(err) => {
                warn!(%err, "AI move selection failed");
                self.clone()
            }
        }
    }

    /// Commits an AI decision computed elsewhere. `None` means the AI found
    /// no legal move and loses.
    pub fn commit_ai_move_at(
        &self,
        ticket: AiTicket,
        choice: Option<Move>,
        now: DateTime<Utc>,
    ) -> Self {
        if !self.is_current_ticket(ticket) {
            trace!(?ticket, "discarding stale AI move");
            return self.clone();
        }

        match choice {
            None => {
                let mut next = self.clone();
                next.finish(Outcome::Winner(ticket.player.opposite()), now);
                next
            }
            Some(mv) if all_legal_moves(&self.board, ticket.player).contains(&mv) => {
                self.commit_move(mv, now)
            }
            Some(mv) => {
                warn!(%mv, "discarding illegal AI move");
                self.clone()
            }
        }
    }

    /// `None` when `undo` would take back the last move pair.
    pub fn undo_blocked(&self) -> Option<UndoBlocked> {
        match self.phase {
            Phase::GameOver { .. } => Some(UndoBlocked::GameOver),
            Phase::AiThinking { .. } => Some(UndoBlocked::AiThinking),
            _ if self.config.difficulty != Difficulty::Beginner => Some(UndoBlocked::NotBeginner),
            _ if self.history.len() < 2 => Some(UndoBlocked::NotEnoughHistory),
            _ => None,
        }
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        self.undo_blocked().is_none()
    }

    pub fn undo(&self) -> Self {
        self.undo_at(Utc::now())
    }

    /// Takes back the last two moves (the human's and the reply) by restoring
    /// the board from before the earlier one.
    pub fn undo_at(&self, now: DateTime<Utc>) -> Self {
        if let Some(reason) = self.undo_blocked() {
            trace!(%reason, "ignoring undo");
            return self.clone();
        }

        let keep = self.history.len() - 2;
        let restored = self.history[keep];

        let mut next = self.clone();
        next.history.truncate(keep);
        next.board = restored.board_before;
        next.current_player = restored.mover;
        next.scores = player_scores(&next.board);
        next.last_undone = Some(restored.mv);
        next.clocks.switch_turn(restored.mover, now);
        next.settle(now);

        info!(undone = %restored.mv, plies = next.history.len(), "undo");
        next
    }

    pub fn restart(&self) -> Self {
        self.restart_at(Utc::now())
    }

    /// Fresh game with the same configuration and a new generation, which
    /// invalidates any ticket issued by this game.
    pub fn restart_at(&self, now: DateTime<Utc>) -> Self {
        if self.is_ai_thinking() {
            trace!("ignoring restart while the AI is thinking");
            return self.clone();
        }
        Self::new_game_at(self.config, now)
    }

    pub fn set_difficulty(&self, difficulty: Difficulty) -> Self {
        if self.is_ai_thinking() {
            trace!(%difficulty, "ignoring difficulty change while the AI is thinking");
            return self.clone();
        }
        let mut next = self.clone();
        next.config.difficulty = difficulty;
        next
    }

    #[inline]
    fn accepts_human_input(&self) -> bool {
        matches!(self.phase, Phase::Selecting | Phase::PendingMove { .. })
    }

    #[inline]
    fn is_current_ticket(&self, ticket: AiTicket) -> bool {
        // Tickets embed the generation, so equality also rejects older games.
        self.ai_ticket() == Some(ticket)
    }

    fn commit_move(&self, mv: Move, now: DateTime<Utc>) -> Self {
        let board = match apply_move(&self.board, &mv) {
            Ok(board) => board,
            Err(err) => {
                warn!(%err, %mv, "rejecting move");
                return self.clone();
            }
        };

        let mover = self.current_player;
        let mut next = self.clone();
        next.history.push(UndoState {
            mv,
            mover,
            board_before: self.board,
        });
        next.board = board;
        next.current_player = mover.opposite();
        next.scores = player_scores(&board);
        next.last_undone = None;
        next.clocks.switch_turn(next.current_player, now);
        next.settle(now);

        trace!(%mover, %mv, ply = next.history.len(), "move applied");
        next
    }

    /// Derives the phase for `current_player` on `board`.
    fn settle(&mut self, now: DateTime<Utc>) {
        let to_move = self.current_player;

        if !has_any_legal_move(&self.board, to_move) {
            let outcome = if has_any_legal_move(&self.board, to_move.opposite()) {
                Outcome::Winner(to_move.opposite())
            } else {
                Outcome::Draw
            };
            self.finish(outcome, now);
        } else if self.config.mode.is_ai(to_move) {
            self.phase = Phase::AiThinking {
                ticket: AiTicket {
                    generation: self.generation,
                    ply: self.history.len(),
                    player: to_move,
                },
            };
        } else {
            self.phase = Phase::Selecting;
        }
    }

    fn finish(&mut self, outcome: Outcome, now: DateTime<Utc>) {
        self.clocks.stop(now);
        self.phase = Phase::GameOver { outcome };
        info!(%outcome, plies = self.history.len(), "game over");
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use rand::prelude::IndexedRandom;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::game_state::draughts_types::{GameMode, Piece};

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).expect("valid timestamp")
    }

    fn pos(row: i32, col: i32) -> Position {
        Position::new(row, col).expect("test square should be on board")
    }

    fn board(layout: &str) -> Board {
        Board::from_layout(layout).expect("test layout should parse")
    }

    fn two_humans() -> GameConfig {
        GameConfig::default().with_mode(GameMode::VsHuman)
    }

    fn beginner_vs_ai() -> GameConfig {
        GameConfig::default().with_difficulty(Difficulty::Beginner)
    }

    fn click_move(state: &GameState, from: Position, to: Position, now: DateTime<Utc>) -> GameState {
        state.select_tile_at(from, now).apply_move_at(from, to, now)
    }

    #[test]
    fn new_game_starts_with_red_selecting() {
        let state = GameState::new_game_at(GameConfig::default(), at(0));
        assert_eq!(state.board, Board::starting());
        assert_eq!(state.current_player, Player::Red);
        assert_eq!(state.phase, Phase::Selecting);
        assert_eq!(state.outcome(), None);
        assert!(state.history.is_empty());
        assert_eq!(state.scores, player_scores(&Board::starting()));
    }

    #[test]
    fn selecting_own_piece_computes_its_legal_moves() {
        let state = GameState::new_game_at(GameConfig::default(), at(0));
        let selected = state.select_tile_at(pos(5, 2), at(1));

        assert_eq!(selected.selected_position(), Some(pos(5, 2)));
        assert_eq!(
            selected.legal_moves_for_selection(),
            legal_moves(&state.board, Piece::man(Player::Red), pos(5, 2)).as_slice()
        );

        // Reselecting another own piece replaces the selection.
        let reselected = selected.select_tile_at(pos(5, 4), at(1));
        assert_eq!(reselected.selected_position(), Some(pos(5, 4)));
    }

    #[test]
    fn clicks_elsewhere_silently_deselect() {
        let state = GameState::new_game_at(GameConfig::default(), at(0));

        assert_eq!(state.select_tile_at(pos(3, 0), at(1)), state);
        assert_eq!(state.select_tile_at(pos(2, 1), at(1)), state);

        let selected = state.select_tile_at(pos(5, 2), at(1));
        let cleared = selected.select_tile_at(pos(3, 4), at(2));
        assert_eq!(cleared.phase, Phase::Selecting);
        assert_eq!(cleared.board, state.board);
        assert_eq!(cleared.current_player, Player::Red);
        assert!(cleared.legal_moves_for_selection().is_empty());
    }

    #[test]
    fn applied_move_switches_player_and_records_history() {
        let state = GameState::new_game_at(two_humans(), at(0));
        let next = click_move(&state, pos(5, 0), pos(4, 1), at(3));

        assert_eq!(next.current_player, Player::Black);
        assert_eq!(next.phase, Phase::Selecting);
        assert!(next.board.is_empty_at(pos(5, 0)));
        assert_eq!(next.board.piece_at(pos(4, 1)), Some(Piece::man(Player::Red)));
        assert_eq!(next.history.len(), 1);
        assert_eq!(next.history[0].board_before, Board::starting());
        assert_eq!(next.history[0].mover, Player::Red);
        assert_eq!(next.scores, player_scores(&next.board));
        assert_ne!(next.scores, state.scores);
    }

    #[test]
    fn moves_outside_the_legal_set_are_no_ops() {
        let state = GameState::new_game_at(two_humans(), at(0));
        let selected = state.select_tile_at(pos(5, 0), at(0));

        assert_eq!(selected.apply_move_at(pos(5, 0), pos(3, 2), at(1)), selected);
        assert_eq!(selected.apply_move_at(pos(5, 2), pos(4, 3), at(1)), selected);
        // No selection at all.
        assert_eq!(state.apply_move_at(pos(5, 0), pos(4, 1), at(1)), state);
    }

    #[test]
    fn red_man_is_crowned_on_row_zero() {
        let start = board("8/2r5/8/8/3b4/8/8/8");
        let state = GameState::from_board_at(start, Player::Red, two_humans(), at(0));
        let next = click_move(&state, pos(1, 2), pos(0, 1), at(1));

        assert_eq!(next.board.piece_at(pos(0, 1)), Some(Piece::king(Player::Red)));
        assert!(next.board.is_empty_at(pos(1, 2)));
        assert_eq!(next.current_player, Player::Black);
    }

    #[test]
    fn black_jump_captures_the_red_piece() {
        let start = board("8/8/1b6/2r5/8/8/1r6/8");
        let state = GameState::from_board_at(start, Player::Black, two_humans(), at(0));
        let selected = state.select_tile_at(pos(2, 1), at(0));
        assert!(selected
            .legal_moves_for_selection()
            .contains(&Move::jump(pos(2, 1), pos(4, 3), pos(3, 2))));

        let next = selected.select_tile_at(pos(4, 3), at(1));
        assert!(next.board.is_empty_at(pos(2, 1)));
        assert!(next.board.is_empty_at(pos(3, 2)));
        assert_eq!(next.board.piece_at(pos(4, 3)), Some(Piece::man(Player::Black)));
        assert_eq!(next.current_player, Player::Red);
    }

    #[test]
    fn blocked_side_loses_immediately() {
        let blocked = board("8/8/1b6/r1r5/3r4/8/8/8");
        assert_eq!(
            choose_ai_move(&blocked, Player::Black, Difficulty::Advanced).expect("engine runs"),
            None
        );

        let state = GameState::from_board_at(blocked, Player::Black, GameConfig::default(), at(0));
        assert_eq!(state.outcome(), Some(Outcome::Winner(Player::Red)));
    }

    #[test]
    fn blocking_the_last_black_piece_wins_for_red() {
        let start = board("8/8/1b6/r7/1r1r4/8/8/8");
        let state = GameState::from_board_at(start, Player::Red, GameConfig::default(), at(0));
        assert_eq!(state.phase, Phase::Selecting);

        let over = click_move(&state, pos(4, 1), pos(3, 2), at(2));
        assert_eq!(over.outcome(), Some(Outcome::Winner(Player::Red)));
        assert_eq!(over.clocks.running(), None);

        // Terminal: further input changes nothing.
        assert_eq!(over.select_tile_at(pos(3, 0), at(3)), over);
        assert_eq!(over.apply_move_at(pos(3, 0), pos(2, 1), at(3)), over);
        assert_eq!(over.undo_at(at(3)), over);
    }

    #[test]
    fn both_sides_stuck_is_a_draw() {
        let start = board("1r1r4/r1r5/8/2b5/3r4/8/8/b7");
        let state = GameState::from_board_at(start, Player::Red, two_humans(), at(0));
        let over = click_move(&state, pos(4, 3), pos(2, 1), at(1));
        assert_eq!(over.outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn ai_turn_follows_a_human_move() {
        let state = GameState::new_game_at(GameConfig::default(), at(0));
        let waiting = click_move(&state, pos(5, 0), pos(4, 1), at(5));

        let ticket = waiting.ai_ticket().expect("AI should be on move");
        assert_eq!(ticket.player(), Player::Black);
        assert_eq!(ticket.generation(), waiting.generation());
        assert!(waiting.is_ai_thinking());

        // Input while thinking is ignored.
        assert_eq!(waiting.select_tile_at(pos(5, 2), at(5)), waiting);
        assert_eq!(waiting.restart_at(at(5)), waiting);
        assert_eq!(waiting.set_difficulty(Difficulty::Advanced), waiting);

        let replied = waiting.run_ai_turn_at(ticket, at(6));
        assert_eq!(replied.current_player, Player::Red);
        assert_eq!(replied.phase, Phase::Selecting);
        assert_eq!(replied.history.len(), 2);
        assert_eq!(replied.history[1].mover, Player::Black);
        assert_eq!(replied.board.count(Player::Black), 12);

        assert_eq!(replied.clocks.accumulated(Player::Red), TimeDelta::seconds(5));
        assert_eq!(replied.clocks.accumulated(Player::Black), TimeDelta::seconds(1));
        assert_eq!(replied.clocks.turn_started_at, at(6));

        // The same ticket cannot be played twice.
        assert_eq!(replied.run_ai_turn_at(ticket, at(7)), replied);
    }

    #[test]
    fn tickets_from_an_older_game_are_discarded() {
        let old = click_move(
            &GameState::new_game_at(GameConfig::default(), at(0)),
            pos(5, 0),
            pos(4, 1),
            at(1),
        );
        let stale = old.ai_ticket().expect("AI should be on move");

        let fresh = click_move(
            &GameState::new_game_at(GameConfig::default(), at(2)),
            pos(5, 0),
            pos(4, 1),
            at(3),
        );
        assert_ne!(fresh.generation(), old.generation());
        assert!(fresh.is_ai_thinking());

        assert_eq!(fresh.run_ai_turn_at(stale, at(4)), fresh);
        assert_eq!(fresh.commit_ai_move_at(stale, None, at(4)), fresh);
    }

    #[test]
    fn restart_issues_a_new_generation() {
        let state = GameState::new_game_at(two_humans(), at(0));
        let moved = click_move(&state, pos(5, 0), pos(4, 1), at(1));
        let restarted = moved.restart_at(at(2));
        assert_ne!(restarted.generation(), moved.generation());
        assert_eq!(restarted.board, Board::starting());
        assert_eq!(restarted.config, moved.config);
    }

    #[test]
    fn ai_without_moves_loses() {
        let start = board("8/8/1b6/r7/1r1r4/8/8/8");
        let mut waiting = click_move(
            &GameState::from_board_at(start, Player::Red, GameConfig::default(), at(0)),
            pos(4, 3),
            pos(3, 4),
            at(1),
        );
        let ticket = waiting.ai_ticket().expect("Black can still move");

        // Position changed underneath the scheduled turn: Black is now stuck.
        waiting.board = board("8/8/1b6/r1r5/3r4/8/8/8");
        let over = waiting.run_ai_turn_at(ticket, at(2));
        assert_eq!(over.outcome(), Some(Outcome::Winner(Player::Red)));
    }

    #[test]
    fn illegal_ai_moves_are_rejected() {
        let waiting = click_move(
            &GameState::new_game_at(GameConfig::default(), at(0)),
            pos(5, 0),
            pos(4, 1),
            at(1),
        );
        let ticket = waiting.ai_ticket().expect("AI should be on move");
        let bogus = Move::simple(pos(0, 1), pos(1, 0));
        assert_eq!(waiting.commit_ai_move_at(ticket, Some(bogus), at(2)), waiting);
    }

    #[test]
    fn undo_restores_the_position_before_the_human_move() {
        let state = GameState::new_game_at(beginner_vs_ai(), at(0));
        assert_eq!(state.undo_blocked(), Some(UndoBlocked::NotEnoughHistory));

        let human_move = Move::simple(pos(5, 0), pos(4, 1));
        let waiting = click_move(&state, human_move.from, human_move.to, at(1));
        assert_eq!(waiting.undo_blocked(), Some(UndoBlocked::AiThinking));
        assert_eq!(waiting.undo_at(at(1)), waiting);

        let ticket = waiting.ai_ticket().expect("AI should be on move");
        let replied = waiting.run_ai_turn_at(ticket, at(2));
        assert!(replied.can_undo());

        let undone = replied.undo_at(at(3));
        assert_eq!(undone.board, Board::starting());
        assert!(undone.history.is_empty());
        assert_eq!(undone.current_player, Player::Red);
        assert_eq!(undone.phase, Phase::Selecting);
        assert_eq!(undone.last_undone, Some(human_move));
        assert_eq!(undone.scores, player_scores(&Board::starting()));
        assert_eq!(undone.clocks.turn_started_at, at(3));
    }

    #[test]
    fn undo_requires_beginner_difficulty() {
        let state = GameState::new_game_at(two_humans(), at(0));
        let two_moves = click_move(
            &click_move(&state, pos(5, 0), pos(4, 1), at(1)),
            pos(2, 1),
            pos(3, 2),
            at(2),
        );
        assert_eq!(two_moves.history.len(), 2);
        assert_eq!(two_moves.undo_blocked(), Some(UndoBlocked::NotBeginner));
        assert_eq!(two_moves.undo_at(at(3)), two_moves);

        let beginner = two_moves.set_difficulty(Difficulty::Beginner);
        assert!(beginner.undo_at(at(3)).history.is_empty());
    }

    #[test]
    fn random_playouts_preserve_invariants() {
        let mut rng = StdRng::seed_from_u64(2024);

        for game in 0..8 {
            let mut state = GameState::new_game_at(two_humans(), at(0));
            let mut tick = 0i64;

            for _ in 0..200 {
                if state.is_game_over() {
                    break;
                }
                let mover = state.current_player;
                let moves = all_legal_moves(&state.board, mover);
                let mv = *moves
                    .as_slice()
                    .choose(&mut rng)
                    .expect("a side with no moves ends the game");
                let moved_piece = state.board.piece_at(mv.from).expect("mover owns from");

                tick += 1;
                let next = click_move(&state, mv.from, mv.to, at(tick));

                assert_eq!(next.current_player, mover.opposite(), "game {game}");
                assert_eq!(next.history.len(), state.history.len() + 1);
                for (square, _) in next.board.pieces() {
                    assert!(square.is_dark());
                }
                let landed = next.board.piece_at(mv.to).expect("piece landed");
                if moved_piece.is_king {
                    assert!(landed.is_king, "kings never revert");
                }
                if let Some(captured) = mv.captured {
                    assert!(next.board.is_empty_at(captured));
                }
                for player in Player::ALL {
                    let king_captured = mv
                        .captured
                        .and_then(|square| state.board.piece_at(square))
                        .is_some_and(|victim| victim.color == player && victim.is_king);
                    assert!(
                        next.board.king_count(player) + usize::from(king_captured)
                            >= state.board.king_count(player),
                        "{player} lost a king without it being captured (game {game})"
                    );
                }

                state = next;
            }

            if let Some(outcome) = state.outcome() {
                let stuck = state.current_player;
                assert!(!has_any_legal_move(&state.board, stuck));
                match outcome {
                    Outcome::Winner(winner) => assert_eq!(winner, stuck.opposite()),
                    Outcome::Draw => assert!(!has_any_legal_move(&state.board, stuck.opposite())),
                }
            }
        }
    }
}
