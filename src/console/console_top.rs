//! Line-oriented console front-end and command loop.
//!
//! Parses one command per line, drives the `GameState` controller and prints
//! the board after every transition. AI turns are played synchronously: the
//! loop waits the configured think time, then commits the AI move through its
//! ticket so a stale turn can never land on a newer game.

use std::io::{self, BufRead, Write};
use std::thread;

use tracing::{debug, warn};

use crate::errors::{DraughtsError, DraughtsResult};
use crate::game_state::draughts_types::{Difficulty, Player, Position};
use crate::game_state::game_config::GameConfig;
use crate::game_state::game_state::{GameState, Phase};
use crate::move_generation::legal_move_generator::all_legal_moves;
use crate::utils::render_board::render_board;

const HELP_TEXT: &str = "\
commands:
  new [level]          start a new game (optionally at beginner/intermediate/advanced)
  board                show the board
  select <r> <c>       click a square: select a piece or move the selected one
  move <r> <c> <r> <c> move a piece
  undo                 take back your last move and the reply (beginner only)
  level <level>        change the AI difficulty
  moves                list legal moves (for the selected piece if any)
  score                show material / power / strategy subtotals
  clock                show time used by each side
  help                 show this text
  quit                 leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    New(Option<Difficulty>),
    Board,
    Select(Position),
    Move { from: Position, to: Position },
    Undo,
    Level(Difficulty),
    Moves,
    Score,
    Clock,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> DraughtsResult<Command> {
    let mut parts = line.split_whitespace();
    let cmd = parts.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();

    let command = match (cmd.as_str(), args.as_slice()) {
        ("new", []) => Command::New(None),
        ("new", [level]) => Command::New(Some(level.parse()?)),
        ("board", []) => Command::Board,
        ("select", [row, col]) => Command::Select(parse_position(row, col)?),
        ("move", [r1, c1, r2, c2]) => Command::Move {
            from: parse_position(r1, c1)?,
            to: parse_position(r2, c2)?,
        },
        ("undo", []) => Command::Undo,
        ("level", [level]) => Command::Level(level.parse()?),
        ("moves", []) => Command::Moves,
        ("score", []) => Command::Score,
        ("clock", []) => Command::Clock,
        ("help", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        _ => return Err(DraughtsError::InvalidCommand(line.trim().to_owned())),
    };
    Ok(command)
}

fn parse_position(row: &str, col: &str) -> DraughtsResult<Position> {
    let parse = |s: &str| {
        s.parse::<i32>()
            .map_err(|_| DraughtsError::InvalidCommand(format!("'{s}' is not a coordinate")))
    };
    Position::new(parse(row)?, parse(col)?)
}

pub fn run_stdio_loop(config: GameConfig) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = ConsoleSession::new(config);

    session.play_ai_turns(&mut stdout)?;
    session.print_board(&mut stdout)?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = session.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

pub struct ConsoleSession {
    state: GameState,
}

impl ConsoleSession {
    pub fn new(config: GameConfig) -> Self {
        Self {
            state: GameState::new_game(config),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns `Ok(true)` when the session should end.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        if line.trim().is_empty() {
            return Ok(false);
        }

        let command = match parse_command(line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "error: {err}")?;
                writeln!(out, "type 'help' for the list of commands")?;
                return Ok(false);
            }
        };
        debug!(?command, "console command");

        if matches!(
            command,
            Command::New(_) | Command::Select(_) | Command::Move { .. }
        ) {
            // Pending AI turns run before any human input.
            self.play_ai_turns(out)?;
        }

        match command {
            Command::New(level) => {
                let mut config = self.state.config;
                if let Some(difficulty) = level {
                    config.difficulty = difficulty;
                }
                if self.state.is_ai_thinking() {
                    writeln!(out, "the AI is thinking")?;
                } else {
                    self.state = GameState::new_game(config);
                    self.play_ai_turns(out)?;
                    self.print_board(out)?;
                }
            }
            Command::Board => self.print_board(out)?,
            Command::Select(pos) => {
                self.state = self.state.select_tile(pos);
                self.after_human_input(out)?;
            }
            Command::Move { from, to } => {
                let before = self.state.history.len();
                self.state = self.state.deselect().select_tile(from).apply_move(from, to);
                if self.state.history.len() == before {
                    writeln!(out, "illegal move {from} -> {to}")?;
                }
                self.after_human_input(out)?;
            }
            Command::Undo => match self.state.undo_blocked() {
                Some(reason) => writeln!(out, "{reason}")?,
                None => {
                    self.state = self.state.undo();
                    self.print_board(out)?;
                }
            },
            Command::Level(difficulty) => {
                self.state = self.state.set_difficulty(difficulty);
                writeln!(out, "difficulty: {}", self.state.config.difficulty)?;
            }
            Command::Moves => self.print_moves(out)?,
            Command::Score => self.print_scores(out)?,
            Command::Clock => self.print_clocks(out)?,
            Command::Help => writeln!(out, "{HELP_TEXT}")?,
            Command::Quit => return Ok(true),
        }

        Ok(false)
    }

    fn after_human_input(&mut self, out: &mut impl Write) -> io::Result<()> {
        if let Some(selected) = self.state.selected_position() {
            let targets: Vec<String> = self
                .state
                .legal_moves_for_selection()
                .iter()
                .map(|mv| mv.to.to_string())
                .collect();
            writeln!(out, "selected {selected}; targets: {}", join_or_none(&targets))?;
            return Ok(());
        }

        self.play_ai_turns(out)?;
        self.print_board(out)
    }

    /// Plays every pending AI turn after the think-time pause. Stops early if
    /// the AI fails to make progress.
    pub fn play_ai_turns(&mut self, out: &mut impl Write) -> io::Result<()> {
        while let Some(ticket) = self.state.ai_ticket() {
            writeln!(out, "{} is thinking...", ticket.player())?;
            out.flush()?;
            thread::sleep(self.state.config.think_time);

            let next = self.state.run_ai_turn(ticket);
            if next == self.state {
                warn!(?ticket, "AI turn made no progress");
                writeln!(out, "the AI could not move")?;
                break;
            }
            if next.history.len() > self.state.history.len() {
                if let Some(last) = next.history.last() {
                    writeln!(out, "{} plays {}", last.mover, last.mv)?;
                }
            }
            self.state = next;
        }
        Ok(())
    }

    fn print_board(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", render_board(&self.state.board))?;
        if let Some(undone) = self.state.last_undone {
            writeln!(out, "undone: {undone}")?;
        }
        match &self.state.phase {
            Phase::GameOver { outcome } => writeln!(out, "game over: {outcome}"),
            Phase::AiThinking { ticket } => writeln!(out, "{} is thinking", ticket.player()),
            Phase::Selecting | Phase::PendingMove { .. } => {
                writeln!(out, "{} to move", self.state.current_player)
            }
        }
    }

    fn print_moves(&self, out: &mut impl Write) -> io::Result<()> {
        let moves = if self.state.selected_position().is_some() {
            self.state.legal_moves_for_selection().to_vec()
        } else if self.state.is_game_over() {
            Vec::new()
        } else {
            all_legal_moves(&self.state.board, self.state.current_player)
        };
        let listed: Vec<String> = moves.iter().map(ToString::to_string).collect();
        writeln!(out, "moves: {}", join_or_none(&listed))
    }

    fn print_scores(&self, out: &mut impl Write) -> io::Result<()> {
        for player in Player::ALL {
            let s = self.state.scores.for_player(player);
            writeln!(
                out,
                "{player}: material={:.1} power={:.1} strategy={:.1} total={:.1}",
                s.material,
                s.power,
                s.strategy,
                s.total()
            )?;
        }
        Ok(())
    }

    fn print_clocks(&self, out: &mut impl Write) -> io::Result<()> {
        let now = chrono::Utc::now();
        for player in Player::ALL {
            let elapsed = self.state.clocks.elapsed_at(player, now);
            writeln!(
                out,
                "{player}: {}:{:02}",
                elapsed.num_minutes(),
                elapsed.num_seconds() % 60
            )?;
        }
        Ok(())
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_owned()
    } else {
        items.join(" ")
    }
}
