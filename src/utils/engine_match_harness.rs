//! Minimal head-to-head engine match harness for local testing.
//!
//! This module runs two `Engine` implementations against each other on a bare
//! `Board`, with an optional seeded random opening prefix so a series of games
//! does not replay the same deterministic line.

use rand::prelude::IndexedRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;
use tracing::{debug, info};

use crate::engines::engine_trait::Engine;
use crate::errors::{DraughtsError, DraughtsResult};
use crate::game_state::board::Board;
use crate::game_state::draughts_types::Player;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::{all_legal_moves, has_any_legal_move};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    RedWin,
    BlackWin,
    /// Both sides stuck at once.
    DrawBlocked,
    DrawMaxPlies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWin { player: PlayerId, color: Player },
    DrawBlocked,
    DrawMaxPlies,
}

#[derive(Debug, Clone, Copy)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            opening_min_plies: 2,
            opening_max_plies: 6,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_board: Board,
    pub opening_moves: Vec<String>,
    pub played_moves: Vec<String>,
    pub red_move_count: u32,
    pub black_move_count: u32,
    pub red_total_time_ns: u128,
    pub black_total_time_ns: u128,
}

#[derive(Debug, Clone, Copy)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 9,
            base_seed: 0,
            per_game: MatchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_move_time_ms: f64,
    pub player2_avg_move_time_ms: f64,
    pub overall_avg_move_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3} overall_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.player1_avg_move_time_ms,
            self.player2_avg_move_time_ms,
            self.overall_avg_move_time_ms
        )
    }
}

/// Play a single seeded engine-vs-engine match from the starting position.
///
/// `engine_red` moves first.
pub fn play_engine_match(
    mut engine_red: Box<dyn Engine>,
    mut engine_black: Box<dyn Engine>,
    seed: u64,
    config: MatchConfig,
) -> DraughtsResult<MatchResult> {
    play_engine_match_internal(
        Board::starting(),
        Player::Red,
        &mut engine_red,
        &mut engine_black,
        seed,
        config,
        true,
    )
}

/// Play a match from a caller-provided position without random opening plies.
pub fn play_engine_match_from_board(
    mut engine_red: Box<dyn Engine>,
    mut engine_black: Box<dyn Engine>,
    start: Board,
    to_move: Player,
    config: MatchConfig,
) -> DraughtsResult<MatchResult> {
    play_engine_match_internal(
        start,
        to_move,
        &mut engine_red,
        &mut engine_black,
        0,
        config,
        false,
    )
}

fn play_engine_match_internal(
    mut board: Board,
    mut to_move: Player,
    engine_red: &mut Box<dyn Engine>,
    engine_black: &mut Box<dyn Engine>,
    seed: u64,
    config: MatchConfig,
    apply_random_opening: bool,
) -> DraughtsResult<MatchResult> {
    let opening_moves = if apply_random_opening {
        let (after_opening, next_to_move, opening_moves) = apply_seeded_random_opening(
            board,
            to_move,
            seed,
            config.opening_min_plies,
            config.opening_max_plies,
        )?;
        board = after_opening;
        to_move = next_to_move;
        opening_moves
    } else {
        Vec::new()
    };

    let mut result = MatchResult {
        outcome: MatchOutcome::DrawMaxPlies,
        final_board: board,
        opening_moves,
        played_moves: Vec::new(),
        red_move_count: 0,
        black_move_count: 0,
        red_total_time_ns: 0,
        black_total_time_ns: 0,
    };

    for _ in 0..config.max_plies {
        let legal_moves = all_legal_moves(&board, to_move);
        if legal_moves.is_empty() {
            result.outcome = if has_any_legal_move(&board, to_move.opposite()) {
                match to_move {
                    Player::Red => MatchOutcome::BlackWin,
                    Player::Black => MatchOutcome::RedWin,
                }
            } else {
                MatchOutcome::DrawBlocked
            };
            result.final_board = board;
            return Ok(result);
        }

        let engine = match to_move {
            Player::Red => &mut *engine_red,
            Player::Black => &mut *engine_black,
        };
        let started = Instant::now();
        let out = engine.choose_move(&board, to_move)?;
        let elapsed_ns = started.elapsed().as_nanos();

        match to_move {
            Player::Red => {
                result.red_move_count = result.red_move_count.saturating_add(1);
                result.red_total_time_ns = result.red_total_time_ns.saturating_add(elapsed_ns);
            }
            Player::Black => {
                result.black_move_count = result.black_move_count.saturating_add(1);
                result.black_total_time_ns = result.black_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        let chosen = match out.best_move {
            Some(mv) if legal_moves.contains(&mv) => mv,
            other => {
                return Err(DraughtsError::IllegalEngineMove {
                    engine: engine.name().to_owned(),
                    mv: other.map_or_else(|| "none".to_owned(), |mv| mv.to_string()),
                })
            }
        };

        result.played_moves.push(chosen.to_string());
        board = apply_move(&board, &chosen)?;
        to_move = to_move.opposite();
    }

    result.final_board = board;
    Ok(result)
}

/// Play a series of matches and aggregate win/loss/draw statistics.
///
/// Player colors are randomized each game (deterministic from `base_seed`).
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: MatchSeriesConfig,
) -> DraughtsResult<MatchSeriesStats>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut color_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);

    for i in 0..config.games {
        let player1_is_red = color_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));
        debug!(game = i + 1, games = config.games, seed, player1_is_red, "series game");

        let result = if player1_is_red {
            play_engine_match(player1_factory(), player2_factory(), seed, config.per_game)?
        } else {
            play_engine_match(player2_factory(), player1_factory(), seed, config.per_game)?
        };

        let (p1_moves, p1_ns, p2_moves, p2_ns) = if player1_is_red {
            (
                result.red_move_count,
                result.red_total_time_ns,
                result.black_move_count,
                result.black_total_time_ns,
            )
        } else {
            (
                result.black_move_count,
                result.black_total_time_ns,
                result.red_move_count,
                result.red_total_time_ns,
            )
        };
        stats.player1_moves = stats.player1_moves.saturating_add(p1_moves);
        stats.player2_moves = stats.player2_moves.saturating_add(p2_moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_ns);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_ns);

        let winner_color = match result.outcome {
            MatchOutcome::RedWin => Some(Player::Red),
            MatchOutcome::BlackWin => Some(Player::Black),
            MatchOutcome::DrawBlocked | MatchOutcome::DrawMaxPlies => None,
        };
        let mapped = match winner_color {
            Some(color) => {
                let player = if (color == Player::Red) == player1_is_red {
                    stats.player1_wins += 1;
                    PlayerId::Player1
                } else {
                    stats.player2_wins += 1;
                    PlayerId::Player2
                };
                SeriesOutcome::PlayerWin { player, color }
            }
            None => {
                stats.draws += 1;
                if result.outcome == MatchOutcome::DrawBlocked {
                    SeriesOutcome::DrawBlocked
                } else {
                    SeriesOutcome::DrawMaxPlies
                }
            }
        };
        stats.outcomes.push(mapped);

        info!(
            game = i + 1,
            games = config.games,
            result = ?mapped,
            p1_wins = stats.player1_wins,
            p2_wins = stats.player2_wins,
            draws = stats.draws,
            "series game finished"
        );
    }

    stats.player1_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player1_total_time_ns, stats.player1_moves);
    stats.player2_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player2_total_time_ns, stats.player2_moves);

    let total_ns = stats
        .player1_total_time_ns
        .saturating_add(stats.player2_total_time_ns);
    let total_moves = stats.player1_moves.saturating_add(stats.player2_moves);
    stats.overall_avg_move_time_ms = avg_ns_per_move_ms(total_ns, total_moves);

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}

fn apply_seeded_random_opening(
    mut board: Board,
    mut to_move: Player,
    seed: u64,
    min_plies: u8,
    max_plies: u8,
) -> DraughtsResult<(Board, Player, Vec<String>)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut opening_moves = Vec::<String>::new();

    let low = min_plies.min(max_plies);
    let high = max_plies.max(min_plies);
    let target_plies = if low == high {
        low
    } else {
        rng.random_range(low..=high)
    };

    for _ in 0..target_plies {
        let legal_moves = all_legal_moves(&board, to_move);
        let Some(chosen) = legal_moves.as_slice().choose(&mut rng).copied() else {
            break;
        };

        opening_moves.push(chosen.to_string());
        board = apply_move(&board, &chosen)?;
        to_move = to_move.opposite();
    }

    Ok((board, to_move, opening_moves))
}
