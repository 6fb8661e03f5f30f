//! Per-player thinking time.
//!
//! Time is credited to a player only when their turn ends; nothing ticks in
//! the background. Presentation layers call `elapsed_at` to show a live value.

use chrono::{DateTime, TimeDelta, Utc};

use crate::game_state::draughts_types::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clocks {
    pub turn_started_at: DateTime<Utc>,
    accumulated: [TimeDelta; 2],
    running: Option<Player>,
}

impl Clocks {
    pub fn start(player: Player, now: DateTime<Utc>) -> Self {
        Self {
            turn_started_at: now,
            accumulated: [TimeDelta::zero(); 2],
            running: Some(player),
        }
    }

    /// Credits the running player's turn and starts `next`'s.
    pub fn switch_turn(&mut self, next: Player, now: DateTime<Utc>) {
        self.credit_running(now);
        self.turn_started_at = now;
        self.running = Some(next);
    }

    /// Credits the running player's turn and stops all clocks.
    pub fn stop(&mut self, now: DateTime<Utc>) {
        self.credit_running(now);
        self.turn_started_at = now;
        self.running = None;
    }

    #[inline]
    pub fn running(&self) -> Option<Player> {
        self.running
    }

    /// Time credited to `player` at the end of their completed turns.
    #[inline]
    pub fn accumulated(&self, player: Player) -> TimeDelta {
        self.accumulated[player.index()]
    }

    /// Accumulated time plus the current turn if `player` is on move.
    pub fn elapsed_at(&self, player: Player, now: DateTime<Utc>) -> TimeDelta {
        let accumulated = self.accumulated(player);
        if self.running == Some(player) {
            accumulated + turn_length(self.turn_started_at, now)
        } else {
            accumulated
        }
    }

    fn credit_running(&mut self, now: DateTime<Utc>) {
        if let Some(player) = self.running {
            let slot = &mut self.accumulated[player.index()];
            *slot = *slot + turn_length(self.turn_started_at, now);
        }
    }
}

/// Never negative, even if the wall clock stepped backwards.
#[inline]
fn turn_length(started: DateTime<Utc>, now: DateTime<Utc>) -> TimeDelta {
    (now - started).max(TimeDelta::zero())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).expect("valid timestamp")
    }

    #[test]
    fn credits_time_only_when_turn_ends() {
        let mut clocks = Clocks::start(Player::Red, at(0));
        assert_eq!(clocks.accumulated(Player::Red), TimeDelta::zero());
        assert_eq!(clocks.elapsed_at(Player::Red, at(4)), TimeDelta::seconds(4));

        clocks.switch_turn(Player::Black, at(5));
        assert_eq!(clocks.accumulated(Player::Red), TimeDelta::seconds(5));
        assert_eq!(clocks.turn_started_at, at(5));
        assert_eq!(clocks.elapsed_at(Player::Red, at(9)), TimeDelta::seconds(5));
        assert_eq!(clocks.elapsed_at(Player::Black, at(9)), TimeDelta::seconds(4));

        clocks.switch_turn(Player::Red, at(12));
        assert_eq!(clocks.accumulated(Player::Black), TimeDelta::seconds(7));
    }

    #[test]
    fn stop_freezes_both_clocks() {
        let mut clocks = Clocks::start(Player::Red, at(0));
        clocks.stop(at(3));
        assert_eq!(clocks.running(), None);
        assert_eq!(clocks.elapsed_at(Player::Red, at(100)), TimeDelta::seconds(3));
        assert_eq!(clocks.elapsed_at(Player::Black, at(100)), TimeDelta::zero());
    }

    #[test]
    fn backwards_wall_clock_never_subtracts() {
        let mut clocks = Clocks::start(Player::Red, at(10));
        clocks.switch_turn(Player::Black, at(5));
        assert_eq!(clocks.accumulated(Player::Red), TimeDelta::zero());
    }
}
