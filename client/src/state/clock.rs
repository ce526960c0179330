//! Per-player game clocks.
//!
//! DESIGN
//! ======
//! The server sends a time base (game duration plus time used by each
//! player). Between updates the player to move loses the wall-clock time
//! since that base arrived. All thresholds are compared as whole seconds;
//! only rendering produces the `MM:SS` form.
//!
//! A clock goes `Normal -> RunningOut` once two minutes or less remain and
//! never goes back. It blinks during the last thirty seconds while its
//! player is to move, and stops blinking when overtime starts.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use serde::Deserialize;

/// At or below this many seconds a clock is running out.
pub const RUNNING_OUT_SECS: i64 = 120;
/// At or below this many seconds the clock of the player to move blinks.
pub const BLINK_SECS: i64 = 30;
/// Refresh cadence of the clock display.
pub const TICK_MS: u32 = 500;
/// Overtime is not counted beyond this many seconds.
pub const MAX_OVERTIME_SECS: i64 = 10 * 60;
/// Points lost for each started minute of overtime.
pub const PENALTY_PER_MINUTE: i32 = 10;

/// Time base as sent by the server.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TimeInfo {
    /// Total thinking time per player, in minutes.
    pub duration: f64,
    /// Seconds used so far by each player.
    pub elapsed: [f64; 2],
}

#[allow(clippy::cast_possible_truncation)]
fn to_ms(seconds: f64) -> i64 {
    (seconds * 1000.0).round() as i64
}

/// Render whole seconds as `MM:SS`, with a leading `-` in overtime.
#[must_use]
pub fn format_clock(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let abs = seconds.unsigned_abs();
    format!("{sign}{:02}:{:02}", abs / 60, abs % 60)
}

/// Score adjustment for a clock showing `seconds` remaining.
#[must_use]
pub fn overtime_penalty(seconds: i64) -> i32 {
    if seconds >= 0 {
        return 0;
    }
    let minutes = seconds.unsigned_abs().div_ceil(60);
    i32::try_from(minutes).map_or(i32::MIN, |m| m.saturating_mul(-PENALTY_PER_MINUTE))
}

/// Visual urgency of one clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClockPhase {
    #[default]
    Normal,
    RunningOut,
    Blinking,
}

/// Display state of one player's clock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerClock {
    player: u8,
    remaining: i64,
    running_out: bool,
    blinking: bool,
}

impl PlayerClock {
    #[must_use]
    pub fn new(player: u8) -> Self {
        Self { player, remaining: 0, running_out: false, blinking: false }
    }

    /// Show `remaining` seconds. `to_move` is whether this clock's player has the turn.
    pub fn set_time(&mut self, remaining: i64, to_move: bool) {
        self.remaining = remaining;
        if remaining <= RUNNING_OUT_SECS && !self.running_out {
            log::debug!("clock {} is running out", self.player);
            self.running_out = true;
        }
        self.blinking = self.running_out && (0..=BLINK_SECS).contains(&remaining) && to_move;
    }

    /// Turn blinking off without touching the time.
    pub fn stop_blinking(&mut self) {
        self.blinking = false;
    }

    #[must_use]
    pub fn player(&self) -> u8 {
        self.player
    }

    #[must_use]
    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    #[must_use]
    pub fn text(&self) -> String {
        format_clock(self.remaining)
    }

    #[must_use]
    pub fn running_out(&self) -> bool {
        self.running_out
    }

    #[must_use]
    pub fn blinking(&self) -> bool {
        self.blinking
    }

    #[must_use]
    pub fn phase(&self) -> ClockPhase {
        if self.blinking {
            ClockPhase::Blinking
        } else if self.running_out {
            ClockPhase::RunningOut
        } else {
            ClockPhase::Normal
        }
    }

    #[must_use]
    pub fn in_overtime(&self) -> bool {
        self.remaining < 0
    }
}

/// Both clocks of a timed game plus the server time base.
#[derive(Clone, Debug)]
pub struct GameClock {
    info: TimeInfo,
    /// Wall-clock milliseconds when `info` arrived.
    base_ms: i64,
    to_move: Option<u8>,
    over: bool,
    clocks: [PlayerClock; 2],
}

impl GameClock {
    #[must_use]
    pub fn new(info: TimeInfo, to_move: Option<u8>, now_ms: i64) -> Self {
        let mut clock = Self {
            info,
            base_ms: now_ms,
            to_move,
            over: false,
            clocks: [PlayerClock::new(0), PlayerClock::new(1)],
        };
        clock.tick(now_ms);
        clock
    }

    /// Take a new time base from the server.
    ///
    /// Once `over` is set the clocks freeze and stop blinking; later ticks
    /// are ignored.
    pub fn reset(&mut self, info: TimeInfo, to_move: Option<u8>, over: bool, now_ms: i64) {
        self.info = info;
        self.base_ms = now_ms;
        self.to_move = to_move;
        self.tick(now_ms);
        if over {
            self.stop();
        }
    }

    /// Freeze both clocks for good.
    pub fn stop(&mut self) {
        if !self.over {
            log::debug!("game over, clocks stopped");
        }
        self.over = true;
        for clock in &mut self.clocks {
            clock.stop_blinking();
        }
    }

    /// Recompute both clocks for `now_ms`.
    pub fn tick(&mut self, now_ms: i64) {
        if self.over {
            return;
        }
        for player in 0..2u8 {
            let remaining = self.remaining(player, now_ms);
            let to_move = self.to_move == Some(player);
            self.clocks[usize::from(player)].set_time(remaining, to_move);
        }
    }

    /// Whole seconds left for `player` at `now_ms`, negative in overtime.
    #[must_use]
    pub fn remaining(&self, player: u8, now_ms: i64) -> i64 {
        let index = usize::from(player.min(1));
        let mut used_ms = to_ms(self.info.elapsed[index]);
        if !self.over && self.to_move == Some(player) {
            used_ms += (now_ms - self.base_ms).max(0);
        }
        let left_ms = (to_ms(self.info.duration * 60.0) - used_ms).max(-MAX_OVERTIME_SECS * 1000);
        left_ms / 1000
    }

    /// Whether the periodic tick should keep running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.over
    }

    #[must_use]
    pub fn clock(&self, player: u8) -> &PlayerClock {
        &self.clocks[usize::from(player.min(1))]
    }

    /// Current overtime penalty of each player.
    #[must_use]
    pub fn penalties(&self) -> [i32; 2] {
        [overtime_penalty(self.clocks[0].remaining), overtime_penalty(self.clocks[1].remaining)]
    }
}
