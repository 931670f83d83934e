//! Tick-driven round timer.
//!
//! The timer does not own a clock. The driver delivers periodic ticks and the
//! timer accumulates a fixed step per tick while running, stopping itself as
//! soon as every question in the round has an answer.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::RoundState;

/// Default tick granularity.
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// Lifecycle of the timer within one round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Waiting for the first interaction with the game surface.
    #[default]
    Idle,
    /// Accumulating time on every tick.
    Running,
    /// The round is over. Terminal until the timer is replaced.
    Stopped,
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerState::Idle => write!(f, "idle"),
            TimerState::Running => write!(f, "running"),
            TimerState::Stopped => write!(f, "stopped"),
        }
    }
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running; nothing changed.
    Ignored,
    /// Time was added and the round continues.
    Running,
    /// Time was added and the round just ended.
    Stopped,
}

/// Idle → Running → Stopped state machine for one round.
#[derive(Debug, Clone)]
pub struct RoundTimer {
    state: TimerState,
    tick: Duration,
}

impl Default for RoundTimer {
    fn default() -> Self {
        Self::new(DEFAULT_TICK)
    }
}

impl RoundTimer {
    pub fn new(tick: Duration) -> Self {
        Self {
            state: TimerState::Idle,
            tick,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// First interaction: move from `Idle` to `Running` and zero the round's
    /// times. Returns `false` if the timer had already started.
    pub fn start(&mut self, round: &mut RoundState) -> bool {
        if self.state != TimerState::Idle {
            return false;
        }
        round.reset_times();
        self.state = TimerState::Running;
        tracing::debug!(questions = round.question_amount, "timer running");
        true
    }

    /// Add one step of play time, then check whether the round is over.
    pub fn tick(&mut self, round: &mut RoundState) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Ignored;
        }
        round.time_played_secs += self.tick.as_secs_f64();
        if self.check_termination(round) {
            TickOutcome::Stopped
        } else {
            TickOutcome::Running
        }
    }

    /// Stop the timer if it is running and every question has an answer.
    /// Returns `true` only on the transition into `Stopped`.
    pub fn check_termination(&mut self, round: &RoundState) -> bool {
        if self.is_running() && round.is_complete() {
            self.state = TimerState::Stopped;
            tracing::debug!(
                questions = round.question_amount,
                time_played = round.time_played_secs,
                "timer stopped"
            );
            return true;
        }
        false
    }
}
