//! Countdown state and its transitions
//!
//! Everything here is synchronous and free of scheduling; the driver in
//! [`crate::tasks::countdown`] calls into it once per tick and once per
//! control command.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::TimerError;

/// Nominal real-time length of one tick
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Immutable configuration for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    duration_seconds: u64,
    tick_interval: Duration,
}

impl TimerConfig {
    /// Configure a countdown of `duration_seconds` ticks
    pub fn new(duration_seconds: u64) -> Result<Self, TimerError> {
        if duration_seconds == 0 {
            return Err(TimerError::InvalidConfiguration(
                "duration must be at least one second".to_string(),
            ));
        }
        Ok(Self {
            duration_seconds,
            tick_interval: DEFAULT_TICK_INTERVAL,
        })
    }

    /// Configure a countdown of whole minutes
    pub fn from_minutes(minutes: u64) -> Result<Self, TimerError> {
        let seconds = minutes.checked_mul(60).ok_or_else(|| {
            TimerError::InvalidConfiguration(format!("{} minutes overflows the timer", minutes))
        })?;
        Self::new(seconds)
    }

    /// Override the real-time spacing between ticks
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Result<Self, TimerError> {
        if tick_interval.is_zero() {
            return Err(TimerError::InvalidConfiguration(
                "tick interval must be non-zero".to_string(),
            ));
        }
        self.tick_interval = tick_interval;
        Ok(self)
    }

    /// Take the tick interval of an already validated configuration
    pub fn inherit_tick_interval(mut self, from: &TimerConfig) -> Self {
        self.tick_interval = from.tick_interval;
        self
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

/// Where the countdown is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No run in progress; elapsed is zero
    Idle,
    /// Ticking once per interval
    Running,
    /// Run suspended by the caller; elapsed is retained
    Paused,
}

/// Snapshot reported to progress observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub elapsed_seconds: u64,
    pub remaining_seconds: u64,
    pub percent_complete: u8,
    pub duration_seconds: u64,
}

impl Progress {
    fn compute(elapsed_seconds: u64, duration_seconds: u64) -> Self {
        Self {
            elapsed_seconds,
            remaining_seconds: duration_seconds.saturating_sub(elapsed_seconds),
            percent_complete: percent_complete(elapsed_seconds, duration_seconds),
            duration_seconds,
        }
    }
}

/// `round(elapsed / duration * 100)` clamped to `0..=100`, rounding halves up
pub fn percent_complete(elapsed_seconds: u64, duration_seconds: u64) -> u8 {
    if duration_seconds == 0 {
        return 100;
    }
    let elapsed = u128::from(elapsed_seconds.min(duration_seconds));
    let duration = u128::from(duration_seconds);
    ((elapsed * 200 + duration) / (duration * 2)).min(100) as u8
}

/// Result of advancing a running countdown by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The run continues
    Progress(Progress),
    /// This tick reached the duration; the state is back to idle
    Completed(Progress),
}

impl TickOutcome {
    pub fn progress(&self) -> Progress {
        match self {
            TickOutcome::Progress(p) | TickOutcome::Completed(p) => *p,
        }
    }
}

/// What a control operation did to the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A new run began at zero
    Started,
    /// A paused run continues from its retained position
    Resumed,
    Paused,
    Stopped,
    /// The request matched the current phase
    Unchanged,
}

impl Transition {
    /// Whether the tick schedule must be (re)created
    pub fn needs_schedule(&self) -> bool {
        matches!(self, Transition::Started | Transition::Resumed)
    }
}

/// Mutable countdown state, owned by exactly one driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    duration_seconds: u64,
    elapsed_seconds: u64,
    phase: Phase,
}

impl TimerState {
    /// Idle state remembering `config`'s duration for a later `set_running(true)`
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            duration_seconds: config.duration_seconds(),
            elapsed_seconds: 0,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.duration_seconds.saturating_sub(self.elapsed_seconds)
    }

    pub fn percent_complete(&self) -> u8 {
        percent_complete(self.elapsed_seconds, self.duration_seconds)
    }

    pub fn progress(&self) -> Progress {
        Progress::compute(self.elapsed_seconds, self.duration_seconds)
    }

    /// Begin a new run from zero, discarding any run in progress
    pub fn start(&mut self, config: &TimerConfig) -> Transition {
        self.duration_seconds = config.duration_seconds();
        self.elapsed_seconds = 0;
        self.phase = Phase::Running;
        Transition::Started
    }

    /// Pause or resume. Resuming from idle starts a fresh run.
    pub fn set_running(&mut self, running: bool) -> Transition {
        match (self.phase, running) {
            (Phase::Running, true) | (Phase::Idle, false) | (Phase::Paused, false) => {
                Transition::Unchanged
            }
            (Phase::Running, false) => {
                self.phase = Phase::Paused;
                Transition::Paused
            }
            (Phase::Paused, true) => {
                self.phase = Phase::Running;
                Transition::Resumed
            }
            (Phase::Idle, true) => {
                self.elapsed_seconds = 0;
                self.phase = Phase::Running;
                Transition::Started
            }
        }
    }

    /// Abandon the current run
    pub fn stop(&mut self) -> Transition {
        let was_idle = self.phase == Phase::Idle;
        self.reset();
        if was_idle {
            Transition::Unchanged
        } else {
            Transition::Stopped
        }
    }

    /// Advance one tick. Returns `None` unless running.
    pub fn advance(&mut self) -> Option<TickOutcome> {
        if !self.is_running() {
            return None;
        }

        let next = self.elapsed_seconds.saturating_add(1);
        if next < self.duration_seconds {
            self.elapsed_seconds = next;
            return Some(TickOutcome::Progress(self.progress()));
        }

        // Percent is taken from the clamped value so it lands on exactly 100
        self.elapsed_seconds = self.duration_seconds;
        let last = self.progress();
        self.reset();
        Some(TickOutcome::Completed(last))
    }

    fn reset(&mut self) {
        self.elapsed_seconds = 0;
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seconds: u64) -> TimerConfig {
        TimerConfig::new(seconds).unwrap()
    }

    #[test]
    fn rejects_zero_duration() {
        assert!(matches!(
            TimerConfig::new(0),
            Err(TimerError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            TimerConfig::from_minutes(0),
            Err(TimerError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn rejects_zero_tick_interval() {
        let result = config(10).with_tick_interval(Duration::ZERO);
        assert!(matches!(result, Err(TimerError::InvalidConfiguration(_))));
    }

    #[test]
    fn inherited_interval_replaces_default() {
        let fast = config(10).with_tick_interval(Duration::from_millis(50)).unwrap();
        let next = config(3).inherit_tick_interval(&fast);
        assert_eq!(next.duration_seconds(), 3);
        assert_eq!(next.tick_interval(), Duration::from_millis(50));
    }

    #[test]
    fn minutes_convert_to_seconds() {
        assert_eq!(TimerConfig::from_minutes(25).unwrap().duration_seconds(), 1500);
        assert!(TimerConfig::from_minutes(u64::MAX).is_err());
    }

    #[test]
    fn percent_rounds_half_up_and_clamps() {
        assert_eq!(percent_complete(0, 3), 0);
        assert_eq!(percent_complete(1, 3), 33);
        assert_eq!(percent_complete(2, 3), 67);
        assert_eq!(percent_complete(1, 200), 1); // 0.5 rounds up
        assert_eq!(percent_complete(3, 3), 100);
        assert_eq!(percent_complete(7, 3), 100);
    }

    #[test]
    fn idle_state_does_not_tick() {
        let mut state = TimerState::new(&config(5));
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.advance(), None);
        assert_eq!(state.elapsed_seconds(), 0);
    }

    #[test]
    fn full_run_reports_every_tick_then_completes() {
        let mut state = TimerState::new(&config(3));
        assert_eq!(state.start(&config(3)), Transition::Started);

        let first = state.advance().unwrap();
        assert_eq!(
            first,
            TickOutcome::Progress(Progress {
                elapsed_seconds: 1,
                remaining_seconds: 2,
                percent_complete: 33,
                duration_seconds: 3,
            })
        );
        assert!(matches!(state.advance(), Some(TickOutcome::Progress(_))));

        let last = state.advance().unwrap();
        assert_eq!(
            last,
            TickOutcome::Completed(Progress {
                elapsed_seconds: 3,
                remaining_seconds: 0,
                percent_complete: 100,
                duration_seconds: 3,
            })
        );
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.elapsed_seconds(), 0);
        assert_eq!(state.advance(), None);
    }

    #[test]
    fn one_second_run_completes_on_first_tick() {
        let mut state = TimerState::new(&config(1));
        state.start(&config(1));
        let outcome = state.advance().unwrap();
        assert!(matches!(outcome, TickOutcome::Completed(_)));
        assert_eq!(outcome.progress().percent_complete, 100);
    }

    #[test]
    fn pause_retains_position_and_resume_continues() {
        let mut state = TimerState::new(&config(10));
        state.start(&config(10));
        for _ in 0..4 {
            state.advance();
        }

        assert_eq!(state.set_running(false), Transition::Paused);
        assert_eq!(state.advance(), None);
        assert_eq!(state.elapsed_seconds(), 4);

        assert_eq!(state.set_running(true), Transition::Resumed);
        assert_eq!(state.advance().unwrap().progress().elapsed_seconds, 5);
    }

    #[test]
    fn resume_from_idle_starts_fresh_run() {
        let mut state = TimerState::new(&config(2));
        assert_eq!(state.set_running(true), Transition::Started);
        state.advance();
        state.advance();
        assert_eq!(state.phase(), Phase::Idle);

        assert_eq!(state.set_running(true), Transition::Started);
        assert_eq!(state.elapsed_seconds(), 0);
        assert_eq!(state.advance().unwrap().progress().elapsed_seconds, 1);
    }

    #[test]
    fn redundant_requests_are_unchanged() {
        let mut state = TimerState::new(&config(5));
        assert_eq!(state.set_running(false), Transition::Unchanged);
        assert_eq!(state.stop(), Transition::Unchanged);
        state.start(&config(5));
        assert_eq!(state.set_running(true), Transition::Unchanged);
    }

    #[test]
    fn restart_while_running_resets_elapsed() {
        let mut state = TimerState::new(&config(5));
        state.start(&config(5));
        state.advance();
        state.advance();
        state.start(&config(8));
        assert_eq!(state.elapsed_seconds(), 0);
        assert_eq!(state.duration_seconds(), 8);
        assert_eq!(state.remaining_seconds(), 8);
    }

    #[test]
    fn stop_discards_the_run() {
        let mut state = TimerState::new(&config(5));
        state.start(&config(5));
        state.advance();
        state.set_running(false);
        assert_eq!(state.stop(), Transition::Stopped);
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.elapsed_seconds(), 0);
    }

    #[test]
    fn progress_serializes_with_field_names() {
        let p = Progress {
            elapsed_seconds: 1500,
            remaining_seconds: 0,
            percent_complete: 100,
            duration_seconds: 1500,
        };
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json["elapsed_seconds"], 1500);
        assert_eq!(json["percent_complete"], 100);
    }
}
