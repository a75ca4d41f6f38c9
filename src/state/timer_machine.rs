//! Countdown state machine
//!
//! Holds the countdown state and the single authoritative timer value.
//! While a countdown is in progress the value is always derived from the
//! committed `(total_amount, started_at)` pair and the caller's `now`, so
//! irregular or coalesced ticks never accumulate drift.
//!
//! Every operation is total: calls that are illegal in the current state
//! leave the machine untouched and report that nothing happened.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::{CountdownState, StateTag, TimerSnapshot};

/// Result of a single `tick`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Not in progress, nothing to recompute
    Idle,
    /// Still counting down, with the recomputed value
    Running(f64),
    /// The value reached zero and the machine returned to `NotStarted`
    Expired,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimerStateMachine {
    state: CountdownState,
    value: f64,
}

impl TimerStateMachine {
    /// Not started, value 0
    pub fn new() -> Self {
        Self {
            state: CountdownState::NotStarted,
            value: 0.0,
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn tag(&self) -> StateTag {
        self.state.tag()
    }

    /// Seconds remaining while in progress, selected duration otherwise
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_in_progress(&self) -> bool {
        self.state.is_in_progress()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.tag(),
            value: self.value,
        }
    }

    /// Set the duration to count down from. Negative and NaN input clamp to
    /// zero; infinite input is rejected. Returns whether the value was
    /// updated.
    pub fn set_target_duration(&mut self, seconds: f64) -> bool {
        if self.is_in_progress() {
            debug!("Ignoring target duration {} while countdown is in progress", seconds);
            return false;
        }
        if seconds.is_infinite() && seconds > 0.0 {
            debug!("Ignoring infinite target duration");
            return false;
        }

        // `max` returns the non-NaN operand
        self.value = seconds.max(0.0);
        true
    }

    /// Commit the selected duration and start counting down from `now`.
    /// Returns whether the countdown started.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_in_progress() {
            debug!("Ignoring start: countdown already in progress");
            return false;
        }
        if self.value <= 0.0 {
            debug!("Ignoring start: no duration selected");
            return false;
        }

        self.state = CountdownState::InProgress {
            total_amount: self.value,
            started_at: now,
        };
        info!("Countdown started: {:.3}s at {}", self.value, now);
        true
    }

    /// Cancel the countdown. The remaining time is discarded, not kept as
    /// the next target. Returns whether a countdown was cancelled.
    pub fn stop(&mut self) -> bool {
        if !self.is_in_progress() {
            debug!("Ignoring stop: no countdown in progress");
            return false;
        }

        info!("Countdown stopped with {:.3}s remaining", self.value);
        self.reset();
        true
    }

    /// Recompute the value from the committed snapshot and `now`, expiring
    /// the countdown once it reaches zero.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        let CountdownState::InProgress {
            total_amount,
            started_at,
        } = self.state
        else {
            return TickOutcome::Idle;
        };

        let remaining = remaining_seconds(total_amount, started_at, now);
        if remaining <= 0.0 {
            info!("Countdown of {:.3}s expired", total_amount);
            self.reset();
            return TickOutcome::Expired;
        }

        self.value = remaining;
        TickOutcome::Running(remaining)
    }

    fn reset(&mut self) {
        self.state = CountdownState::NotStarted;
        self.value = 0.0;
    }
}

impl Default for TimerStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// `max(0, total - (now - started_at))`. Elapsed time below zero (the clock
/// stepped backwards) counts as zero.
pub fn remaining_seconds(total_amount: f64, started_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let elapsed = now.signed_duration_since(started_at);
    let elapsed_secs = match elapsed.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        None => elapsed.num_milliseconds() as f64 / 1_000.0,
    };

    (total_amount - elapsed_secs.max(0.0)).max(0.0)
}
