//! Input arbiter
//!
//! Gates the drag/scroll channel and the toggle button against the
//! countdown state so only valid mutations reach the state machine.
//! Renderers must draw the value from `AppState::snapshot`, never from a raw
//! drag position, while a countdown is in progress.

use std::{fmt, sync::Arc};
use tracing::{debug, info};

use super::DragPolicy;
use crate::state::{AppState, StateTag, TimerSnapshot};

/// What a drag or scroll event did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// The target duration is now this many seconds
    Applied(f64),
    /// The countdown is running; show no drag feedback
    Ignored,
}

/// What a toggle press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Started,
    Stopped,
    /// START pressed with nothing selected
    Ignored,
}

/// Label shown on the toggle control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleLabel {
    Start,
    Stop,
}

impl ToggleLabel {
    pub fn for_state(tag: StateTag) -> Self {
        match tag {
            StateTag::NotStarted => ToggleLabel::Start,
            StateTag::InProgress => ToggleLabel::Stop,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToggleLabel::Start => "START",
            ToggleLabel::Stop => "STOP",
        }
    }
}

impl fmt::Display for ToggleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct InputArbiter {
    state: Arc<AppState>,
    policy: DragPolicy,
}

impl InputArbiter {
    pub fn new(state: Arc<AppState>, policy: DragPolicy) -> Self {
        Self { state, policy }
    }

    pub fn policy(&self) -> &DragPolicy {
        &self.policy
    }

    /// What the renderer should draw this frame
    pub fn snapshot(&self) -> TimerSnapshot {
        self.state.snapshot()
    }

    /// Absolute scroll position of the gauge
    pub fn on_scroll_position(&self, position: f64) -> DragOutcome {
        if self.state.is_in_progress() {
            debug!("Ignoring scroll to {} while countdown is in progress", position);
            return DragOutcome::Ignored;
        }

        self.apply_seconds(self.policy.seconds_for_position(position))
    }

    /// Relative drag, applied on top of the position the current value
    /// implies. After a stop or expiry that position is zero.
    pub fn on_drag(&self, delta: f64) -> DragOutcome {
        let snapshot = self.state.snapshot();
        if snapshot.is_in_progress() {
            debug!("Ignoring drag of {} while countdown is in progress", delta);
            return DragOutcome::Ignored;
        }

        let position = self.policy.position_for_seconds(snapshot.value) + delta;
        self.apply_seconds(self.policy.seconds_for_position(position))
    }

    fn apply_seconds(&self, seconds: f64) -> DragOutcome {
        if self.state.set_target_duration(seconds) {
            debug!("Target duration set to {:.3}s", seconds);
            DragOutcome::Applied(self.state.snapshot().value)
        } else {
            // Positions are finite and non-negative here, so only a START
            // between the check and the set rejects the value
            DragOutcome::Ignored
        }
    }

    /// Label for the toggle control in the current state
    pub fn toggle_label(&self) -> ToggleLabel {
        ToggleLabel::for_state(self.state.snapshot().state)
    }

    /// Press the toggle: START when not started, STOP when in progress
    pub fn on_toggle(&self) -> ToggleOutcome {
        match self.toggle_label() {
            ToggleLabel::Start => {
                if self.state.start() {
                    info!("Toggle pressed: countdown started");
                    ToggleOutcome::Started
                } else {
                    debug!("Toggle pressed: nothing to start");
                    ToggleOutcome::Ignored
                }
            }
            ToggleLabel::Stop => {
                if self.state.stop() {
                    info!("Toggle pressed: countdown stopped");
                    ToggleOutcome::Stopped
                } else {
                    // Expired between reading the label and pressing
                    ToggleOutcome::Ignored
                }
            }
        }
    }
}
