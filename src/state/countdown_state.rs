//! Countdown state and the snapshot handed to renderers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of the countdown.
///
/// Only `InProgress` carries a payload: the duration committed at start time
/// and the instant of the commit. Both are frozen for the life of the variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CountdownState {
    #[default]
    NotStarted,
    InProgress {
        total_amount: f64,
        started_at: DateTime<Utc>,
    },
}

impl CountdownState {
    /// Payload-free tag for this state
    pub fn tag(&self) -> StateTag {
        match self {
            CountdownState::NotStarted => StateTag::NotStarted,
            CountdownState::InProgress { .. } => StateTag::InProgress,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, CountdownState::InProgress { .. })
    }
}

/// State tag exposed to renderers and the toggle control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateTag {
    NotStarted,
    InProgress,
}

/// Everything a renderer may read in a frame: the tag and the current value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub state: StateTag,
    /// Seconds remaining (or selected, while not started)
    pub value: f64,
}

impl TimerSnapshot {
    /// Snapshot of a fresh timer
    pub fn idle() -> Self {
        Self {
            state: StateTag::NotStarted,
            value: 0.0,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.state == StateTag::InProgress
    }
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        Self::idle()
    }
}
