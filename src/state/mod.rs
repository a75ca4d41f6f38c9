//! State management module
//!
//! This module contains the countdown state machine, its shared handle, and
//! the clocks that drive it.

pub mod app_state;
pub mod clock;
pub mod countdown_state;
pub mod timer_machine;

// Re-export main types
pub use app_state::{AppState, DEFAULT_TICK_INTERVAL};
pub use clock::{Clock, ManualClock, SystemClock};
pub use countdown_state::{CountdownState, StateTag, TimerSnapshot};
pub use timer_machine::{TickOutcome, TimerStateMachine};
