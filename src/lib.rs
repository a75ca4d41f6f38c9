//! Final Countdown - a drag-to-set countdown timer core
//!
//! This library provides the countdown state machine, the input arbiter that
//! gates drag and toggle input against it, and the tasks that tick it and
//! render it to the console.

pub mod config;
pub mod console;
pub mod input;
pub mod readout;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use input::{DragPolicy, InputArbiter};
pub use state::{AppState, CountdownState, TimerSnapshot, TimerStateMachine};
pub use utils::signals::shutdown_signal;
