//! Input handling module
//!
//! This module turns drag/scroll positions and toggle presses into calls
//! against the countdown.

pub mod arbiter;
pub mod policy;

// Re-export main types
pub use arbiter::{DragOutcome, InputArbiter, ToggleLabel, ToggleOutcome};
pub use policy::{DragPolicy, DEFAULT_PIXELS_PER_SECOND};
