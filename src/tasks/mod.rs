//! Background tasks module
//!
//! This module contains the tasks that run alongside the countdown.

pub mod countdown_ticker;
pub mod render;
pub mod stdin_reader;

// Re-export main functions
pub use countdown_ticker::countdown_ticker_task;
pub use render::render_task;
pub use stdin_reader::{stdin_reader_task, InputEnd};
