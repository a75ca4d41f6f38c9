//! Process-level helpers for the console binary

pub mod signals;

pub use signals::shutdown_signal;
