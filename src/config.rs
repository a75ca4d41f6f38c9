//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::{input::DragPolicy, tasks::render::OutputFormat};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "final-countdown")]
#[command(about = "Drag-to-set countdown timer driven from the console")]
#[command(version)]
pub struct Config {
    /// Duration to preselect, in seconds
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// Scroll units per second of duration
    #[arg(long, default_value = "200")]
    pub pixels_per_second: f64,

    /// Upper bound on the selectable duration, in seconds (unbounded if unset)
    #[arg(long)]
    pub max_seconds: Option<f64>,

    /// Countdown tick interval in milliseconds
    #[arg(long, default_value = "16", value_parser = clap::value_parser!(u64).range(1..=100))]
    pub tick_interval_ms: u64,

    /// Minimum time between printed readouts while the value changes
    #[arg(long, default_value = "250")]
    pub frame_interval_ms: u64,

    /// Print snapshots as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn drag_policy(&self) -> DragPolicy {
        DragPolicy::new(self.pixels_per_second, self.max_seconds)
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
