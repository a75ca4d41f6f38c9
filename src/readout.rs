//! Numeric readout for the timer value

use crate::{input::ToggleLabel, state::TimerSnapshot};

/// Format seconds as `MM:SS.fff`. Minutes are not wrapped at the hour;
/// milliseconds are truncated.
pub fn format_readout(seconds: f64) -> String {
    let total_ms = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0) as u64
    } else {
        0
    };
    let whole_secs = total_ms / 1000;

    format!(
        "{:02}:{:02}.{:03}",
        whole_secs / 60,
        whole_secs % 60,
        total_ms % 1000
    )
}

/// One console line: readout and the label the toggle would show
pub fn render_line(snapshot: &TimerSnapshot) -> String {
    format!(
        "{} [{}]",
        format_readout(snapshot.value),
        ToggleLabel::for_state(snapshot.state)
    )
}
