//! Console renderer background task

use std::{io::Write, time::Duration};
use tokio::{sync::watch, time::Instant};
use tracing::{debug, warn};

use crate::{readout::render_line, state::TimerSnapshot};

/// How snapshots are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn format_snapshot(snapshot: &TimerSnapshot, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render_line(snapshot),
        OutputFormat::Json => match serde_json::to_string(snapshot) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize snapshot: {}", e);
                render_line(snapshot)
            }
        },
    }
}

/// Print published snapshots: always on a state change, otherwise at most
/// once per `frame_interval`. Returns the writer once the countdown handle
/// is dropped.
pub async fn render_task<W: Write>(
    mut snapshot_rx: watch::Receiver<TimerSnapshot>,
    frame_interval: Duration,
    format: OutputFormat,
    mut out: W,
) -> W {
    debug!("Starting render task");

    let mut last_state = snapshot_rx.borrow().state;
    let mut last_frame: Option<Instant> = None;

    while snapshot_rx.changed().await.is_ok() {
        let snapshot = *snapshot_rx.borrow_and_update();

        let state_changed = snapshot.state != last_state;
        let frame_due = last_frame.map_or(true, |at| at.elapsed() >= frame_interval);
        if !state_changed && !frame_due {
            continue;
        }

        last_state = snapshot.state;
        last_frame = Some(Instant::now());

        if let Err(e) = writeln!(out, "{}", format_snapshot(&snapshot, format)).and_then(|_| out.flush()) {
            warn!("Failed to write readout: {}", e);
        }
    }

    debug!("Snapshot channel closed, render task exiting");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StateTag;

    #[tokio::test(start_paused = true)]
    async fn test_prints_state_changes_and_throttles_values() {
        let (tx, rx) = watch::channel(TimerSnapshot::idle());
        let render = tokio::spawn(render_task(
            rx,
            Duration::from_millis(100),
            OutputFormat::Text,
            Vec::new(),
        ));
        tokio::task::yield_now().await;

        let running = |value| TimerSnapshot {
            state: StateTag::InProgress,
            value,
        };

        tx.send_replace(running(3.0));
        tokio::time::sleep(Duration::from_millis(10)).await;
        // Within the frame interval: dropped
        tx.send_replace(running(2.99));
        tokio::time::sleep(Duration::from_millis(200)).await;
        tx.send_replace(running(2.8));
        tokio::time::sleep(Duration::from_millis(10)).await;
        // State change: printed despite the interval
        tx.send_replace(TimerSnapshot::idle());
        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(tx);

        let out = String::from_utf8(render.await.unwrap()).unwrap();
        assert_eq!(
            out.lines().collect::<Vec<_>>(),
            vec!["00:03.000 [STOP]", "00:02.800 [STOP]", "00:00.000 [START]"]
        );
    }

    #[tokio::test]
    async fn test_json_output() {
        let (tx, rx) = watch::channel(TimerSnapshot::idle());
        let render = tokio::spawn(render_task(
            rx,
            Duration::ZERO,
            OutputFormat::Json,
            Vec::new(),
        ));
        tokio::task::yield_now().await;

        tx.send_replace(TimerSnapshot {
            state: StateTag::NotStarted,
            value: 1.5,
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(tx);

        let out = String::from_utf8(render.await.unwrap()).unwrap();
        assert_eq!(out.trim_end(), r#"{"state":"not_started","value":1.5}"#);
    }

    #[tokio::test(start_paused = true)]
    async fn test_final_frame_printed_when_countdown_handle_dropped() {
        use crate::state::{AppState, ManualClock};
        use chrono::{TimeZone, Utc};
        use std::sync::Arc;

        let clock = Arc::new(ManualClock::new(Utc.timestamp_millis_opt(0).unwrap()));
        let state = Arc::new(AppState::with_clock(Duration::from_millis(10), clock));
        let render = tokio::spawn(render_task(
            state.subscribe(),
            Duration::from_secs(60),
            OutputFormat::Text,
            Vec::new(),
        ));
        tokio::task::yield_now().await;

        state.set_target_duration(5.0);
        tokio::time::sleep(Duration::from_millis(10)).await;
        state.start();
        tokio::time::sleep(Duration::from_millis(10)).await;
        state.stop();
        drop(state);

        let out = String::from_utf8(render.await.unwrap()).unwrap();
        assert_eq!(out.lines().last(), Some("00:00.000 [START]"));
    }
}
