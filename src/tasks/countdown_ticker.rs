//! Countdown ticker background task

use std::sync::Arc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::state::{AppState, TickOutcome};

/// Re-derive the timer value every `tick_interval` until the countdown is no
/// longer in progress. Spawned by `AppState::start`; returns on expiry and
/// is aborted by `AppState::stop`.
pub async fn countdown_ticker_task(state: Arc<AppState>) {
    debug!("Starting countdown ticker every {:?}", state.tick_interval);

    let mut ticker = interval(state.tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        match state.tick() {
            TickOutcome::Running(remaining) => {
                debug!("Countdown remaining: {:.3}s", remaining);
            }
            TickOutcome::Expired => {
                info!("Countdown reached zero");
                break;
            }
            TickOutcome::Idle => {
                debug!("Countdown no longer in progress, ticker exiting");
                break;
            }
        }
    }
}
