//! Final Countdown - a drag-to-set countdown timer
//!
//! This is the console entry point for the final-countdown application.

use std::{sync::Arc, time::Duration};
use tokio::io::BufReader;
use tracing::{info, warn};

use final_countdown::{
    config::Config,
    console::HELP,
    input::InputArbiter,
    state::AppState,
    tasks::{render_task, stdin_reader_task, InputEnd},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so readouts on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(format!("final_countdown={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting final-countdown v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: tick={}ms, frame={}ms, scale={}/s, max={:?}",
        config.tick_interval_ms, config.frame_interval_ms, config.pixels_per_second, config.max_seconds
    );

    let state = Arc::new(AppState::new(config.tick_interval()));
    let arbiter = InputArbiter::new(Arc::clone(&state), config.drag_policy());

    // Start the console renderer
    let render = tokio::spawn(render_task(
        state.subscribe(),
        config.frame_interval(),
        config.output_format(),
        std::io::stdout(),
    ));

    if let Some(seconds) = config.duration {
        let position = arbiter.policy().position_for_seconds(seconds);
        arbiter.on_scroll_position(position);
    }

    println!("{}", HELP);

    let input = stdin_reader_task(BufReader::new(tokio::io::stdin()), arbiter);

    tokio::select! {
        result = input => {
            match result {
                Ok(InputEnd::Closed) if state.is_in_progress() => {
                    info!("Console input closed, waiting for the countdown to finish");
                    tokio::select! {
                        _ = state.wait_until_idle() => {}
                        result = shutdown_signal() => {
                            result?;
                            info!("Shutdown signal received");
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!("Console input error: {}", e);
                }
            }
        }
        result = shutdown_signal() => {
            result?;
            info!("Shutdown signal received");
            state.stop();
            // A pending stdin read would keep the runtime from shutting down
            std::process::exit(0);
        }
    }

    state.stop();

    // The renderer returns once the last handle (and with it the snapshot
    // sender) is gone, after printing the final frame
    drop(state);
    match tokio::time::timeout(Duration::from_secs(1), render).await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => warn!("Render task failed: {}", e),
        Err(_) => warn!("Render task did not finish in time"),
    }

    info!("Shutdown complete");
    Ok(())
}
