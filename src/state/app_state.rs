//! Shared countdown handle
//!
//! `AppState` is the single owner of the state machine in a multi-threaded
//! host. Every mutation goes through its mutex, every state change is
//! published on a watch channel, and the ticker task's lifetime is tied to
//! the `InProgress` state: spawned by `start`, aborted by `stop`, and
//! self-terminating on expiry.
//!
//! Snapshots are published while the machine lock is held, so the order of
//! values on the channel matches the order of transitions. Lock order is
//! machine, then ticker slot.
//!
//! The ticker holds an `Arc<AppState>`, so the handle is not dropped while a
//! countdown runs; `stop` is the only way to cancel it early.

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use tokio::{runtime::Handle, sync::watch, task::JoinHandle};
use tracing::{debug, warn};

use super::{Clock, CountdownState, SystemClock, TickOutcome, TimerSnapshot, TimerStateMachine};
use crate::tasks::countdown_ticker_task;

/// Default ticker period, roughly one frame at 60 Hz
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug)]
pub struct AppState {
    machine: Mutex<TimerStateMachine>,
    clock: Arc<dyn Clock>,
    /// Period of the ticker while a countdown is in progress
    pub tick_interval: Duration,
    /// Published after every state change
    snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive so sends never fail
    _snapshot_rx: watch::Receiver<TimerSnapshot>,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl AppState {
    /// Countdown handle on the wall clock
    pub fn new(tick_interval: Duration) -> Self {
        Self::with_clock(tick_interval, Arc::new(SystemClock))
    }

    pub fn with_clock(tick_interval: Duration, clock: Arc<dyn Clock>) -> Self {
        let (snapshot_tx, snapshot_rx) = watch::channel(TimerSnapshot::idle());

        Self {
            machine: Mutex::new(TimerStateMachine::new()),
            clock,
            tick_interval,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
            ticker: Mutex::new(None),
        }
    }

    fn lock_machine(&self) -> MutexGuard<'_, TimerStateMachine> {
        self.machine.lock().unwrap_or_else(|e| {
            warn!("Recovering poisoned timer state lock");
            e.into_inner()
        })
    }

    fn lock_ticker(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.ticker.lock().unwrap_or_else(|e| {
            warn!("Recovering poisoned ticker lock");
            e.into_inner()
        })
    }

    fn publish(&self, snapshot: TimerSnapshot) {
        self.snapshot_tx.send_replace(snapshot);
    }

    /// Current state tag and value, for one render frame
    pub fn snapshot(&self) -> TimerSnapshot {
        self.lock_machine().snapshot()
    }

    pub fn countdown_state(&self) -> CountdownState {
        self.lock_machine().state()
    }

    pub fn is_in_progress(&self) -> bool {
        self.lock_machine().is_in_progress()
    }

    /// Receive every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Set the duration to count down from. No-op while in progress.
    pub fn set_target_duration(&self, seconds: f64) -> bool {
        let mut machine = self.lock_machine();
        let changed = machine.set_target_duration(seconds);
        if changed {
            self.publish(machine.snapshot());
        }
        changed
    }

    /// Commit the selected duration and spawn the ticker
    pub fn start(self: &Arc<Self>) -> bool {
        let mut machine = self.lock_machine();
        let started = machine.start(self.clock.now());
        if started {
            self.publish(machine.snapshot());
            self.spawn_ticker();
        }
        started
    }

    /// Cancel the countdown and its ticker
    pub fn stop(&self) -> bool {
        let mut machine = self.lock_machine();
        let stopped = machine.stop();
        if stopped {
            self.abort_ticker();
            self.publish(machine.snapshot());
        }
        stopped
    }

    /// Recompute the value at the clock's current time
    pub fn tick(&self) -> TickOutcome {
        let mut machine = self.lock_machine();
        let outcome = machine.tick(self.clock.now());
        if outcome != TickOutcome::Idle {
            self.publish(machine.snapshot());
        }
        outcome
    }

    /// Resolve once no countdown is in progress
    pub async fn wait_until_idle(&self) {
        let mut snapshot_rx = self.subscribe();
        if snapshot_rx.wait_for(|snapshot| !snapshot.is_in_progress()).await.is_err() {
            debug!("Snapshot channel closed while waiting for the countdown");
        }
    }

    /// Whether a ticker task is alive
    pub fn is_ticking(&self) -> bool {
        self.lock_ticker()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn spawn_ticker(self: &Arc<Self>) {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                warn!("No async runtime available, countdown will not tick: {}", e);
                return;
            }
        };

        let state = Arc::clone(self);
        let handle = runtime.spawn(async move {
            countdown_ticker_task(state).await;
        });

        if let Some(stale) = self.lock_ticker().replace(handle) {
            debug!("Aborting stale ticker");
            stale.abort();
        }
    }

    fn abort_ticker(&self) {
        if let Some(handle) = self.lock_ticker().take() {
            debug!("Aborting ticker");
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ManualClock, StateTag};
    use chrono::{TimeZone, Utc};

    fn manual_state() -> (Arc<AppState>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc.timestamp_millis_opt(1_000).unwrap()));
        let state = Arc::new(AppState::with_clock(
            Duration::from_millis(10),
            clock.clone(),
        ));
        (state, clock)
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_spawns_ticker_and_expiry_ends_it() {
        let (state, clock) = manual_state();
        state.set_target_duration(125.0);
        assert!(!state.is_ticking());

        assert!(state.start());
        assert!(state.is_ticking());

        clock.advance(chrono::Duration::milliseconds(60_000));
        tokio::time::sleep(Duration::from_millis(50)).await;
        let snapshot = state.snapshot();
        assert_eq!(snapshot.state, StateTag::InProgress);
        assert!((snapshot.value - 65.0).abs() < 1e-9);

        clock.advance(chrono::Duration::milliseconds(65_000));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(state.snapshot(), TimerSnapshot::idle());
        assert!(!state.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_aborts_ticker() {
        let (state, _clock) = manual_state();
        state.set_target_duration(30.0);
        state.start();
        assert!(state.is_ticking());

        assert!(state.stop());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!state.is_ticking());
        assert_eq!(state.snapshot(), TimerSnapshot::idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_ticker() {
        let (state, clock) = manual_state();
        state.set_target_duration(10.0);
        state.start();
        state.stop();

        state.set_target_duration(2.0);
        assert!(state.start());
        assert!(state.is_ticking());

        clock.advance(chrono::Duration::milliseconds(2_000));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!state.is_in_progress());
        assert!(!state.is_ticking());
    }

    #[tokio::test]
    async fn test_subscribers_see_transitions() {
        let (state, _clock) = manual_state();
        let mut rx = state.subscribe();

        state.set_target_duration(5.0);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().value, 5.0);

        state.start();
        assert_eq!(rx.borrow_and_update().state, StateTag::InProgress);

        state.stop();
        assert_eq!(*rx.borrow_and_update(), TimerSnapshot::idle());
    }

    #[tokio::test]
    async fn test_rejected_calls_publish_nothing() {
        let (state, _clock) = manual_state();
        let mut rx = state.subscribe();
        rx.borrow_and_update();

        assert!(!state.start());
        assert!(!state.stop());
        assert_eq!(state.tick(), TickOutcome::Idle);
        assert!(!rx.has_changed().unwrap());
        assert!(!state.is_ticking());
    }

    #[test]
    fn test_start_without_runtime_still_commits() {
        let (state, _clock) = manual_state();
        state.set_target_duration(3.0);
        assert!(state.start());
        assert!(state.is_in_progress());
        assert!(!state.is_ticking());
    }

    #[test]
    fn test_concurrent_tick_and_stop_publish_final_state() {
        let (state, clock) = manual_state();
        let rx = state.subscribe();
        let barrier = Arc::new(std::sync::Barrier::new(2));

        let ticking = {
            let (state, clock, barrier) = (Arc::clone(&state), Arc::clone(&clock), Arc::clone(&barrier));
            std::thread::spawn(move || {
                for _ in 0..2_000 {
                    barrier.wait();
                    clock.advance(chrono::Duration::milliseconds(1));
                    state.tick();
                    barrier.wait();
                }
            })
        };

        for round in 0..2_000 {
            barrier.wait();
            state.set_target_duration(1_000.0);
            state.start();
            state.stop();
            barrier.wait();
            assert_eq!(*rx.borrow(), state.snapshot(), "stale snapshot in round {}", round);
        }

        ticking.join().unwrap();
        assert_eq!(*rx.borrow(), TimerSnapshot::idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_until_idle_resolves_on_expiry() {
        let (state, clock) = manual_state();
        state.set_target_duration(2.0);
        state.start();

        let waiter = tokio::spawn({
            let state = Arc::clone(&state);
            async move { state.wait_until_idle().await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        clock.advance(chrono::Duration::milliseconds(2_000));
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
        assert!(!state.is_in_progress());
    }

    #[tokio::test]
    async fn test_wait_until_idle_returns_when_not_started() {
        let (state, _clock) = manual_state();
        state.wait_until_idle().await;
    }
}
