//! Fixed-cadence countdown poll loop

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::engine::{TickOutcome, TimerCore};

/// Owns the single recurring tick task.
///
/// Each tick is a complete read-compute-render cycle against the store, so the
/// cadence only affects how smooth the display is, never how accurate.
#[derive(Debug)]
pub struct PollLoop {
    cadence: Duration,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl PollLoop {
    pub fn new(cadence: Duration) -> Self {
        Self {
            cadence,
            handle: Mutex::new(None),
        }
    }

    pub fn cadence(&self) -> Duration {
        self.cadence
    }

    fn handle(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.handle.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replace any running loop: tick once right away, then keep ticking
    /// until the store no longer holds a running timer.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn begin(&self, core: Arc<TimerCore>) {
        self.cancel();

        match core.tick() {
            TickOutcome::Rendered { remaining_ms } => {
                debug!("Poll loop armed with {}ms left", remaining_ms);
            }
            TickOutcome::Expired => {
                info!("Timer already expired when the poll loop began");
                core.finish();
                return;
            }
            TickOutcome::Stopped => {
                debug!("No running timer, poll loop not armed");
                return;
            }
        }

        let cadence = self.cadence;
        let task = tokio::spawn(async move {
            poll_loop_task(core, cadence).await;
        });
        *self.handle() = Some(task);
    }

    /// Stop future ticks. Safe to call when nothing is running.
    pub fn cancel(&self) {
        if let Some(task) = self.handle().take() {
            task.abort();
            debug!("Poll loop cancelled");
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle()
            .as_ref()
            .map_or(false, |task| !task.is_finished())
    }
}

async fn poll_loop_task(core: Arc<TimerCore>, cadence: Duration) {
    // The synchronous tick in `begin` already covered "now"
    let mut interval = interval_at(Instant::now() + cadence, cadence);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;

        match core.tick() {
            TickOutcome::Rendered { .. } => {}
            TickOutcome::Expired => {
                info!("Countdown reached zero");
                core.finish();
                break;
            }
            TickOutcome::Stopped => {
                debug!("Stored timer is no longer running, poll loop stopping");
                break;
            }
        }
    }
}
