//! Countdown state machine
//!
//! Every transition reads the persisted record, computes against the wall
//! clock, and writes a whole new record back. Nothing in memory is trusted
//! between calls, which lets another process (or a restart) change the timer
//! underneath us.

pub mod timer_core;

use std::{sync::Arc, time::Duration};

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::{
    render::{RenderAdapter, Screen},
    state::{TimerSnapshot, TimerState},
    storage::{KeyValueStore, PersistentState},
    tasks::PollLoop,
    utils::{format_remaining, Clock},
};

pub use timer_core::{TickOutcome, TimerCore};

/// Default time between poll loop ticks
pub const DEFAULT_CADENCE: Duration = Duration::from_millis(200);

/// Transitions announced to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum TimerEvent {
    Started { end_date: i64, total_ms: i64 },
    Paused { remaining_ms: i64, total_ms: i64 },
    Reset,
    Finished,
}

pub struct TimerEngine {
    core: Arc<TimerCore>,
    poll_loop: PollLoop,
}

impl TimerEngine {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        renderer: Arc<dyn RenderAdapter>,
        cadence: Duration,
    ) -> Self {
        Self {
            core: Arc::new(TimerCore::new(PersistentState::new(store), clock, renderer)),
            poll_loop: PollLoop::new(cadence),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.core.subscribe()
    }

    /// Current status computed fresh from the store
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::from_state(self.core.state().load(), self.core.now_ms())
    }

    pub fn is_polling(&self) -> bool {
        self.poll_loop.is_active()
    }

    /// Start counting down `duration_ms` from now.
    ///
    /// `carried_total` keeps the original length when resuming so progress is
    /// measured against the whole countdown. Callers validate that
    /// `duration_ms` is positive. Must run inside a Tokio runtime.
    pub fn start(&self, duration_ms: i64, carried_total: Option<i64>) {
        debug_assert!(duration_ms > 0, "countdown duration must be positive");

        let total_ms = carried_total.unwrap_or(duration_ms);
        let state = TimerState::running(self.core.now_ms(), duration_ms, total_ms);
        self.core.state().save(&state);
        self.core.set_observed(Some(state));

        info!(
            "Timer started: {} left of {}",
            format_remaining(duration_ms),
            format_remaining(total_ms)
        );
        if let TimerState::Running { end_date, .. } = state {
            self.core.publish(TimerEvent::Started { end_date, total_ms });
        }

        self.core.renderer().show_screen(Screen::Running);
        self.poll_loop.begin(Arc::clone(&self.core));
    }

    /// Freeze a running timer. Anything else is left alone.
    pub fn pause(&self) {
        let Some(TimerState::Running { end_date, total_duration }) = self.core.state().load() else {
            debug!("Pause ignored: no running timer");
            return;
        };

        let remaining_ms = end_date.saturating_sub(self.core.now_ms());
        if remaining_ms <= 0 {
            // Pause lost the race with expiry
            debug!("Pause requested after expiry, finishing instead");
            self.finish();
            return;
        }

        let state = TimerState::paused(remaining_ms, total_duration);
        self.core.state().save(&state);
        self.core.set_observed(Some(state));
        self.poll_loop.cancel();
        self.core.render_frame(remaining_ms, total_duration);

        info!("Timer paused with {} left", format_remaining(remaining_ms));
        self.core.publish(TimerEvent::Paused {
            remaining_ms,
            total_ms: total_duration,
        });
    }

    /// Continue a paused timer from where it stopped
    pub fn resume(&self) {
        let Some(TimerState::Paused { remaining, total_duration }) = self.core.state().load() else {
            debug!("Resume ignored: no paused timer");
            return;
        };

        if remaining <= 0 {
            self.finish();
            return;
        }
        self.start(remaining, Some(total_duration));
    }

    /// Drop any timer and go back to the setup screen
    pub fn reset(&self) {
        self.core.state().clear();
        self.core.set_observed(None);
        self.poll_loop.cancel();
        self.core.renderer().show_screen(Screen::Setup);

        info!("Timer reset");
        self.core.publish(TimerEvent::Reset);
    }

    /// Complete the countdown. Normally triggered by the poll loop on expiry.
    pub fn finish(&self) {
        self.poll_loop.cancel();
        self.core.finish();
    }

    /// Bring the presentation in line with whatever the store holds.
    /// Called at process start and whenever resync sees the store change.
    ///
    /// When the record has vanished since this process last saw it, the
    /// countdown ended elsewhere: a running record past its end finished,
    /// anything else was reset.
    pub fn restore(&self) {
        let previous = self.core.observed();
        let state = self.core.state().load();
        self.core.set_observed(state);

        match state {
            Some(TimerState::Running { end_date, .. }) => {
                info!("Restoring running timer ending at {}", end_date);
                self.core.renderer().show_screen(Screen::Running);
                self.poll_loop.begin(Arc::clone(&self.core));
            }
            Some(TimerState::Paused { remaining, total_duration }) => {
                info!("Restoring paused timer with {} left", format_remaining(remaining));
                self.poll_loop.cancel();
                self.core.renderer().show_screen(Screen::Running);
                self.core.render_frame(remaining, total_duration);
            }
            None => {
                self.poll_loop.cancel();
                match previous {
                    Some(TimerState::Running { end_date, .. }) if end_date <= self.core.now_ms() => {
                        info!("Countdown finished by another process");
                        self.core.present_completion();
                    }
                    Some(_) => {
                        info!("Timer reset by another process");
                        self.core.renderer().show_screen(Screen::Setup);
                        self.core.publish(TimerEvent::Reset);
                    }
                    None => {
                        debug!("No stored timer, showing setup");
                        self.core.renderer().show_screen(Screen::Setup);
                    }
                }
            }
        }
    }

    /// Pick up changes made to the store by someone else.
    ///
    /// A live poll loop already follows a running record, so this only acts
    /// when the loop is idle and the record differs from what was last seen.
    pub fn resync(&self) {
        let current = self.core.state().load();
        if self.poll_loop.is_active() && current.map_or(false, |s| s.is_running()) {
            return;
        }
        if current == self.core.observed() && !current.map_or(false, |s| s.is_running()) {
            return;
        }

        debug!("Stored timer changed externally, resyncing");
        self.restore();
    }
}

impl Drop for TimerEngine {
    fn drop(&mut self) {
        self.poll_loop.cancel();
    }
}
