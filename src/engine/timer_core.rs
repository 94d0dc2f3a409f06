//! Shared pieces of the engine that the poll loop also drives

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use tracing::{debug, info};

use super::TimerEvent;
use crate::{
    render::{RenderAdapter, Screen},
    state::{progress_fraction, TimerState},
    storage::PersistentState,
    utils::{format_remaining, Clock},
};

/// Result of one read-compute-render cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A running timer was drawn with this much time left
    Rendered { remaining_ms: i64 },
    /// The running timer has reached zero and must be finished
    Expired,
    /// Nothing is running; the loop should stop
    Stopped,
}

/// Store, clock, renderer and event channel, shared between the engine and
/// its poll loop task
pub struct TimerCore {
    state: PersistentState,
    clock: Arc<dyn Clock>,
    renderer: Arc<dyn RenderAdapter>,
    events: broadcast::Sender<TimerEvent>,
    /// Last record this process acted on. Only used to skip redundant
    /// redraws during resync; the store stays the source of truth.
    observed: Mutex<Option<TimerState>>,
}

impl TimerCore {
    pub fn new(
        state: PersistentState,
        clock: Arc<dyn Clock>,
        renderer: Arc<dyn RenderAdapter>,
    ) -> Self {
        let (events, _) = broadcast::channel(100);
        Self {
            state,
            clock,
            renderer,
            events,
            observed: Mutex::new(None),
        }
    }

    pub fn state(&self) -> &PersistentState {
        &self.state
    }

    pub fn renderer(&self) -> &dyn RenderAdapter {
        self.renderer.as_ref()
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.events.subscribe()
    }

    pub fn publish(&self, event: TimerEvent) {
        if let Err(e) = self.events.send(event) {
            debug!("No listeners for timer event: {:?}", e.0);
        }
    }

    pub fn observed(&self) -> Option<TimerState> {
        match self.observed.lock() {
            Ok(observed) => *observed,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn set_observed(&self, state: Option<TimerState>) {
        match self.observed.lock() {
            Ok(mut observed) => *observed = state,
            Err(poisoned) => *poisoned.into_inner() = state,
        }
    }

    /// Draw `remaining_ms` and its share of `total_ms`
    pub fn render_frame(&self, remaining_ms: i64, total_ms: i64) {
        self.renderer.display_time(&format_remaining(remaining_ms));
        self.renderer
            .set_ring_progress(progress_fraction(remaining_ms, total_ms));
    }

    /// Re-read the store and draw the running timer it holds
    pub fn tick(&self) -> TickOutcome {
        match self.state.load() {
            Some(TimerState::Running { end_date, total_duration }) => {
                let remaining_ms = end_date.saturating_sub(self.clock.now_ms());
                if remaining_ms <= 0 {
                    return TickOutcome::Expired;
                }
                self.render_frame(remaining_ms, total_duration);
                TickOutcome::Rendered { remaining_ms }
            }
            _ => TickOutcome::Stopped,
        }
    }

    /// Clear the record and present the completed countdown
    pub fn finish(&self) {
        self.state.clear();
        self.set_observed(None);
        self.present_completion();
    }

    /// Draw the finished countdown and announce it. Leaves the store alone,
    /// so it also serves a countdown that another process already cleared.
    pub fn present_completion(&self) {
        self.render_frame(0, 0);
        self.renderer.signal_completion();
        self.renderer.show_screen(Screen::Done);

        info!("Countdown finished");
        self.publish(TimerEvent::Finished);
    }
}
