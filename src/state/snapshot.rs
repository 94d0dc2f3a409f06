//! Read-only view of the timer for status reporting

use serde::{Deserialize, Serialize};

use super::timer_state::{progress_fraction, TimerState};
use crate::utils::format_remaining;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
}

/// Timer status as seen at one instant, derived from the store and the clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub status: TimerStatus,
    pub remaining_ms: i64,
    pub total_ms: i64,
    pub progress: f64,
    pub display: String,
}

impl TimerSnapshot {
    pub fn idle() -> Self {
        Self {
            status: TimerStatus::Idle,
            remaining_ms: 0,
            total_ms: 0,
            progress: 0.0,
            display: format_remaining(0),
        }
    }

    /// Build a snapshot from the persisted record, if any, at `now_ms`
    pub fn from_state(state: Option<TimerState>, now_ms: i64) -> Self {
        let Some(state) = state else {
            return Self::idle();
        };

        let remaining_ms = state.remaining_at(now_ms).max(0);
        let total_ms = state.total_duration();
        Self {
            status: if state.is_running() { TimerStatus::Running } else { TimerStatus::Paused },
            remaining_ms,
            total_ms,
            progress: progress_fraction(remaining_ms, total_ms),
            display: format_remaining(remaining_ms),
        }
    }

    /// One-line human readable summary
    pub fn summary(&self) -> String {
        match self.status {
            TimerStatus::Idle => "idle".to_string(),
            TimerStatus::Running | TimerStatus::Paused => format!(
                "{} {} ({:.0}% left)",
                if self.status == TimerStatus::Running { "running" } else { "paused" },
                self.display,
                self.progress * 100.0
            ),
        }
    }
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        Self::idle()
    }
}
