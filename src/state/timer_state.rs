//! Persisted timer state and the math derived from it

use serde::{Deserialize, Serialize};

/// The persisted timer record.
///
/// An idle timer has no record at all, so idle is `Option::None` wherever a
/// `TimerState` is loaded. Running keeps an absolute end time rather than a
/// countdown so the remaining time can be recovered after any gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TimerState {
    Running {
        /// Epoch milliseconds at which the countdown reaches zero
        #[serde(rename = "endDate")]
        end_date: i64,
        #[serde(rename = "totalDuration")]
        total_duration: i64,
    },
    Paused {
        remaining: i64,
        #[serde(rename = "totalDuration")]
        total_duration: i64,
    },
}

impl TimerState {
    /// A running timer ending `duration_ms` after `now_ms`
    pub fn running(now_ms: i64, duration_ms: i64, total_duration: i64) -> Self {
        Self::Running {
            end_date: now_ms.saturating_add(duration_ms),
            total_duration,
        }
    }

    pub fn paused(remaining: i64, total_duration: i64) -> Self {
        Self::Paused {
            remaining: remaining.max(0),
            total_duration,
        }
    }

    pub fn total_duration(&self) -> i64 {
        match *self {
            Self::Running { total_duration, .. } | Self::Paused { total_duration, .. } => {
                total_duration
            }
        }
    }

    /// Remaining time at `now_ms`; may be negative for an expired running timer
    pub fn remaining_at(&self, now_ms: i64) -> i64 {
        match *self {
            Self::Running { end_date, .. } => end_date.saturating_sub(now_ms),
            Self::Paused { remaining, .. } => remaining,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    /// Enforce the record invariants on a freshly decoded value.
    ///
    /// A non-positive total makes the record unusable. A negative paused
    /// remaining is clamped rather than rejected.
    pub fn validated(self) -> Option<Self> {
        if self.total_duration() <= 0 {
            return None;
        }
        match self {
            Self::Paused { remaining, total_duration } => Some(Self::paused(remaining, total_duration)),
            running => Some(running),
        }
    }
}

/// Fraction of the countdown left, clamped to `[0, 1]`
pub fn progress_fraction(remaining_ms: i64, total_ms: i64) -> f64 {
    if total_ms <= 0 {
        return 0.0;
    }
    (remaining_ms as f64 / total_ms as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn running_record_uses_wire_field_names() {
        let state = TimerState::running(1_000, 60_000, 60_000);
        let value = serde_json::to_value(state).unwrap();
        assert_eq!(
            value,
            json!({"status": "running", "endDate": 61_000, "totalDuration": 60_000})
        );
    }

    #[test]
    fn paused_record_uses_wire_field_names() {
        let value = serde_json::to_value(TimerState::paused(5_000, 60_000)).unwrap();
        assert_eq!(
            value,
            json!({"status": "paused", "remaining": 5_000, "totalDuration": 60_000})
        );
    }

    #[test]
    fn running_without_end_date_does_not_parse() {
        let raw = r#"{"status":"running","remaining":10,"totalDuration":60000}"#;
        assert!(serde_json::from_str::<TimerState>(raw).is_err());
    }

    #[test]
    fn validation_rejects_non_positive_total() {
        let state = TimerState::Running { end_date: 10, total_duration: 0 };
        assert_eq!(state.validated(), None);
    }

    #[test]
    fn validation_clamps_negative_paused_remaining() {
        let state = TimerState::Paused { remaining: -40, total_duration: 1_000 };
        assert_eq!(state.validated(), Some(TimerState::Paused { remaining: 0, total_duration: 1_000 }));
    }

    #[test]
    fn remaining_is_derived_from_end_date() {
        let state = TimerState::running(0, 1_000, 1_000);
        assert_eq!(state.remaining_at(400), 600);
        assert_eq!(state.remaining_at(1_500), -500);
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(progress_fraction(50_000, 60_000), 50_000.0 / 60_000.0);
        assert_eq!(progress_fraction(-1, 60_000), 0.0);
        assert_eq!(progress_fraction(70_000, 60_000), 1.0);
        assert_eq!(progress_fraction(10, 0), 0.0);
    }
}
