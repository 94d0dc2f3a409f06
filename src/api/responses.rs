//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{render::DisplayFrame, state::TimerSnapshot};

/// API response structure for timer operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ApiResponse {
    pub fn new(status: &str, message: impl Into<String>, timer: TimerSnapshot) -> Self {
        Self {
            status: status.to_string(),
            message: message.into(),
            timestamp: Utc::now(),
            timer,
        }
    }

    /// The operation changed the timer
    pub fn ok(message: impl Into<String>, timer: TimerSnapshot) -> Self {
        Self::new("ok", message, timer)
    }

    /// The operation did not apply to the current state and changed nothing
    pub fn ignored(message: impl Into<String>, timer: TimerSnapshot) -> Self {
        Self::new("ignored", message, timer)
    }

    pub fn error(message: impl Into<String>, timer: TimerSnapshot) -> Self {
        Self::new("error", message, timer)
    }
}

/// Status response with the latest rendered frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub frame: DisplayFrame,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
