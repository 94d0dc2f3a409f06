//! Shared state of the HTTP control server

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::debug;

use crate::{
    engine::TimerEngine,
    render::DisplayFrame,
    utils::format_remaining,
};

/// Everything the request handlers need
pub struct AppState {
    /// The timer engine all operations go through
    pub engine: Arc<TimerEngine>,
    /// Latest frame published by the channel renderer
    pub frame_rx: watch::Receiver<DisplayFrame>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    pub fn new(
        engine: Arc<TimerEngine>,
        frame_rx: watch::Receiver<DisplayFrame>,
        port: u16,
        host: String,
    ) -> Self {
        Self {
            engine,
            frame_rx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Remember the most recent operation a client asked for
    pub fn record_action(&self, action: &str) {
        debug!("Recording action: {}", action);
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    pub fn latest_frame(&self) -> DisplayFrame {
        self.frame_rx.borrow().clone()
    }

    /// Server uptime in the same `H:MM:SS` form as the countdown
    pub fn get_uptime(&self) -> String {
        let elapsed = i64::try_from(self.start_time.elapsed().as_millis()).unwrap_or(i64::MAX);
        format_remaining(elapsed)
    }

    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
