//! Renderer that publishes the latest frame on a watch channel

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::{RenderAdapter, Screen};
use crate::utils::format_remaining;

/// Everything currently on screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayFrame {
    pub display: String,
    pub progress: f64,
    pub screen: Screen,
    /// Number of completion signals seen since startup
    pub completions: u64,
}

impl Default for DisplayFrame {
    fn default() -> Self {
        Self {
            display: format_remaining(0),
            progress: 1.0,
            screen: Screen::Setup,
            completions: 0,
        }
    }
}

/// Publishes each change as a new [`DisplayFrame`] for any number of readers
#[derive(Debug)]
pub struct ChannelRenderer {
    frame_tx: watch::Sender<DisplayFrame>,
}

impl ChannelRenderer {
    pub fn new() -> (Self, watch::Receiver<DisplayFrame>) {
        let (frame_tx, frame_rx) = watch::channel(DisplayFrame::default());
        (Self { frame_tx }, frame_rx)
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayFrame> {
        self.frame_tx.subscribe()
    }
}

impl RenderAdapter for ChannelRenderer {
    fn display_time(&self, formatted: &str) {
        self.frame_tx.send_modify(|frame| frame.display = formatted.to_string());
    }

    fn set_ring_progress(&self, fraction: f64) {
        self.frame_tx.send_modify(|frame| frame.progress = fraction);
    }

    fn show_screen(&self, screen: Screen) {
        self.frame_tx.send_modify(|frame| frame.screen = screen);
    }

    fn signal_completion(&self) {
        self.frame_tx.send_modify(|frame| frame.completions += 1);
    }
}
