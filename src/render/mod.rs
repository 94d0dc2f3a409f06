//! Rendering collaborators
//!
//! The engine owns no presentation logic. It reports formatted time, ring
//! progress, screen changes and completion through [`RenderAdapter`].

pub mod channel;
pub mod recording;
pub mod terminal;

use serde::{Deserialize, Serialize};

pub use channel::{ChannelRenderer, DisplayFrame};
pub use recording::{RecordingRenderer, RenderCall};
pub use terminal::TerminalRenderer;

/// Which presentation the timer is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Setup,
    Running,
    Done,
}

/// Receives everything the user should see
pub trait RenderAdapter: Send + Sync {
    fn display_time(&self, formatted: &str);
    /// `fraction` is in `[0, 1]`; 1 is a full ring
    fn set_ring_progress(&self, fraction: f64);
    fn show_screen(&self, screen: Screen);
    /// Fired once per completed countdown
    fn signal_completion(&self);
}
