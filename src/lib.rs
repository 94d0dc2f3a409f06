//! countdown-ring - a countdown timer that survives restarts
//! 
//! The timer state lives in a durable store as an absolute end time (or a
//! frozen remainder when paused), so the countdown is recomputed from the wall
//! clock on every tick and after every restart instead of being accumulated.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod render;
pub mod state;
pub mod storage;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use engine::{TimerEngine, TimerEvent, DEFAULT_CADENCE};
pub use render::{RenderAdapter, Screen};
pub use state::{AppState, TimerSnapshot, TimerState};
pub use storage::{FileStore, KeyValueStore, MemoryStore, PersistentState};
pub use utils::{format_remaining, Clock, DurationInput, ManualClock, SystemClock};
