//! State management module
//! 
//! The persisted timer record, the read-only snapshot derived from it, and the
//! shared state of the HTTP control server.

pub mod app_state;
pub mod snapshot;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use snapshot::{TimerSnapshot, TimerStatus};
pub use timer_state::{progress_fraction, TimerState};
