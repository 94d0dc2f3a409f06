//! Utility functions module
//! 
//! Formatting, time sources, input validation and signal handling shared by
//! the engine and the caller surfaces.

pub mod clock;
pub mod duration_input;
pub mod format;
pub mod signals;

// Re-export main items
pub use clock::{Clock, ManualClock, SystemClock};
pub use duration_input::DurationInput;
pub use format::format_remaining;
pub use signals::shutdown_signal;
