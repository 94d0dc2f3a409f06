//! Background tasks module
//! 
//! The poll loop that keeps the display in step with the stored timer, and
//! the recovery task that notices when the store changed behind our back.

pub mod poll_loop;
pub mod wake_up_recovery;

// Re-export main items
pub use poll_loop::PollLoop;
pub use wake_up_recovery::wake_up_recovery_task;
