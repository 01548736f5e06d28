//! Runtime primitives for SwipeDeck.
//!
//! Everything here is single-threaded and cooperative: the host owns the
//! event loop and hands frame times to whoever needs them.

pub mod collections;
pub mod platform;
pub mod scheduler;

pub use platform::{Clock, ManualClock, SystemClock};
pub use scheduler::{run_due, DueTasks, Scheduler, TaskId};
