//! Background tasks module
//!
//! This module contains the countdown driver that runs alongside the caller.

pub mod countdown;

// Re-export main types
pub use countdown::{CompletionObserver, CountdownTimer, ProgressObserver, TimerSnapshot};
