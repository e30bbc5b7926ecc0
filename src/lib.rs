//! NEWRO focus - wellbeing focus sessions with an observable countdown
//!
//! This library provides the focus countdown timer with progress and
//! completion observers, the time formatting used to display it, and the
//! explicitly-owned records (settings, chat history, assistant strategy)
//! that a dashboard built on top of it consumes.

pub mod config;
pub mod display;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{ServiceError, TimerError};
pub use state::{FocusSettings, Progress, TimerConfig};
pub use tasks::{CountdownTimer, TimerSnapshot};
pub use utils::{format_mmss, shutdown_signal};
