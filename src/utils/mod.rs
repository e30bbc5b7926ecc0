//! Utility functions module
//!
//! Display formatting helpers and process signal handling.

pub mod format;
pub mod signals;

// Re-export main functions
pub use format::{format_clock, format_mmss};
pub use signals::shutdown_signal;
