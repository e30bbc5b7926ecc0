//! State management module
//!
//! Countdown state plus the explicitly-owned records (settings, chat history)
//! that a presentation layer borrows.

pub mod conversation;
pub mod settings;
pub mod timer_state;

// Re-export main types
pub use conversation::{Conversation, Message, Role};
pub use settings::FocusSettings;
pub use timer_state::{
    percent_complete, Phase, Progress, TickOutcome, TimerConfig, TimerState, Transition,
    DEFAULT_TICK_INTERVAL,
};
