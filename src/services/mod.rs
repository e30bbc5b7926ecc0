//! Assistant services module
//!
//! Stand-ins for the agentic backend: keyword-driven replies, notification
//! digests, adjustment requests, recaps and the wellbeing early warning.

pub mod adjustments;
pub mod assistant;
pub mod digest;
pub mod recap;
pub mod wellbeing;

// Re-export main types
pub use adjustments::{AdjustmentRequest, AdjustmentTracker, ApprovalStatus, Need};
pub use assistant::{
    draft_day_plan, Assistant, KeywordRule, ReplyContext, ReplyRule, SUGGESTED_PROMPTS,
};
pub use digest::{Delivery, Digest, DigestFormat, Notification, Section};
pub use recap::{ActionItem, Recap};
pub use wellbeing::{EarlyWarning, Signals};
