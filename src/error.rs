//! Error types for the focus timer and its services

/// Errors surfaced to callers of the countdown timer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    /// The run was configured with a value that cannot produce a countdown
    /// (zero duration, zero tick interval).
    #[error("invalid timer configuration: {0}")]
    InvalidConfiguration(String),

    /// The driver task is gone; the timer can no longer be controlled.
    #[error("timer driver has shut down")]
    Closed,
}

/// Errors from the digest and adjustment services.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// Digest times are 24-hour `HH:MM`
    #[error("invalid digest time {0:?}, expected HH:MM")]
    InvalidDigestTime(String),

    #[error("unknown adjustment need {0:?}")]
    UnknownNeed(String),

    /// Adjustment requests need a plain-language reason
    #[error("an adjustment request needs a reason")]
    MissingReason,
}
