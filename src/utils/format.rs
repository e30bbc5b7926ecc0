//! Display formatting for countdown values

/// Split a count of remaining seconds into zero-padded `(minutes, seconds)`.
///
/// Both parts are at least two characters wide. Minutes are never truncated,
/// so a run longer than 99 minutes renders with three or more digits.
pub fn format_mmss(remaining_seconds: u64) -> (String, String) {
    let minutes = remaining_seconds / 60;
    let seconds = remaining_seconds % 60;
    (format!("{:02}", minutes), format!("{:02}", seconds))
}

/// Render remaining seconds as a `MM:SS` clock string
pub fn format_clock(remaining_seconds: u64) -> String {
    let (mm, ss) = format_mmss(remaining_seconds);
    format!("{}:{}", mm, ss)
}
