//! Workplace adjustment requests and their approval status

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ServiceError;

/// What the adjustment scheme offers
pub const CATALOGUE: [&str; 3] = [
    "Assistive tech stipend • up to £300",
    "Quiet Pods & Library zones",
    "Adjusted hours & meeting-free blocks",
];

pub const SLA_NOTE: &str = "Policy-backed guidance with citations; typical SLA 5–10 business days.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Need {
    NoiseReductionHeadset,
    ScreenFilter,
    QuietWorkspaceAllocation,
}

impl Need {
    pub const ALL: [Need; 3] = [
        Need::NoiseReductionHeadset,
        Need::ScreenFilter,
        Need::QuietWorkspaceAllocation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Need::NoiseReductionHeadset => "Noise reduction headset",
            Need::ScreenFilter => "Screen filter",
            Need::QuietWorkspaceAllocation => "Quiet workspace allocation",
        }
    }

    fn short_name(&self) -> &'static str {
        match self {
            Need::NoiseReductionHeadset => "headset",
            Need::ScreenFilter => "screen-filter",
            Need::QuietWorkspaceAllocation => "quiet-workspace",
        }
    }
}

impl fmt::Display for Need {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts the short name (`headset`) or the full label, case-insensitively
impl FromStr for Need {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Need::ALL
            .into_iter()
            .find(|need| need.short_name() == wanted || need.label().to_lowercase() == wanted)
            .ok_or_else(|| ServiceError::UnknownNeed(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    PendingManager,
    Approved,
}

impl ApprovalStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApprovalStatus::PendingManager => "Pending manager",
            ApprovalStatus::Approved => "Approved",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentRequest {
    pub need: Need,
    /// Plain-language reason, as typed
    pub reason: String,
    pub status: ApprovalStatus,
    pub submitted_at: DateTime<Utc>,
}

impl AdjustmentRequest {
    /// A new request waiting on the manager. The reason must not be blank.
    pub fn new(need: Need, reason: &str) -> Result<Self, ServiceError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ServiceError::MissingReason);
        }
        Ok(Self {
            need,
            reason: reason.to_string(),
            status: ApprovalStatus::PendingManager,
            submitted_at: Utc::now(),
        })
    }

    /// One tracker row, e.g. `Screen filter • Pending manager`
    pub fn status_line(&self) -> String {
        format!("{} • {}", self.need, self.status.label())
    }
}

/// Submitted requests in submission order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdjustmentTracker {
    requests: Vec<AdjustmentRequest>,
}

impl AdjustmentTracker {
    /// A tracker holding one pending and one approved request
    pub fn sample() -> Self {
        let mut tracker = Self::default();
        tracker.requests.push(AdjustmentRequest {
            need: Need::NoiseReductionHeadset,
            reason: "Open-plan noise makes deep work hard".to_string(),
            status: ApprovalStatus::PendingManager,
            submitted_at: Utc::now(),
        });
        tracker.requests.push(AdjustmentRequest {
            need: Need::QuietWorkspaceAllocation,
            reason: "Helps with sensory overload during analysis".to_string(),
            status: ApprovalStatus::Approved,
            submitted_at: Utc::now(),
        });
        tracker
    }

    pub fn submit(&mut self, need: Need, reason: &str) -> Result<&AdjustmentRequest, ServiceError> {
        let request = AdjustmentRequest::new(need, reason)?;
        info!("Adjustment requested: {}", request.need);
        self.requests.push(request);
        Ok(&self.requests[self.requests.len() - 1])
    }

    /// Approve the oldest pending request for `need`. Returns whether one was found.
    pub fn approve(&mut self, need: Need) -> bool {
        let pending = self
            .requests
            .iter_mut()
            .find(|r| r.need == need && r.status == ApprovalStatus::PendingManager);
        match pending {
            Some(request) => {
                request.status = ApprovalStatus::Approved;
                debug!("Adjustment approved: {}", need);
                true
            }
            None => false,
        }
    }

    pub fn requests(&self) -> &[AdjustmentRequest] {
        &self.requests
    }

    pub fn status_lines(&self) -> Vec<String> {
        self.requests.iter().map(AdjustmentRequest::status_line).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_requests_wait_for_the_manager() {
        let request =
            AdjustmentRequest::new(Need::ScreenFilter, "  Glare causes headaches ").unwrap();
        assert_eq!(request.status, ApprovalStatus::PendingManager);
        assert_eq!(request.reason, "Glare causes headaches");
        assert_eq!(request.status_line(), "Screen filter • Pending manager");
    }

    #[test]
    fn blank_reason_is_rejected() {
        assert_eq!(
            AdjustmentRequest::new(Need::ScreenFilter, "   ").unwrap_err(),
            ServiceError::MissingReason
        );
    }

    #[test]
    fn sample_tracker_shows_both_statuses() {
        assert_eq!(
            AdjustmentTracker::sample().status_lines(),
            vec![
                "Noise reduction headset • Pending manager",
                "Quiet workspace allocation • Approved",
            ]
        );
    }

    #[test]
    fn approve_updates_the_oldest_pending_request() {
        let mut tracker = AdjustmentTracker::default();
        tracker.submit(Need::ScreenFilter, "first").unwrap();
        tracker.submit(Need::ScreenFilter, "second").unwrap();

        assert!(tracker.approve(Need::ScreenFilter));
        assert_eq!(tracker.requests()[0].status, ApprovalStatus::Approved);
        assert_eq!(tracker.requests()[1].status, ApprovalStatus::PendingManager);
        assert!(!tracker.approve(Need::NoiseReductionHeadset));
    }

    #[test]
    fn needs_parse_from_short_names_and_labels() {
        assert_eq!("headset".parse::<Need>().unwrap(), Need::NoiseReductionHeadset);
        assert_eq!(
            "Quiet workspace allocation".parse::<Need>().unwrap(),
            Need::QuietWorkspaceAllocation
        );
        assert_eq!(
            "standing desk".parse::<Need>().unwrap_err(),
            ServiceError::UnknownNeed("standing desk".to_string())
        );
    }

    #[test]
    fn catalogue_copy_is_exact() {
        assert_eq!(CATALOGUE[0], "Assistive tech stipend • up to £300");
        assert!(SLA_NOTE.contains("5\u{2013}10 business days"));
    }
}
