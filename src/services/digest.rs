//! Notification digests
//!
//! Notifications raised during focus are queued and delivered together at
//! the digest time. Items from the always-allow list come through at once,
//! and so do urgent items while the urgent lane is open.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::ServiceError, state::FocusSettings};

/// Times a digest can be scheduled for
pub const DIGEST_TIMES: [&str; 3] = ["10:30", "14:30", "16:30"];

/// Sources and tags that are never held for a digest
pub const ALWAYS_ALLOW: [&str; 3] = ["@manager", "#incident", "Calendar invites"];

const COLLAPSED_FYI: &str = "Collapsed • tap to expand";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestFormat {
    #[default]
    Bullets,
    Checklist,
    Audio,
}

/// Digest sections, in delivery order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Urgent,
    Decisions,
    Fyi,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Urgent, Section::Decisions, Section::Fyi];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Urgent => "Urgent",
            Section::Decisions => "Decisions",
            Section::Fyi => "FYI",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Channel, sender or feed the item came from
    pub source: String,
    pub text: String,
    pub section: Section,
}

impl Notification {
    pub fn new(source: &str, text: &str, section: Section) -> Self {
        Self {
            source: source.to_string(),
            text: text.to_string(),
            section,
        }
    }

    /// Matches the always-allow list by source or by a tag in the text
    pub fn always_allowed(&self) -> bool {
        ALWAYS_ALLOW
            .iter()
            .any(|tag| self.source == *tag || self.text.contains(tag))
    }
}

/// What happened to a routed notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Now,
    Queued,
}

/// Notifications held for the next delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Digest {
    delivery_time: NaiveTime,
    pub format: DigestFormat,
    urgent_lane: bool,
    queued: Vec<Notification>,
}

impl Digest {
    /// An empty digest using the settings' delivery time and urgent lane
    pub fn new(settings: &FocusSettings) -> Result<Self, ServiceError> {
        Ok(Self {
            delivery_time: parse_time(&settings.digest_time)?,
            format: DigestFormat::default(),
            urgent_lane: settings.urgent_lane,
            queued: Vec::new(),
        })
    }

    pub fn delivery_time(&self) -> String {
        self.delivery_time.format("%H:%M").to_string()
    }

    /// Deliver a notification now or hold it for the digest
    pub fn route(&mut self, notification: Notification) -> Delivery {
        if notification.always_allowed() {
            debug!("Always-allow item from {} delivered now", notification.source);
            return Delivery::Now;
        }
        if self.urgent_lane && notification.section == Section::Urgent {
            debug!("Urgent item from {} took the urgent lane", notification.source);
            return Delivery::Now;
        }

        self.queued.push(notification);
        Delivery::Queued
    }

    pub fn len(&self) -> usize {
        self.queued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    pub fn section(&self, section: Section) -> impl Iterator<Item = &Notification> + '_ {
        self.queued.iter().filter(move |n| n.section == section)
    }

    /// Rendered digest. FYI items stay collapsed unless `expand_fyi` is set.
    pub fn lines(&self, expand_fyi: bool) -> Vec<String> {
        let mut lines = vec![format!("Digest at {}", self.delivery_time())];

        for section in Section::ALL {
            let items: Vec<&Notification> = self.section(section).collect();
            if items.is_empty() {
                continue;
            }

            if section == Section::Fyi {
                lines.push(format!("{} ({})", section.title(), items.len()));
                if !expand_fyi {
                    lines.push(COLLAPSED_FYI.to_string());
                    continue;
                }
            } else {
                lines.push(section.title().to_string());
            }
            lines.extend(items.iter().map(|n| format!("• {}", n.text)));
        }

        lines
    }

    /// Hand over the queued items, leaving the digest empty
    pub fn deliver(&mut self) -> Vec<Notification> {
        debug!("Delivering digest of {} items", self.queued.len());
        let mut delivered = std::mem::take(&mut self.queued);
        delivered.sort_by_key(|n| n.section);
        delivered
    }
}

/// The first digest slot after `now`, or `None` once the day's last one has passed
pub fn next_delivery(now: NaiveTime) -> Option<NaiveTime> {
    DIGEST_TIMES
        .iter()
        .filter_map(|t| parse_time(t).ok())
        .find(|slot| *slot > now)
}

fn parse_time(value: &str) -> Result<NaiveTime, ServiceError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| ServiceError::InvalidDigestTime(value.to_string()))
}

/// A morning's worth of notifications for the preview
pub fn sample_notifications() -> Vec<Notification> {
    let mut items = vec![
        Notification::new("Slack", "@you: approve PRD by 12:00", Section::Urgent),
        Notification::new("Slack", "@manager: 1:1 moved to 15:00", Section::Decisions),
        Notification::new("Email", "Choose option B for onboarding copy", Section::Decisions),
    ];
    items.extend(
        [
            "Design review notes posted",
            "Sprint board updated",
            "New comments on the Q3 roadmap",
            "Lunch & learn on Thursday",
            "Office plants get watered at 14:00",
            "Release 1.8 shipped to staging",
            "Team wiki: async templates refreshed",
        ]
        .iter()
        .map(|text| Notification::new("Email", text, Section::Fyi)),
    );
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest(urgent_lane: bool) -> Digest {
        let settings = FocusSettings { urgent_lane, ..FocusSettings::default() };
        Digest::new(&settings).unwrap()
    }

    #[test]
    fn urgent_items_skip_the_digest_only_with_the_urgent_lane() {
        let urgent = Notification::new("Slack", "@you: approve PRD by 12:00", Section::Urgent);

        let mut open = digest(true);
        assert_eq!(open.route(urgent.clone()), Delivery::Now);
        assert!(open.is_empty());

        let mut closed = digest(false);
        assert_eq!(closed.route(urgent), Delivery::Queued);
        assert_eq!(closed.section(Section::Urgent).count(), 1);
    }

    #[test]
    fn always_allow_list_bypasses_the_digest() {
        let mut digest = digest(false);
        for item in [
            Notification::new("Slack", "@manager: quick question", Section::Fyi),
            Notification::new("PagerDuty", "#incident payments latency", Section::Fyi),
            Notification::new("Calendar invites", "Retro on Friday", Section::Decisions),
        ] {
            assert_eq!(digest.route(item), Delivery::Now);
        }
        assert!(digest.is_empty());
    }

    #[test]
    fn sample_preview_matches_the_settings_panel() {
        let mut digest = digest(false);
        for item in sample_notifications() {
            digest.route(item);
        }

        assert_eq!(
            digest.lines(false),
            vec![
                "Digest at 10:30",
                "Urgent",
                "• @you: approve PRD by 12:00",
                "Decisions",
                "• Choose option B for onboarding copy",
                "FYI (7)",
                "Collapsed • tap to expand",
            ]
        );
        assert_eq!(digest.lines(true).len(), 6 + 7);
    }

    #[test]
    fn deliver_empties_the_queue_in_section_order() {
        let mut digest = digest(false);
        digest.route(Notification::new("Email", "fyi", Section::Fyi));
        digest.route(Notification::new("Slack", "urgent", Section::Urgent));

        let delivered = digest.deliver();
        assert_eq!(delivered[0].section, Section::Urgent);
        assert_eq!(delivered[1].section, Section::Fyi);
        assert!(digest.is_empty());
    }

    #[test]
    fn digest_time_must_be_a_clock_time() {
        let settings = FocusSettings {
            digest_time: "25:00".to_string(),
            ..FocusSettings::default()
        };
        assert_eq!(
            Digest::new(&settings).unwrap_err(),
            ServiceError::InvalidDigestTime("25:00".to_string())
        );
    }

    #[test]
    fn next_delivery_picks_the_following_slot() {
        let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        assert_eq!(next_delivery(at(9, 0)), Some(at(10, 30)));
        assert_eq!(next_delivery(at(10, 30)), Some(at(14, 30)));
        assert_eq!(next_delivery(at(15, 0)), Some(at(16, 30)));
        assert_eq!(next_delivery(at(17, 0)), None);
    }
}
