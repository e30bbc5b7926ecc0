//! Focus session settings

use serde::{Deserialize, Serialize};

use crate::error::TimerError;
use super::TimerConfig;

/// Settings chosen on the focus setup panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSettings {
    /// Length of one focus block in minutes
    pub focus_minutes: u64,
    /// When queued notifications are delivered as a digest (HH:MM)
    pub digest_time: String,
    pub room: String,
    /// Environment preset applied to the room
    pub preset: String,
    /// Urgent messages bypass the digest
    pub urgent_lane: bool,
    /// Calm mode hides secondary panels
    pub calm: bool,
}

impl FocusSettings {
    /// Timer configuration for one focus block
    pub fn timer_config(&self) -> Result<TimerConfig, TimerError> {
        TimerConfig::from_minutes(self.focus_minutes)
    }

    /// Two-line summary shown above the timer
    pub fn summary(&self) -> [String; 2] {
        [
            format!("{} • {}", self.room, self.preset),
            format!("{} minutes • Digest at {}", self.focus_minutes, self.digest_time),
        ]
    }

    /// Hide `content` when calm mode is on
    pub fn unless_calm<T>(&self, content: T) -> Option<T> {
        if self.calm { None } else { Some(content) }
    }
}

impl Default for FocusSettings {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            digest_time: "10:30".to_string(),
            room: "Quiet Pod B".to_string(),
            preset: "Low light • 20°C • Noise mask".to_string(),
            urgent_lane: true,
            calm: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_a_pomodoro_in_the_quiet_pod() {
        let settings = FocusSettings::default();
        assert_eq!(settings.focus_minutes, 25);
        assert_eq!(settings.timer_config().unwrap().duration_seconds(), 1500);
        assert_eq!(
            settings.summary(),
            [
                "Quiet Pod B • Low light • 20°C • Noise mask".to_string(),
                "25 minutes • Digest at 10:30".to_string(),
            ]
        );
    }

    #[test]
    fn zero_minutes_is_rejected() {
        let settings = FocusSettings { focus_minutes: 0, ..FocusSettings::default() };
        assert!(matches!(settings.timer_config(), Err(TimerError::InvalidConfiguration(_))));
    }

    #[test]
    fn calm_mode_hides_optional_content() {
        let mut settings = FocusSettings::default();
        assert_eq!(settings.unless_calm("nudge"), None);
        settings.calm = false;
        assert_eq!(settings.unless_calm("nudge"), Some("nudge"));
    }
}
