//! Early-warning wellbeing plan

use serde::{Deserialize, Serialize};

use crate::state::FocusSettings;

/// Meeting hours in a day at which the plan is offered
pub const MEETING_HOURS_LIMIT: u32 = 6;
/// Missed focus blocks at which the plan is offered
pub const MISSED_BLOCKS_LIMIT: u32 = 2;

pub const MICRO_SUPPORTS: [&str; 3] = [
    "Initiation prompt (2 min)",
    "Noise coping card",
    "Plain-language script: ask for quiet room",
];

pub const APPROVAL_NOTE: &str = "Agent acts only with your approval; routes to EAP/HR when needed.";

/// Workload signals gathered over the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signals {
    pub meeting_hours: u32,
    pub missed_focus_blocks: u32,
    pub energy_down: bool,
}

impl Default for Signals {
    fn default() -> Self {
        Self {
            meeting_hours: 7,
            missed_focus_blocks: 3,
            energy_down: true,
        }
    }
}

impl Signals {
    pub fn summary(&self) -> String {
        let mut parts = vec![
            format!("{}h meetings", self.meeting_hours),
            format!("{} focus blocks missed", self.missed_focus_blocks),
        ];
        if self.energy_down {
            parts.push("energy down".to_string());
        }
        format!("Signals: {}", parts.join(" • "))
    }

    /// Any one signal over its limit is enough
    pub fn needs_attention(&self) -> bool {
        self.meeting_hours >= MEETING_HOURS_LIMIT
            || self.missed_focus_blocks >= MISSED_BLOCKS_LIMIT
            || self.energy_down
    }
}

/// Signals plus the plan offered when they cross a limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarlyWarning {
    pub signals: Signals,
    pub plan: Option<String>,
}

impl EarlyWarning {
    /// The plan books the room from `settings`
    pub fn assess(signals: Signals, settings: &FocusSettings) -> Self {
        let plan = signals.needs_attention().then(|| {
            format!(
                "Plan: move Fri stand-up to async; book {}; start 5-min reset.",
                settings.room
            )
        });
        Self { signals, plan }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.signals.summary()];
        lines.extend(self.plan.clone());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_signals_offer_a_plan_for_the_booked_room() {
        let settings = FocusSettings {
            room: "Library Desk 3F".to_string(),
            ..FocusSettings::default()
        };
        let warning = EarlyWarning::assess(Signals::default(), &settings);
        assert_eq!(
            warning.lines(),
            vec![
                "Signals: 7h meetings • 3 focus blocks missed • energy down",
                "Plan: move Fri stand-up to async; book Library Desk 3F; start 5-min reset.",
            ]
        );
    }

    #[test]
    fn calm_day_has_no_plan() {
        let signals = Signals { meeting_hours: 2, missed_focus_blocks: 0, energy_down: false };
        let warning = EarlyWarning::assess(signals, &FocusSettings::default());
        assert_eq!(warning.plan, None);
        assert_eq!(warning.lines(), vec!["Signals: 2h meetings • 0 focus blocks missed"]);
    }

    #[test]
    fn each_signal_alone_can_trigger_the_plan() {
        let calm = Signals { meeting_hours: 0, missed_focus_blocks: 0, energy_down: false };
        assert!(!calm.needs_attention());
        assert!(Signals { meeting_hours: MEETING_HOURS_LIMIT, ..calm }.needs_attention());
        assert!(Signals { missed_focus_blocks: MISSED_BLOCKS_LIMIT, ..calm }.needs_attention());
        assert!(Signals { energy_down: true, ..calm }.needs_attention());
    }
}
