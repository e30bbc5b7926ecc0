//! Focus session view structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{state::Progress, utils::format_mmss};
use super::GrowthVisual;

const BAR_WIDTH: usize = 30;

/// Everything a presentation layer needs to draw one tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusView {
    pub mm: String,
    pub ss: String,
    pub percent: u8,
    pub remaining_seconds: u64,
    pub growth: GrowthVisual,
    pub timestamp: DateTime<Utc>,
}

impl FocusView {
    /// Build a view from an observer snapshot
    pub fn from_progress(progress: &Progress) -> Self {
        let (mm, ss) = format_mmss(progress.remaining_seconds);
        Self {
            mm,
            ss,
            percent: progress.percent_complete,
            remaining_seconds: progress.remaining_seconds,
            growth: GrowthVisual::from_percent(progress.percent_complete),
            timestamp: Utc::now(),
        }
    }

    /// `MM:SS`
    pub fn clock(&self) -> String {
        format!("{}:{}", self.mm, self.ss)
    }

    /// One-line terminal rendering with a progress bar
    pub fn render_line(&self) -> String {
        let filled = usize::from(self.percent.min(100)) * BAR_WIDTH / 100;
        format!(
            "{} remaining [{}{}] {:>3}%",
            self.clock(),
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled),
            self.percent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(elapsed: u64, duration: u64) -> Progress {
        Progress {
            elapsed_seconds: elapsed,
            remaining_seconds: duration - elapsed,
            percent_complete: crate::state::percent_complete(elapsed, duration),
            duration_seconds: duration,
        }
    }

    #[test]
    fn view_formats_remaining_time() {
        let view = FocusView::from_progress(&progress(1, 1500));
        assert_eq!(view.clock(), "24:59");
        assert_eq!(view.percent, 0);
        assert_eq!(view.growth, GrowthVisual::from_percent(0));
    }

    #[test]
    fn finished_view_has_full_bar() {
        let view = FocusView::from_progress(&progress(1500, 1500));
        assert_eq!(view.clock(), "00:00");
        let line = view.render_line();
        assert!(line.starts_with("00:00 remaining ["));
        assert!(line.contains(&"#".repeat(BAR_WIDTH)));
        assert!(line.ends_with("100%"));
    }

    #[test]
    fn half_way_fills_half_the_bar() {
        let view = FocusView::from_progress(&progress(750, 1500));
        let line = view.render_line();
        assert_eq!(line.matches('#').count(), BAR_WIDTH / 2);
        assert_eq!(line.matches('-').count(), BAR_WIDTH / 2);
    }

    #[test]
    fn serializes_for_json_output() {
        let view = FocusView::from_progress(&progress(65, 130));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["mm"], "01");
        assert_eq!(json["ss"], "05");
        assert_eq!(json["percent"], 50);
        assert_eq!(json["growth"]["stem_height"], 60);
    }
}
