//! Growth visual driven by focus progress
//!
//! A stem with three leaves that grows with percent complete. Dimensions are
//! in the units of a 220x140 viewport whose soil line sits at y = 104.

use serde::{Deserialize, Serialize};

const STEM_BASE: u32 = 20;
const STEM_GROWTH: u32 = 80;
const LEAF_BASE: u32 = 8;
const LEAF_GROWTH: u32 = 16;
const SOIL_Y: u32 = 104;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthVisual {
    pub percent: u8,
    /// 20 at 0% up to 100 at 100%
    pub stem_height: u32,
    /// 8 at 0% up to 24 at 100%
    pub leaf_radius: u32,
    pub left_leaf_radius: u32,
    pub right_leaf_radius: u32,
    /// Horizontal distance of the side leaves from the stem
    pub side_leaf_offset: u32,
}

impl GrowthVisual {
    /// Map percent complete onto visual dimensions. Values above 100 clamp.
    pub fn from_percent(percent: u8) -> Self {
        let percent = percent.min(100);
        let stem_height = STEM_BASE + scale(percent, STEM_GROWTH);
        let leaf_radius = LEAF_BASE + scale(percent, LEAF_GROWTH);

        Self {
            percent,
            stem_height,
            leaf_radius,
            left_leaf_radius: leaf_radius.saturating_sub(4).max(6),
            right_leaf_radius: leaf_radius.saturating_sub(6).max(5),
            side_leaf_offset: (leaf_radius / 2).max(6),
        }
    }

    /// y coordinate of the stem top (and crown leaf centre)
    pub fn crown_y(&self) -> u32 {
        SOIL_Y - self.stem_height
    }

    /// Short accessible label for the visual
    pub fn label(&self) -> String {
        format!("Focus growth visual {}% complete", self.percent)
    }
}

/// `round(percent / 100 * span)`, rounding halves up
fn scale(percent: u8, span: u32) -> u32 {
    (u32::from(percent) * span * 2 + 100) / 200
}
