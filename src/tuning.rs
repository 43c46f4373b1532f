//! Data-driven difficulty curve
//!
//! A pure function of the level number. All randomness lives in level
//! construction, never here, so the same level always gets the same
//! parameters.

use serde::{Deserialize, Serialize};

/// Difficulty parameters for one level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelTuning {
    /// Number of water lanes (8..=12)
    pub lane_count: u32,
    /// Base platform speed in px per tick; lanes add a small stagger on top
    pub base_speed: f32,
    /// Platforms initially generated per lane (coverage may add extras)
    pub platforms_per_lane: u32,
    /// Probability that a log carries a crocodile
    pub hazard_chance: f32,
    /// Number of flies roaming the water area
    pub pickup_count: u32,
}

impl LevelTuning {
    /// Difficulty for a level. Harder each level: faster lanes, more
    /// crocodiles, slightly fewer platforms, more flies.
    pub fn for_level(level: u32) -> Self {
        let level = level.max(1);
        Self {
            lane_count: 8 + (level / 2).min(4),
            base_speed: 1.8 + 0.25 * (level - 1) as f32,
            platforms_per_lane: 6u32.saturating_sub(level / 3).max(3),
            hazard_chance: (0.10 + 0.04 * (level - 1) as f32).min(0.45),
            pickup_count: (2 + level / 2).min(6),
        }
    }

    /// Fly roam speed for a level, px per tick
    pub fn pickup_speed(level: u32) -> f32 {
        1.0 + 0.25 * (level.max(1) - 1) as f32
    }

    /// Reject structurally invalid tuning at level-build time. A zero-lane
    /// or stationary level is a programming defect, not a runtime
    /// condition the simulation should try to survive.
    pub fn validate(&self) {
        assert!(self.lane_count >= 1, "tuning: lane_count must be >= 1");
        assert!(self.base_speed > 0.0, "tuning: base_speed must be positive");
        assert!(
            self.platforms_per_lane >= 1,
            "tuning: platforms_per_lane must be >= 1"
        );
        assert!(
            (0.0..=1.0).contains(&self.hazard_chance),
            "tuning: hazard_chance must be in [0, 1]"
        );
    }
}
