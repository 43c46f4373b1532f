//! Read-only render contract
//!
//! A presentation collaborator draws each frame from this snapshot
//! without touching simulation internals. It is serializable so it can
//! also cross a process or wire boundary.

use serde::Serialize;

use super::rect::Rect;
use super::state::{GameState, PlatformKind};

#[derive(Debug, Clone, Serialize)]
pub struct PlatformView {
    pub lane_id: u32,
    pub kind: PlatformKind,
    pub rect: Rect,
}

#[derive(Debug, Clone, Serialize)]
pub struct HazardView {
    pub rect: Rect,
}

#[derive(Debug, Clone, Serialize)]
pub struct PickupView {
    pub x: f32,
    pub y: f32,
    pub radius: i32,
    /// Radians from screen-up, for sprite rotation
    pub facing: f32,
}

/// Everything needed to draw one frame plus the HUD
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    pub safe_top: Rect,
    pub safe_bottom: Rect,
    pub water: Rect,
    pub frog: Rect,
    pub platforms: Vec<PlatformView>,
    pub hazards: Vec<HazardView>,
    pub pickups: Vec<PickupView>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            score: state.score,
            level: state.level,
            lives: state.lives,
            safe_top: state.safe_top,
            safe_bottom: state.safe_bottom,
            water: state.water,
            frog: state.frog.rect,
            platforms: state
                .lanes
                .iter()
                .flat_map(|lane| lane.platforms.iter())
                .map(|p| PlatformView {
                    lane_id: p.lane_id,
                    kind: p.kind,
                    rect: p.rect,
                })
                .collect(),
            hazards: state
                .hazards
                .iter()
                .map(|c| HazardView { rect: c.rect })
                .collect(),
            pickups: state
                .pickups
                .iter()
                .map(|fly| PickupView {
                    x: fly.pos.x,
                    y: fly.pos.y,
                    radius: fly.radius,
                    facing: fly.facing,
                })
                .collect(),
        }
    }
}
