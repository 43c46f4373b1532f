//! Lane construction and platform motion
//!
//! A lane owns its platforms. Wrapped platforms re-enter behind the
//! lane's trailing edge, and a final sort-and-push pass keeps the lane
//! gap invariant even when several wraps land in the same tick.

use rand::Rng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

use super::rect::Rect;
use super::state::{Lane, Platform, PlatformKind};
use crate::consts::*;

/// Lane center rows, stacked evenly in the water area.
pub fn lane_centers(water: Rect, lane_count: u32) -> Vec<i32> {
    let lane_h = water.h as f32 / lane_count as f32;
    (0..lane_count)
        .map(|i| water.top() + (lane_h * (i as f32 + 0.5)) as i32)
        .collect()
}

/// Total length of a platform chain laid end-to-end with lane gaps.
fn chain_len(platforms: &[Platform]) -> i32 {
    if platforms.is_empty() {
        return 0;
    }
    platforms.iter().map(|p| p.rect.w).sum::<i32>() + LANE_GAP * (platforms.len() as i32 - 1)
}

/// Build one lane's platform chain at level-build time.
///
/// Generates a mix of logs and lily pads with kind-specific width ranges,
/// adds extras until the chain covers the playfield plus a buffer,
/// shuffles, lays the chain out from the entry edge with a random phase
/// and per-gap jitter, then resolves any accidental overlap.
pub fn build_lane(
    lane_id: u32,
    lane_y: i32,
    plat_h: i32,
    speed: f32,
    count: u32,
    width: i32,
    rng: &mut Pcg32,
    next_id: &mut u32,
) -> Lane {
    let spacing = width as f32 / count as f32;
    let max_w = (spacing - LANE_GAP as f32) as i32;

    let make_platform = |rng: &mut Pcg32, next_id: &mut u32| -> Platform {
        let kind = if rng.random::<f32>() < 0.6 {
            PlatformKind::Log
        } else {
            PlatformKind::Lilypad
        };
        let w = match kind {
            PlatformKind::Log => {
                let lo = 80.max((max_w as f32 * 0.50) as i32);
                let hi = 80.max(max_w);
                rng.random_range(lo..=hi)
            }
            PlatformKind::Lilypad => {
                let lo = 60.max((max_w as f32 * 0.35) as i32);
                let hi = 60.max((max_w as f32 * 0.75) as i32).max(lo);
                rng.random_range(lo..=hi)
            }
        };
        let id = *next_id;
        *next_id += 1;
        Platform::new(id, lane_id, lane_y, w, plat_h, speed, kind)
    };

    let mut platforms: Vec<Platform> =
        (0..count).map(|_| make_platform(rng, next_id)).collect();

    // If the chain is shorter than the playfield there would be a big
    // empty region until wrap cycles; pad it out, within a limit.
    let target = width + LANE_COVER_BUFFER;
    let mut extras = MAX_EXTRA_PLATFORMS;
    while chain_len(&platforms) < target && extras > 0 {
        platforms.push(make_platform(rng, next_id));
        extras -= 1;
    }

    platforms.shuffle(rng);

    // Lay the chain out from the movement side with a random phase so the
    // lane starts mid-cycle and looks populated immediately.
    let slack = (chain_len(&platforms) - width).max(0);
    if speed > 0.0 {
        let mut x_left = -rng.random_range(0..=slack) - 40;
        for p in &mut platforms {
            p.rect.set_left(x_left);
            x_left = p.rect.right() + LANE_GAP + rng.random_range(0..=JITTER_GAP);
        }
    } else {
        let mut x_right = width + rng.random_range(0..=slack) + 40;
        for p in &mut platforms {
            p.rect.set_right(x_right);
            x_right = p.rect.left() - LANE_GAP - rng.random_range(0..=JITTER_GAP);
        }
    }

    let mut lane = Lane {
        id: lane_id,
        y: lane_y,
        speed,
        platforms,
    };
    resolve_overlaps(&mut lane);
    lane
}

/// Advance one lane by one tick: move every platform, wrap the ones that
/// left the playfield, then restore lane ordering.
pub fn advance_lane(lane: &mut Lane, width: i32) {
    for p in &mut lane.platforms {
        p.advance();
    }

    for i in 0..lane.platforms.len() {
        if !lane.platforms[i].needs_wrap(width) {
            continue;
        }

        if lane.speed > 0.0 {
            // Moving right: re-enter on the left, behind the current leftmost.
            if let Some(leftmost) = lane.platforms.iter().map(|q| q.rect.left()).min() {
                lane.platforms[i].rect.set_right(leftmost - LANE_GAP);
            }
        } else {
            // Moving left: re-enter on the right, beyond the current rightmost.
            if let Some(rightmost) = lane.platforms.iter().map(|q| q.rect.right()).max() {
                lane.platforms[i].rect.set_left(rightmost + LANE_GAP);
            }
        }
    }

    // Multiple wraps can land in the same tick; one pass restores the
    // gap invariant.
    resolve_overlaps(lane);
}

/// Sort by left edge and push platforms rightward until every adjacent
/// pair keeps at least `LANE_GAP` of clearance.
pub fn resolve_overlaps(lane: &mut Lane) {
    lane.platforms.sort_by_key(|p| p.rect.left());
    for i in 1..lane.platforms.len() {
        let min_left = lane.platforms[i - 1].rect.right() + LANE_GAP;
        if lane.platforms[i].rect.left() < min_left {
            lane.platforms[i].rect.set_left(min_left);
        }
    }
}
