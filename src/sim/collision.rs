//! Overlap queries: support detection and hazard checks
//!
//! Everything here is a pure function of rects; the controller decides
//! what to do with the answers.

use super::rect::Rect;
use super::state::{Lane, Platform};

/// Intersection area of two rects, zero when they don't overlap.
pub fn overlap_area(a: Rect, b: Rect) -> i64 {
    a.intersection(b).area()
}

/// The platform bearing the frog's weight: the overlapping platform with
/// the largest intersection area.
///
/// Ties go to the first platform found. The scan order is lanes in
/// ascending id order, then each lane's storage order, both of which are
/// deterministic, so the tie-break is too.
pub fn find_support<'a>(frog_rect: Rect, lanes: &'a [Lane]) -> Option<&'a Platform> {
    let mut best: Option<&Platform> = None;
    let mut best_area = 0i64;
    for lane in lanes {
        for platform in &lane.platforms {
            if !frog_rect.overlaps(platform.rect) {
                continue;
            }
            let area = overlap_area(frog_rect, platform.rect);
            if area > best_area {
                best_area = area;
                best = Some(platform);
            }
        }
    }
    best
}
