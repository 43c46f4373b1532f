//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, fixed nominal rate
//! - Seeded RNG only
//! - Stable iteration order (lanes ascending, platforms in lane order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod lanes;
pub mod rect;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{find_support, overlap_area};
pub use rect::Rect;
pub use snapshot::RenderSnapshot;
pub use state::{Frog, GameEvent, GameState, Hazard, Lane, Pickup, Platform, PlatformKind};
pub use tick::{HopIntent, TickInput, build_level, tick};
