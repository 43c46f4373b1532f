//! Pond Crossing - an arcade river-crossing game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, collisions, game state)
//! - `tuning`: Data-driven difficulty curve
//! - `settings`: Playfield configuration
//!
//! Rendering, sprite handling, input collection and windowing are external
//! collaborators: a front end samples input into a [`sim::TickInput`], calls
//! [`sim::tick`] once per frame, and draws from a [`sim::RenderSnapshot`].

pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::LevelTuning;

/// Game configuration constants
pub mod consts {
    /// Nominal frames per second; the simulation runs one tick per frame
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;

    /// Grid-ish hop sizes (the frog moves in discrete steps)
    pub const STEP_X: i32 = 50;
    pub const STEP_Y: i32 = 52;
    /// Continuous sideways speed while riding a platform, px per tick
    pub const WALK_SPEED: f32 = 3.2;

    /// Frog hitbox
    pub const FROG_W: i32 = 34;
    pub const FROG_H: i32 = 28;
    /// Ticks until the frog may hop again after a hop
    pub const HOP_COOLDOWN: u32 = 6;
    /// Ticks until the frog may hop again after a reset
    pub const RESPAWN_COOLDOWN: u32 = 10;

    /// Crocodile hitbox (sprites may be drawn larger; the hitbox stays tight)
    pub const CROC_W: i32 = 46;
    pub const CROC_H: i32 = 18;

    /// Fly bounding radius
    pub const FLY_RADIUS: i32 = 6;

    /// Distance past the playfield edge before a platform wraps
    pub const WRAP_MARGIN: i32 = 60;
    /// Minimum horizontal gap between platforms in the same lane
    pub const LANE_GAP: i32 = 32;
    /// Extra random spacing added between platforms at layout time
    pub const JITTER_GAP: i32 = 18;
    /// A lane's platform chain must cover the playfield width plus this
    /// buffer at build time, so the lane looks populated immediately
    pub const LANE_COVER_BUFFER: i32 = 240;
    /// Cap on extra platforms added to reach lane coverage
    pub const MAX_EXTRA_PLATFORMS: u32 = 6;

    /// Score for a hop that makes upward progress
    pub const HOP_SCORE: u64 = 5;
    /// Score for eating a fly
    pub const PICKUP_SCORE: u64 = 100;
}
