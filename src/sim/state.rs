//! Entity types and game state
//!
//! Everything the simulation mutates lives here. The controller in
//! [`super::tick`] owns the single update pass per tick; nothing else
//! mutates these structs.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::settings::Settings;
use crate::tuning::LevelTuning;

/// What a platform is made of. Crocodiles ride logs only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    Log,
    Lilypad,
}

/// A moving platform in one water lane
#[derive(Debug, Clone, Copy)]
pub struct Platform {
    pub id: u32,
    pub lane_id: u32,
    pub kind: PlatformKind,
    pub rect: Rect,
    /// Signed speed in px per tick, constant for the platform's lifetime
    pub speed: f32,
    /// Integer displacement applied on the most recent tick
    pub last_dx: i32,
}

impl Platform {
    pub fn new(
        id: u32,
        lane_id: u32,
        lane_y: i32,
        w: i32,
        h: i32,
        speed: f32,
        kind: PlatformKind,
    ) -> Self {
        Self {
            id,
            lane_id,
            kind,
            rect: Rect::new(0, lane_y - h / 2, w, h),
            speed,
            last_dx: 0,
        }
    }

    /// Advance one tick. The displacement is truncated to whole pixels so
    /// riders track the platform exactly, with no rounding drift.
    pub fn advance(&mut self) {
        self.last_dx = self.speed as i32;
        self.rect.x += self.last_dx;
    }

    /// Platform has fully left the playfield on its exit side.
    pub fn needs_wrap(&self, width: i32) -> bool {
        if self.speed > 0.0 {
            self.rect.left() > width + WRAP_MARGIN
        } else {
            self.rect.right() < -WRAP_MARGIN
        }
    }
}

/// One horizontal row of the water area. All platforms in a lane share
/// one direction and speed.
#[derive(Debug, Clone)]
pub struct Lane {
    pub id: u32,
    pub y: i32,
    pub speed: f32,
    pub platforms: Vec<Platform>,
}

/// A crocodile riding a log. Its position is fully derived from the host
/// platform each tick; it has no physics of its own and no life beyond
/// its host's (both are rebuilt wholesale on level transitions).
#[derive(Debug, Clone)]
pub struct Hazard {
    /// Non-owning handle to the host platform
    pub platform_id: u32,
    pub offset_x: i32,
    pub rect: Rect,
}

impl Hazard {
    pub fn new(platform: &Platform) -> Self {
        let mut hazard = Self {
            platform_id: platform.id,
            offset_x: 0,
            rect: Rect::new(0, 0, CROC_W, CROC_H),
        };
        hazard.sync(platform);
        hazard
    }

    /// Recompute position from the host platform.
    pub fn sync(&mut self, platform: &Platform) {
        self.rect.set_center(
            platform.rect.center_x() + self.offset_x,
            platform.rect.center_y(),
        );
    }
}

/// A fly roaming the water area
#[derive(Debug, Clone)]
pub struct Pickup {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: i32,
    /// Facing angle in radians from screen-up, kept from the last tick
    /// the fly was actually moving
    pub facing: f32,
    /// Bounce region
    pub area: Rect,
}

impl Pickup {
    /// Spawn at a random interior position heading in a random direction.
    pub fn spawn(area: Rect, speed: f32, rng: &mut Pcg32) -> Self {
        let pos = Vec2::new(
            rng.random_range(area.left() as f32 + 10.0..area.right() as f32 - 10.0),
            rng.random_range(area.top() as f32 + 10.0..area.bottom() as f32 - 10.0),
        );
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        Self {
            pos,
            vel: Vec2::new(speed * angle.cos(), speed * angle.sin()),
            radius: FLY_RADIUS,
            facing: 0.0,
            area,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x as i32 - self.radius,
            self.pos.y as i32 - self.radius,
            self.radius * 2,
            self.radius * 2,
        )
    }

    /// Advance one tick: drift, reflect off the roam-region edges
    /// per axis, update facing.
    pub fn advance(&mut self) {
        self.pos += self.vel;

        let r = self.radius as f32;
        if self.pos.x < self.area.left() as f32 + r || self.pos.x > self.area.right() as f32 - r {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < self.area.top() as f32 + r || self.pos.y > self.area.bottom() as f32 - r {
            self.vel.y = -self.vel.y;
        }

        // Keep the last facing when velocity is negligible; the angle of a
        // zero vector is undefined.
        if self.vel.length_squared() > 1e-6 {
            self.facing = Vec2::NEG_Y
                .perp_dot(self.vel)
                .atan2(Vec2::NEG_Y.dot(self.vel));
        }
    }
}

/// The player's frog. One instance, reset across lives and levels,
/// never recreated.
#[derive(Debug, Clone)]
pub struct Frog {
    pub pos: Vec2,
    pub rect: Rect,
    hop_cooldown: u32,
}

impl Frog {
    pub fn new(start: Vec2) -> Self {
        let mut frog = Self {
            pos: start,
            rect: Rect::new(0, 0, FROG_W, FROG_H),
            hop_cooldown: 0,
        };
        frog.sync_rect();
        frog
    }

    /// Move back to the start position (life lost or level rebuild).
    pub fn reset(&mut self, start: Vec2) {
        self.pos = start;
        self.sync_rect();
        self.hop_cooldown = RESPAWN_COOLDOWN;
    }

    /// Round the continuous position into the hitbox.
    pub fn sync_rect(&mut self) {
        self.rect.set_center(self.pos.x as i32, self.pos.y as i32);
    }

    pub fn tick_cooldown(&mut self) {
        self.hop_cooldown = self.hop_cooldown.saturating_sub(1);
    }

    pub fn can_hop(&self) -> bool {
        self.hop_cooldown == 0
    }

    /// Apply a discrete hop and start the cooldown.
    pub fn hop(&mut self, dx: i32, dy: i32) {
        self.pos.x += dx as f32;
        self.pos.y += dy as f32;
        self.sync_rect();
        self.hop_cooldown = HOP_COOLDOWN;
    }
}

/// Lifecycle events a host may react to (HUD, audio cues). The core never
/// depends on their handling; they accumulate during a tick and are
/// drained by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    LevelRebuilt { level: u32, tuning: LevelTuning },
    LifeLost { lives_remaining: u32 },
    GameOver { level: u32, score: u64 },
    PickupCaptured { score: u64 },
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,

    // Run state
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    pub max_lives: u32,

    // Playfield geometry, fixed for the session
    pub width: i32,
    pub height: i32,
    pub safe_top: Rect,
    pub safe_bottom: Rect,
    pub water: Rect,
    pub start_pos: Vec2,

    // Entities
    pub frog: Frog,
    pub lanes: Vec<Lane>,
    pub hazards: Vec<Hazard>,
    pub pickups: Vec<Pickup>,

    /// Direction of the most recent horizontal input (+1 right, -1 left)
    pub last_horizontal_dir: i32,

    pub(crate) events: Vec<GameEvent>,
    pub(crate) next_id: u32,
}

impl GameState {
    /// Create a fresh session and build level 1.
    pub fn new(seed: u64, settings: &Settings) -> Self {
        assert!(
            settings.width > 0 && settings.height > settings.hud_height + 3 * STEP_Y,
            "settings: playfield too small for banks and water"
        );
        assert!(settings.max_lives >= 1, "settings: max_lives must be >= 1");

        let hud = settings.hud_height;
        let safe_top = Rect::new(0, hud, settings.width, STEP_Y);
        let safe_bottom = Rect::new(0, settings.height - STEP_Y, settings.width, STEP_Y);
        let water = Rect::new(
            0,
            hud + STEP_Y,
            settings.width,
            settings.height - (hud + 2 * STEP_Y),
        );
        let start_pos = Vec2::new(
            settings.width as f32 / 2.0,
            safe_bottom.center_y() as f32,
        );

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            score: 0,
            level: 1,
            lives: settings.max_lives,
            max_lives: settings.max_lives,
            width: settings.width,
            height: settings.height,
            safe_top,
            safe_bottom,
            water,
            start_pos,
            frog: Frog::new(start_pos),
            lanes: Vec::new(),
            hazards: Vec::new(),
            pickups: Vec::new(),
            last_horizontal_dir: 1,
            events: Vec::new(),
            next_id: 1,
        };
        super::tick::build_level(&mut state);
        state
    }

    /// Roam region for flies, inset from the water area.
    pub fn pickup_area(&self) -> Rect {
        self.water.inflate(-20, -20)
    }

    /// The frog counts as "in water" when its center is inside the water
    /// area, regardless of rect overlap with the banks.
    pub fn frog_in_water(&self) -> bool {
        let (cx, cy) = self.frog.rect.center();
        self.water.contains_point(cx, cy)
    }

    /// Look up a platform by id across all lanes.
    pub fn platform(&self, id: u32) -> Option<&Platform> {
        self.lanes
            .iter()
            .flat_map(|lane| lane.platforms.iter())
            .find(|p| p.id == id)
    }

    /// Take the events accumulated since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
