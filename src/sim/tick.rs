//! Per-frame simulation step
//!
//! The strict update order is the heart of the game: hop input, lanes,
//! hazards, pickups, support/carry/walk, hazard contact, pickup capture,
//! win check. Reordering any of these changes observable behavior — a
//! hazard synced before its lane moves would lag its host by a frame.

use glam::Vec2;
use rand::Rng;

use super::collision::find_support;
use super::lanes;
use super::state::{GameEvent, GameState, Hazard, Pickup, PlatformKind};
use crate::consts::*;
use crate::tuning::LevelTuning;

/// Input sampled for a single tick. The host edge-triggers `hop` and
/// samples the walk keys every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Discrete hop request
    pub hop: Option<HopIntent>,
    /// Held walk input (applies while riding a platform)
    pub walk_left: bool,
    pub walk_right: bool,
}

/// Directional hop requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HopIntent {
    Up,
    Down,
    Left,
    Right,
    /// Side jump in the last horizontal direction (jump button)
    Repeat,
}

/// Advance the game by one tick.
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    // 1. Discrete hop intent. Left/right while riding only steer the
    //    continuous walk; on land they hop.
    if let Some(intent) = input.hop {
        apply_hop_intent(state, intent);
    }

    state.frog.tick_cooldown();

    // 2. Platforms, lane by lane, so wrap re-entry can't overlap.
    for i in 0..state.lanes.len() {
        lanes::advance_lane(&mut state.lanes[i], state.width);
    }

    // 3. Hazards are derived from their hosts; must run after the lanes.
    sync_hazards(state);

    // 4. Pickups.
    for fly in &mut state.pickups {
        fly.advance();
    }

    // 5. In water the frog must be supported, and the support carries it.
    resolve_water(state, input);

    // 6. Crocodile contact.
    let frog_rect = state.frog.rect;
    if state.hazards.iter().any(|c| frog_rect.overlaps(c.rect)) {
        handle_death(state);
    }

    // 7. Flies: a captured fly is replaced in place at the same index,
    //    so the population never changes.
    let area = state.pickup_area();
    let fly_speed = LevelTuning::pickup_speed(state.level);
    for i in 0..state.pickups.len() {
        if state.frog.rect.overlaps(state.pickups[i].rect()) {
            state.score += PICKUP_SCORE;
            state.events.push(GameEvent::PickupCaptured { score: state.score });
            state.pickups[i] = Pickup::spawn(area, fly_speed, &mut state.rng);
        }
    }

    // 8. Far bank reached.
    if state.frog.rect.overlaps(state.safe_top) {
        handle_level_complete(state);
    }
}

fn apply_hop_intent(state: &mut GameState, intent: HopIntent) {
    match intent {
        HopIntent::Up => attempt_hop(state, 0, -STEP_Y),
        HopIntent::Down => attempt_hop(state, 0, STEP_Y),
        HopIntent::Left => {
            if current_support_exists(state) {
                state.last_horizontal_dir = -1;
            } else {
                attempt_hop(state, -STEP_X, 0);
            }
        }
        HopIntent::Right => {
            if current_support_exists(state) {
                state.last_horizontal_dir = 1;
            } else {
                attempt_hop(state, STEP_X, 0);
            }
        }
        HopIntent::Repeat => attempt_hop(state, state.last_horizontal_dir * STEP_X, 0),
    }
}

/// Is anything bearing the frog's weight right now? Always false on the
/// banks.
fn current_support_exists(state: &GameState) -> bool {
    state.frog_in_water() && find_support(state.frog.rect, &state.lanes).is_some()
}

fn attempt_hop(state: &mut GameState, dx: i32, dy: i32) {
    if !state.frog.can_hop() {
        return;
    }

    let prev_y = state.frog.pos.y;
    state.frog.hop(dx, dy);
    clamp_frog(state);

    if dx != 0 {
        state.last_horizontal_dir = if dx > 0 { 1 } else { -1 };
    }

    // Landing on a platform snaps the frog to its center so a partial
    // overlap can't desync the ride.
    if state.frog_in_water() {
        let landing = find_support(state.frog.rect, &state.lanes).map(|p| p.rect.center());
        if let Some((cx, cy)) = landing {
            state.frog.pos = Vec2::new(cx as f32, cy as f32);
            state.frog.sync_rect();
            clamp_frog(state);
        }
    }

    // Upward progress scores, including back-and-forth hops: intentional
    // arcade scoring.
    if state.frog.pos.y < prev_y {
        state.score += HOP_SCORE;
    }
}

/// Clamp the frog to the playfield (below the HUD strip).
fn clamp_frog(state: &mut GameState) {
    let half_w = FROG_W as f32 / 2.0;
    let half_h = FROG_H as f32 / 2.0;
    let frog = &mut state.frog;
    frog.pos.x = frog.pos.x.clamp(half_w, state.width as f32 - half_w);
    frog.pos.y = frog
        .pos
        .y
        .clamp(state.safe_top.top() as f32 + half_h, state.height as f32 - half_h);
    frog.sync_rect();
}

/// Vertical clamp only; the horizontal axis stays free so the
/// carried-off-screen rule can fire.
fn clamp_frog_y_only(state: &mut GameState) {
    let half_h = FROG_H as f32 / 2.0;
    let frog = &mut state.frog;
    frog.pos.y = frog
        .pos
        .y
        .clamp(state.safe_top.top() as f32 + half_h, state.height as f32 - half_h);
    frog.sync_rect();
}

fn frog_off_screen(state: &GameState) -> bool {
    state.frog.rect.right() < 0 || state.frog.rect.left() > state.width
}

/// Water rule: unsupported means death; supported means the platform's
/// integer displacement carries the frog, walking applies on top, and
/// being moved fully off either edge also means death.
fn resolve_water(state: &mut GameState, input: &TickInput) {
    if !state.frog_in_water() {
        return;
    }

    let carry = find_support(state.frog.rect, &state.lanes).map(|p| p.last_dx);
    let Some(carry_dx) = carry else {
        handle_death(state);
        return;
    };

    state.frog.pos.x += carry_dx as f32;
    state.frog.sync_rect();

    if frog_off_screen(state) {
        handle_death(state);
        return;
    }

    walk_while_riding(state, input);
    clamp_frog_y_only(state);
}

/// Continuous sideways walking while riding, independent of the hop
/// cooldown.
fn walk_while_riding(state: &mut GameState, input: &TickInput) {
    let mut dx = 0.0;
    if input.walk_left {
        dx -= WALK_SPEED;
        state.last_horizontal_dir = -1;
    }
    if input.walk_right {
        dx += WALK_SPEED;
        state.last_horizontal_dir = 1;
    }
    if dx == 0.0 {
        return;
    }

    state.frog.pos.x += dx;
    state.frog.sync_rect();

    // Walking off either edge while riding costs a life.
    if frog_off_screen(state) {
        handle_death(state);
        return;
    }

    clamp_frog_y_only(state);
}

/// Recompute each crocodile from its host platform. Hosts always exist:
/// hazards are rebuilt together with the lanes on every level build.
fn sync_hazards(state: &mut GameState) {
    for i in 0..state.hazards.len() {
        let host = state.platform(state.hazards[i].platform_id).copied();
        if let Some(host) = host {
            state.hazards[i].sync(&host);
        }
    }
}

/// Death transition: lose a life, reset the frog; out of lives restarts
/// the whole stage with fresh lives (score carries over).
fn handle_death(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::LifeLost {
        lives_remaining: state.lives,
    });

    if state.lives == 0 {
        log::info!(
            "Game over at level {} with score {}",
            state.level,
            state.score
        );
        state.events.push(GameEvent::GameOver {
            level: state.level,
            score: state.score,
        });
        build_level(state);
        return;
    }

    log::info!("Life lost, {} remaining", state.lives);
    let start = state.start_pos;
    state.frog.reset(start);
}

fn handle_level_complete(state: &mut GameState) {
    state.level += 1;
    log::info!("Level complete, advancing to {}", state.level);
    build_level(state);
}

/// Tear down and rebuild the stage for the current level: new lanes,
/// crocodiles and flies, lives restored, frog back at the start.
pub fn build_level(state: &mut GameState) {
    let tuning = LevelTuning::for_level(state.level);
    tuning.validate();

    state.lanes.clear();
    state.hazards.clear();
    state.pickups.clear();
    state.lives = state.max_lives;

    let mut rng = state.rng.clone();
    let mut next_id = state.next_id;

    let centers = lanes::lane_centers(state.water, tuning.lane_count);
    let lane_h = state.water.h / tuning.lane_count as i32;
    let plat_h = (lane_h - 10).clamp(26, 34);

    for (i, &lane_y) in centers.iter().enumerate() {
        let direction = if i % 2 == 0 { 1.0 } else { -1.0 };
        let speed = direction * (tuning.base_speed + 0.15 * (i % 3) as f32);
        let lane = lanes::build_lane(
            i as u32,
            lane_y,
            plat_h,
            speed,
            tuning.platforms_per_lane,
            state.width,
            &mut rng,
            &mut next_id,
        );

        // Crocodiles ride logs only.
        for platform in &lane.platforms {
            if platform.kind == PlatformKind::Log && rng.random::<f32>() < tuning.hazard_chance {
                state.hazards.push(Hazard::new(platform));
            }
        }
        state.lanes.push(lane);
    }

    let area = state.pickup_area();
    let fly_speed = LevelTuning::pickup_speed(state.level);
    for _ in 0..tuning.pickup_count {
        state.pickups.push(Pickup::spawn(area, fly_speed, &mut rng));
    }

    state.rng = rng;
    state.next_id = next_id;

    let start = state.start_pos;
    state.frog.reset(start);

    log::info!(
        "Level {} built: {} lanes, {} platforms, {} crocodiles, {} flies",
        state.level,
        state.lanes.len(),
        state
            .lanes
            .iter()
            .map(|lane| lane.platforms.len())
            .sum::<usize>(),
        state.hazards.len(),
        state.pickups.len(),
    );
    state.events.push(GameEvent::LevelRebuilt {
        level: state.level,
        tuning,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::rect::Rect;
    use crate::sim::state::{Lane, Platform};

    fn new_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, &Settings::default());
        state.drain_events();
        state
    }

    /// Strip the generated stage down to a single hand-placed lane.
    fn with_single_platform(state: &mut GameState, cx: i32, cy: i32, w: i32, speed: f32) {
        let mut platform = Platform::new(9000, 0, cy, w, 28, speed, PlatformKind::Log);
        platform.rect.set_center(cx, cy);
        state.lanes = vec![Lane {
            id: 0,
            y: cy,
            speed,
            platforms: vec![platform],
        }];
        state.hazards.clear();
        state.pickups.clear();
    }

    /// Run empty ticks with the frog safe on the start bank until the
    /// respawn cooldown has elapsed.
    fn settle(state: &mut GameState) {
        for _ in 0..RESPAWN_COOLDOWN {
            tick(state, &TickInput::default());
        }
        state.drain_events();
    }

    #[test]
    fn test_level_one_build() {
        let state = new_state(42);
        assert_eq!(state.level, 1);
        assert_eq!(state.lanes.len(), 8);
        for lane in &state.lanes {
            assert!(lane.platforms.len() >= 3);
            for pair in lane.platforms.windows(2) {
                assert!(pair[1].rect.left() - pair[0].rect.right() >= LANE_GAP);
            }
        }
        assert_eq!(state.pickups.len(), 2);
        for fly in &state.pickups {
            let (cx, cy) = fly.rect().center();
            assert!(state.pickup_area().contains_point(cx, cy));
        }
    }

    #[test]
    fn test_hop_into_empty_water_loses_a_life() {
        let mut state = new_state(11);
        for lane in &mut state.lanes {
            lane.platforms.clear();
        }
        state.hazards.clear();
        settle(&mut state);

        let input = TickInput {
            hop: Some(HopIntent::Up),
            ..Default::default()
        };
        tick(&mut state, &input);

        assert_eq!(state.lives, state.max_lives - 1);
        assert_eq!(state.frog.pos, state.start_pos);
        assert!(state
            .drain_events()
            .contains(&GameEvent::LifeLost { lives_remaining: 2 }));
    }

    #[test]
    fn test_ride_carries_frog_exactly() {
        let mut state = new_state(12);
        let cy = state.water.center_y();
        with_single_platform(&mut state, 300, cy, 140, 2.0);
        state.frog.pos = glam::Vec2::new(300.0, cy as f32);
        state.frog.sync_rect();

        let x0 = state.frog.pos.x;
        for _ in 0..5 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.lives, state.max_lives);
        assert!((state.frog.pos.x - (x0 + 10.0)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_hop_snaps_to_platform_center() {
        let mut state = new_state(13);
        settle(&mut state);

        // A stationary platform one hop above the start bank, offset so
        // the landing overlap is only partial.
        let target_y = state.start_pos.y as i32 - STEP_Y;
        let cx = state.start_pos.x as i32 + 20;
        with_single_platform(&mut state, cx, target_y, 100, 0.0);

        let input = TickInput {
            hop: Some(HopIntent::Up),
            ..Default::default()
        };
        tick(&mut state, &input);

        assert_eq!(state.lives, state.max_lives);
        assert_eq!(state.frog.rect.center(), (cx, target_y));
        // Upward progress scored.
        assert_eq!(state.score, HOP_SCORE);
    }

    #[test]
    fn test_walk_off_edge_while_riding_is_death() {
        let mut state = new_state(14);
        let cy = state.water.center_y();
        // Wide stationary platform hanging over the right edge.
        let width = state.width;
        with_single_platform(&mut state, width - 50, cy, 400, 0.0);
        state.frog.pos = glam::Vec2::new((state.width - 60) as f32, cy as f32);
        state.frog.sync_rect();

        let input = TickInput {
            walk_right: true,
            ..Default::default()
        };
        let mut died = false;
        for _ in 0..60 {
            tick(&mut state, &input);
            if state.lives < state.max_lives {
                died = true;
                break;
            }
        }
        assert!(died);
        assert_eq!(state.frog.pos, state.start_pos);
    }

    #[test]
    fn test_hazard_contact_is_death() {
        let mut state = new_state(15);
        let cy = state.water.center_y();
        with_single_platform(&mut state, 300, cy, 140, 0.0);
        let host = state.lanes[0].platforms[0];
        state.hazards.push(Hazard::new(&host));
        state.frog.pos = glam::Vec2::new(300.0, cy as f32);
        state.frog.sync_rect();

        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, state.max_lives - 1);
        assert_eq!(state.frog.pos, state.start_pos);
    }

    #[test]
    fn test_hazard_never_drifts_from_host() {
        let mut state = new_state(16);
        // Guarantee at least one hazard regardless of the roll.
        let host = state.lanes[0].platforms[0];
        state.hazards.push(Hazard::new(&host));

        for _ in 0..200 {
            tick(&mut state, &TickInput::default());
            for hazard in &state.hazards {
                let host = state.platform(hazard.platform_id).expect("host platform");
                assert_eq!(
                    hazard.rect.center(),
                    (host.rect.center_x() + hazard.offset_x, host.rect.center_y())
                );
            }
        }
    }

    #[test]
    fn test_pickup_capture_scores_and_respawns() {
        let mut state = new_state(17);
        for lane in &mut state.lanes {
            lane.platforms.clear();
        }
        state.hazards.clear();

        let count = state.pickups.len();
        state.pickups[0].pos = state.frog.pos;
        state.pickups[0].vel = glam::Vec2::ZERO;

        let score0 = state.score;
        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, score0 + PICKUP_SCORE);
        assert_eq!(state.pickups.len(), count);
        let (cx, cy) = state.pickups[0].rect().center();
        assert!(state.pickup_area().contains_point(cx, cy));
        assert!(state
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::PickupCaptured { .. })));
    }

    #[test]
    fn test_reaching_far_bank_advances_level() {
        let mut state = new_state(18);
        state.frog.pos = glam::Vec2::new(
            state.start_pos.x,
            state.safe_top.center_y() as f32,
        );
        state.frog.sync_rect();

        tick(&mut state, &TickInput::default());

        assert_eq!(state.level, 2);
        assert_eq!(state.lives, state.max_lives);
        assert_eq!(state.frog.pos, state.start_pos);
        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::LevelRebuilt { level: 2, .. }
        )));
    }

    #[test]
    fn test_game_over_restarts_stage_with_fresh_lives() {
        let mut state = new_state(19);
        for lane in &mut state.lanes {
            lane.platforms.clear();
        }
        state.hazards.clear();

        let mut saw_game_over = false;
        for _ in 0..200 {
            settle(&mut state);
            let input = TickInput {
                hop: Some(HopIntent::Up),
                ..Default::default()
            };
            tick(&mut state, &input);
            if state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { .. }))
            {
                saw_game_over = true;
                break;
            }
            // The rebuild repopulates the lanes; keep them empty so every
            // hop up drowns.
            for lane in &mut state.lanes {
                lane.platforms.clear();
            }
            state.hazards.clear();
        }

        assert!(saw_game_over);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, state.max_lives);
    }

    #[test]
    fn test_hop_cooldown_blocks_rapid_hops() {
        let mut state = new_state(20);
        settle(&mut state);

        let y0 = state.frog.pos.y;
        let down = TickInput {
            hop: Some(HopIntent::Down),
            ..Default::default()
        };
        // First hop lands (clamped at the bottom bank); the immediate
        // second request is still cooling down.
        tick(&mut state, &down);
        let hop_y = state.frog.pos.y;
        tick(&mut state, &down);
        assert_eq!(state.frog.pos.y, hop_y);
        assert!(hop_y >= y0);
    }

    #[test]
    fn test_left_hop_on_land_moves_one_step() {
        let mut state = new_state(21);
        settle(&mut state);

        let x0 = state.frog.pos.x;
        let input = TickInput {
            hop: Some(HopIntent::Left),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!((state.frog.pos.x - (x0 - STEP_X as f32)).abs() < f32::EPSILON);
        assert_eq!(state.last_horizontal_dir, -1);

        // Repeat hop goes the same way once the cooldown has elapsed.
        settle(&mut state);
        let x1 = state.frog.pos.x;
        let repeat = TickInput {
            hop: Some(HopIntent::Repeat),
            ..Default::default()
        };
        tick(&mut state, &repeat);
        assert!((state.frog.pos.x - (x1 - STEP_X as f32)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_determinism_with_same_seed_and_script() {
        let script = [
            TickInput::default(),
            TickInput {
                hop: Some(HopIntent::Up),
                ..Default::default()
            },
            TickInput {
                walk_right: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        let mut a = new_state(777);
        let mut b = new_state(777);
        for _ in 0..100 {
            for input in &script {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.level, b.level);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.frog.pos, b.frog.pos);
        let rects_a: Vec<Rect> = a
            .lanes
            .iter()
            .flat_map(|l| l.platforms.iter().map(|p| p.rect))
            .collect();
        let rects_b: Vec<Rect> = b
            .lanes
            .iter()
            .flat_map(|l| l.platforms.iter().map(|p| p.rect))
            .collect();
        assert_eq!(rects_a, rects_b);
    }
}
