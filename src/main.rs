//! Pond Crossing entry point
//!
//! Headless demo driver: runs the simulation at the nominal frame rate
//! with a small bot supplying input, and logs lifecycle events. A real
//! front end replaces this loop — it samples input into a `TickInput`,
//! calls `tick` once per frame, and draws from a `RenderSnapshot`.

use std::time::{Duration, Instant};

use pond_crossing::consts::*;
use pond_crossing::settings::Settings;
use pond_crossing::sim::{GameState, HopIntent, Rect, RenderSnapshot, TickInput, tick};

fn main() {
    env_logger::init();

    let mut seed: Option<u64> = None;
    let mut max_ticks: Option<u64> = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => seed = args.next().and_then(|v| v.parse().ok()),
            "--ticks" => max_ticks = args.next().and_then(|v| v.parse().ok()),
            other => {
                eprintln!("usage: pond-crossing [--seed N] [--ticks N], got {other:?}");
                std::process::exit(2);
            }
        }
    }
    let seed = seed.unwrap_or_else(rand::random);

    let settings = Settings::load();
    let mut state = GameState::new(seed, &settings);
    log::info!("Starting run with seed {seed}");

    let frame = Duration::from_secs_f32(SIM_DT);
    loop {
        let frame_start = Instant::now();

        let input = bot_input(&state);
        tick(&mut state, &input);

        for event in state.drain_events() {
            log::info!("{event:?}");
        }

        if let Some(limit) = max_ticks {
            if state.time_ticks >= limit {
                match serde_json::to_string_pretty(&RenderSnapshot::capture(&state)) {
                    Ok(json) => println!("{json}"),
                    Err(err) => eprintln!("snapshot serialization failed: {err}"),
                }
                break;
            }
        }

        // One cooperative yield per presented frame.
        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }
    }
}

/// Tiny demo bot: hop upward whenever the landing row is a bank or has a
/// platform under the frog's column; otherwise ride and wait.
fn bot_input(state: &GameState) -> TickInput {
    let frog = state.frog.rect;
    let target_y = frog.center_y() - STEP_Y;

    if target_y < state.water.top() {
        return TickInput {
            hop: Some(HopIntent::Up),
            ..Default::default()
        };
    }

    let landing = Rect::from_center(frog.center_x(), target_y, frog.w, frog.h);
    let supported = state
        .lanes
        .iter()
        .flat_map(|lane| lane.platforms.iter())
        .any(|p| landing.overlaps(p.rect));
    if supported {
        return TickInput {
            hop: Some(HopIntent::Up),
            ..Default::default()
        };
    }
    TickInput::default()
}
