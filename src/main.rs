//! Flapcraft entry point
//!
//! Plays unattended demo runs with a simple autopilot, logging each frame's
//! drawable state at debug level and recording final scores on the local
//! leaderboard. Interactive hosts embed [`flapcraft::Driver`] the same way
//! and forward real input instead.

use flapcraft::consts::*;
use flapcraft::driver::{Driver, FixedRateScheduler, Scheduler};
use flapcraft::sim::{GameState, Viewport};
use flapcraft::{HighScores, Settings};

/// Flap whenever the craft sinks toward the lower edge of the next gap.
/// Same idea as a human player, minus the panic.
fn autopilot_wants_flap(state: &GameState, vp: Viewport) -> bool {
    let Some(next) = state
        .pipes
        .iter()
        .find(|p| p.trailing_edge(vp) > CRAFT_BAND_LEFT)
    else {
        return false;
    };
    let trigger = next.gap + vp.pipe_gap() * 0.85;
    state.craft.y > trigger && state.craft.velocity > 0.0
}

fn main() {
    env_logger::init();

    let settings = Settings::load();
    // Write the effective configuration back so there is a file to edit
    settings.save();
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!(
        "Flapcraft demo: {} runs at {}x{}, seed {seed}",
        settings.demo_runs,
        settings.viewport_w,
        settings.viewport_h
    );

    let mut driver = Driver::new(seed, HighScores::load());
    driver.resize(settings.viewport_w, settings.viewport_h);

    let mut scheduler = FixedRateScheduler::new(settings.tick_hz);

    for run in 1..=settings.demo_runs {
        if let Some(text) = driver.frame().overlay {
            log::info!("{text}");
        }
        driver.flap();
        if !driver.is_scheduled() {
            log::warn!("Run {run} failed to start");
            break;
        }

        let mut ticks = 0u64;
        scheduler.start(&mut || {
            if autopilot_wants_flap(driver.state(), driver.viewport()) {
                driver.flap();
            }
            if let Some(frame) = driver.on_frame() {
                if log::log_enabled!(log::Level::Debug) {
                    if let Ok(json) = serde_json::to_string(&frame) {
                        log::debug!("frame: {json}");
                    }
                }
            }
            ticks += 1;
            ticks < settings.max_run_ticks && driver.is_scheduled()
        });

        if driver.is_scheduled() {
            log::warn!("Run {run} still going after {ticks} ticks, stopping the demo");
            driver.teardown();
            break;
        }
        println!(
            "Run {run}: score {} after {} ticks",
            driver.state().score,
            driver.state().time_ticks
        );
    }

    let board = driver.sink();
    if !board.is_empty() {
        if let Some(top) = board.top_score() {
            println!("Best score on record: {top}");
        }
        board.save();
    }
}
