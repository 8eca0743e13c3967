//! Per-tick simulation step and state-machine transitions
//!
//! `step` advances one scheduling tick; `begin_run` and `apply_flap` are the
//! input-driven transitions. All randomness comes in through the caller's
//! RNG so runs are reproducible and tests deterministic.

use rand::Rng;

use super::collision::{CollisionKind, check_bounds, check_pipes};
use super::pipe::Pipe;
use super::state::{Craft, GamePhase, GameState, Viewport};
use crate::consts::*;

/// What happened during one step (for the driver to log and react to;
/// the simulation itself never draws or reports)
#[derive(Debug, Clone, Copy, Default)]
pub struct StepOutcome {
    /// The collision that ended the run, if it ended this step
    pub collision: Option<CollisionKind>,
    /// Pipes cleared this step
    pub pipes_passed: u32,
    /// A pipe left the viewport and a fresh one was appended
    pub recycled: bool,
}

/// Draw a gap-top position uniformly from `[h * 0.1, h * 0.5)`
pub fn draw_gap(rng: &mut impl Rng, vp: Viewport) -> f32 {
    rng.random_range(vp.gap_min()..vp.gap_max())
}

/// Reset into a running state: craft centered and at rest, score zero, and
/// three evenly-spaced pipes starting at the right viewport edge.
///
/// Safe to call from any phase and idempotent up to the random gap draws.
/// No-op against an unmeasured viewport.
pub fn begin_run(state: &mut GameState, rng: &mut impl Rng, vp: Viewport) {
    if !vp.is_measured() {
        return;
    }

    state.craft = Craft {
        y: vp.h / 2.0,
        velocity: 0.0,
    };
    state.pipes.clear();
    for i in 0..PIPE_COUNT {
        let x = vp.w + i as f32 * vp.pipe_spacing();
        state.pipes.push(Pipe::new(x, draw_gap(rng, vp)));
    }
    state.score = 0;
    state.time_ticks = 0;
    state.phase = GamePhase::Running;
}

/// Apply the flap impulse. Only meaningful mid-run; never resets position or
/// score.
pub fn apply_flap(state: &mut GameState) {
    if state.phase == GamePhase::Running {
        state.craft.velocity = FLAP_STRENGTH;
    }
}

/// Advance the simulation by one scheduling tick.
///
/// Order per tick: integrate, bounds check, scroll pipes, pipe collision,
/// scoring, recycling. A collision ends the run immediately with no further
/// updates that tick, freezing craft and pipes as they stand. Steps outside
/// the running phase, or against an unmeasured viewport, are no-ops.
pub fn step(state: &mut GameState, rng: &mut impl Rng, vp: Viewport) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    if state.phase != GamePhase::Running || !vp.is_measured() {
        return outcome;
    }

    state.time_ticks += 1;

    // Integrate
    state.craft.velocity += GRAVITY;
    state.craft.y += state.craft.velocity;

    // Ceiling/floor
    if let Some(kind) = check_bounds(state.craft.y, vp) {
        state.phase = GamePhase::GameOver;
        outcome.collision = Some(kind);
        return outcome;
    }

    // Scroll
    let speed = vp.pipe_speed();
    for pipe in &mut state.pipes {
        pipe.x -= speed;
    }

    // Pipe collision
    if let Some(kind) = check_pipes(state.craft.y, &state.pipes, vp) {
        state.phase = GamePhase::GameOver;
        outcome.collision = Some(kind);
        return outcome;
    }

    // Scoring: one point per pipe, the first step its trailing edge is fully
    // left of the craft's hit-band
    for pipe in &mut state.pipes {
        if !pipe.scored && pipe.trailing_edge(vp) < CRAFT_BAND_LEFT {
            pipe.scored = true;
            state.score += 1;
            outcome.pipes_passed += 1;
        }
    }

    // Recycle: evict the head pipe once it leaves the viewport, append a
    // fresh one a full spacing beyond the rightmost survivor
    if state
        .pipes
        .first()
        .is_some_and(|p| p.trailing_edge(vp) < 0.0)
    {
        state.pipes.remove(0);
        let rightmost = state.pipes.last().map_or(vp.w, |p| p.x);
        state
            .pipes
            .push(Pipe::new(rightmost + vp.pipe_spacing(), draw_gap(rng, vp)));
        outcome.recycled = true;
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn vp() -> Viewport {
        Viewport::new(400.0, 600.0)
    }

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(12345)
    }

    fn r2() -> Pcg32 {
        Pcg32::seed_from_u64(777)
    }

    fn running_state() -> GameState {
        let mut state = GameState::new();
        begin_run(&mut state, &mut rng(), vp());
        state
    }

    #[test]
    fn test_begin_run_canonical_start() {
        let state = running_state();

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.craft, Craft { y: 300.0, velocity: 0.0 });
        assert_eq!(state.score, 0);
        assert_eq!(state.pipes.len(), 3);
        let xs: Vec<f32> = state.pipes.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![400.0, 600.0, 800.0]);
        for pipe in &state.pipes {
            assert!(pipe.gap >= 60.0 && pipe.gap < 300.0);
            assert!(!pipe.scored);
        }
    }

    #[test]
    fn test_begin_run_is_idempotent() {
        let mut state = GameState::new();
        let mut r = rng();
        begin_run(&mut state, &mut r, vp());
        state.score = 7;
        state.craft.y = 50.0;
        begin_run(&mut state, &mut r, vp());

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.craft, Craft { y: 300.0, velocity: 0.0 });
        assert_eq!(state.score, 0);
        let xs: Vec<f32> = state.pipes.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![400.0, 600.0, 800.0]);
    }

    #[test]
    fn test_begin_run_needs_measured_viewport() {
        let mut state = GameState::new();
        begin_run(&mut state, &mut rng(), Viewport::new(0.0, 0.0));
        assert_eq!(state.phase, GamePhase::Ready);
        assert!(state.pipes.is_empty());
    }

    #[test]
    fn test_flap_sets_velocity_only() {
        let mut state = running_state();
        let before = state.clone();
        apply_flap(&mut state);

        assert_eq!(state.craft.velocity, FLAP_STRENGTH);
        assert_eq!(state.craft.y, before.craft.y);
        assert_eq!(state.score, before.score);
        assert_eq!(state.pipes, before.pipes);
    }

    #[test]
    fn test_flap_ignored_outside_running() {
        let mut state = GameState::new();
        apply_flap(&mut state);
        assert_eq!(state.craft.velocity, 0.0);
    }

    #[test]
    fn test_step_outside_running_is_noop() {
        let mut state = GameState::new();
        let outcome = step(&mut state, &mut rng(), vp());
        assert!(outcome.collision.is_none());
        assert_eq!(state.time_ticks, 0);

        let mut over = running_state();
        over.phase = GamePhase::GameOver;
        let frozen = over.clone();
        step(&mut over, &mut rng(), vp());
        assert_eq!(over.craft, frozen.craft);
        assert_eq!(over.pipes, frozen.pipes);
    }

    #[test]
    fn test_step_unmeasured_viewport_is_noop() {
        let mut state = running_state();
        let frozen = state.clone();
        let outcome = step(&mut state, &mut rng(), Viewport::new(0.0, 0.0));
        assert!(outcome.collision.is_none());
        assert_eq!(state.craft, frozen.craft);
        assert_eq!(state.time_ticks, frozen.time_ticks);
    }

    #[test]
    fn test_free_fall_matches_closed_form() {
        // From rest at y=300 with gravity 0.5: v_n = 0.5n, y_n = 300 + 0.25n(n+1).
        // y first reaches 600 at n=35, and the run must end on that step.
        let mut state = running_state();
        let mut r = rng();

        for n in 1..=34u64 {
            let outcome = step(&mut state, &mut r, vp());
            assert!(outcome.collision.is_none(), "ended early at step {n}");
            assert_eq!(state.craft.velocity, 0.5 * n as f32);
            let expected_y = 300.0 + 0.25 * (n * (n + 1)) as f32;
            assert!((state.craft.y - expected_y).abs() < 1e-3);
        }

        let outcome = step(&mut state, &mut r, vp());
        assert_eq!(outcome.collision, Some(CollisionKind::Floor));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.time_ticks, 35);
    }

    #[test]
    fn test_exact_bound_ends_run_that_step() {
        let mut state = running_state();
        // Arrange the integration to land exactly on the floor
        state.craft.y = vp().h - GRAVITY;
        state.craft.velocity = 0.0;
        let outcome = step(&mut state, &mut rng(), vp());
        assert_eq!(state.craft.y, vp().h);
        assert_eq!(outcome.collision, Some(CollisionKind::Floor));

        let mut state = running_state();
        state.craft.y = 0.5;
        state.craft.velocity = -1.0;
        let outcome = step(&mut state, &mut rng(), vp());
        assert_eq!(state.craft.y, 0.0);
        assert_eq!(outcome.collision, Some(CollisionKind::Ceiling));
    }

    #[test]
    fn test_collision_freezes_state() {
        let mut state = running_state();
        // Put a pipe square on the hit-band with the craft above its gap
        state.pipes[0] = Pipe::new(50.0, 400.0);
        state.craft.y = 100.0;
        state.craft.velocity = 0.0;

        let outcome = step(&mut state, &mut rng(), vp());
        assert_eq!(outcome.collision, Some(CollisionKind::Pipe));
        assert_eq!(state.phase, GamePhase::GameOver);
        // Scoring and recycling were skipped; pipe positions reflect this
        // step's scroll and nothing more
        assert_eq!(state.pipes.len(), 3);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_craft_inside_gap_survives_band_overlap() {
        let mut state = running_state();
        state.pipes[0] = Pipe::new(50.0, 200.0);
        // Gap band is [200, 350]; hold the craft inside it with a flap so it
        // doesn't sink out during the step
        state.craft.y = 280.0;
        state.craft.velocity = FLAP_STRENGTH;

        let outcome = step(&mut state, &mut rng(), vp());
        assert!(outcome.collision.is_none());
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_pipe_scores_once_when_passed() {
        let mut state = running_state();
        // Trailing edge at 50.4: one scroll of 1.2 puts it at 49.2 < 50
        state.pipes[0] = Pipe::new(10.4, 200.0);
        state.craft.y = 300.0;
        state.craft.velocity = -GRAVITY; // hover

        let outcome = step(&mut state, &mut rng(), vp());
        assert_eq!(outcome.pipes_passed, 1);
        assert_eq!(state.score, 1);
        assert!(state.pipes[0].scored);

        // Already counted; further steps add nothing for this pipe
        state.craft.velocity = -GRAVITY;
        let outcome = step(&mut state, &mut rng(), vp());
        assert_eq!(outcome.pipes_passed, 0);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_score_monotonic_while_running() {
        let mut state = running_state();
        let mut r = rng();
        let mut last = state.score;
        for _ in 0..100_000 {
            // Keep the craft airborne so the run lasts a few pipes
            if state.craft.y > 320.0 && state.craft.velocity > 0.0 {
                apply_flap(&mut state);
            }
            if step(&mut state, &mut r, vp()).collision.is_some() {
                break;
            }
            assert!(state.score >= last);
            last = state.score;
        }
    }

    #[test]
    fn test_recycle_same_step_keeps_queue_at_three() {
        let mut state = running_state();
        // Head pipe trailing edge at 0.8: this step's scroll of 1.2 moves it
        // past the left bound
        state.pipes[0] = Pipe::new(-39.2, 200.0);
        state.pipes[0].scored = true;
        state.craft.y = 300.0;
        state.craft.velocity = -GRAVITY;
        let second_x = state.pipes[1].x;
        let third_x = state.pipes[2].x;

        let outcome = step(&mut state, &mut r2(), vp());
        assert!(outcome.recycled);
        assert_eq!(state.pipes.len(), 3);
        // Survivors shifted by one scroll, fresh pipe a full spacing beyond
        // the rightmost
        assert_eq!(state.pipes[0].x, second_x - vp().pipe_speed());
        assert_eq!(state.pipes[1].x, third_x - vp().pipe_speed());
        assert_eq!(state.pipes[2].x, state.pipes[1].x + vp().pipe_spacing());
        assert!(!state.pipes[2].scored);
        assert!(state.pipes[2].gap >= 60.0 && state.pipes[2].gap < 300.0);
    }

    #[test]
    fn test_resize_mid_run_keeps_positions() {
        let mut state = running_state();
        state.craft.velocity = FLAP_STRENGTH;
        step(&mut state, &mut rng(), vp());
        let y_before = state.craft.y;
        let x_before = state.pipes[0].x;

        // Wider viewport: scroll speed changes, nothing resets
        let wide = Viewport::new(800.0, 600.0);
        state.craft.velocity = FLAP_STRENGTH;
        let outcome = step(&mut state, &mut rng(), wide);
        assert!(outcome.collision.is_none());
        assert_eq!(state.pipes.len(), 3);
        assert_eq!(state.pipes[0].x, x_before - wide.pipe_speed());
        assert_eq!(state.craft.y, y_before + FLAP_STRENGTH + GRAVITY);
    }
}
