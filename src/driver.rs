//! Driver: turns host refresh callbacks and input events into simulation steps
//!
//! Single-threaded, cooperative: the host calls [`Driver::on_frame`] once per
//! display refresh and [`Driver::flap`] / [`Driver::resize`] as events
//! arrive. Scheduling is armed only while a run is active; the transition
//! out of the running phase (or a teardown) disarms it, so a refresh
//! callback that was already queued when the run ended observes the cleared
//! flag and does nothing.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::frame::RenderFrame;
use crate::sim::{GamePhase, GameState, Viewport, apply_flap, begin_run, step};

/// External collaborator receiving the final score, exactly once per ended
/// run. Persisting or comparing scores is its business, not the core's.
pub trait ScoreSink {
    fn report(&mut self, score: u32);
}

/// Per-refresh callback source, independent of the host's actual vsync
/// mechanism. `start` invokes `on_tick` once per refresh until it returns
/// false or the scheduler is stopped; tests drive ticks manually through
/// [`ManualScheduler`] with no timer involved.
pub trait Scheduler {
    fn start(&mut self, on_tick: &mut dyn FnMut() -> bool);
    /// Ask a schedule to halt before its next tick
    fn stop(&mut self);
}

/// Wall-clock scheduler pacing ticks at a fixed rate. A rate of 0 runs
/// unpaced (as fast as the callback allows).
pub struct FixedRateScheduler {
    period: std::time::Duration,
    stopped: bool,
}

impl FixedRateScheduler {
    pub fn new(tick_hz: u32) -> Self {
        let period = if tick_hz == 0 {
            std::time::Duration::ZERO
        } else {
            std::time::Duration::from_secs(1) / tick_hz
        };
        Self {
            period,
            stopped: false,
        }
    }
}

impl Scheduler for FixedRateScheduler {
    fn start(&mut self, on_tick: &mut dyn FnMut() -> bool) {
        self.stopped = false;
        loop {
            if self.stopped {
                break;
            }
            let started = std::time::Instant::now();
            if !on_tick() {
                break;
            }
            let elapsed = started.elapsed();
            if elapsed < self.period {
                std::thread::sleep(self.period - elapsed);
            }
        }
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}

/// Timerless scheduler for tests: fires at most `budget` ticks back to back.
pub struct ManualScheduler {
    budget: u32,
}

impl ManualScheduler {
    pub fn new(budget: u32) -> Self {
        Self { budget }
    }
}

impl Scheduler for ManualScheduler {
    fn start(&mut self, on_tick: &mut dyn FnMut() -> bool) {
        while self.budget > 0 {
            self.budget -= 1;
            if !on_tick() {
                break;
            }
        }
    }

    fn stop(&mut self) {
        self.budget = 0;
    }
}

/// Owns the game state, the run RNG and the score sink, and enforces the
/// state machine: which inputs do what in which phase, and when stepping is
/// allowed at all.
pub struct Driver<S: ScoreSink> {
    state: GameState,
    rng: Pcg32,
    viewport: Viewport,
    sink: S,
    /// Armed only while a run is active and the driver is live
    scheduled: bool,
    torn_down: bool,
}

impl<S: ScoreSink> Driver<S> {
    pub fn new(seed: u64, sink: S) -> Self {
        log::info!("driver ready (seed={seed})");
        Self {
            state: GameState::new(),
            rng: Pcg32::seed_from_u64(seed),
            viewport: Viewport::default(),
            sink,
            scheduled: false,
            torn_down: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// True while refresh callbacks should keep coming
    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Record the latest viewport measurement. Steps pick it up at the top
    /// of their own tick; craft and pipe positions are left alone.
    pub fn resize(&mut self, w: f32, h: f32) {
        self.viewport = Viewport::new(w, h);
        log::debug!("viewport resized to {w}x{h}");
    }

    /// The single input action: tap, click, touch and key press all land
    /// here. What it does depends on the phase.
    pub fn flap(&mut self) {
        if self.torn_down {
            return;
        }
        match self.state.phase {
            // Start (or restart) a run; the previous run's score was already
            // reported when it ended
            GamePhase::Ready | GamePhase::GameOver => {
                if !self.viewport.is_measured() {
                    log::debug!("flap before first viewport measurement, ignoring");
                    return;
                }
                begin_run(&mut self.state, &mut self.rng, self.viewport);
                self.scheduled = true;
                log::info!("run started");
            }
            GamePhase::Running => apply_flap(&mut self.state),
        }
    }

    /// Advance one tick if a run is active, returning the frame to draw.
    /// Returns `None` when scheduling is disarmed - a queued refresh firing
    /// after game over must not step a finished run.
    pub fn on_frame(&mut self) -> Option<RenderFrame> {
        if !self.scheduled {
            return None;
        }
        // Latest dimensions, never ones captured at scheduling time
        let vp = self.viewport;
        let outcome = step(&mut self.state, &mut self.rng, vp);

        if let Some(kind) = outcome.collision {
            self.scheduled = false;
            log::info!(
                "run over after {} ticks: hit {:?}, score {}",
                self.state.time_ticks,
                kind,
                self.state.score
            );
            self.sink.report(self.state.score);
        } else if outcome.recycled {
            log::debug!("pipe recycled at tick {}", self.state.time_ticks);
        }

        Some(RenderFrame::capture(&self.state, vp))
    }

    /// A frame without stepping, for drawing the Ready/GameOver chrome
    pub fn frame(&self) -> RenderFrame {
        RenderFrame::capture(&self.state, self.viewport)
    }

    /// Detach from the host: cancel any pending stepping and ignore all
    /// further input. Used on unmount.
    pub fn teardown(&mut self) {
        self.scheduled = false;
        self.torn_down = true;
        log::debug!("driver torn down");
    }
}
