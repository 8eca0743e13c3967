//! Flapcraft - a side-scrolling flap-to-survive arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `driver`: Input dispatch, per-refresh scheduling, score reporting
//! - `frame`: Presentation snapshot handed to whatever draws the game
//! - `highscores`: Persisted local leaderboard (the score sink)
//! - `settings`: Driver configuration

pub mod driver;
pub mod frame;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use driver::{Driver, ScoreSink};
pub use frame::RenderFrame;
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Downward acceleration applied to the craft every tick (units/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Instantaneous upward velocity set by a flap (negative = up)
    pub const FLAP_STRENGTH: f32 = -10.0;

    /// The craft's collision band is a fixed slot near the left edge,
    /// independent of its drawn size
    pub const CRAFT_BAND_LEFT: f32 = 50.0;
    pub const CRAFT_BAND_RIGHT: f32 = 70.0;

    /// Drawn craft size as fractions of the viewport
    pub const CRAFT_WIDTH_FACTOR: f32 = 0.05;
    pub const CRAFT_HEIGHT_FACTOR: f32 = 0.05;

    /// Live pipes at any time while a run is active
    pub const PIPE_COUNT: usize = 3;
    /// Horizontal scroll speed per tick, as a fraction of viewport width
    pub const PIPE_SPEED_FACTOR: f32 = 0.003;
    /// Pipe width as a fraction of viewport width
    pub const PIPE_WIDTH_FACTOR: f32 = 0.1;
    /// Gap height as a fraction of viewport height
    pub const PIPE_GAP_FACTOR: f32 = 0.25;
    /// Horizontal distance between consecutive pipes, as a fraction of width
    pub const PIPE_SPACING_FACTOR: f32 = 0.5;
    /// Random gap-top draw range, as fractions of viewport height
    pub const GAP_MIN_FACTOR: f32 = 0.1;
    pub const GAP_MAX_FACTOR: f32 = 0.5;
}
