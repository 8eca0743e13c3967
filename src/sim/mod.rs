//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per scheduling tick, no wall-clock reads
//! - Seeded RNG only, passed in by the caller
//! - No rendering or platform dependencies

pub mod collision;
pub mod pipe;
pub mod state;
pub mod tick;

pub use collision::{CollisionKind, check_bounds, check_pipes, craft_hits_pipe};
pub use pipe::{Pipe, Rect};
pub use state::{Craft, GamePhase, GameState, Viewport};
pub use tick::{StepOutcome, apply_flap, begin_run, draw_gap, step};
