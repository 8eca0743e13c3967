//! Collision detection for the craft
//!
//! The craft collides with the viewport bounds or with a pipe's solid
//! rectangles. Its hit-band is the fixed slot `[CRAFT_BAND_LEFT,
//! CRAFT_BAND_RIGHT]` regardless of drawn size - a deliberate gameplay
//! simplification, not a bug.

use serde::{Deserialize, Serialize};

use super::pipe::Pipe;
use super::state::Viewport;
use crate::consts::{CRAFT_BAND_LEFT, CRAFT_BAND_RIGHT};

/// What the craft hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    /// Touched the top viewport bound (`y <= 0`)
    Ceiling,
    /// Touched the bottom viewport bound (`y >= h`)
    Floor,
    /// Outside the gap band of an overlapping pipe
    Pipe,
}

/// Bounds check. Touching either bound exactly already ends the run.
pub fn check_bounds(y: f32, vp: Viewport) -> Option<CollisionKind> {
    if y <= 0.0 {
        Some(CollisionKind::Ceiling)
    } else if y >= vp.h {
        Some(CollisionKind::Floor)
    } else {
        None
    }
}

/// Does the craft collide with this pipe?
///
/// Horizontal overlap against the fixed hit-band first, then the vertical
/// miss test: the craft is colliding only when strictly outside the gap band,
/// so resting exactly on a gap edge is safe.
pub fn craft_hits_pipe(craft_y: f32, pipe: &Pipe, vp: Viewport) -> bool {
    pipe.overlaps_band(vp, CRAFT_BAND_LEFT, CRAFT_BAND_RIGHT) && !pipe.gap_contains(vp, craft_y)
}

/// First pipe collision, if any
pub fn check_pipes(craft_y: f32, pipes: &[Pipe], vp: Viewport) -> Option<CollisionKind> {
    pipes
        .iter()
        .any(|p| craft_hits_pipe(craft_y, p, vp))
        .then_some(CollisionKind::Pipe)
}
