//! Game state and core simulation types
//!
//! Everything the driver owns and the step function mutates lives here.
//! The y axis points down, canvas style: `y = 0` is the ceiling, `y = h`
//! the floor, and gravity is a positive acceleration.

use serde::{Deserialize, Serialize};

use super::pipe::Pipe;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Waiting for the first flap
    #[default]
    Ready,
    /// Active gameplay
    Running,
    /// Run ended; the next flap starts a fresh run
    GameOver,
}

/// Viewport dimensions, supplied by the embedding environment.
///
/// May change between steps (resize); every size-derived quantity is
/// recomputed from the latest values, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Viewport {
    pub w: f32,
    pub h: f32,
}

impl Viewport {
    pub fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }

    /// False until the host has reported a real measurement. No step may run
    /// against an unmeasured viewport.
    #[inline]
    pub fn is_measured(&self) -> bool {
        self.w > 0.0 && self.h > 0.0
    }

    /// Horizontal scroll speed per tick
    #[inline]
    pub fn pipe_speed(&self) -> f32 {
        self.w * PIPE_SPEED_FACTOR
    }

    /// Width of a pipe's solid band
    #[inline]
    pub fn pipe_width(&self) -> f32 {
        self.w * PIPE_WIDTH_FACTOR
    }

    /// Height of the passable gap
    #[inline]
    pub fn pipe_gap(&self) -> f32 {
        self.h * PIPE_GAP_FACTOR
    }

    /// Horizontal distance between consecutive pipes
    #[inline]
    pub fn pipe_spacing(&self) -> f32 {
        self.w * PIPE_SPACING_FACTOR
    }

    /// Lower bound of the random gap-top draw
    #[inline]
    pub fn gap_min(&self) -> f32 {
        self.h * GAP_MIN_FACTOR
    }

    /// Upper bound of the random gap-top draw
    #[inline]
    pub fn gap_max(&self) -> f32 {
        self.h * GAP_MAX_FACTOR
    }
}

/// The player-controlled craft. Vertical motion only; its horizontal slot is
/// fixed near the left edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Craft {
    pub y: f32,
    pub velocity: f32,
}

/// Complete game state (deterministic, serializable)
///
/// Mutated only by the transition functions in [`super::tick`]; no other
/// component writes craft or pipe fields while a run is active.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameState {
    /// Current phase
    pub phase: GamePhase,
    /// Player craft
    pub craft: Craft,
    /// Live pipes, ascending x by construction (never re-sorted)
    pub pipes: Vec<Pipe>,
    /// Pipes cleared this run
    pub score: u32,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
}

impl GameState {
    /// A fresh state waiting for its first flap
    pub fn new() -> Self {
        Self::default()
    }
}
