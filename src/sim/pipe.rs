//! Pipe geometry
//!
//! A pipe is stored as a horizontal position and the top edge of its gap;
//! width and gap height derive from the viewport. Each pipe stands for two
//! solid rectangles: `[0, gap]` and `[gap + pipe_gap, h]` across the band
//! `[x, x + pipe_width]`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Viewport;

/// Axis-aligned rectangle, origin at top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// A single obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Leading (left) edge of the solid band
    pub x: f32,
    /// Top edge of the passable gap
    pub gap: f32,
    /// Already counted by the per-pipe scoring policy
    #[serde(default)]
    pub scored: bool,
}

impl Pipe {
    pub fn new(x: f32, gap: f32) -> Self {
        Self {
            x,
            gap,
            scored: false,
        }
    }

    /// Right edge of the solid band
    #[inline]
    pub fn trailing_edge(&self, vp: Viewport) -> f32 {
        self.x + vp.pipe_width()
    }

    /// Does the pipe's band overlap the horizontal slot `[left, right]`?
    #[inline]
    pub fn overlaps_band(&self, vp: Viewport, left: f32, right: f32) -> bool {
        self.x < right && self.trailing_edge(vp) > left
    }

    /// Is `y` inside the passable gap? Sitting exactly on either gap edge
    /// counts as inside.
    #[inline]
    pub fn gap_contains(&self, vp: Viewport, y: f32) -> bool {
        y >= self.gap && y <= self.gap + vp.pipe_gap()
    }

    /// Solid rectangle above the gap
    pub fn upper_rect(&self, vp: Viewport) -> Rect {
        Rect::new(self.x, 0.0, vp.pipe_width(), self.gap)
    }

    /// Solid rectangle below the gap
    pub fn lower_rect(&self, vp: Viewport) -> Rect {
        let bottom_top = self.gap + vp.pipe_gap();
        Rect::new(self.x, bottom_top, vp.pipe_width(), vp.h - bottom_top)
    }
}
