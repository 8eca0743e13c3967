//! Presentation snapshot
//!
//! The simulation never draws. Each refresh the driver captures a
//! `RenderFrame` - everything a renderer needs for one frame - and hands it
//! to whatever draws the game. Shapes, colors and fonts are the renderer's
//! business.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{GamePhase, GameState, Rect, Viewport};

/// One frame's worth of drawable state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderFrame {
    /// The craft's drawn rectangle (its collision band is narrower)
    pub craft: Rect,
    /// Solid pipe rectangles, upper then lower per pipe, left to right
    pub pipes: Vec<Rect>,
    pub score: u32,
    /// Phase-dependent overlay text, if any
    pub overlay: Option<String>,
}

impl RenderFrame {
    /// Capture the current state for drawing
    pub fn capture(state: &GameState, vp: Viewport) -> Self {
        let craft = Rect::new(
            CRAFT_BAND_LEFT,
            state.craft.y,
            vp.w * CRAFT_WIDTH_FACTOR,
            vp.h * CRAFT_HEIGHT_FACTOR,
        );

        let pipes = state
            .pipes
            .iter()
            .flat_map(|p| [p.upper_rect(vp), p.lower_rect(vp)])
            .collect();

        let overlay = match state.phase {
            GamePhase::Ready => Some("Tap or press space to start!".to_string()),
            GamePhase::Running => None,
            GamePhase::GameOver => Some(format!(
                "Game Over! Score: {} - tap or press space to restart!",
                state.score
            )),
        };

        Self {
            craft,
            pipes,
            score: state.score,
            overlay,
        }
    }
}
