//! Frame rendering
//!
//! The simulation never draws. Hosts hand each frame's snapshot to a
//! [`Renderer`], every frame, whatever the phase - the frame a collision
//! lands on is still drawn before the game-over screen appears. The wasm
//! build ships a Canvas2D adapter; headless runs and tests use
//! [`NullRenderer`].

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::config::GameConfig;
use crate::sim::GameState;

/// Frame-draw port; side-effect only
pub trait Renderer {
    fn draw_frame(&mut self, state: &GameState, config: &GameConfig);
}

/// Renderer that draws nothing
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw_frame(&mut self, _state: &GameState, _config: &GameConfig) {}
}
