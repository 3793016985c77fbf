//! Canvas2D frame renderer (wasm)
//!
//! Draws the whole frame with flat fills - no sprite assets. The parallax
//! offsets live here because they are cosmetic: background and ground scroll
//! at their configured speeds while a round is running, frozen otherwise.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::Renderer;
use crate::config::GameConfig;
use crate::sim::{GamePhase, GameState};

const SKY_COLOR: &str = "#4ec0ca";
const CLOUD_COLOR: &str = "#8fd6dc";
const PIPE_COLOR: &str = "#2e8b57";
const PIPE_CAP_COLOR: &str = "#226b42";
const GROUND_COLOR: &str = "#ded895";
const GROUND_STRIPE_COLOR: &str = "#c6b980";
const BIRD_COLOR: &str = "#f7d308";
const TEXT_COLOR: &str = "red";

/// Height of the darker cap band at a barrier's gap-facing end. Drawing
/// detail only; collision always uses the full barrier rectangles.
const PIPE_CAP_HEIGHT: f64 = 50.0;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    /// Blink flag for the "Press to Play!" prompt, flipped by a host timer
    blink: Rc<Cell<bool>>,
    background_x: f64,
    ground_x: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement, blink: Rc<Cell<bool>>) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            blink,
            background_x: 0.0,
            ground_x: 0.0,
        })
    }

    fn draw_background(&mut self, config: &GameConfig) {
        let w = config.canvas_width as f64;
        let h = config.canvas_height as f64;

        self.ctx.set_fill_style_str(SKY_COLOR);
        self.ctx.fill_rect(0.0, 0.0, w, h);

        // Drifting cloud band, wrapped with modulo for a continuous loop
        self.ctx.set_fill_style_str(CLOUD_COLOR);
        let band_w = w / 2.0;
        let offset = self.background_x.rem_euclid(w);
        self.ctx.fill_rect(-offset, h * 0.12, band_w, 40.0);
        self.ctx.fill_rect(w - offset, h * 0.12, band_w, 40.0);
    }

    fn draw_ground(&mut self, config: &GameConfig) {
        let w = config.canvas_width as f64;
        let h = config.canvas_height as f64;
        let floor_y = config.floor_y() as f64;

        self.ctx.set_fill_style_str(GROUND_COLOR);
        self.ctx.fill_rect(0.0, floor_y, w, h - floor_y);

        self.ctx.set_fill_style_str(GROUND_STRIPE_COLOR);
        let stripe_w = 24.0;
        let offset = self.ground_x.rem_euclid(stripe_w * 2.0);
        let mut x = -offset;
        while x < w {
            self.ctx.fill_rect(x, floor_y, stripe_w, 12.0);
            x += stripe_w * 2.0;
        }
    }

    fn draw_obstacles(&mut self, state: &GameState, config: &GameConfig) {
        let gap = config.gap_px();
        let floor_y = config.floor_y();

        for obstacle in &state.obstacles {
            let top = obstacle.top_rect();
            if top.h > 0.0 {
                self.ctx.set_fill_style_str(PIPE_COLOR);
                self.ctx
                    .fill_rect(top.x as f64, top.y as f64, top.w as f64, top.h as f64);
                self.ctx.set_fill_style_str(PIPE_CAP_COLOR);
                let cap_h = PIPE_CAP_HEIGHT.min(top.h as f64);
                self.ctx.fill_rect(
                    top.x as f64,
                    top.bottom() as f64 - cap_h,
                    top.w as f64,
                    cap_h,
                );
            }

            if let Some(bottom) = obstacle.bottom_rect(gap, floor_y) {
                self.ctx.set_fill_style_str(PIPE_COLOR);
                self.ctx.fill_rect(
                    bottom.x as f64,
                    bottom.y as f64,
                    bottom.w as f64,
                    bottom.h as f64,
                );
                self.ctx.set_fill_style_str(PIPE_CAP_COLOR);
                let cap_h = PIPE_CAP_HEIGHT.min(bottom.h as f64);
                self.ctx
                    .fill_rect(bottom.x as f64, bottom.y as f64, bottom.w as f64, cap_h);
            }
        }
    }

    fn draw_bird(&mut self, state: &GameState) {
        let bird = &state.bird;
        let center = bird.center();

        self.ctx.save();
        let _ = self.ctx.translate(center.x as f64, center.y as f64);
        let _ = self.ctx.rotate(bird.rotation as f64);
        self.ctx.set_fill_style_str(BIRD_COLOR);
        self.ctx.fill_rect(
            -(bird.size.x as f64) / 2.0,
            -(bird.size.y as f64) / 2.0,
            bird.size.x as f64,
            bird.size.y as f64,
        );
        self.ctx.restore();
    }

    fn draw_hud(&mut self, state: &GameState, config: &GameConfig) {
        let w = config.canvas_width as f64;
        let h = config.canvas_height as f64;

        self.ctx.set_fill_style_str(TEXT_COLOR);
        self.ctx.set_font("24px Arial");
        self.ctx.set_text_align("right");
        let _ = self
            .ctx
            .fill_text(&format!("Score: {}", state.score), w - 10.0, 50.0);

        if state.phase == GamePhase::Ready && self.blink.get() {
            self.ctx.set_font("30px Arial");
            self.ctx.set_text_align("center");
            let _ = self.ctx.fill_text("Press to Play!", w / 2.0, h / 4.0);
        }
    }
}

impl Renderer for CanvasRenderer {
    fn draw_frame(&mut self, state: &GameState, config: &GameConfig) {
        // Parallax advances only while a round is live
        if state.phase == GamePhase::Playing {
            self.background_x += config.background_speed as f64;
            self.ground_x += config.ground_speed as f64;
        }

        self.draw_background(config);
        self.draw_obstacles(state, config);
        self.draw_ground(config);
        self.draw_bird(state);
        self.draw_hud(state, config);
    }
}
