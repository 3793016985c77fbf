//! Per-tick simulation step and phase transitions
//!
//! One call to [`tick`] is one frame-coupled simulation step. The host draws
//! the current snapshot first and ticks after, so the colliding frame is
//! still rendered before the game-over screen appears.

use rand::Rng;

use super::collision::{bird_hits_any, collect_passes};
use super::state::{GameEvent, GamePhase, GameState, Obstacle};
use crate::config::GameConfig;

/// Input events gathered by the host for a single tick (one-shot flags,
/// cleared by the host after the tick consumes them)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pointer/key tap: unfreezes a ready round, or flaps the bird
    pub tap: bool,
    /// Start button on the menu screen
    pub start: bool,
    /// Retry button on the game-over screen
    pub retry: bool,
    /// Close button on the game-over screen, back to the menu
    pub close: bool,
}

impl TickInput {
    pub fn tap() -> Self {
        Self {
            tap: true,
            ..Default::default()
        }
    }
}

/// Advance the game by one tick
pub fn tick(state: &mut GameState, input: &TickInput, config: &GameConfig) {
    match state.phase {
        GamePhase::Menu => {
            if input.start {
                state.reset_round(config);
                state.phase = GamePhase::Ready;
            }
        }
        GamePhase::Ready => {
            // The round is set up and frozen; the first tap starts physics
            if input.tap {
                state.phase = GamePhase::Playing;
            }
        }
        GamePhase::Playing => {
            if input.tap {
                state.bird.flap(config);
                state.events.push(GameEvent::Flapped);
            }
            run_playing_tick(state, config);
        }
        GamePhase::GameOver => {
            if input.retry {
                state.reset_round(config);
                state.phase = GamePhase::Ready;
            } else if input.close {
                state.phase = GamePhase::Menu;
            }
        }
    }
}

/// Fixed step order: scroll obstacles, bird physics (boundary check), spawn,
/// pass/score, obstacle collision. Scoring and collision timing depend on
/// this order staying put.
fn run_playing_tick(state: &mut GameState, config: &GameConfig) {
    state.tick_count += 1;

    let speed = config.scroll_speed();
    for obstacle in &mut state.obstacles {
        obstacle.x -= speed;
    }
    state.obstacles.retain(|obstacle| !obstacle.off_screen());

    state.bird.fall(config);
    if state.bird.out_of_bounds(config.floor_y()) {
        end_round(state);
        return;
    }

    if state.tick_count % config.spawn_period_ticks() == 0 {
        spawn_obstacle(state, config);
    }

    let newly_passed = collect_passes(&state.bird, &mut state.obstacles);
    state.score += newly_passed;
    for _ in 0..newly_passed {
        state.events.push(GameEvent::Scored);
    }

    if bird_hits_any(&state.bird, &state.obstacles, config) {
        end_round(state);
    }
}

/// Push a fresh barrier pair at the right screen edge. The gap top is drawn
/// uniformly over the playable band, floored to whole pixels.
fn spawn_obstacle(state: &mut GameState, config: &GameConfig) {
    let gap_top = state.rng.random_range(0.0..config.playable_height()).floor();
    state
        .obstacles
        .push(Obstacle::new(config.canvas_width, gap_top, config.obstacle_width));
}

fn end_round(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::RoundEnded { score: state.score });
}
