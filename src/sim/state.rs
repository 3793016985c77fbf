//! Game state and core simulation types
//!
//! Everything one run needs lives in `GameState`: no module-level globals,
//! the host owns exactly one instance per active session. The state is
//! deterministic (seeded RNG) and serializable for snapshots.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::{Circle, Rect};
use crate::approach;
use crate::config::{ConfigError, GameConfig};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen shown, simulation not ticking
    Menu,
    /// Round initialized, bird frozen, "Press to Play!" prompt visible
    Ready,
    /// Physics and obstacle advancement running
    Playing,
    /// Round ended, final score on screen
    GameOver,
}

/// One-shot happenings the host reacts to (audio cues, persistence)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A round was (re)initialized
    RoundStarted,
    /// The bird received a jump impulse
    Flapped,
    /// An obstacle was cleared
    Scored,
    /// The round ended with this final score
    RoundEnded { score: u32 },
}

/// The player-controlled bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// Top-left position; x is fixed after init, y integrates velocity
    pub pos: Vec2,
    /// Sprite size in pixels
    pub size: Vec2,
    /// Vertical velocity in pixels per tick (positive = falling)
    pub velocity: f32,
    /// Cosmetic tilt in radians; never consulted by physics or collision
    pub rotation: f32,
}

impl Bird {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.bird_start_x, config.bird_start_y),
            size: Vec2::new(config.bird_width, config.bird_height),
            velocity: 0.0,
            rotation: 0.0,
        }
    }

    /// Restore the start pose for a new round
    pub fn reset(&mut self, config: &GameConfig) {
        self.pos = Vec2::new(config.bird_start_x, config.bird_start_y);
        self.velocity = 0.0;
        self.rotation = 0.0;
    }

    /// Center of the sprite; the scoring reference point
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Full bounding box
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Inscribed circle envelope (radius = width / 2)
    #[inline]
    pub fn hitbox_circle(&self) -> Circle {
        Circle::new(self.center(), self.size.x / 2.0)
    }

    /// Apply the jump impulse: velocity is set, not added, and the nose
    /// snaps to the up limit
    pub fn flap(&mut self, config: &GameConfig) {
        self.velocity = config.lift_velocity();
        self.rotation = config.rotation_up;
    }

    /// One tick of gravity: accumulate, integrate, ease the tilt.
    /// There is no terminal velocity; fall speed grows unbounded.
    pub fn fall(&mut self, config: &GameConfig) {
        self.velocity += config.gravity_per_tick();
        self.pos.y += self.velocity;

        if self.velocity < 0.0 {
            self.rotation = approach(self.rotation, config.rotation_up, config.rotation_up_rate);
        } else {
            self.rotation =
                approach(self.rotation, config.rotation_down, config.rotation_down_rate);
        }
    }

    /// True once the bird has left the playable vertical band
    #[inline]
    pub fn out_of_bounds(&self, floor_y: f32) -> bool {
        self.pos.y + self.size.y > floor_y || self.pos.y < 0.0
    }
}

/// A top/bottom barrier pair scrolling right-to-left
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge; decreases every playing tick
    pub x: f32,
    /// Height of the top barrier (top of the gap)
    pub gap_top: f32,
    /// Barrier width
    pub width: f32,
    /// Set once the bird's reference point clears the trailing edge
    #[serde(default)]
    pub passed: bool,
}

impl Obstacle {
    pub fn new(x: f32, gap_top: f32, width: f32) -> Self {
        Self {
            x,
            gap_top,
            width,
            passed: false,
        }
    }

    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }

    /// Top barrier rectangle, ceiling to gap
    #[inline]
    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.gap_top)
    }

    /// Bottom barrier rectangle, gap to floor. `None` when the gap extends
    /// to or through the floor, leaving no barrier to draw or hit.
    pub fn bottom_rect(&self, gap_px: f32, floor_y: f32) -> Option<Rect> {
        let top = self.gap_top + gap_px;
        let height = floor_y - top;
        if height <= 0.0 {
            return None;
        }
        Some(Rect::new(self.x, top, self.width, height))
    }

    /// Fully scrolled past the left edge of the screen
    #[inline]
    pub fn off_screen(&self) -> bool {
        self.trailing_edge() <= 0.0
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Streaming RNG for gap placement
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Ticks elapsed in the current round; drives spawn cadence
    pub tick_count: u64,
    /// Obstacles cleared this round
    pub score: u32,
    /// Player bird
    pub bird: Bird,
    /// Active obstacles in spawn order (left-to-right on screen)
    pub obstacles: Vec<Obstacle>,
    /// Events since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a state for a validated config; fails fast on a config the
    /// simulation cannot start with
    pub fn new(config: &GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            tick_count: 0,
            score: 0,
            bird: Bird::new(config),
            obstacles: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Reset for a fresh round: start pose, empty field, zeroed counters
    pub fn reset_round(&mut self, config: &GameConfig) {
        self.bird.reset(config);
        self.obstacles.clear();
        self.tick_count = 0;
        self.score = 0;
        self.events.push(GameEvent::RoundStarted);
    }

    /// Hand the accumulated events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = GameConfig::default();
        config.gap = 0.0;
        assert!(GameState::new(&config, 1).is_err());
    }

    #[test]
    fn test_reset_round_restores_start_state() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 7).unwrap();
        state.bird.pos.y = 500.0;
        state.bird.velocity = 9.0;
        state.score = 12;
        state.tick_count = 999;
        state.obstacles.push(Obstacle::new(100.0, 50.0, 92.5));

        state.reset_round(&config);

        assert_eq!(state.bird.pos.y, config.bird_start_y);
        assert_eq!(state.bird.velocity, 0.0);
        assert_eq!(state.score, 0);
        assert_eq!(state.tick_count, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.drain_events(), vec![GameEvent::RoundStarted]);
    }

    #[test]
    fn test_flap_sets_velocity_not_adds() {
        let config = GameConfig::default();
        let mut bird = Bird::new(&config);
        bird.velocity = 10.0;
        bird.flap(&config);
        assert_eq!(bird.velocity, config.lift_velocity());
        assert_eq!(bird.rotation, config.rotation_up);

        // Flapping again from the impulse velocity changes nothing
        bird.flap(&config);
        assert_eq!(bird.velocity, config.lift_velocity());
    }

    #[test]
    fn test_bottom_rect_vanishes_when_gap_reaches_floor() {
        let config = GameConfig::default();
        let floor_y = config.floor_y();
        let gap = config.gap_px();

        let low = Obstacle::new(480.0, floor_y - gap, config.obstacle_width);
        assert!(low.bottom_rect(gap, floor_y).is_none());

        let normal = Obstacle::new(480.0, 100.0, config.obstacle_width);
        let rect = normal.bottom_rect(gap, floor_y).unwrap();
        assert_eq!(rect.y, 100.0 + gap);
        assert!((rect.bottom() - floor_y).abs() < 1e-3);
    }

    #[test]
    fn test_rotation_eases_between_limits() {
        let config = GameConfig::default();
        let mut bird = Bird::new(&config);

        // Falling: tilt creeps toward the nose-down limit
        for _ in 0..10 {
            bird.fall(&config);
        }
        assert!(bird.velocity > 0.0);
        assert!(bird.rotation > 0.0);
        assert!(bird.rotation <= config.rotation_down);

        // After a flap the nose snaps up and stays clamped there
        bird.flap(&config);
        assert_eq!(bird.rotation, config.rotation_up);
        bird.fall(&config);
        assert_eq!(bird.rotation, config.rotation_up);
    }

    #[test]
    fn test_state_snapshot_round_trips() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 42).unwrap();
        state.phase = GamePhase::Playing;
        state.score = 3;
        state.obstacles.push(Obstacle::new(240.0, 120.0, 92.5));

        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.phase, GamePhase::Playing);
        assert_eq!(restored.score, 3);
        assert_eq!(restored.obstacles.len(), 1);
        assert_eq!(restored.seed, 42);
    }
}
