//! Gameplay tuning
//!
//! Every constant the game balances on lives in one record: physics, spawn
//! cadence, geometry, rotation cosmetics, and the collision-shape policy.
//! Loaded once at startup and treated as immutable for the life of a session.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::consts::{GAP_SCALE, OBSTACLE_SPEED_SCALE, SPAWN_CADENCE_TICKS};
use crate::platform::storage::StorageBackend;

/// Collision envelope used for the bird
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CollisionShape {
    /// Full bounding box vs. barrier rectangles
    Rect,
    /// Circle inscribed in the bounding box (radius = width / 2).
    /// More forgiving near the sprite corners.
    #[default]
    Circle,
}

/// Invalid configuration detected at startup
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    CanvasDimensions { width: f32, height: f32 },
    BirdSize { width: f32, height: f32 },
    ObstacleWidth(f32),
    GapSize(f32),
    FloorFraction(f32),
    SpawnPeriodZero,
    Gravity(f32),
    Lift(f32),
    RotationRate(f32),
    NoPlayableRoom { playable_height: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CanvasDimensions { width, height } => {
                write!(f, "canvas dimensions must be positive: {width}x{height}")
            }
            Self::BirdSize { width, height } => {
                write!(f, "bird size must be positive: {width}x{height}")
            }
            Self::ObstacleWidth(w) => write!(f, "obstacle width must be positive: {w}"),
            Self::GapSize(g) => write!(f, "gap size must be positive: {g}"),
            Self::FloorFraction(fr) => {
                write!(f, "floor fraction must be in [0, 1): {fr}")
            }
            Self::SpawnPeriodZero => write!(f, "obstacle spawn period rounds to zero ticks"),
            Self::Gravity(g) => write!(f, "per-tick gravity must be positive: {g}"),
            Self::Lift(l) => write!(f, "lift velocity must be negative (upward): {l}"),
            Self::RotationRate(r) => write!(f, "rotation rate must be non-negative: {r}"),
            Self::NoPlayableRoom { playable_height } => {
                write!(f, "no room for the gap above the floor: playable height {playable_height}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Game tuning record
///
/// `gravity`, `lift`, `obstacle_speed` and `gap` are unit values multiplied
/// out by their scale constants; everything else is pixels on the 480x853
/// reference canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Reference canvas size (pixels)
    pub canvas_width: f32,
    pub canvas_height: f32,

    /// Bird sprite size and start pose (pixels)
    pub bird_width: f32,
    pub bird_height: f32,
    pub bird_start_x: f32,
    pub bird_start_y: f32,

    /// Downward acceleration, in gravity units per tick
    pub gravity: f32,
    /// Gravity unit -> pixels/tick² factor
    pub gravity_scale: f32,
    /// Upward impulse, in lift units (negative = up)
    pub lift: f32,
    /// Lift unit -> pixels/tick factor
    pub lift_scale: f32,
    /// Resolution scale applied to physics (1.0 on the reference canvas)
    pub scale_factor: f32,

    /// Obstacle scroll speed, in speed units
    pub obstacle_speed: f32,
    /// Spawn frequency units; period = frequency * SPAWN_CADENCE_TICKS ticks
    pub obstacle_frequency: f32,
    /// Barrier width (pixels)
    pub obstacle_width: f32,
    /// Vertical gap between barriers, in gap units
    pub gap: f32,
    /// Fraction of the canvas height reserved for the scrolling ground
    pub floor_fraction: f32,

    /// Nose-up rotation limit while ascending (radians, negative)
    pub rotation_up: f32,
    /// Nose-down rotation limit while falling (radians, positive)
    pub rotation_down: f32,
    /// Radians per tick toward the nose-up limit
    pub rotation_up_rate: f32,
    /// Radians per tick toward the nose-down limit
    pub rotation_down_rate: f32,

    /// Bird collision envelope
    pub collision_shape: CollisionShape,

    /// Background parallax scroll (pixels per frame, renderer only)
    pub background_speed: f32,
    /// Ground parallax scroll (pixels per frame, renderer only)
    pub ground_speed: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 480.0,
            canvas_height: 853.0,
            bird_width: 84.0,
            bird_height: 84.0,
            bird_start_x: 100.0,
            bird_start_y: 280.0,
            gravity: 1.0,
            gravity_scale: 0.07,
            lift: -1.15,
            lift_scale: 3.0,
            scale_factor: 1.0,
            obstacle_speed: 1.0,
            obstacle_frequency: 0.92,
            obstacle_width: 92.5,
            gap: 2.0,
            floor_fraction: 0.25,
            rotation_up: -std::f32::consts::FRAC_PI_8,
            rotation_down: std::f32::consts::FRAC_PI_2,
            rotation_up_rate: 0.005,
            rotation_down_rate: 0.01,
            collision_shape: CollisionShape::Circle,
            background_speed: 0.1,
            ground_speed: 1.499,
        }
    }
}

impl GameConfig {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "flap_dash_config";

    /// Downward acceleration in pixels per tick²
    #[inline]
    pub fn gravity_per_tick(&self) -> f32 {
        self.gravity * self.scale_factor * self.gravity_scale
    }

    /// Velocity set by a flap, in pixels per tick (negative = up)
    #[inline]
    pub fn lift_velocity(&self) -> f32 {
        self.lift * self.scale_factor * self.lift_scale
    }

    /// Horizontal obstacle scroll in pixels per tick
    #[inline]
    pub fn scroll_speed(&self) -> f32 {
        self.obstacle_speed * self.scale_factor * OBSTACLE_SPEED_SCALE
    }

    /// Ticks between obstacle spawns
    #[inline]
    pub fn spawn_period_ticks(&self) -> u64 {
        (self.obstacle_frequency * SPAWN_CADENCE_TICKS).round() as u64
    }

    /// Vertical gap between the top and bottom barriers, in pixels
    #[inline]
    pub fn gap_px(&self) -> f32 {
        self.gap * self.scale_factor * GAP_SCALE
    }

    /// Y of the ground line (top of the reserved floor band)
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.canvas_height * (1.0 - self.floor_fraction)
    }

    /// Vertical space available for gap placement (excludes floor and gap)
    #[inline]
    pub fn playable_height(&self) -> f32 {
        self.floor_y() - self.gap_px()
    }

    /// Check the record for values the simulation cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(ConfigError::CanvasDimensions {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if self.bird_width <= 0.0 || self.bird_height <= 0.0 {
            return Err(ConfigError::BirdSize {
                width: self.bird_width,
                height: self.bird_height,
            });
        }
        if self.obstacle_width <= 0.0 {
            return Err(ConfigError::ObstacleWidth(self.obstacle_width));
        }
        if self.gap_px() <= 0.0 {
            return Err(ConfigError::GapSize(self.gap_px()));
        }
        if !(0.0..1.0).contains(&self.floor_fraction) {
            return Err(ConfigError::FloorFraction(self.floor_fraction));
        }
        if self.spawn_period_ticks() == 0 {
            return Err(ConfigError::SpawnPeriodZero);
        }
        if self.gravity_per_tick() <= 0.0 {
            return Err(ConfigError::Gravity(self.gravity_per_tick()));
        }
        if self.lift_velocity() >= 0.0 {
            return Err(ConfigError::Lift(self.lift_velocity()));
        }
        if self.rotation_up_rate < 0.0 {
            return Err(ConfigError::RotationRate(self.rotation_up_rate));
        }
        if self.rotation_down_rate < 0.0 {
            return Err(ConfigError::RotationRate(self.rotation_down_rate));
        }
        if self.playable_height() <= 0.0 {
            return Err(ConfigError::NoPlayableRoom {
                playable_height: self.playable_height(),
            });
        }
        Ok(())
    }

    /// Load the tuning record from storage, falling back to defaults when
    /// absent, unreadable, or invalid
    pub fn load(store: &dyn StorageBackend) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str::<GameConfig>(&json) {
                Ok(config) if config.validate().is_ok() => {
                    log::info!("Loaded game config from storage");
                    return config;
                }
                Ok(config) => {
                    log::warn!(
                        "Stored game config is invalid ({}), using defaults",
                        config.validate().unwrap_err()
                    );
                }
                Err(e) => log::warn!("Failed to parse stored game config: {e}"),
            }
        }
        Self::default()
    }

    /// Persist the tuning record; storage failure is non-fatal
    pub fn save(&self, store: &dyn StorageBackend) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if let Err(e) = store.set(Self::STORAGE_KEY, &json) {
                    log::warn!("Failed to save game config: {e}");
                }
            }
            Err(e) => log::warn!("Failed to serialize game config: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::storage::MemoryStorage;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_derived_tuning_values() {
        let config = GameConfig::default();
        assert!((config.gravity_per_tick() - 0.07).abs() < 1e-6);
        assert!((config.lift_velocity() - (-3.45)).abs() < 1e-6);
        assert!((config.scroll_speed() - 1.5).abs() < 1e-6);
        assert_eq!(config.spawn_period_ticks(), 276);
        assert!((config.gap_px() - 200.0).abs() < 1e-6);
        assert!((config.floor_y() - 639.75).abs() < 1e-3);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = GameConfig::default();
        config.gap = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::GapSize(_))));

        let mut config = GameConfig::default();
        config.obstacle_frequency = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::SpawnPeriodZero));

        let mut config = GameConfig::default();
        config.floor_fraction = 1.0;
        assert!(matches!(config.validate(), Err(ConfigError::FloorFraction(_))));

        let mut config = GameConfig::default();
        config.lift = 2.0;
        assert!(matches!(config.validate(), Err(ConfigError::Lift(_))));

        let mut config = GameConfig::default();
        config.gravity = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Gravity(_))));

        // Gap taller than the space above the floor
        let mut config = GameConfig::default();
        config.gap = 7.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NoPlayableRoom { .. })
        ));
    }

    #[test]
    fn test_load_falls_back_on_garbage() {
        let store = MemoryStorage::new();
        store.set("flap_dash_config", "{not json").unwrap();
        let config = GameConfig::load(&store);
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.spawn_period_ticks(), 276);
    }

    #[test]
    fn test_config_round_trips_through_storage() {
        let store = MemoryStorage::new();
        let mut config = GameConfig::default();
        config.obstacle_frequency = 0.5;
        config.collision_shape = CollisionShape::Rect;
        config.save(&store);

        let loaded = GameConfig::load(&store);
        assert_eq!(loaded.spawn_period_ticks(), 150);
        assert_eq!(loaded.collision_shape, CollisionShape::Rect);
    }
}
