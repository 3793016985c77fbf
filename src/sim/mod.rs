//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, frame-coupled by design
//! - Seeded RNG only
//! - No rendering, storage, or platform dependencies
//!
//! Hosts drive it by calling [`tick`] once per scheduled frame; tests drive
//! it by calling [`tick`] N times synchronously.

pub mod collision;
pub mod geom;
pub mod state;
pub mod tick;

pub use collision::{bird_hits_any, bird_hits_obstacle, collect_passes};
pub use geom::{Circle, Rect};
pub use state::{Bird, GameEvent, GamePhase, GameState, Obstacle};
pub use tick::{TickInput, tick};
