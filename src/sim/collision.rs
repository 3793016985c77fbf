//! Collision and pass detection against barrier pairs
//!
//! Each obstacle contributes a top rectangle (ceiling to gap) and a bottom
//! rectangle (gap to floor). The bird's envelope is either its full bounding
//! box or the inscribed circle, per the configured [`CollisionShape`].

use super::state::{Bird, Obstacle};
use crate::config::{CollisionShape, GameConfig};

/// Test the bird against one barrier pair
pub fn bird_hits_obstacle(bird: &Bird, obstacle: &Obstacle, config: &GameConfig) -> bool {
    let top = obstacle.top_rect();
    let bottom = obstacle.bottom_rect(config.gap_px(), config.floor_y());

    match config.collision_shape {
        CollisionShape::Rect => {
            let bounds = bird.bounds();
            bounds.intersects(&top) || bottom.is_some_and(|r| bounds.intersects(&r))
        }
        CollisionShape::Circle => {
            let circle = bird.hitbox_circle();
            circle.intersects_rect(&top) || bottom.is_some_and(|r| circle.intersects_rect(&r))
        }
    }
}

/// Test the bird against every active obstacle, stopping at the first hit
pub fn bird_hits_any(bird: &Bird, obstacles: &[Obstacle], config: &GameConfig) -> bool {
    obstacles
        .iter()
        .any(|obstacle| bird_hits_obstacle(bird, obstacle, config))
}

/// Mark obstacles whose trailing edge the bird's center has cleared and
/// return how many were newly passed. Each `passed` flag flips at most once,
/// so a repeated call in the same tick finds nothing new.
pub fn collect_passes(bird: &Bird, obstacles: &mut [Obstacle]) -> u32 {
    let reference_x = bird.center().x;
    let mut newly_passed = 0;
    for obstacle in obstacles.iter_mut() {
        if !obstacle.passed && obstacle.trailing_edge() < reference_x {
            obstacle.passed = true;
            newly_passed += 1;
        }
    }
    newly_passed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    /// 480x800 canvas, no floor band, 100px gap, rect envelope
    fn flat_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.canvas_height = 800.0;
        config.floor_fraction = 0.0;
        config.gap = 1.0;
        config.bird_width = 40.0;
        config.bird_height = 40.0;
        config.collision_shape = CollisionShape::Rect;
        config.validate().unwrap();
        config
    }

    fn bird_at(config: &GameConfig, x: f32, y: f32) -> Bird {
        let mut bird = Bird::new(config);
        bird.pos.x = x;
        bird.pos.y = y;
        bird
    }

    #[test]
    fn test_rect_bird_hits_top_barrier() {
        let config = flat_config();
        let obstacle = Obstacle::new(100.0, 200.0, 50.0);

        // Overlaps the top barrier [100,0]-[150,200]
        let bird = bird_at(&config, 120.0, 150.0);
        assert!(bird_hits_obstacle(&bird, &obstacle, &config));

        // Fully inside the gap [200, 300)
        let bird = bird_at(&config, 120.0, 250.0);
        assert!(!bird_hits_obstacle(&bird, &obstacle, &config));
    }

    #[test]
    fn test_rect_bird_hits_bottom_barrier() {
        let config = flat_config();
        let obstacle = Obstacle::new(100.0, 200.0, 50.0);

        // Bottom barrier starts at y=300
        let bird = bird_at(&config, 120.0, 290.0);
        assert!(bird_hits_obstacle(&bird, &obstacle, &config));
    }

    #[test]
    fn test_circle_envelope_is_more_forgiving_at_corners() {
        let mut config = flat_config();
        let obstacle = Obstacle::new(100.0, 200.0, 50.0);

        // Bird corner clips the bottom barrier's corner at (100, 300) by a
        // couple of pixels: the box hits, the inscribed circle stays clear
        let bird = bird_at(&config, 62.0, 262.0);
        assert!(bird_hits_obstacle(&bird, &obstacle, &config));

        config.collision_shape = CollisionShape::Circle;
        assert!(!bird_hits_obstacle(&bird, &obstacle, &config));

        // Dead-center approach hits either way
        let bird = bird_at(&config, 120.0, 150.0);
        assert!(bird_hits_obstacle(&bird, &obstacle, &config));
    }

    #[test]
    fn test_gap_through_floor_has_no_bottom_barrier() {
        let config = flat_config();
        // Gap top at 700, gap 100: the bottom barrier would start at the
        // floor line (y=800) with zero height
        let obstacle = Obstacle::new(100.0, 700.0, 50.0);

        let bird = bird_at(&config, 120.0, 750.0);
        assert!(!bird_hits_obstacle(&bird, &obstacle, &config));
    }

    #[test]
    fn test_hit_any_short_circuits_to_true() {
        let config = flat_config();
        let obstacles = vec![
            Obstacle::new(400.0, 200.0, 50.0),
            Obstacle::new(100.0, 200.0, 50.0),
        ];
        let bird = bird_at(&config, 120.0, 150.0);
        assert!(bird_hits_any(&bird, &obstacles, &config));
        assert!(!bird_hits_any(&bird_at(&config, 200.0, 250.0), &obstacles, &config));
    }

    #[test]
    fn test_pass_marked_and_counted_once() {
        let config = flat_config();
        // Trailing edge at 150; bird center at 160 + 20 = 180
        let mut obstacles = vec![Obstacle::new(100.0, 200.0, 50.0)];
        let bird = bird_at(&config, 160.0, 250.0);

        assert_eq!(collect_passes(&bird, &mut obstacles), 1);
        assert!(obstacles[0].passed);

        // Same tick, same position: nothing new to count
        assert_eq!(collect_passes(&bird, &mut obstacles), 0);
    }

    #[test]
    fn test_pass_requires_center_beyond_trailing_edge() {
        let config = flat_config();
        let mut obstacles = vec![Obstacle::new(100.0, 200.0, 50.0)];

        // Center at 140, trailing edge at 150: not yet
        let bird = bird_at(&config, 120.0, 250.0);
        assert_eq!(collect_passes(&bird, &mut obstacles), 0);
        assert!(!obstacles[0].passed);
    }
}
