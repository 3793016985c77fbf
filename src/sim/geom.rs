//! Axis-aligned geometry for collision tests
//!
//! Screen coordinates: x grows rightward, y grows downward, origin at the
//! top-left of the canvas.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left anchored)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict AABB overlap on both axes; shared edges do not collide
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Circle collision envelope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Clamp the center into the rectangle to find the nearest point, then
    /// compare squared distance against squared radius. Touching counts.
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        let closest = Vec2::new(
            self.center.x.clamp(rect.x, rect.right()),
            self.center.y.clamp(rect.y, rect.bottom()),
        );
        self.center.distance_squared(closest) <= self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(a.intersects(&Rect::new(-5.0, -5.0, 10.0, 10.0)));
        // Fully contained
        assert!(a.intersects(&Rect::new(2.0, 2.0, 2.0, 2.0)));
    }

    #[test]
    fn test_rect_edge_touch_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(0.0, 10.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(20.0, 20.0, 5.0, 5.0)));
    }

    #[test]
    fn test_bird_rect_against_barrier_pair() {
        // Barrier pair at x=100, width 50, gap top 200, gap 100, canvas 800 tall
        let top = Rect::new(100.0, 0.0, 50.0, 200.0);
        let bottom = Rect::new(100.0, 300.0, 50.0, 500.0);

        // Bird overlapping the top barrier
        let bird = Rect::new(120.0, 150.0, 40.0, 40.0);
        assert!(bird.intersects(&top));
        assert!(!bird.intersects(&bottom));

        // Bird fully inside the gap
        let bird = Rect::new(120.0, 250.0, 40.0, 40.0);
        assert!(!bird.intersects(&top));
        assert!(!bird.intersects(&bottom));
    }

    #[test]
    fn test_circle_rect_nearest_point() {
        let rect = Rect::new(100.0, 0.0, 50.0, 200.0);

        // Center left of the rect, within radius of its edge
        let circle = Circle::new(Vec2::new(90.0, 100.0), 12.0);
        assert!(circle.intersects_rect(&rect));

        // Same center, radius too small
        let circle = Circle::new(Vec2::new(90.0, 100.0), 8.0);
        assert!(!circle.intersects_rect(&rect));

        // Center inside the rect always hits
        let circle = Circle::new(Vec2::new(120.0, 50.0), 1.0);
        assert!(circle.intersects_rect(&rect));

        // Corner approach: nearest point is the corner itself
        let circle = Circle::new(Vec2::new(95.0, 205.0), 7.0);
        assert!(!circle.intersects_rect(&rect));
        let circle = Circle::new(Vec2::new(95.0, 205.0), 8.0);
        assert!(circle.intersects_rect(&rect));
    }

    #[test]
    fn test_circle_touching_edge_counts() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let circle = Circle::new(Vec2::new(15.0, 5.0), 5.0);
        assert!(circle.intersects_rect(&rect));
    }
}
