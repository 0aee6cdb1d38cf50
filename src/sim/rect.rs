//! Axis-aligned rectangle geometry for bricks, paddle and menu buttons
//!
//! Screen convention: origin top-left, y grows downward.
//! - left/right: horizontal extent
//! - top/bottom: vertical extent (top < bottom)

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in logical field units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centered on a point
    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Grow by `margin` on every side
    pub fn inflate(&self, margin: f32) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.w + 2.0 * margin,
            self.h + 2.0 * margin,
        )
    }

    /// Half-open point test: left and top edges inclusive, right and bottom exclusive
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_point_half_open() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert!(r.contains_point(Vec2::new(10.0, 20.0)));
        assert!(r.contains_point(Vec2::new(39.9, 59.9)));
        assert!(!r.contains_point(Vec2::new(40.0, 30.0)));
        assert!(!r.contains_point(Vec2::new(20.0, 60.0)));
        assert!(!r.contains_point(Vec2::new(9.9, 30.0)));
    }

    #[test]
    fn test_inflate() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0).inflate(8.0);
        assert_eq!(r, Rect::new(2.0, 12.0, 46.0, 56.0));
        // Center is unchanged
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(Vec2::new(400.0, 540.0), 110.0, 16.0);
        assert!((r.left() - 345.0).abs() < 0.001);
        assert!((r.right() - 455.0).abs() < 0.001);
        assert!((r.top() - 532.0).abs() < 0.001);
        assert!((r.bottom() - 548.0).abs() < 0.001);
    }
}
