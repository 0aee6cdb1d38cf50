//! Letterboxed scaling between the host window and the logical field
//!
//! The logical field is scaled uniformly to fit the window and centered;
//! the leftover bands stay black.

use glam::Vec2;

use crate::consts::{LOGICAL_H, LOGICAL_W};
use crate::sim::Rect;

/// Mapping for one window size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    /// Top-left of the scaled field inside the window (pixels)
    pub offset: Vec2,
    /// Size of the scaled field (whole pixels)
    pub size: Vec2,
}

impl Viewport {
    pub fn new(window_w: f32, window_h: f32) -> Self {
        let scale = (window_w / LOGICAL_W).min(window_h / LOGICAL_H);
        let size = Vec2::new((LOGICAL_W * scale).floor(), (LOGICAL_H * scale).floor());
        let offset = Vec2::new(
            ((window_w - size.x) / 2.0).floor(),
            ((window_h - size.y) / 2.0).floor(),
        );
        Self {
            scale,
            offset,
            size,
        }
    }

    /// Destination rectangle for blitting the logical frame
    pub fn target_rect(&self) -> Rect {
        Rect::new(self.offset.x, self.offset.y, self.size.x, self.size.y)
    }

    /// Window pixel to logical coordinates
    ///
    /// Points in the letterbox bands map outside `[0, LOGICAL_W] x [0, LOGICAL_H]`.
    pub fn to_logical(&self, window_pos: Vec2) -> Vec2 {
        if self.scale <= 0.0 {
            return Vec2::ZERO;
        }
        (window_pos - self.offset) / self.scale
    }

    pub fn to_window(&self, logical_pos: Vec2) -> Vec2 {
        logical_pos * self.scale + self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_at_logical_size() {
        let vp = Viewport::new(LOGICAL_W, LOGICAL_H);
        assert_eq!(vp.scale, 1.0);
        assert_eq!(vp.offset, Vec2::ZERO);
        assert_eq!(vp.to_logical(Vec2::new(123.0, 456.0)), Vec2::new(123.0, 456.0));
    }

    #[test]
    fn test_pillarbox_on_wide_window() {
        let vp = Viewport::new(1600.0, 600.0);
        assert_eq!(vp.scale, 1.0);
        assert_eq!(vp.offset, Vec2::new(400.0, 0.0));
        assert_eq!(vp.to_logical(Vec2::new(400.0, 0.0)), Vec2::ZERO);
        assert!(vp.to_logical(Vec2::new(100.0, 10.0)).x < 0.0);
    }

    #[test]
    fn test_letterbox_on_tall_window() {
        let vp = Viewport::new(400.0, 900.0);
        assert_eq!(vp.scale, 0.5);
        assert_eq!(vp.offset, Vec2::new(0.0, 300.0));
        let logical = vp.to_logical(Vec2::new(200.0, 450.0));
        assert_eq!(logical, Vec2::new(400.0, 300.0));
        assert_eq!(vp.to_window(logical), Vec2::new(200.0, 450.0));
        assert_eq!(vp.target_rect(), Rect::new(0.0, 300.0, 400.0, 300.0));
    }

    #[test]
    fn test_degenerate_window() {
        let vp = Viewport::new(0.0, 0.0);
        assert_eq!(vp.to_logical(Vec2::new(10.0, 10.0)), Vec2::ZERO);
    }
}
