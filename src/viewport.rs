//! Logical canvas size and pixel scaling
//!
//! The simulation works in normalized coordinates; this is the only place
//! that knows how big the drawing surface is.

use glam::Vec2;

/// Current drawing-surface dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical (CSS) width
    pub width: f32,
    /// Logical (CSS) height
    pub height: f32,
    /// Device pixel ratio
    pub scale: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            scale: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            scale: 1.0,
        }
    }

    /// Recompute after the surface resized.
    ///
    /// Returns the backing-store size in device pixels.
    pub fn resize(
        &mut self,
        client_width: f32,
        client_height: f32,
        pixel_ratio: f32,
    ) -> (u32, u32) {
        self.width = client_width.max(0.0);
        self.height = client_height.max(0.0);
        self.scale = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        (
            (self.width * self.scale).floor() as u32,
            (self.height * self.scale).floor() as u32,
        )
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Normalized position -> logical pixels
    #[inline]
    pub fn to_pixels(&self, norm: Vec2) -> Vec2 {
        norm * self.size()
    }

    /// Pixel displacement -> normalized displacement.
    ///
    /// A zero dimension produces a zero component instead of dividing by it.
    #[inline]
    pub fn to_normalized(&self, px: Vec2) -> Vec2 {
        Vec2::new(guarded_div(px.x, self.width), guarded_div(px.y, self.height))
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[inline]
fn guarded_div(value: f32, denom: f32) -> f32 {
    if denom > 0.0 { value / denom } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_reports_backing_store() {
        let mut vp = Viewport::default();
        let (w, h) = vp.resize(800.0, 600.5, 2.0);
        assert_eq!((w, h), (1600, 1201));
        assert_eq!(vp.size(), Vec2::new(800.0, 600.5));
    }

    #[test]
    fn test_bad_pixel_ratio_falls_back_to_one() {
        let mut vp = Viewport::default();
        vp.resize(100.0, 100.0, 0.0);
        assert_eq!(vp.scale, 1.0);
    }

    #[test]
    fn test_conversions() {
        let vp = Viewport::new(400.0, 200.0);
        assert_eq!(vp.to_pixels(Vec2::new(0.5, 0.5)), Vec2::new(200.0, 100.0));
        assert_eq!(vp.to_normalized(Vec2::new(40.0, 20.0)), Vec2::new(0.1, 0.1));
    }

    #[test]
    fn test_zero_size_is_safe() {
        let vp = Viewport::new(0.0, 0.0);
        assert!(vp.is_empty());
        let n = vp.to_normalized(Vec2::new(123.0, -4.0));
        assert_eq!(n, Vec2::ZERO);
        assert!(n.is_finite());
    }
}
