//! 2D rendering module
//!
//! The scene is drawn through the [`Surface`] trait so the same drawing code
//! runs against a browser canvas or a recording surface in tests.

pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use scene::render_world;

use glam::Vec2;

use crate::sim::FishKind;

/// Linear RGBA, each channel 0..1
pub type Color = [f32; 4];

/// Fill for rectangles
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Gradient between two points with color stops at offsets 0..1
    LinearGradient {
        from: Vec2,
        to: Vec2,
        stops: Vec<(f32, Color)>,
    },
}

/// Images the scene may draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Boat,
    Fish(FishKind),
}

/// Text draw parameters
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// CSS font shorthand
    pub font: &'static str,
    pub fill: Color,
    pub stroke: Option<(Color, f32)>,
    /// Centered on the anchor when true, left-aligned otherwise
    pub centered: bool,
}

/// Immediate-mode 2D drawing target in logical pixels
pub trait Surface {
    fn clear(&mut self, size: Vec2);

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: &Paint);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32);
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color);
    fn stroke_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        color: Color,
        width: f32,
    );
    fn stroke_polyline(&mut self, points: &[Vec2], color: Color, width: f32);

    /// Whether an image has finished loading
    fn sprite_ready(&self, sprite: Sprite) -> bool;
    /// Draw an image centered on `center`
    fn draw_sprite(&mut self, sprite: Sprite, center: Vec2, size: Vec2);

    fn draw_text(&mut self, text: &str, anchor: Vec2, style: &TextStyle);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, angle: f32);
    fn scale(&mut self, factor: Vec2);

    fn set_alpha(&mut self, alpha: f32);
    /// Shadow glow; blur 0 turns it off
    fn set_glow(&mut self, color: Color, blur: f32);
}

/// Color palette
pub mod colors {
    use super::Color;

    /// `#RRGGBB` to a color
    pub const fn hex(rgb: u32) -> Color {
        [
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
            1.0,
        ]
    }

    pub const SKY_TOP: Color = hex(0x87CEEB);
    pub const SKY_HORIZON: Color = hex(0xE0F6FF);
    pub const WATER_TOP: Color = hex(0x1E90FF);
    pub const WATER_DEEP: Color = hex(0x000080);

    pub const FISH_FALLBACK: Color = hex(0x87CEEB);
    pub const JUNK_FALLBACK: Color = hex(0x654321);
    pub const RARE_GLOW: Color = hex(0xFFD700);

    pub const HULL: Color = hex(0x8B4513);
    pub const DECK: Color = hex(0xD2691E);
    pub const TRIM: Color = hex(0x654321);

    pub const ROPE: Color = [1.0, 1.0, 1.0, 0.8];
    pub const ROPE_BEAD: Color = [1.0, 1.0, 1.0, 0.4];
    pub const HOOK: Color = hex(0xEEEEEE);
    pub const HOOK_DETAIL: Color = hex(0xCCCCCC);

    pub const POPUP_OUTLINE: Color = [0.0, 0.0, 0.0, 0.8];
    pub const POPUP_GLOW: Color = hex(0x10B981);
}
