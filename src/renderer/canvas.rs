//! Canvas 2D backend for [`Surface`]

use std::collections::HashMap;
use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Color, Paint, Sprite, Surface, TextStyle};

/// CSS `rgba()` for a color
pub fn css_color(c: Color) -> String {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({},{},{},{})",
        channel(c[0]),
        channel(c[1]),
        channel(c[2]),
        c[3].clamp(0.0, 1.0)
    )
}

/// Draws onto a `<canvas>` 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    sprites: HashMap<Sprite, HtmlImageElement>,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            sprites: HashMap::new(),
        })
    }

    /// Start loading an image; it is drawn once the browser has decoded it
    pub fn load_sprite(&mut self, sprite: Sprite, url: &str) -> Result<(), JsValue> {
        let image = HtmlImageElement::new()?;
        image.set_src(url);
        self.sprites.insert(sprite, image);
        Ok(())
    }

    /// Map logical pixels onto a backing store scaled by `pixel_ratio`
    pub fn set_pixel_ratio(&self, pixel_ratio: f32) {
        let r = pixel_ratio as f64;
        let _ = self.ctx.set_transform(r, 0.0, 0.0, r, 0.0, 0.0);
    }

    fn loaded(&self, sprite: Sprite) -> Option<&HtmlImageElement> {
        self.sprites
            .get(&sprite)
            .filter(|img| img.complete() && img.natural_width() > 0)
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, size: Vec2) {
        self.ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: &Paint) {
        match paint {
            Paint::Solid(c) => self.ctx.set_fill_style_str(&css_color(*c)),
            Paint::LinearGradient { from, to, stops } => {
                let gradient = self.ctx.create_linear_gradient(
                    from.x as f64,
                    from.y as f64,
                    to.x as f64,
                    to.y as f64,
                );
                for (offset, c) in stops {
                    let _ = gradient.add_color_stop(*offset, &css_color(*c));
                }
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ctx.set_fill_style_str(&css_color(color));
        self.ctx.begin_path();
        let _ = self.ctx.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32) {
        self.stroke_arc(center, radius, 0.0, std::f32::consts::TAU, color, width);
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        self.ctx.set_fill_style_str(&css_color(color));
        self.ctx.begin_path();
        let _ = self.ctx.ellipse(
            center.x as f64,
            center.y as f64,
            radii.x as f64,
            radii.y as f64,
            0.0,
            0.0,
            TAU,
        );
        self.ctx.fill();
    }

    fn stroke_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        color: Color,
        width: f32,
    ) {
        self.ctx.set_stroke_style_str(&css_color(color));
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            start as f64,
            end as f64,
        );
        self.ctx.stroke();
    }

    fn stroke_polyline(&mut self, points: &[Vec2], color: Color, width: f32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.set_stroke_style_str(&css_color(color));
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.stroke();
    }

    fn sprite_ready(&self, sprite: Sprite) -> bool {
        self.loaded(sprite).is_some()
    }

    fn draw_sprite(&mut self, sprite: Sprite, center: Vec2, size: Vec2) {
        if let Some(image) = self.loaded(sprite) {
            let corner = center - size / 2.0;
            let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                image,
                corner.x as f64,
                corner.y as f64,
                size.x as f64,
                size.y as f64,
            );
        }
    }

    fn draw_text(&mut self, text: &str, anchor: Vec2, style: &TextStyle) {
        self.ctx.set_font(style.font);
        self.ctx
            .set_text_align(if style.centered { "center" } else { "left" });
        let (x, y) = (anchor.x as f64, anchor.y as f64);
        if let Some((color, width)) = style.stroke {
            self.ctx.set_stroke_style_str(&css_color(color));
            self.ctx.set_line_width(width as f64);
            let _ = self.ctx.stroke_text(text, x, y);
        }
        self.ctx.set_fill_style_str(&css_color(style.fill));
        let _ = self.ctx.fill_text(text, x, y);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        let _ = self.ctx.translate(offset.x as f64, offset.y as f64);
    }

    fn rotate(&mut self, angle: f32) {
        let _ = self.ctx.rotate(angle as f64);
    }

    fn scale(&mut self, factor: Vec2) {
        let _ = self.ctx.scale(factor.x as f64, factor.y as f64);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
    }

    fn set_glow(&mut self, color: Color, blur: f32) {
        self.ctx.set_shadow_color(&css_color(color));
        self.ctx.set_shadow_blur(blur.max(0.0) as f64);
    }
}
