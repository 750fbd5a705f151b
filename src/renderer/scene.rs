//! Scene composition
//!
//! Draw order, back to front: sky and water, fish (shallow first), boat,
//! fishing line, hook, splash droplets, score popups.

use std::f32::consts::PI;

use glam::Vec2;

use super::colors;
use super::{Paint, Sprite, Surface, TextStyle};
use crate::settings::Settings;
use crate::sim::{Fish, FishKind, HookState, World};
use crate::viewport::Viewport;

/// Share of the height above the waterline
const SKY_FRACTION: f32 = 0.35;
/// Boat draw height as a share of the viewport
const BOAT_DRAW_Y: f32 = 0.08;
const BOAT_SPRITE_SIZE: Vec2 = Vec2::new(120.0, 80.0);
/// Where the line leaves the boat, below its center
const LINE_DROP: f32 = 20.0;

const HOOK_RADIUS: f32 = 6.0;
const HOOK_DETAIL_RADIUS: f32 = 4.0;
const PARTICLE_RADIUS: f32 = 3.0;

const POPUP_FONT: &str = "bold 18px Orbitron, monospace";

/// Draw one frame of the world
pub fn render_world<S: Surface + ?Sized>(
    surface: &mut S,
    world: &World,
    viewport: &Viewport,
    time: f64,
    settings: &Settings,
) {
    let t = time as f32;
    let motion = settings.motion_scale();

    surface.clear(viewport.size());
    draw_background(surface, viewport);
    draw_fishes(surface, world, viewport, settings);

    let boat_anchor = Vec2::new(world.boat.x * viewport.width, viewport.height * BOAT_DRAW_Y);
    draw_boat(surface, boat_anchor, t, motion);
    if world.hook.state != HookState::Idle {
        draw_line(surface, world, viewport, boat_anchor, t, settings);
    }
    draw_hook(surface, world, viewport, t, motion);

    draw_particles(surface, world, settings);
    draw_popups(surface, world, settings);
}

fn draw_background<S: Surface + ?Sized>(surface: &mut S, viewport: &Viewport) {
    let (w, h) = (viewport.width, viewport.height);
    let horizon = h * SKY_FRACTION;

    surface.fill_rect(
        Vec2::ZERO,
        Vec2::new(w, horizon),
        &Paint::LinearGradient {
            from: Vec2::ZERO,
            to: Vec2::new(0.0, horizon),
            stops: vec![(0.0, colors::SKY_TOP), (1.0, colors::SKY_HORIZON)],
        },
    );
    surface.fill_rect(
        Vec2::new(0.0, horizon),
        Vec2::new(w, h - horizon),
        &Paint::LinearGradient {
            from: Vec2::new(0.0, horizon),
            to: Vec2::new(0.0, h),
            stops: vec![(0.0, colors::WATER_TOP), (1.0, colors::WATER_DEEP)],
        },
    );
}

/// Sprite scale relative to the collision box
fn sprite_scale(kind: FishKind) -> f32 {
    match kind {
        FishKind::Tiny => 0.6,
        FishKind::Small => 0.8,
        FishKind::Medium => 1.0,
        FishKind::Fast => 0.9,
        FishKind::Rare => 1.2,
        FishKind::Junk => 0.8,
    }
}

/// On-screen sprite size for a fish
pub fn fish_sprite_size(kind: FishKind) -> Vec2 {
    let size = kind.stats().size;
    let scale = sprite_scale(kind);
    Vec2::new(size * scale * 10.0, size * 0.6 * scale * 12.5)
}

/// Deeper fish fade out a little
pub fn depth_alpha(y: f32) -> f32 {
    (1.0 - (y - 0.2) * 0.3).clamp(0.4, 1.0)
}

fn draw_fishes<S: Surface + ?Sized>(
    surface: &mut S,
    world: &World,
    viewport: &Viewport,
    settings: &Settings,
) {
    let mut sorted: Vec<&Fish> = world.fish.iter().chain(world.hook.caught.as_ref()).collect();
    sorted.sort_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    for fish in sorted {
        let at = viewport.to_pixels(fish.pos);
        if fish.kind == FishKind::Rare && settings.glow() {
            surface.save();
            surface.set_glow(colors::RARE_GLOW, 20.0);
            draw_fish(surface, fish, at, settings.motion_scale());
            surface.restore();
        } else {
            draw_fish(surface, fish, at, settings.motion_scale());
        }
    }
}

fn draw_fish<S: Surface + ?Sized>(surface: &mut S, fish: &Fish, at: Vec2, motion: f32) {
    let width = fish.kind.stats().size;
    let sprite = Sprite::Fish(fish.kind);

    surface.save();
    surface.translate(at);

    if !surface.sprite_ready(sprite) {
        let color = if fish.kind == FishKind::Junk {
            colors::JUNK_FALLBACK
        } else {
            colors::FISH_FALLBACK
        };
        surface.fill_circle(Vec2::ZERO, width / 2.0, color);
        surface.restore();
        return;
    }

    let bob = fish.swim_phase.sin() * width * 0.1 * motion;
    surface.translate(Vec2::new(0.0, bob));

    // Art faces left
    let facing = if fish.vel.x < 0.0 { 1.0 } else { -1.0 };
    surface.scale(Vec2::new(facing, 1.0));
    surface.rotate(fish.vel.y.atan2(fish.vel.x.abs()) * 0.3);

    surface.set_alpha(depth_alpha(fish.pos.y));
    surface.draw_sprite(sprite, Vec2::ZERO, fish_sprite_size(fish.kind));
    surface.restore();
}

fn draw_boat<S: Surface + ?Sized>(surface: &mut S, anchor: Vec2, t: f32, motion: f32) {
    let bob = (t * 1.5).sin() * 3.0 * motion;
    let rock = (t * 0.8).sin() * 0.05 * motion;

    surface.save();
    surface.translate(anchor + Vec2::new(0.0, bob));
    surface.rotate(rock);

    if surface.sprite_ready(Sprite::Boat) {
        surface.draw_sprite(Sprite::Boat, Vec2::ZERO, BOAT_SPRITE_SIZE);
    } else {
        surface.fill_ellipse(Vec2::ZERO, Vec2::new(50.0, 20.0), colors::HULL);
        let deck = Paint::Solid(colors::DECK);
        let trim = Paint::Solid(colors::TRIM);
        surface.fill_rect(Vec2::new(-35.0, -15.0), Vec2::new(70.0, 20.0), &deck);
        surface.fill_rect(Vec2::new(-40.0, -5.0), Vec2::new(80.0, 3.0), &trim);
        surface.fill_rect(Vec2::new(-25.0, -20.0), Vec2::new(50.0, 8.0), &trim);
    }
    surface.restore();
}

/// Points along the fishing line from the boat to the hook
pub fn line_points(from: Vec2, hook_px: Vec2, state: HookState, t: f32, motion: f32) -> Vec<Vec2> {
    let length = (hook_px.y - from.y).abs();
    let segments = ((length / 15.0).floor() as usize).max(8);
    let slack = (if state == HookState::Down { 1.0 } else { 0.3 }) * motion;

    let mut points = Vec::with_capacity(segments + 1);
    points.push(from);
    for i in 1..segments {
        let p = i as f32 / segments as f32;
        let wave = (t * 3.0 + p * 8.0).sin() * p * 8.0 * slack;
        points.push(Vec2::new(from.x + wave, from.y + p * length));
    }
    points.push(hook_px);
    points
}

fn draw_line<S: Surface + ?Sized>(
    surface: &mut S,
    world: &World,
    viewport: &Viewport,
    boat_anchor: Vec2,
    t: f32,
    settings: &Settings,
) {
    let from = boat_anchor + Vec2::new(0.0, LINE_DROP);
    let hook_px = viewport.to_pixels(world.hook.pos);
    let points = line_points(from, hook_px, world.hook.state, t, settings.motion_scale());
    surface.stroke_polyline(&points, colors::ROPE, 2.0);

    if settings.quality.rope_texture() {
        // Beads sit on the line itself, the last point is the hook
        for bead in &points[..points.len() - 1] {
            surface.stroke_circle(*bead, 1.0, colors::ROPE_BEAD, 1.0);
        }
    }
}

fn draw_hook<S: Surface + ?Sized>(
    surface: &mut S,
    world: &World,
    viewport: &Viewport,
    t: f32,
    motion: f32,
) {
    let sway = if world.hook.state == HookState::Idle {
        0.0
    } else {
        (t * 4.0).sin() * 2.0 * motion
    };
    let center = viewport.to_pixels(world.hook.pos) + Vec2::new(sway, 0.0);

    surface.fill_circle(center, HOOK_RADIUS, colors::HOOK);
    surface.stroke_arc(center, HOOK_DETAIL_RADIUS, PI * 0.2, PI * 0.8, colors::HOOK_DETAIL, 2.0);
}

fn draw_particles<S: Surface + ?Sized>(surface: &mut S, world: &World, settings: &Settings) {
    for p in world.particles.iter().filter(|p| p.life > 0.0) {
        surface.save();
        surface.set_alpha(p.life.clamp(0.0, 1.0));
        if settings.glow() {
            surface.set_glow(p.color, 5.0);
        }
        surface.fill_circle(p.pos, PARTICLE_RADIUS, p.color);
        surface.restore();
    }
}

fn draw_popups<S: Surface + ?Sized>(surface: &mut S, world: &World, settings: &Settings) {
    for popup in world.popups.iter().filter(|o| o.life > 0.0) {
        let anchor = popup.pos - Vec2::new(0.0, 8.0);
        let mut style = TextStyle {
            font: POPUP_FONT,
            fill: popup.color,
            stroke: Some((colors::POPUP_OUTLINE, 3.0)),
            centered: true,
        };

        surface.save();
        surface.set_alpha(popup.life.clamp(0.0, 1.0));
        surface.draw_text(&popup.text, anchor, &style);
        if popup.positive && settings.glow() {
            surface.set_glow(colors::POPUP_GLOW, 10.0);
            style.stroke = None;
            surface.draw_text(&popup.text, anchor, &style);
        }
        surface.restore();
    }
}
