//! Hook vs fish collision
//!
//! Boxes are tested in pixel space so the catch radius looks the same on
//! every screen size. The hook sways a little; the sway counts.

use glam::Vec2;

use super::state::{Fish, GameEvent, Hook, HookState, World};
use crate::consts::*;
use crate::viewport::Viewport;

/// Hook position in pixels including its cosmetic sway
pub fn hook_pixel_pos(hook: &Hook, viewport: &Viewport, time: f64) -> Vec2 {
    let sway = ((time * HOOK_SWAY_RATE as f64).sin() as f32) * HOOK_SWAY_PX;
    viewport.to_pixels(hook.pos) + Vec2::new(sway, 0.0)
}

/// Axis-aligned overlap between the hook and one fish
pub fn hook_overlaps(hook_px: Vec2, fish: &Fish, viewport: &Viewport) -> bool {
    let d = (viewport.to_pixels(fish.pos) - hook_px).abs();
    let reach = fish.half_extents() + Vec2::splat(HOOK_SIZE);
    d.x < reach.x && d.y < reach.y
}

/// Index of the first fish in pool order touching the hook
pub fn find_catch(fish: &[Fish], hook_px: Vec2, viewport: &Viewport) -> Option<usize> {
    fish.iter().position(|f| hook_overlaps(hook_px, f, viewport))
}

/// Hook at most one fish this tick.
///
/// Returns the caught fish's id.
pub fn resolve_hook_collision(world: &mut World, viewport: &Viewport, time: f64) -> Option<u32> {
    let hook = &world.hook;
    if hook.caught.is_some() || hook.state == HookState::Idle {
        return None;
    }

    let hook_px = hook_pixel_pos(hook, viewport, time);
    let index = find_catch(&world.fish, hook_px, viewport)?;

    // Keeps pool order for everyone else
    let fish = world.fish.remove(index);
    let id = fish.id;
    log::debug!("Hooked {} #{}", fish.kind.as_str(), id);

    world.hook.caught = Some(fish);
    world.hook.state = HookState::Up;
    world.events.push(GameEvent::Splash);
    Some(id)
}
