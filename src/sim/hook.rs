//! Hook state machine
//!
//! ```text
//!   idle --cast held--> down --max depth / cast released--> up --surface--> idle
//! ```
//!
//! A fish can only be on the hook while it is `up`; collision forces the
//! `down -> up` turn early.

use glam::Vec2;

use super::effects::{spawn_score_popup, spawn_splash};
use super::state::{GameEvent, HookState, World};
use crate::consts::*;
use crate::viewport::Viewport;

/// What finished reeling in this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landed {
    pub fish_id: u32,
    pub value: i32,
}

/// Advance the hook one tick.
///
/// Returns the fish landed at the surface, if any; the caller applies its
/// value to the score.
pub fn update_hook(world: &mut World, cast: bool, viewport: &Viewport, dt: f32) -> Option<Landed> {
    if world.hook.state == HookState::Idle && cast {
        world.hook.state = HookState::Down;
        world.hook.pos.x = world.boat.x;
        world.events.push(GameEvent::Cast);
    }

    match world.hook.state {
        HookState::Idle => None,
        HookState::Down => {
            world.hook.vy = HOOK_DESCEND_SPEED;
            advance(world, viewport, dt);
            if world.hook.pos.y >= MAX_DEPTH || !cast {
                world.hook.pos.y = world.hook.pos.y.min(MAX_DEPTH);
                turn_around(world, viewport);
            }
            None
        }
        HookState::Up => {
            world.hook.vy = -HOOK_ASCEND_SPEED;
            advance(world, viewport, dt);
            if world.hook.pos.y <= HOOK_REST_Y {
                world.hook.pos.y = HOOK_REST_Y;
                land(world, viewport)
            } else {
                None
            }
        }
    }
}

fn advance(world: &mut World, viewport: &Viewport, dt: f32) {
    world.hook.pos.y += viewport.to_normalized(Vec2::new(0.0, world.hook.vy * dt)).y;
}

/// `down -> up`: splash and reel in
fn turn_around(world: &mut World, viewport: &Viewport) {
    world.hook.state = HookState::Up;
    world.events.push(GameEvent::Splash);
    let origin = viewport.to_pixels(world.hook.pos);
    spawn_splash(world, origin);
}

/// `up -> idle`: score whatever came up with the hook
fn land(world: &mut World, viewport: &Viewport) -> Option<Landed> {
    world.hook.state = HookState::Idle;
    world.hook.vy = 0.0;
    let fish = world.hook.caught.take()?;

    let origin = viewport.to_pixels(world.hook.pos);
    spawn_score_popup(world, origin, fish.value);
    world.events.push(if fish.value > 0 {
        GameEvent::PositiveCatch
    } else {
        GameEvent::NegativeCatch
    });
    log::debug!("Landed {} #{} for {}", fish.kind.as_str(), fish.id, fish.value);

    Some(Landed {
        fish_id: fish.id,
        value: fish.value,
    })
}

/// Keep a hooked fish dangling from the hook
pub fn reel_caught_fish(world: &mut World) {
    let pos = world.hook.pos;
    if let Some(fish) = world.hook.caught.as_mut() {
        fish.pos = pos;
    }
}
