//! Per-frame simulation tick
//!
//! Advances the world by one variable timestep. The store is read once at
//! the top; every decision in the tick uses that snapshot.

use glam::Vec2;

use super::collision::resolve_hook_collision;
use super::effects::update_effects;
use super::hook::{Landed, reel_caught_fish, update_hook};
use super::spawner::update_spawns;
use super::state::{Boat, World};
use super::steering::update_fish;
use crate::consts::*;
use crate::input::Controls;
use crate::store::{GamePhase, GameStore, InputFlags};
use crate::viewport::Viewport;

/// Inputs for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Controls held on the keyboard; merged with the store's flags
    pub keys: InputFlags,
    /// Wall-clock seconds, drives the hook sway
    pub time: f64,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Fish hooked this tick
    pub hooked: Option<u32>,
    /// Fish brought to the surface this tick
    pub landed: Option<Landed>,
    /// Level clock ran out this tick
    pub level_ended: bool,
}

/// Slide the boat along the surface
pub fn move_boat(boat: &mut Boat, controls: Controls, viewport: &Viewport, dt: f32) {
    let step = viewport.to_normalized(Vec2::new(BOAT_SPEED * dt, 0.0)).x;
    if controls.left {
        boat.x -= step;
    }
    if controls.right {
        boat.x += step;
    }
    boat.x = boat.x.clamp(BOAT_MIN_X, BOAT_MAX_X);
}

/// Advance the world by `dt` seconds
pub fn tick<S: GameStore + ?Sized>(
    world: &mut World,
    store: &mut S,
    input: &TickInput,
    viewport: &Viewport,
    dt: f32,
) -> TickReport {
    let snapshot = store.snapshot();
    let mut report = TickReport::default();

    if snapshot.phase != GamePhase::Playing {
        return report;
    }

    let controls = Controls::combine(input.keys, snapshot.input);

    move_boat(&mut world.boat, controls, viewport, dt);

    report.landed = update_hook(world, controls.cast, viewport, dt);
    if let Some(landed) = report.landed {
        store.add_score(landed.value);
    }

    update_spawns(world, snapshot.level, dt);
    update_fish(world, viewport, dt);
    report.hooked = resolve_hook_collision(world, viewport, input.time);

    let timer = snapshot.timer - dt;
    store.set_timer(timer);
    if timer <= 0.0 {
        report.level_ended = true;
        if snapshot.level >= MAX_LEVEL {
            store.game_over();
        } else {
            store.next_level();
        }
    }

    reel_caught_fish(world);
    update_effects(world, dt);

    report
}
