//! Splash particles and floating score popups
//!
//! Pure visual feedback in pixel space; nothing here feeds back into the
//! simulation.

use glam::Vec2;
use rand::Rng;

use super::state::{Particle, Popup, World};
use crate::consts::*;

/// Splash droplet tint
pub const SPLASH_COLOR: [f32; 4] = [0.68, 0.85, 0.9, 0.8];
/// Popup text colors
pub const POSITIVE_POPUP_COLOR: [f32; 4] = [0.65, 0.95, 0.82, 1.0];
pub const NEGATIVE_POPUP_COLOR: [f32; 4] = [1.0, 0.79, 0.79, 1.0];

/// Burst of droplets thrown up and out from `origin`
pub fn spawn_splash(world: &mut World, origin: Vec2) {
    for _ in 0..SPLASH_PARTICLES {
        let vel = Vec2::new(
            world.rng.random_range(-40.0..40.0),
            world.rng.random_range(-80.0..-30.0),
        );
        world.particles.push(Particle {
            pos: origin,
            vel,
            life: SPLASH_LIFE,
            color: SPLASH_COLOR,
        });
    }
}

/// Floating "+N" / "-N" over the boat
pub fn spawn_score_popup(world: &mut World, origin: Vec2, value: i32) {
    let positive = value > 0;
    let text = if positive {
        format!("+{value}")
    } else {
        value.to_string()
    };
    world.popups.push(Popup {
        pos: origin,
        text,
        life: POPUP_LIFE,
        color: if positive {
            POSITIVE_POPUP_COLOR
        } else {
            NEGATIVE_POPUP_COLOR
        },
        positive,
    });
}

/// Integrate and expire effects
pub fn update_effects(world: &mut World, dt: f32) {
    let mut i = 0;
    while i < world.particles.len() {
        let p = &mut world.particles[i];
        p.pos += p.vel * dt;
        p.vel.y += PARTICLE_GRAVITY * dt;
        p.life -= dt;
        if p.life <= 0.0 {
            world.particles.swap_remove(i);
        } else {
            i += 1;
        }
    }

    let mut i = 0;
    while i < world.popups.len() {
        let o = &mut world.popups[i];
        o.pos.y -= POPUP_RISE_SPEED * dt;
        o.life -= dt;
        if o.life <= 0.0 {
            world.popups.swap_remove(i);
        } else {
            i += 1;
        }
    }
}
