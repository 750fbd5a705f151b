//! Fish spawning
//!
//! Which species show up depends on the level; how many and how often is
//! governed by `fish_cap` and `spawn_interval`.

use glam::Vec2;
use rand::Rng;

use super::state::{Fish, FishKind, World};
use crate::consts::*;
use crate::{fish_cap, spawn_interval};

/// Species that can appear at a level
pub fn species_for_level(level: u32) -> Vec<FishKind> {
    let mut pool = vec![FishKind::Tiny, FishKind::Small, FishKind::Medium, FishKind::Junk];
    if level >= 2 {
        pool.push(FishKind::Fast);
    }
    if level >= 3 {
        pool.push(FishKind::Rare);
    }
    pool
}

/// Create one fish entering from a random edge.
///
/// Returns `None` when the pool is already at the level cap.
pub fn spawn_fish(world: &mut World, level: u32) -> Option<u32> {
    if world.fish_count() >= fish_cap(level) {
        return None;
    }

    let pool = species_for_level(level);
    let kind = pool[world.rng.random_range(0..pool.len())];
    let stats = kind.stats();

    let depth = stats.depth + world.rng.random_range(-0.1..0.1);
    let y = depth.clamp(WATER_TOP, MAX_DEPTH);
    let dir = if world.rng.random_bool(0.5) { -1.0 } else { 1.0 };
    let x = if dir < 0.0 { 1.1 } else { -0.1 };

    let vy = world.rng.random_range(-5.0..5.0);
    let swim_phase = world.rng.random_range(0.0..std::f32::consts::TAU);
    let school_group = world.rng.random_range(0..SCHOOL_GROUPS);

    let id = world.next_entity_id();
    world.fish.push(Fish {
        id,
        kind,
        pos: Vec2::new(x, y),
        vel: Vec2::new(dir * stats.speed, vy),
        value: stats.value,
        depth,
        swim_phase,
        school_group,
        avoidance_target: None,
    });
    log::debug!("Spawned {} #{} at ({:.2}, {:.2})", kind.as_str(), id, x, y);
    Some(id)
}

/// Advance the spawn clock; spawns at most one fish
pub fn update_spawns(world: &mut World, level: u32, dt: f32) {
    world.spawn_acc += dt;
    if world.spawn_acc > spawn_interval(level) && world.fish_count() < fish_cap(level) {
        world.spawn_acc = 0.0;
        spawn_fish(world, level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_gating() {
        assert!(!species_for_level(1).contains(&FishKind::Fast));
        assert!(species_for_level(2).contains(&FishKind::Fast));
        assert!(!species_for_level(2).contains(&FishKind::Rare));
        assert_eq!(species_for_level(3).len(), 6);
    }

    #[test]
    fn test_spawned_fish_layout() {
        let mut world = World::new(7);
        for _ in 0..20 {
            spawn_fish(&mut world, 3);
        }
        for fish in &world.fish {
            let stats = fish.kind.stats();
            assert!(fish.pos.x == -0.1 || fish.pos.x == 1.1);
            // Entering from the left means swimming right
            assert_eq!(fish.pos.x < 0.0, fish.vel.x > 0.0);
            assert_eq!(fish.vel.x.abs(), stats.speed);
            assert!((fish.depth - stats.depth).abs() <= 0.1 + 1e-6);
            assert!((WATER_TOP..=MAX_DEPTH).contains(&fish.pos.y));
            assert!(fish.school_group < SCHOOL_GROUPS);
            assert!(fish.vel.y.abs() <= 5.0);
            assert_eq!(fish.value, stats.value);
        }
    }

    #[test]
    fn test_spawn_respects_cap() {
        let mut world = World::new(3);
        for _ in 0..100 {
            spawn_fish(&mut world, 1);
        }
        assert_eq!(world.fish.len(), fish_cap(1));
        assert_eq!(spawn_fish(&mut world, 1), None);
    }

    #[test]
    fn test_spawn_timing() {
        let mut world = World::new(11);
        // Level 1: interval 1.8s
        for _ in 0..35 {
            update_spawns(&mut world, 1, 0.05);
        }
        assert!(world.fish.is_empty());
        update_spawns(&mut world, 1, 0.05);
        update_spawns(&mut world, 1, 0.05);
        assert_eq!(world.fish.len(), 1);
        assert!(world.spawn_acc < 0.1);
    }
}
