//! Fish steering
//!
//! Each fish builds a target velocity from five additive forces, eases its
//! current velocity toward it, clamps to its species' limits and moves.
//! Fish are updated in pool order, so a fish sees the already-updated state
//! of the fish before it in the same frame.

use glam::Vec2;

use super::state::{Fish, FishKind, Hook, HookState, World};
use crate::consts::*;
use crate::viewport::Viewport;

/// Swim phase advance (rad/s)
pub const SWIM_PHASE_RATE: f32 = 4.0;

/// Neighbourhood windows (normalized units)
const SCHOOL_WINDOW: Vec2 = Vec2::new(0.3, 0.2);
const SEPARATION_WINDOW: Vec2 = Vec2::new(0.15, 0.1);
const HOOK_ALERT_RADIUS: f32 = 0.2;

/// Force gains
const ALIGNMENT: f32 = 0.1;
const COHESION: Vec2 = Vec2::new(20.0, 10.0);
const SEPARATION: Vec2 = Vec2::new(50.0, 30.0);
const HOOK_REPULSION: Vec2 = Vec2::new(100.0, 80.0);
const FAST_FISH_SKITTISHNESS: f32 = 1.5;
const DEPTH_SPRING: f32 = 20.0;
const WIGGLE_GAIN: f32 = 0.002;

/// Velocity easing rates (1/s), horizontal and vertical
const SMOOTHING: Vec2 = Vec2::new(2.0, 3.0);

/// Alignment + cohesion with same-school neighbours
pub fn schooling(fish: &[Fish], index: usize) -> Vec2 {
    let me = &fish[index];
    let mut count = 0usize;
    let mut sum_vel = Vec2::ZERO;
    let mut sum_pos = Vec2::ZERO;

    for (i, other) in fish.iter().enumerate() {
        if i == index || other.school_group != me.school_group {
            continue;
        }
        let d = (other.pos - me.pos).abs();
        if d.x < SCHOOL_WINDOW.x && d.y < SCHOOL_WINDOW.y {
            sum_vel += other.vel;
            sum_pos += other.pos;
            count += 1;
        }
    }

    if count == 0 {
        return Vec2::ZERO;
    }
    let n = count as f32;
    let avg_vel = sum_vel / n;
    let avg_pos = sum_pos / n;
    (avg_vel - me.vel) * ALIGNMENT + (avg_pos - me.pos) * COHESION
}

/// Push away from anyone too close, regardless of school
pub fn separation(fish: &[Fish], index: usize) -> Vec2 {
    let me = &fish[index];
    fish.iter()
        .enumerate()
        .filter(|&(i, other)| {
            let d = (other.pos - me.pos).abs();
            i != index && d.x < SEPARATION_WINDOW.x && d.y < SEPARATION_WINDOW.y
        })
        .map(|(_, other)| (me.pos - other.pos) * SEPARATION)
        .sum()
}

/// Flee a deployed hook that came too close
pub fn hook_avoidance(fish: &Fish, hook: &Hook) -> Option<Vec2> {
    if hook.state == HookState::Idle {
        return None;
    }
    let away = fish.pos - hook.pos;
    if away.length() >= HOOK_ALERT_RADIUS {
        return None;
    }
    let mut force = away * HOOK_REPULSION;
    if fish.kind == FishKind::Fast {
        force *= FAST_FISH_SKITTISHNESS;
    }
    Some(force)
}

/// Vertical wiggle driven by the swim phase. Every kind wiggles at the
/// phase rate; only the amplitude differs.
pub fn oscillation(fish: &Fish) -> f32 {
    let amplitude = if fish.kind == FishKind::Tiny { 0.3 } else { 0.5 };
    fish.swim_phase.sin() * amplitude * fish.kind.stats().speed * WIGGLE_GAIN
}

/// Spring back toward the preferred depth
pub fn depth_seeking(fish: &Fish) -> f32 {
    (fish.depth - fish.pos.y) * DEPTH_SPRING
}

/// Target velocity for one fish, plus the hook position if it is fleeing
pub fn target_velocity(fish: &[Fish], index: usize, hook: &Hook) -> (Vec2, Option<Vec2>) {
    let me = &fish[index];
    let mut target = me.vel;
    target += schooling(fish, index);
    target += separation(fish, index);

    let avoiding = hook_avoidance(me, hook);
    if let Some(force) = avoiding {
        target += force;
    }

    target.y += oscillation(me);
    target.y += depth_seeking(me);
    (target, avoiding.map(|_| hook.pos))
}

/// Frame-rate independent easing factor
#[inline]
fn ease(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt).exp()
}

/// Steer, move and cull every fish in the pool
pub fn update_fish(world: &mut World, viewport: &Viewport, dt: f32) {
    let blend = Vec2::new(ease(SMOOTHING.x, dt), ease(SMOOTHING.y, dt));

    for i in 0..world.fish.len() {
        world.fish[i].swim_phase += SWIM_PHASE_RATE * dt;
        let (target, fleeing) = target_velocity(&world.fish, i, &world.hook);

        let fish = &mut world.fish[i];
        fish.avoidance_target = fleeing;

        let limits = fish.kind.speed_limits();
        fish.vel += (target - fish.vel) * blend;
        fish.vel = fish.vel.clamp(-limits, limits);

        fish.pos += viewport.to_normalized(fish.vel * dt);
        fish.pos.y = fish.pos.y.clamp(WATER_TOP, MAX_DEPTH);
    }

    world
        .fish
        .retain(|f| (DESPAWN_MIN_X..=DESPAWN_MAX_X).contains(&f.pos.x));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fish_at(id: u32, kind: FishKind, pos: Vec2, vel: Vec2, group: u8) -> Fish {
        Fish {
            id,
            kind,
            pos,
            vel,
            value: kind.stats().value,
            depth: pos.y,
            swim_phase: 0.0,
            school_group: group,
            avoidance_target: None,
        }
    }

    #[test]
    fn test_lonely_fish_feels_no_school() {
        let fish = vec![fish_at(1, FishKind::Small, Vec2::new(0.5, 0.5), Vec2::X * 10.0, 0)];
        assert_eq!(schooling(&fish, 0), Vec2::ZERO);
        assert_eq!(separation(&fish, 0), Vec2::ZERO);
    }

    #[test]
    fn test_schooling_ignores_other_groups() {
        let fish = vec![
            fish_at(1, FishKind::Small, Vec2::new(0.5, 0.5), Vec2::ZERO, 0),
            fish_at(2, FishKind::Small, Vec2::new(0.6, 0.5), Vec2::X * 10.0, 1),
        ];
        assert_eq!(schooling(&fish, 0), Vec2::ZERO);
    }

    #[test]
    fn test_schooling_aligns_and_gathers() {
        let fish = vec![
            fish_at(1, FishKind::Small, Vec2::new(0.5, 0.5), Vec2::ZERO, 2),
            fish_at(2, FishKind::Small, Vec2::new(0.7, 0.6), Vec2::new(10.0, 0.0), 2),
        ];
        let f = schooling(&fish, 0);
        // 0.1 * 10 + 0.2 * 20 horizontally, 0.1 * 10 vertically
        assert!((f.x - 5.0).abs() < 1e-4);
        assert!((f.y - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_separation_pushes_apart() {
        let fish = vec![
            fish_at(1, FishKind::Small, Vec2::new(0.5, 0.5), Vec2::ZERO, 0),
            fish_at(2, FishKind::Junk, Vec2::new(0.6, 0.55), Vec2::ZERO, 1),
        ];
        let f = separation(&fish, 0);
        assert!((f.x + 5.0).abs() < 1e-4);
        assert!((f.y + 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_idle_hook_is_ignored() {
        let fish = fish_at(1, FishKind::Small, Vec2::new(0.5, 0.5), Vec2::ZERO, 0);
        let hook = Hook {
            pos: Vec2::new(0.5, 0.45),
            ..Default::default()
        };
        assert_eq!(hook_avoidance(&fish, &hook), None);
    }

    #[test]
    fn test_fast_fish_flee_harder() {
        let hook = Hook {
            pos: Vec2::new(0.5, 0.45),
            state: HookState::Down,
            ..Default::default()
        };
        let calm = fish_at(1, FishKind::Small, Vec2::new(0.55, 0.5), Vec2::ZERO, 0);
        let skittish = fish_at(2, FishKind::Fast, Vec2::new(0.55, 0.5), Vec2::ZERO, 0);

        let a = hook_avoidance(&calm, &hook).unwrap();
        let b = hook_avoidance(&skittish, &hook).unwrap();
        assert!((a.x - 5.0).abs() < 1e-4 && (a.y - 4.0).abs() < 1e-4);
        assert!((b - a * 1.5).length() < 1e-4);

        let far = fish_at(3, FishKind::Small, Vec2::new(0.9, 0.5), Vec2::ZERO, 0);
        assert_eq!(hook_avoidance(&far, &hook), None);
    }

    #[test]
    fn test_fleeing_fish_remembers_the_hook() {
        let mut world = World::new(1);
        world.hook.state = HookState::Down;
        world.hook.pos = Vec2::new(0.5, 0.4);
        world
            .fish
            .push(fish_at(1, FishKind::Small, Vec2::new(0.52, 0.42), Vec2::ZERO, 0));
        update_fish(&mut world, &Viewport::new(800.0, 600.0), 0.016);
        assert_eq!(world.fish[0].avoidance_target, Some(Vec2::new(0.5, 0.4)));
    }

    #[test]
    fn test_depth_spring() {
        let mut fish = fish_at(1, FishKind::Medium, Vec2::new(0.5, 0.3), Vec2::ZERO, 0);
        fish.depth = 0.5;
        assert!((depth_seeking(&fish) - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_velocity_clamped_to_species_limits() {
        let mut world = World::new(1);
        world.fish.push(fish_at(
            1,
            FishKind::Tiny,
            Vec2::new(0.5, 0.5),
            Vec2::new(10_000.0, -10_000.0),
            0,
        ));
        update_fish(&mut world, &Viewport::new(800.0, 600.0), 0.05);
        let limits = FishKind::Tiny.speed_limits();
        let v = world.fish[0].vel;
        assert!(v.x.abs() <= limits.x && v.y.abs() <= limits.y);
    }

    #[test]
    fn test_off_screen_fish_removed() {
        let mut world = World::new(1);
        world.fish.push(fish_at(1, FishKind::Small, Vec2::new(1.31, 0.5), Vec2::X * 80.0, 0));
        world.fish.push(fish_at(2, FishKind::Small, Vec2::new(0.5, 0.5), Vec2::X * 10.0, 1));
        update_fish(&mut world, &Viewport::new(800.0, 600.0), 0.016);
        assert_eq!(world.fish.len(), 1);
        assert_eq!(world.fish[0].id, 2);
    }

    #[test]
    fn test_depth_band_enforced() {
        let mut world = World::new(1);
        let mut fish = fish_at(1, FishKind::Rare, Vec2::new(0.5, 0.849), Vec2::new(0.0, 500.0), 0);
        fish.depth = 1.5;
        world.fish.push(fish);
        for _ in 0..20 {
            update_fish(&mut world, &Viewport::new(800.0, 100.0), 0.05);
        }
        assert!(world.fish[0].pos.y <= MAX_DEPTH);
    }

    #[test]
    fn test_zero_viewport_stays_put() {
        let mut world = World::new(1);
        world.fish.push(fish_at(1, FishKind::Small, Vec2::new(0.5, 0.5), Vec2::X * 50.0, 0));
        update_fish(&mut world, &Viewport::new(0.0, 0.0), 0.05);
        assert_eq!(world.fish[0].pos, Vec2::new(0.5, 0.5));
        assert!(world.fish[0].vel.is_finite());
    }

    #[test]
    fn test_oscillation_follows_swim_phase() {
        let at = |kind, phase: f32| {
            let mut fish = fish_at(1, kind, Vec2::new(0.5, 0.5), Vec2::ZERO, 0);
            fish.swim_phase = phase;
            oscillation(&fish)
        };
        let sixth = std::f32::consts::FRAC_PI_6;
        let quarter = std::f32::consts::FRAC_PI_2;

        // sin(pi/6) = 0.5
        assert!((at(FishKind::Small, sixth) - 0.5 * 0.5 * 55.0 * 0.002).abs() < 1e-5);
        assert!((at(FishKind::Fast, sixth) - 0.5 * 0.5 * 110.0 * 0.002).abs() < 1e-5);
        assert!((at(FishKind::Tiny, quarter) - 0.3 * 40.0 * 0.002).abs() < 1e-5);
        assert!(at(FishKind::Medium, 0.0).abs() < 1e-6);
        assert!((at(FishKind::Medium, -quarter) + 0.5 * 70.0 * 0.002).abs() < 1e-5);
    }

    #[test]
    fn test_target_sums_the_forces() {
        let hook = Hook {
            pos: Vec2::new(0.55, 0.45),
            state: HookState::Down,
            ..Default::default()
        };
        let mut fish = vec![
            fish_at(1, FishKind::Small, Vec2::new(0.5, 0.5), Vec2::new(10.0, 2.0), 0),
            fish_at(2, FishKind::Small, Vec2::new(0.6, 0.55), Vec2::new(20.0, 0.0), 0),
        ];
        fish[0].depth = 0.6;
        fish[0].swim_phase = 1.0;

        let expected = fish[0].vel
            + schooling(&fish, 0)
            + separation(&fish, 0)
            + hook_avoidance(&fish[0], &hook).unwrap_or(Vec2::ZERO)
            + Vec2::Y * (oscillation(&fish[0]) + depth_seeking(&fish[0]));
        let (target, fleeing) = target_velocity(&fish, 0, &hook);
        assert!((target - expected).length() < 1e-4);
        assert_eq!(fleeing, Some(hook.pos));
    }

    #[test]
    fn test_velocity_eases_toward_target() {
        let dt = 0.02;
        let vel = Vec2::new(10.0, -2.0);
        let mut fish = fish_at(1, FishKind::Medium, Vec2::new(0.5, 0.5), vel, 0);
        fish.depth = 0.6;
        fish.swim_phase = 0.3;

        // The phase advances before the forces are evaluated
        let mut stepped = fish.clone();
        stepped.swim_phase += SWIM_PHASE_RATE * dt;
        let target = vel + Vec2::Y * (oscillation(&stepped) + depth_seeking(&stepped));

        let mut world = World::new(1);
        world.fish.push(fish);
        update_fish(&mut world, &Viewport::new(800.0, 600.0), dt);

        let kx = 1.0 - (-2.0f32 * dt).exp();
        let ky = 1.0 - (-3.0f32 * dt).exp();
        let want = Vec2::new(
            vel.x + (target.x - vel.x) * kx,
            vel.y + (target.y - vel.y) * ky,
        );
        let got = world.fish[0].vel;
        assert!((got - want).length() < 1e-4, "{got:?} vs {want:?}");
        assert!(got.y > vel.y && got.y < target.y);
    }

    #[test]
    fn test_swim_phase_advances() {
        let mut world = World::new(1);
        world.fish.push(fish_at(1, FishKind::Small, Vec2::new(0.5, 0.5), Vec2::ZERO, 0));
        update_fish(&mut world, &Viewport::new(800.0, 600.0), 0.05);
        assert!((world.fish[0].swim_phase - 0.2).abs() < 1e-6);
    }
}
