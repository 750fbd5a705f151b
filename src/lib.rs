//! Hook the Fish - an arcade fishing game on a 2D canvas
//!
//! Core modules:
//! - `sim`: Simulation (boat, hook, fish steering, collisions, effects)
//! - `renderer`: Layered 2D drawing through a `Surface` abstraction
//! - `scheduler`: Frame loop with clamped timestep and cooperative stop
//! - `store`: Game phase / score / timer record the simulation reads each tick
//! - `platform`: Browser mount (canvas, keyboard, resize, animation frames)

pub mod game;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod sim;
pub mod store;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
pub mod audio;

pub use game::Game;
pub use highscores::BestScore;
pub use settings::{QualityPreset, Settings};
pub use store::{GamePhase, GameStore, Session, StoreSnapshot};
pub use viewport::Viewport;

/// Game configuration constants
pub mod consts {
    /// Largest timestep a single frame may advance (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Seconds on the clock at the start of every level
    pub const LEVEL_DURATION: f32 = 60.0;
    /// Clearing this level's timer ends the run
    pub const MAX_LEVEL: u32 = 5;

    /// Boat anchor and travel
    pub const BOAT_Y: f32 = 0.1;
    pub const BOAT_SPEED: f32 = 180.0; // px/s
    pub const BOAT_MIN_X: f32 = 0.05;
    pub const BOAT_MAX_X: f32 = 0.95;

    /// Hook geometry and motion
    pub const HOOK_REST_Y: f32 = 0.12;
    pub const HOOK_SIZE: f32 = 8.0;
    pub const HOOK_DESCEND_SPEED: f32 = 200.0; // px/s
    pub const HOOK_ASCEND_SPEED: f32 = 240.0; // px/s
    /// Horizontal sway amplitude (px) and angular rate
    pub const HOOK_SWAY_PX: f32 = 2.0;
    pub const HOOK_SWAY_RATE: f32 = 4.0;

    /// Playable water band (normalized y)
    pub const WATER_TOP: f32 = 0.2;
    pub const MAX_DEPTH: f32 = 0.85;
    /// Fish outside this horizontal band are gone for good
    pub const DESPAWN_MIN_X: f32 = -0.3;
    pub const DESPAWN_MAX_X: f32 = 1.3;

    /// Population
    pub const BASE_FISH_CAP: usize = 18;
    pub const FISH_CAP_PER_LEVEL: usize = 4;
    pub const SCHOOL_GROUPS: u8 = 3;

    /// Effects
    pub const SPLASH_PARTICLES: usize = 12;
    pub const SPLASH_LIFE: f32 = 0.7;
    pub const PARTICLE_GRAVITY: f32 = 140.0; // px/s²
    pub const POPUP_LIFE: f32 = 1.0;
    pub const POPUP_RISE_SPEED: f32 = 30.0; // px/s
}

/// Fish cap for a level
#[inline]
pub fn fish_cap(level: u32) -> usize {
    consts::BASE_FISH_CAP + consts::FISH_CAP_PER_LEVEL * level as usize
}

/// Seconds between spawns for a level
#[inline]
pub fn spawn_interval(level: u32) -> f32 {
    (2.0 - 0.2 * level as f32).max(0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fish_cap_grows_with_level() {
        assert_eq!(fish_cap(1), 22);
        assert_eq!(fish_cap(5), 38);
    }

    #[test]
    fn test_spawn_interval_floors_at_half_second() {
        assert!((spawn_interval(1) - 1.8).abs() < 1e-6);
        assert!((spawn_interval(5) - 1.0).abs() < 1e-6);
        assert!((spawn_interval(20) - 0.5).abs() < 1e-6);
    }
}
