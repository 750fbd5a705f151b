//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches the
//! browser or draws anything:
//! - Seeded RNG only
//! - Population order is meaningful (collision picks the first match)
//! - Store access goes through [`crate::store::GameStore`]

pub mod collision;
pub mod effects;
pub mod hook;
pub mod spawner;
pub mod state;
pub mod steering;
pub mod tick;

pub use collision::{find_catch, hook_pixel_pos, resolve_hook_collision};
pub use effects::{spawn_score_popup, spawn_splash, update_effects};
pub use hook::{Landed, update_hook};
pub use spawner::{spawn_fish, species_for_level, update_spawns};
pub use state::{
    Boat, Fish, FishKind, FishStats, GameEvent, Hook, HookState, Particle, Popup, World,
};
pub use steering::update_fish;
pub use tick::{TickInput, TickReport, move_boat, tick};
