//! World state and core simulation types
//!
//! Everything one running game owns: the boat, the hook, the fish pool and
//! the short-lived visual effects. Positions of simulated entities are
//! normalized to the viewport; effects live in pixel space.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Fish species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FishKind {
    Tiny,
    Small,
    Medium,
    Fast,
    Rare,
    /// Boots, tins and other rubbish - costs points
    Junk,
}

/// Immutable per-species numbers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FishStats {
    /// Cruising speed (px/s)
    pub speed: f32,
    /// Half-width of the collision box (px)
    pub size: f32,
    /// Score delta when landed
    pub value: i32,
    /// Preferred normalized depth
    pub depth: f32,
}

impl FishKind {
    pub const ALL: [FishKind; 6] = [
        FishKind::Tiny,
        FishKind::Small,
        FishKind::Medium,
        FishKind::Fast,
        FishKind::Rare,
        FishKind::Junk,
    ];

    pub const fn stats(self) -> FishStats {
        match self {
            FishKind::Tiny => FishStats { speed: 40.0, size: 8.0, value: 5, depth: 0.25 },
            FishKind::Small => FishStats { speed: 55.0, size: 10.0, value: 10, depth: 0.35 },
            FishKind::Medium => FishStats { speed: 70.0, size: 14.0, value: 20, depth: 0.5 },
            FishKind::Fast => FishStats { speed: 110.0, size: 10.0, value: 30, depth: 0.6 },
            FishKind::Rare => FishStats { speed: 90.0, size: 16.0, value: 50, depth: 0.75 },
            FishKind::Junk => FishStats { speed: 30.0, size: 12.0, value: -15, depth: 0.5 },
        }
    }

    /// Horizontal and vertical speed limits (px/s)
    pub fn speed_limits(self) -> Vec2 {
        let max = self.stats().speed * 1.5;
        Vec2::new(max, max * 0.3)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FishKind::Tiny => "tiny",
            FishKind::Small => "small",
            FishKind::Medium => "medium",
            FishKind::Fast => "fast",
            FishKind::Rare => "rare",
            FishKind::Junk => "junk",
        }
    }
}

/// A fish in the pool (or on the hook)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fish {
    pub id: u32,
    pub kind: FishKind,
    /// Normalized position
    pub pos: Vec2,
    /// Velocity in px/s
    pub vel: Vec2,
    /// Signed score value
    pub value: i32,
    /// Depth this fish drifts back toward
    pub depth: f32,
    /// Running swim phase (radians)
    pub swim_phase: f32,
    pub school_group: u8,
    /// Hook position this fish is fleeing, if any
    #[serde(default)]
    pub avoidance_target: Option<Vec2>,
}

impl Fish {
    /// Collision half-extents in px
    pub fn half_extents(&self) -> Vec2 {
        let size = self.kind.stats().size;
        Vec2::new(size, size * 0.6)
    }
}

/// Hook lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HookState {
    /// Hanging at the boat
    #[default]
    Idle,
    /// Sinking
    Down,
    /// Reeling in
    Up,
}

/// The boat on the surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boat {
    /// Normalized x; y is fixed at `BOAT_Y`
    pub x: f32,
}

impl Default for Boat {
    fn default() -> Self {
        Self { x: 0.5 }
    }
}

/// The hook and whatever hangs off it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hook {
    /// Normalized position
    pub pos: Vec2,
    /// Vertical speed in px/s (positive is down)
    pub vy: f32,
    pub state: HookState,
    /// Fish being reeled in - owned, no longer in the pool
    pub caught: Option<Fish>,
}

impl Default for Hook {
    fn default() -> Self {
        Self {
            pos: Vec2::new(0.5, HOOK_REST_Y),
            vy: 0.0,
            state: HookState::Idle,
            caught: None,
        }
    }
}

/// Splash droplet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    /// Pixel position
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds left
    pub life: f32,
    pub color: [f32; 4],
}

/// Floating score text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Popup {
    /// Pixel position
    pub pos: Vec2,
    pub text: String,
    pub life: f32,
    pub color: [f32; 4],
    /// Positive catches get an extra glow
    pub positive: bool,
}

/// Things that happened during a tick that the outside world may care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Hook left the boat
    Cast,
    /// Hook turned around or grabbed a fish
    Splash,
    /// Landed a fish worth points
    PositiveCatch,
    /// Landed junk
    NegativeCatch,
}

/// Complete simulation state for one game
#[derive(Debug, Clone)]
pub struct World {
    pub boat: Boat,
    pub hook: Hook,
    /// Active fish, in spawn order
    pub fish: Vec<Fish>,
    pub particles: Vec<Particle>,
    pub popups: Vec<Popup>,
    /// Seconds since the last spawn
    pub spawn_acc: f32,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
    next_id: u32,
}

impl World {
    /// Create an empty world with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            boat: Boat::default(),
            hook: Hook::default(),
            fish: Vec::new(),
            particles: Vec::new(),
            popups: Vec::new(),
            spawn_acc: 0.0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Fish currently in play, including one on the hook
    pub fn fish_count(&self) -> usize {
        self.fish.len() + usize::from(self.hook.caught.is_some())
    }
}
