//! Game phase, score, timer and input record
//!
//! The simulation never owns this state. It reads a [`StoreSnapshot`] once
//! per tick and writes back through the mutators on [`GameStore`]. UI code
//! (HUD, menus, touch buttons) talks to the same store.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::consts::LEVEL_DURATION;
use crate::highscores::BestScore;
use crate::persistence::{KeyValueStore, MemoryStore};

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Between levels
    LevelComplete,
    /// Run ended
    GameOver,
}

/// Externally settable control flags (touch buttons etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputFlags {
    pub left: bool,
    pub right: bool,
    pub cast: bool,
}

/// One consistent read of the store
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub phase: GamePhase,
    pub level: u32,
    /// Seconds left in the level
    pub timer: f32,
    pub score: u32,
    pub high_score: u32,
    pub muted: bool,
    pub input: InputFlags,
}

/// State-access contract between the simulation and the rest of the app
pub trait GameStore {
    /// Fetch everything the tick needs in one go
    fn snapshot(&self) -> StoreSnapshot;

    /// Apply a signed score delta; the score never drops below zero
    fn add_score(&mut self, delta: i32);
    fn set_timer(&mut self, seconds: f32);
    fn set_input(&mut self, input: InputFlags);

    fn start_game(&mut self);
    fn pause(&mut self);
    fn resume(&mut self);
    fn next_level(&mut self);
    fn game_over(&mut self);
    fn restart(&mut self);
    fn toggle_mute(&mut self);
}

/// In-memory store with best-score persistence
pub struct Session {
    phase: GamePhase,
    level: u32,
    timer: f32,
    score: u32,
    muted: bool,
    input: InputFlags,
    best: BestScore,
    storage: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("phase", &self.phase)
            .field("level", &self.level)
            .field("timer", &self.timer)
            .field("score", &self.score)
            .field("best", &self.best.value)
            .finish_non_exhaustive()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }
}

impl Session {
    /// Create a session backed by `storage`, reading the best score once
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        let best = BestScore::load(storage.as_ref());
        Self {
            phase: GamePhase::Menu,
            level: 1,
            timer: LEVEL_DURATION,
            score: 0,
            muted: false,
            input: InputFlags::default(),
            best,
            storage,
        }
    }

    /// Wrap in the shared handle the platform layer and UI both hold
    pub fn shared(self) -> SharedStore<Self> {
        Rc::new(RefCell::new(self))
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn best(&self) -> u32 {
        self.best.value
    }
}

impl GameStore for Session {
    fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            phase: self.phase,
            level: self.level,
            timer: self.timer,
            score: self.score,
            high_score: self.best.value,
            muted: self.muted,
            input: self.input,
        }
    }

    fn add_score(&mut self, delta: i32) {
        let score = (self.score as i64 + delta as i64).clamp(0, u32::MAX as i64) as u32;
        self.score = score;
        self.best.record(score);
        self.best.save(self.storage.as_mut());
    }

    fn set_timer(&mut self, seconds: f32) {
        self.timer = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    }

    fn set_input(&mut self, input: InputFlags) {
        self.input = input;
    }

    fn start_game(&mut self) {
        self.phase = GamePhase::Playing;
        self.timer = LEVEL_DURATION;
        self.score = 0;
        self.input = InputFlags::default();
        log::info!("Game started at level {}", self.level);
    }

    fn pause(&mut self) {
        self.phase = GamePhase::Paused;
    }

    fn resume(&mut self) {
        self.phase = GamePhase::Playing;
    }

    fn next_level(&mut self) {
        self.level += 1;
        self.phase = GamePhase::Playing;
        self.timer = LEVEL_DURATION;
        log::info!("Level {} (score {})", self.level, self.score);
    }

    fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        log::info!("Game over - score {}, best {}", self.score, self.best.value);
    }

    fn restart(&mut self) {
        self.score = 0;
        self.level = 1;
        self.timer = LEVEL_DURATION;
        self.phase = GamePhase::Menu;
    }

    fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }
}

/// Store shared between the frame loop and UI callbacks
pub type SharedStore<S> = Rc<RefCell<S>>;

impl<S: GameStore> GameStore for Rc<RefCell<S>> {
    fn snapshot(&self) -> StoreSnapshot {
        self.borrow().snapshot()
    }
    fn add_score(&mut self, delta: i32) {
        self.borrow_mut().add_score(delta)
    }
    fn set_timer(&mut self, seconds: f32) {
        self.borrow_mut().set_timer(seconds)
    }
    fn set_input(&mut self, input: InputFlags) {
        self.borrow_mut().set_input(input)
    }
    fn start_game(&mut self) {
        self.borrow_mut().start_game()
    }
    fn pause(&mut self) {
        self.borrow_mut().pause()
    }
    fn resume(&mut self) {
        self.borrow_mut().resume()
    }
    fn next_level(&mut self) {
        self.borrow_mut().next_level()
    }
    fn game_over(&mut self) {
        self.borrow_mut().game_over()
    }
    fn restart(&mut self) {
        self.borrow_mut().restart()
    }
    fn toggle_mute(&mut self) {
        self.borrow_mut().toggle_mute()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_floors_at_zero() {
        let mut s = Session::default();
        s.start_game();
        s.add_score(10);
        s.add_score(-15);
        assert_eq!(s.snapshot().score, 0);
        s.add_score(20);
        assert_eq!(s.snapshot().score, 20);
    }

    #[test]
    fn test_best_score_persists_on_change() {
        let mut s = Session::default();
        s.start_game();
        s.add_score(30);
        s.add_score(-15);
        let snap = s.snapshot();
        assert_eq!(snap.score, 15);
        assert_eq!(snap.high_score, 30);
        assert_eq!(s.storage.get(BestScore::STORAGE_KEY).as_deref(), Some("30"));
    }

    #[test]
    fn test_best_score_read_at_startup() {
        let storage = MemoryStore::with_entry(BestScore::STORAGE_KEY, "250");
        let s = Session::new(Box::new(storage));
        assert_eq!(s.best(), 250);
    }

    #[test]
    fn test_phase_transitions() {
        let mut s = Session::default();
        assert_eq!(s.snapshot().phase, GamePhase::Menu);
        s.start_game();
        assert_eq!(s.snapshot().phase, GamePhase::Playing);
        s.pause();
        assert_eq!(s.snapshot().phase, GamePhase::Paused);
        s.resume();
        assert_eq!(s.snapshot().phase, GamePhase::Playing);

        s.set_timer(3.0);
        s.next_level();
        let snap = s.snapshot();
        assert_eq!(snap.level, 2);
        assert_eq!(snap.timer, LEVEL_DURATION);

        s.game_over();
        assert_eq!(s.snapshot().phase, GamePhase::GameOver);

        s.restart();
        let snap = s.snapshot();
        assert_eq!((snap.phase, snap.level, snap.score), (GamePhase::Menu, 1, 0));
    }

    #[test]
    fn test_start_clears_input() {
        let mut s = Session::default();
        s.set_input(InputFlags { left: true, right: false, cast: true });
        s.start_game();
        assert_eq!(s.snapshot().input, InputFlags::default());
    }

    #[test]
    fn test_timer_rejects_garbage() {
        let mut s = Session::default();
        s.set_timer(-1.0);
        assert_eq!(s.snapshot().timer, 0.0);
        s.set_timer(f32::NAN);
        assert_eq!(s.snapshot().timer, 0.0);
    }

    #[test]
    fn test_shared_handle_forwards() {
        let mut shared = Session::default().shared();
        shared.start_game();
        shared.toggle_mute();
        let snap = shared.snapshot();
        assert_eq!(snap.phase, GamePhase::Playing);
        assert!(snap.muted);
    }
}
