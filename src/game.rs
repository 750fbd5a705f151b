//! One running game
//!
//! Owns everything mutable: the world, the keyboard state, the viewport,
//! the frame scheduler and the render settings. The store is injected so
//! the same code runs against the in-crate [`Session`](crate::Session) or
//! any other [`GameStore`].

use crate::input::{InputAggregator, KeyCommand};
use crate::renderer::{Surface, render_world};
use crate::scheduler::Scheduler;
use crate::settings::Settings;
use crate::sim::{GameEvent, TickInput, TickReport, World, tick};
use crate::store::{GamePhase, GameStore};
use crate::viewport::Viewport;

pub struct Game<S: GameStore> {
    pub world: World,
    pub store: S,
    pub input: InputAggregator,
    pub viewport: Viewport,
    pub scheduler: Scheduler,
    pub settings: Settings,
}

impl<S: GameStore> Game<S> {
    pub fn new(store: S, seed: u64, settings: Settings) -> Self {
        log::info!("Game initialized with seed: {}", seed);
        Self {
            world: World::new(seed),
            store,
            input: InputAggregator::new(),
            viewport: Viewport::default(),
            scheduler: Scheduler::new(),
            settings,
        }
    }

    /// Advance the simulation by `dt` seconds at wall time `time`
    pub fn tick(&mut self, dt: f32, time: f64) -> TickReport {
        let input = TickInput {
            keys: self.input.held(),
            time,
        };
        tick(&mut self.world, &mut self.store, &input, &self.viewport, dt)
    }

    /// Draw the current world. Nothing is drawn until the surface has a size.
    pub fn render<T: Surface + ?Sized>(&self, surface: &mut T, time: f64) {
        if self.viewport.is_empty() {
            return;
        }
        render_world(surface, &self.world, &self.viewport, time, &self.settings);
    }

    /// Run one animation frame: update then draw.
    ///
    /// Returns `false` without touching anything once the scheduler stopped.
    pub fn frame<T: Surface + ?Sized>(&mut self, now_ms: f64, surface: &mut T) -> bool {
        let Some(dt) = self.scheduler.frame_dt(now_ms) else {
            return false;
        };
        let time = now_ms / 1000.0;
        self.tick(dt, time);
        self.render(surface, time);
        true
    }

    /// Cues produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.world.drain_events()
    }

    pub fn handle_key_down(&mut self, key: &str) {
        if let Some(KeyCommand::TogglePause) = self.input.key_down(key) {
            match self.store.snapshot().phase {
                GamePhase::Playing => self.store.pause(),
                GamePhase::Paused => self.store.resume(),
                _ => {}
            }
        }
    }

    pub fn handle_key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    /// Canvas resized; returns the new backing-store size
    pub fn resize(
        &mut self,
        client_width: f32,
        client_height: f32,
        pixel_ratio: f32,
    ) -> (u32, u32) {
        let backing = self.viewport.resize(client_width, client_height, pixel_ratio);
        log::debug!(
            "Viewport {}x{} @{} -> {}x{}",
            self.viewport.width,
            self.viewport.height,
            self.viewport.scale,
            backing.0,
            backing.1
        );
        backing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{Color, Paint, Sprite, TextStyle};
    use crate::sim::HookState;
    use crate::store::Session;
    use glam::Vec2;

    /// Counts frames drawn
    #[derive(Default)]
    struct CountingSurface {
        clears: usize,
    }

    impl Surface for CountingSurface {
        fn clear(&mut self, _size: Vec2) {
            self.clears += 1;
        }
        fn fill_rect(&mut self, _o: Vec2, _s: Vec2, _p: &Paint) {}
        fn fill_circle(&mut self, _c: Vec2, _r: f32, _color: Color) {}
        fn stroke_circle(&mut self, _c: Vec2, _r: f32, _color: Color, _w: f32) {}
        fn fill_ellipse(&mut self, _c: Vec2, _r: Vec2, _color: Color) {}
        fn stroke_arc(&mut self, _c: Vec2, _r: f32, _s: f32, _e: f32, _color: Color, _w: f32) {}
        fn stroke_polyline(&mut self, _p: &[Vec2], _color: Color, _w: f32) {}
        fn sprite_ready(&self, _s: Sprite) -> bool {
            false
        }
        fn draw_sprite(&mut self, _s: Sprite, _c: Vec2, _size: Vec2) {}
        fn draw_text(&mut self, _t: &str, _a: Vec2, _style: &TextStyle) {}
        fn save(&mut self) {}
        fn restore(&mut self) {}
        fn translate(&mut self, _o: Vec2) {}
        fn rotate(&mut self, _a: f32) {}
        fn scale(&mut self, _f: Vec2) {}
        fn set_alpha(&mut self, _a: f32) {}
        fn set_glow(&mut self, _c: Color, _b: f32) {}
    }

    fn game() -> Game<Session> {
        let mut game = Game::new(Session::default(), 7, Settings::default());
        game.resize(800.0, 600.0, 2.0);
        game
    }

    #[test]
    fn test_pause_key_toggles_phase() {
        let mut game = game();
        game.handle_key_down("p");
        assert_eq!(game.store.snapshot().phase, GamePhase::Menu);

        game.store.start_game();
        game.handle_key_down("P");
        assert_eq!(game.store.snapshot().phase, GamePhase::Paused);
        game.handle_key_down("p");
        assert_eq!(game.store.snapshot().phase, GamePhase::Playing);
    }

    #[test]
    fn test_keyboard_cast_reaches_the_hook() {
        let mut game = game();
        game.store.start_game();
        game.handle_key_down(" ");
        game.tick(0.016, 0.0);
        assert_eq!(game.world.hook.state, HookState::Down);
        assert_eq!(game.drain_events(), vec![GameEvent::Cast]);

        game.handle_key_up(" ");
        game.tick(0.016, 0.016);
        assert_eq!(game.world.hook.state, HookState::Up);
    }

    #[test]
    fn test_frame_runs_only_while_scheduled() {
        let mut game = game();
        let mut surface = CountingSurface::default();
        assert!(!game.frame(16.0, &mut surface));
        assert_eq!(surface.clears, 0);

        game.scheduler.start(0.0);
        assert!(game.frame(16.0, &mut surface));
        assert!(game.frame(32.0, &mut surface));
        assert_eq!(surface.clears, 2);

        game.scheduler.stop();
        assert!(!game.frame(48.0, &mut surface));
        assert_eq!(surface.clears, 2);
    }

    #[test]
    fn test_unsized_surface_is_not_drawn() {
        let mut game = Game::new(Session::default(), 7, Settings::default());
        let mut surface = CountingSurface::default();
        game.render(&mut surface, 0.0);
        assert_eq!(surface.clears, 0);

        game.resize(640.0, 480.0, 1.0);
        game.render(&mut surface, 0.0);
        assert_eq!(surface.clears, 1);
    }

    #[test]
    fn test_resize_reports_backing_store() {
        let mut game = game();
        assert_eq!(game.resize(333.0, 200.0, 1.5), (499, 300));
        assert_eq!(game.viewport.width, 333.0);
    }
}
