//! Browser mount: canvas, keyboard, resize and animation frames
//!
//! `mount` wires a [`Game`] to a `<canvas>` and starts the frame loop.
//! `Mount::teardown` stops the loop and detaches every listener; the single
//! animation frame already requested sees the stopped scheduler and does
//! nothing.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, HtmlCanvasElement, KeyboardEvent, ResizeObserver};

use crate::audio::AudioManager;
use crate::game::Game;
use crate::persistence::LocalStorage;
use crate::renderer::{CanvasSurface, Sprite};
use crate::settings::{QualityPreset, Settings};
use crate::sim::FishKind;
use crate::store::{GamePhase, GameStore, InputFlags, Session, SharedStore};

/// Where sprite images are served from
const BOAT_SPRITE_URL: &str = "assets/boat.png";
const FISH_SPRITE_DIR: &str = "assets/fish";

/// Everything the frame callback needs
struct Runtime {
    game: Game<SharedStore<Session>>,
    surface: CanvasSurface,
    audio: AudioManager,
}

type SharedRuntime = Rc<RefCell<Runtime>>;
type KeyListener = Closure<dyn FnMut(KeyboardEvent)>;

/// A mounted game; drop or `teardown` to stop it
pub struct Mount {
    runtime: SharedRuntime,
    key_listeners: Vec<(EventTarget, &'static str, KeyListener)>,
    observer: Option<ResizeObserver>,
    on_resize: Option<Closure<dyn FnMut(js_sys::Array)>>,
    torn_down: bool,
}

impl Mount {
    /// Stop the loop and detach listeners. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        if let Ok(mut rt) = self.runtime.try_borrow_mut() {
            if rt.game.scheduler.is_running() {
                rt.game.scheduler.stop();
                log::debug!("Frame loop stopped");
            }
            rt.game.input.clear();
        }
        for (target, kind, listener) in self.key_listeners.drain(..) {
            let _ =
                target.remove_event_listener_with_callback(kind, listener.as_ref().unchecked_ref());
        }
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
        self.on_resize = None;
        log::info!("Hook the Fish unmounted");
    }

    /// Change render/audio settings and persist them
    pub fn update_settings(&self, change: impl FnOnce(&mut Settings)) {
        let Ok(mut rt) = self.runtime.try_borrow_mut() else {
            return;
        };
        change(&mut rt.game.settings);
        let settings = rt.game.settings.clone();
        rt.audio.set_master_volume(settings.master_volume);
        rt.audio.set_sfx_volume(settings.sfx_volume);
        settings.save(&mut LocalStorage);
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Attach a game to `canvas`, driven by `store`
pub fn mount(canvas: HtmlCanvasElement, store: SharedStore<Session>) -> Result<Mount, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let settings = Settings::load(&LocalStorage);
    if settings.muted_on_start {
        store.borrow_mut().set_muted(true);
    }

    let mut surface = CanvasSurface::new(&canvas)?;
    surface.load_sprite(Sprite::Boat, BOAT_SPRITE_URL)?;
    for kind in FishKind::ALL {
        let url = format!("{FISH_SPRITE_DIR}/{}.png", kind.as_str());
        surface.load_sprite(Sprite::Fish(kind), &url)?;
    }

    let mut audio = AudioManager::new();
    audio.set_master_volume(settings.master_volume);
    audio.set_sfx_volume(settings.sfx_volume);

    let seed = js_sys::Date::now() as u64;
    let game = Game::new(store, seed, settings);
    let runtime = Rc::new(RefCell::new(Runtime { game, surface, audio }));
    fit_canvas(&canvas, &mut runtime.borrow_mut());

    let key_listeners = vec![
        add_key_listener(&window, "keydown", runtime.clone(), |rt, event| {
            rt.audio.resume();
            if event.key() == " " {
                event.prevent_default();
            }
            rt.game.handle_key_down(&event.key());
        })?,
        add_key_listener(&window, "keyup", runtime.clone(), |rt, event| {
            rt.game.handle_key_up(&event.key());
        })?,
    ];

    let on_resize = {
        let runtime = runtime.clone();
        let canvas = canvas.clone();
        Closure::<dyn FnMut(js_sys::Array)>::new(move |_entries: js_sys::Array| {
            if let Ok(mut rt) = runtime.try_borrow_mut() {
                fit_canvas(&canvas, &mut rt);
            }
        })
    };
    let observer = ResizeObserver::new(on_resize.as_ref().unchecked_ref())?;
    observer.observe(&canvas);

    let now = window.performance().map(|p| p.now()).unwrap_or(0.0);
    runtime.borrow_mut().game.scheduler.start(now);
    request_frame(runtime.clone());

    log::info!("Hook the Fish mounted");
    Ok(Mount {
        runtime,
        key_listeners,
        observer: Some(observer),
        on_resize: Some(on_resize),
        torn_down: false,
    })
}

fn add_key_listener(
    target: &EventTarget,
    kind: &'static str,
    runtime: SharedRuntime,
    handler: impl Fn(&mut Runtime, &KeyboardEvent) + 'static,
) -> Result<(EventTarget, &'static str, KeyListener), JsValue> {
    let closure = KeyListener::new(move |event: KeyboardEvent| {
        if let Ok(mut rt) = runtime.try_borrow_mut() {
            handler(&mut rt, &event);
        }
    });
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    Ok((target.clone(), kind, closure))
}

/// Match the backing store to the element's CSS size
fn fit_canvas(canvas: &HtmlCanvasElement, rt: &mut Runtime) {
    let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0) as f32;
    let (width, height) = rt.game.resize(
        canvas.client_width() as f32,
        canvas.client_height() as f32,
        dpr,
    );
    canvas.set_width(width);
    canvas.set_height(height);
    // Resizing the canvas resets its transform
    rt.surface.set_pixel_ratio(rt.game.viewport.scale);
}

fn request_frame(runtime: SharedRuntime) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(move |now: f64| on_frame(runtime, now));
    let _ = window.request_animation_frame(callback.unchecked_ref());
}

fn on_frame(runtime: SharedRuntime, now: f64) {
    {
        let mut rt = runtime.borrow_mut();
        let Runtime { game, surface, audio } = &mut *rt;
        if !game.frame(now, surface) {
            // Torn down
            return;
        }
        audio.set_muted(game.store.snapshot().muted);
        for event in game.drain_events() {
            audio.play(event);
        }
    }
    request_frame(runtime);
}

/// JS-facing handle: mounts on construction, forwards UI commands to the store
#[wasm_bindgen]
pub struct HookTheFish {
    mount: Mount,
    store: SharedStore<Session>,
}

#[wasm_bindgen]
impl HookTheFish {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<HookTheFish, JsValue> {
        let store = Session::new(Box::new(LocalStorage)).shared();
        let mount = mount(canvas, store.clone())?;
        Ok(Self { mount, store })
    }

    pub fn start_game(&self) {
        self.store.borrow_mut().start_game();
    }

    pub fn pause(&self) {
        self.store.borrow_mut().pause();
    }

    pub fn resume(&self) {
        self.store.borrow_mut().resume();
    }

    pub fn restart(&self) {
        self.store.borrow_mut().restart();
    }

    pub fn toggle_mute(&self) {
        self.store.borrow_mut().toggle_mute();
    }

    /// On-screen buttons
    pub fn set_input(&self, left: bool, right: bool, cast: bool) {
        self.store.borrow_mut().set_input(InputFlags { left, right, cast });
    }

    pub fn score(&self) -> u32 {
        self.store.borrow().snapshot().score
    }

    pub fn high_score(&self) -> u32 {
        self.store.borrow().snapshot().high_score
    }

    pub fn level(&self) -> u32 {
        self.store.borrow().snapshot().level
    }

    pub fn timer(&self) -> f32 {
        self.store.borrow().snapshot().timer
    }

    pub fn muted(&self) -> bool {
        self.store.borrow().snapshot().muted
    }

    pub fn phase(&self) -> String {
        match self.store.borrow().snapshot().phase {
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::LevelComplete => "levelComplete",
            GamePhase::GameOver => "gameOver",
        }
        .to_string()
    }

    /// "low", "medium" or "high"; unknown names are ignored
    pub fn set_quality(&self, name: &str) {
        match QualityPreset::from_str(name) {
            Some(preset) => {
                log::info!("Quality set to {}", preset.as_str());
                self.mount.update_settings(|s| s.quality = preset);
            }
            None => log::warn!("Unknown quality preset '{name}'"),
        }
    }

    pub fn set_reduced_motion(&self, reduced: bool) {
        self.mount.update_settings(|s| s.reduced_motion = reduced);
    }

    pub fn set_volume(&self, master: f32, sfx: f32) {
        self.mount.update_settings(|s| {
            s.master_volume = master.clamp(0.0, 1.0);
            s.sfx_volume = sfx.clamp(0.0, 1.0);
        });
    }

    pub fn set_muted_on_start(&self, muted: bool) {
        self.mount.update_settings(|s| s.muted_on_start = muted);
    }

    pub fn teardown(&mut self) {
        self.mount.teardown();
    }
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    log::info!("Hook the Fish starting...");
}
