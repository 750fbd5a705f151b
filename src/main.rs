//! Hook the Fish entry point
//!
//! The browser build is started from the library (`HookTheFish`). Natively
//! this plays one scripted game headless and logs how it went.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use hook_the_fish::Session;
    use hook_the_fish::persistence::default_store;
    use hook_the_fish::platform::headless::{self, Script};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Hook the Fish (headless) starting...");

    let script = Script {
        seed: std::env::args()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(Script::default().seed),
        ..Script::default()
    };
    let session = Session::new(default_store());
    log::info!("Best score so far: {}", session.best());
    let summary = headless::run(&script, session);

    log::info!(
        "Finished at level {} after {} ticks: {} casts, {} catches ({} junk)",
        summary.level,
        summary.ticks,
        summary.casts,
        summary.catches,
        summary.junk
    );
    log::info!(
        "Score {} (best {}){}",
        summary.score,
        summary.best,
        if summary.game_over { ", game over" } else { "" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `wasm_start` in the library
}
