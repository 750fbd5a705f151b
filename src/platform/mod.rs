//! Platform layer
//!
//! - `web`: browser mount (canvas, keyboard, resize, animation frames, audio)
//! - `headless`: scripted native session for the command-line binary

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub mod headless;

#[cfg(target_arch = "wasm32")]
pub use web::{HookTheFish, Mount, mount};
