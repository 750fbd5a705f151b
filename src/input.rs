//! Keyboard state merged with externally supplied control flags

use crate::store::InputFlags;

/// Logical controls for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub cast: bool,
}

impl Controls {
    /// Either source holding a control is enough
    pub fn combine(keys: InputFlags, external: InputFlags) -> Self {
        Self {
            left: keys.left || external.left,
            right: keys.right || external.right,
            cast: keys.cast || external.cast,
        }
    }
}

/// One-shot commands triggered by keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    TogglePause,
}

/// Tracks held keys and merges them with store-side flags
#[derive(Debug, Clone, Default)]
pub struct InputAggregator {
    keys: InputFlags,
}

impl InputAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key pressed. Returns a command for keys that aren't held controls.
    pub fn key_down(&mut self, key: &str) -> Option<KeyCommand> {
        match key {
            "a" | "A" | "ArrowLeft" => self.keys.left = true,
            "d" | "D" | "ArrowRight" => self.keys.right = true,
            " " => self.keys.cast = true,
            "p" | "P" => return Some(KeyCommand::TogglePause),
            _ => {}
        }
        None
    }

    pub fn key_up(&mut self, key: &str) {
        match key {
            "a" | "A" | "ArrowLeft" => self.keys.left = false,
            "d" | "D" | "ArrowRight" => self.keys.right = false,
            " " => self.keys.cast = false,
            _ => {}
        }
    }

    /// Drop all held keys (focus lost, teardown)
    pub fn clear(&mut self) {
        self.keys = InputFlags::default();
    }

    /// Controls currently held on the keyboard
    pub fn held(&self) -> InputFlags {
        self.keys
    }
}
