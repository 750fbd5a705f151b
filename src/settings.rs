//! Player preferences
//!
//! Persisted as JSON next to the best score, under its own key.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Shadow-blur glows (rare fish, droplets, positive popups)
    pub fn glow_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }

    /// Bead texture along the fishing line
    pub fn rope_texture(&self) -> bool {
        matches!(self, QualityPreset::High | QualityPreset::Medium)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Start new sessions muted
    pub muted_on_start: bool,

    // === Accessibility ===
    /// Reduced motion (no bobbing, rocking, sway or rope waves)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted_on_start: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "htf_settings";

    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective glow (reduced motion keeps glows; low quality drops them)
    pub fn glow(&self) -> bool {
        self.quality.glow_enabled()
    }

    /// Multiplier for cosmetic animation amplitudes
    pub fn motion_scale(&self) -> f32 {
        if self.reduced_motion { 0.0 } else { 1.0 }
    }

    /// Load settings, falling back to defaults on absence or bad JSON
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable settings: {e}");
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings; failures are logged and otherwise ignored
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if store.set(Self::STORAGE_KEY, &json) {
                    log::info!("Settings saved");
                } else {
                    log::warn!("Could not persist settings");
                }
            }
            Err(e) => log::warn!("Could not serialize settings: {e}"),
        }
    }
}
