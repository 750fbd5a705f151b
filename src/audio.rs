//! Audio system using Web Audio API
//!
//! Procedurally generated cues, one per [`GameEvent`]. No sample files.

use rand::Rng;
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::GameEvent;

/// Output level under the player's volume settings
const MASTER_GAIN: f32 = 0.2;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master: Option<GainNode>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        let master = ctx.as_ref().and_then(|ctx| {
            let gain = ctx.create_gain().ok()?;
            gain.gain().set_value(MASTER_GAIN);
            gain.connect_with_audio_node(&ctx.destination()).ok()?;
            Some(gain)
        });
        Self {
            ctx,
            master,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play the cue for a simulation event
    pub fn play(&self, event: GameEvent) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let (Some(ctx), Some(master)) = (&self.ctx, &self.master) else {
            return;
        };

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match event {
            // plop
            GameEvent::Cast => self.play_tone(ctx, master, 180.0, OscillatorType::Sine, 0.15, vol),
            GameEvent::Splash => self.play_noise(ctx, master, 0.12, 0.25 * vol),
            // ding
            GameEvent::PositiveCatch => {
                self.play_tone(ctx, master, 880.0, OscillatorType::Triangle, 0.2, vol)
            }
            // buzz
            GameEvent::NegativeCatch => {
                self.play_tone(ctx, master, 120.0, OscillatorType::Square, 0.25, vol)
            }
        }
    }

    // === Sound generators ===

    fn create_osc(
        &self,
        ctx: &AudioContext,
        out: &GainNode,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(out).ok()?;

        Some((osc, gain))
    }

    /// Short attack, exponential tail
    fn play_tone(
        &self,
        ctx: &AudioContext,
        out: &GainNode,
        freq: f32,
        osc_type: OscillatorType,
        duration: f64,
        vol: f32,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, out, freq, osc_type) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.0, t).ok();
        gain.gain().linear_ramp_to_value_at_time(0.6 * vol, t + 0.01).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + duration)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + duration + 0.02).ok();
    }

    /// Burst of white noise
    fn play_noise(&self, ctx: &AudioContext, out: &GainNode, duration: f32, vol: f32) {
        let rate = ctx.sample_rate();
        let len = (2.0 * rate * duration) as u32;
        let Ok(buffer) = ctx.create_buffer(1, len, rate) else {
            return;
        };

        let mut rng = rand::rng();
        let mut samples: Vec<f32> = (0..len).map(|_| rng.random_range(-1.0..1.0)).collect();
        if buffer.copy_to_channel(&mut samples, 0).is_err() {
            return;
        }

        let Ok(src) = ctx.create_buffer_source() else {
            return;
        };
        let Ok(gain) = ctx.create_gain() else {
            return;
        };
        src.set_buffer(Some(&buffer));
        gain.gain().set_value(vol);
        if src.connect_with_audio_node(&gain).is_err()
            || gain.connect_with_audio_node(out).is_err()
        {
            return;
        }
        src.start().ok();
    }
}
