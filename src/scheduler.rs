//! Frame loop timing
//!
//! Turns animation-frame timestamps (milliseconds) into clamped deltas and
//! carries the cooperative stop flag the frame callback checks.

use crate::consts::MAX_FRAME_DT;

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    running: bool,
    last_time: Option<f64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin timing from `now_ms`
    pub fn start(&mut self, now_ms: f64) {
        self.running = true;
        self.last_time = Some(now_ms);
    }

    /// Stop; frames already requested become no-ops
    pub fn stop(&mut self) {
        self.running = false;
        self.last_time = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds since the previous frame, clamped to `[0, MAX_FRAME_DT]`.
    ///
    /// `None` once stopped. The first frame after `start` without a prior
    /// timestamp advances by zero.
    pub fn frame_dt(&mut self, now_ms: f64) -> Option<f32> {
        if !self.running {
            return None;
        }
        let last = self.last_time.replace(now_ms).unwrap_or(now_ms);
        let dt = ((now_ms - last) / 1000.0) as f32;
        Some(if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 })
    }
}
