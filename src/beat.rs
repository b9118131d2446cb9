//! # Beat Detection
//!
//! Turns a scalar amplitude level over time into a decaying beat-intensity
//! signal. A beat is a loudness spike gated by a fixed refractory period so
//! a single sustained loud passage cannot retrigger every frame.

use tracing::trace;

use crate::config::BeatConfig;

/// Beat detector state, persisted for the life of the session
///
/// `level` jumps to 1.0 on a detected beat and otherwise decays toward zero
/// each frame. Reset only by explicit session restart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatState {
    /// Current beat intensity in [0, 1]
    pub level: f32,

    /// Timestamp of the last detected beat (ms on the frame clock)
    pub last_beat_ms: f64,
}

impl Default for BeatState {
    fn default() -> Self {
        Self { level: 0.0, last_beat_ms: 0.0 }
    }
}

/// Refractory-gated beat detector
pub struct BeatDetector {
    config: BeatConfig,
    state: BeatState,
}

impl BeatDetector {
    /// Create a detector with default configuration
    pub fn new() -> Self {
        Self::with_config(BeatConfig::default())
    }

    /// Create a detector with custom configuration
    pub fn with_config(config: BeatConfig) -> Self {
        Self { config, state: BeatState::default() }
    }

    /// Update the detector with the current amplitude level
    ///
    /// Declares a beat when the level exceeds the threshold and the
    /// refractory period has elapsed; otherwise decays the beat level by
    /// linear interpolation toward zero, snapping below `snap_epsilon`.
    /// Returns the updated beat level.
    pub fn update(&mut self, level: f32, now_ms: f64) -> f32 {
        let since_last = now_ms - self.state.last_beat_ms;

        if level > self.config.threshold && since_last >= self.config.refractory_ms {
            trace!(now_ms, level, "beat detected");
            self.state.level = 1.0;
            self.state.last_beat_ms = now_ms;
        } else {
            self.state.level += (0.0 - self.state.level) * self.config.decay;
            if self.state.level < self.config.snap_epsilon {
                self.state.level = 0.0;
            }
        }

        self.state.level
    }

    /// Current beat intensity without advancing the detector
    pub fn level(&self) -> f32 {
        self.state.level
    }

    /// Current detector state
    pub fn state(&self) -> BeatState {
        self.state
    }

    /// Reset to the idle state (explicit session restart only)
    pub fn reset(&mut self) {
        self.state = BeatState::default();
    }
}

impl Default for BeatDetector {
    fn default() -> Self {
        Self::new()
    }
}
