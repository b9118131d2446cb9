use tracing::debug;

use crate::config::CameraConfig;

/// Camera-derived influence values, all in [0, 1]
///
/// Persists across frames as running state: updated in place while camera
/// input flows, frozen at its last value when the camera is disabled.
/// `stability` is derived as `1 - motion` by definition, never tracked
/// independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraInfluence {
    /// Mean absolute per-pixel brightness change, normalized
    pub motion: f32,

    /// Mean frame brightness, normalized from the 0-255 pixel range
    pub brightness: f32,

    /// `1 - motion`
    pub stability: f32,
}

impl Default for CameraInfluence {
    fn default() -> Self {
        Self { motion: 0.0, brightness: 0.0, stability: 1.0 }
    }
}

/// Overall-brightness running state
///
/// `previous` must be read for the change computation before it is
/// overwritten with `current`; that ordering is the tracker's invariant.
#[derive(Debug, Clone, Copy, Default)]
struct BrightnessState {
    current: f32,
    previous: f32,
    /// |current - previous| / 255, for debug display
    change: f32,
}

/// Frame-differencing motion and brightness tracker
///
/// Owns the previous frame's per-pixel brightness samples. The buffer is
/// replaced wholesale each frame; on the first frame after activation no
/// previous buffer exists and motion is 0 regardless of pixel content.
pub struct MotionBrightnessTracker {
    config: CameraConfig,
    previous_frame: Option<Vec<f32>>,
    brightness: BrightnessState,
    influence: CameraInfluence,
}

impl MotionBrightnessTracker {
    /// Create a tracker with default configuration
    pub fn new() -> Self {
        Self::with_config(CameraConfig::default())
    }

    /// Create a tracker with custom configuration
    pub fn with_config(config: CameraConfig) -> Self {
        Self {
            config,
            previous_frame: None,
            brightness: BrightnessState::default(),
            influence: CameraInfluence::default(),
        }
    }

    /// Update motion/brightness state from one RGBA frame
    ///
    /// `pixels` is interleaved RGBA, 4 bytes per pixel; alpha is ignored
    /// and any trailing partial pixel is dropped. Returns the updated
    /// influence. An empty buffer is a no-op that retains the prior
    /// influence (stale-but-valid, not an error).
    pub fn analyze(&mut self, pixels: &[u8]) -> CameraInfluence {
        let pixel_count = pixels.len() / 4;
        if pixel_count == 0 {
            return self.influence;
        }

        // Per-pixel brightness, stride 4 over the byte sequence
        let mut frame = Vec::with_capacity(pixel_count);
        let mut total_brightness = 0.0f32;
        for rgba in pixels.chunks_exact(4) {
            let value = (rgba[0] as f32 + rgba[1] as f32 + rgba[2] as f32) / 3.0;
            total_brightness += value;
            frame.push(value);
        }

        // Motion against the previous frame, read before the buffer swap
        let motion = match &self.previous_frame {
            Some(previous) if previous.len() == frame.len() => {
                let delta_sum: f32 = frame
                    .iter()
                    .zip(previous.iter())
                    .map(|(&now, &before)| (now - before).abs())
                    .sum();
                let mean_delta = delta_sum / pixel_count as f32;
                (mean_delta / self.config.motion_sensitivity).clamp(0.0, 1.0)
            }
            Some(previous) => {
                // Capture resolution changed mid-session; treat like a
                // first frame rather than diffing mismatched buffers.
                debug!(
                    old = previous.len(),
                    new = frame.len(),
                    "camera frame size changed, skipping motion for this frame"
                );
                0.0
            }
            None => 0.0,
        };
        self.previous_frame = Some(frame);

        // Overall brightness: read the prior `previous` before committing
        let current = total_brightness / pixel_count as f32;
        self.brightness.change = (current - self.brightness.previous).abs() / 255.0;
        self.brightness.current = current;
        self.brightness.previous = current;

        self.influence = CameraInfluence {
            motion,
            brightness: current / 255.0,
            stability: 1.0 - motion,
        };
        self.influence
    }

    /// The latest influence (stale when the camera is off or not ready)
    pub fn influence(&self) -> CameraInfluence {
        self.influence
    }

    /// Normalized frame-to-frame overall brightness change
    pub fn brightness_change(&self) -> f32 {
        self.brightness.change
    }

    /// Discard the per-session comparison buffers
    ///
    /// Must be called on a camera disable→enable transition so the first
    /// frame of the new session reports motion 0 instead of diffing against
    /// a scene captured before the camera was turned off. The last computed
    /// influence stays frozen: it remains valid display state until the
    /// first frame of the new session replaces it.
    pub fn reset(&mut self) {
        self.previous_frame = None;
        self.brightness = BrightnessState::default();
    }
}

impl Default for MotionBrightnessTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A small RGBA frame where every pixel has the given channel value
    fn uniform_frame(pixel_count: usize, value: u8) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(pixel_count * 4);
        for _ in 0..pixel_count {
            pixels.extend_from_slice(&[value, value, value, 255]);
        }
        pixels
    }

    #[test]
    fn test_first_frame_has_zero_motion() {
        let mut tracker = MotionBrightnessTracker::new();
        let influence = tracker.analyze(&uniform_frame(64, 200));
        assert_eq!(influence.motion, 0.0);
        assert_eq!(influence.stability, 1.0);
    }

    #[test]
    fn test_identical_frames_yield_zero_motion() {
        let mut tracker = MotionBrightnessTracker::new();
        let frame = uniform_frame(64, 120);
        tracker.analyze(&frame);
        let influence = tracker.analyze(&frame);
        assert_eq!(influence.motion, 0.0);
    }

    #[test]
    fn test_uniform_brightness_step_saturates_motion() {
        let mut tracker = MotionBrightnessTracker::new();
        tracker.analyze(&uniform_frame(64, 100));
        // Every pixel 20 brightness units brighter: mean delta 20, /20 = 1.0
        let influence = tracker.analyze(&uniform_frame(64, 120));
        assert!((influence.motion - 1.0).abs() < 1e-6);
        assert!(influence.stability.abs() < 1e-6);
    }

    #[test]
    fn test_half_sensitivity_step() {
        let mut tracker = MotionBrightnessTracker::new();
        tracker.analyze(&uniform_frame(64, 100));
        let influence = tracker.analyze(&uniform_frame(64, 110));
        assert!((influence.motion - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_stability_is_complement_of_motion() {
        let mut tracker = MotionBrightnessTracker::new();
        tracker.analyze(&uniform_frame(64, 0));
        for value in [5u8, 40, 90, 255] {
            let influence = tracker.analyze(&uniform_frame(64, value));
            assert!((influence.stability - (1.0 - influence.motion)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_brightness_is_normalized_mean() {
        let mut tracker = MotionBrightnessTracker::new();
        let influence = tracker.analyze(&uniform_frame(64, 51));
        assert!((influence.brightness - 0.2).abs() < 1e-3);
    }

    #[test]
    fn test_alpha_is_ignored() {
        let mut tracker = MotionBrightnessTracker::new();
        let mut frame = uniform_frame(16, 80);
        for alpha in frame.iter_mut().skip(3).step_by(4) {
            *alpha = 0;
        }
        let influence = tracker.analyze(&frame);
        assert!((influence.brightness - 80.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_buffer_retains_prior_influence() {
        let mut tracker = MotionBrightnessTracker::new();
        tracker.analyze(&uniform_frame(64, 100));
        let before = tracker.influence();
        let after = tracker.analyze(&[]);
        assert_eq!(before, after);
    }

    #[test]
    fn test_brightness_change_reads_before_commit() {
        let mut tracker = MotionBrightnessTracker::new();
        tracker.analyze(&uniform_frame(64, 100));
        tracker.analyze(&uniform_frame(64, 100));
        // Third frame jumps by 51: change compares against the committed
        // previous (100), not the freshly computed current
        tracker.analyze(&uniform_frame(64, 151));
        assert!((tracker.brightness_change() - 51.0 / 255.0).abs() < 1e-3);
    }

    #[test]
    fn test_reset_clears_previous_frame() {
        let mut tracker = MotionBrightnessTracker::new();
        tracker.analyze(&uniform_frame(64, 0));
        tracker.reset();
        // A wildly different frame right after reset must not spike motion
        let influence = tracker.analyze(&uniform_frame(64, 255));
        assert_eq!(influence.motion, 0.0);
    }

    #[test]
    fn test_reset_keeps_last_influence_frozen() {
        let mut tracker = MotionBrightnessTracker::new();
        tracker.analyze(&uniform_frame(64, 100));
        tracker.analyze(&uniform_frame(64, 110));
        let before = tracker.influence();
        tracker.reset();
        assert_eq!(tracker.influence(), before);
    }

    #[test]
    fn test_resolution_change_skips_motion_once() {
        let mut tracker = MotionBrightnessTracker::new();
        tracker.analyze(&uniform_frame(64, 100));
        let influence = tracker.analyze(&uniform_frame(32, 255));
        assert_eq!(influence.motion, 0.0);
        // Next same-size frame diffs normally again
        let influence = tracker.analyze(&uniform_frame(32, 235));
        assert!((influence.motion - 1.0).abs() < 1e-6);
    }
}
