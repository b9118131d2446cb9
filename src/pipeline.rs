//! # Signal Pipeline
//!
//! The per-session context that owns all mutable signal state and runs one
//! cooperative tick per rendered frame:
//!
//! 1. Spectrum analysis - band energies + centroid from the raw spectrum
//! 2. Beat detection - refractory-gated beat level from the amplitude
//! 3. Camera tracking - motion/brightness from the latest pixel buffer
//! 4. Influence combination - camera multipliers applied to the energies
//!
//! Ticks never overlap (the render callback is the sole driver) and never
//! fail: every missing-signal state degrades to a defined neutral default,
//! so animation always has a valid vector to read.

use tracing::{debug, info};

use crate::{
    beat::BeatDetector,
    camera::{CameraInfluence, MotionBrightnessTracker},
    clock::FrameClock,
    config::Config,
    influence::{combine_influences, InfluencedEnergyVector},
    spectrum::{EnergyVector, SpectrumAnalyzer},
};

/// The camera feed's status at tick time
///
/// Capture runs as an external asynchronous producer; the pipeline only
/// reads its latest available snapshot and must tolerate seeing the same
/// snapshot (or none) across consecutive ticks.
#[derive(Debug, Clone, Copy)]
pub enum CameraFeed<'a> {
    /// Camera is switched off; influence stays frozen at its last value
    Disabled,

    /// Camera is on but has not produced pixels yet; prior influence is
    /// retained unchanged (stale-but-valid)
    NotReady,

    /// Latest downscaled RGBA frame
    Frame(&'a [u8]),
}

/// Everything the pipeline reads for one tick
#[derive(Debug, Clone, Copy)]
pub struct TickInput<'a> {
    /// Raw frequency-magnitude sequence (possibly empty)
    pub spectrum: &'a [f32],

    /// Current scalar amplitude of the active audio source (0..~1)
    pub level: f32,

    /// Camera feed status
    pub camera: CameraFeed<'a>,
}

/// What animation consumers read after each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineOutput {
    /// Camera-adjusted band energies (may exceed 1.0 under overdrive)
    pub energies: InfluencedEnergyVector,

    /// Raw band energies before camera adjustment
    pub raw_energies: EnergyVector,

    /// Latest camera influence, for direct display or debug overlay
    pub camera: CameraInfluence,

    /// Current beat intensity in [0, 1]
    pub beat_level: f32,

    /// Frame counter from the pipeline's clock
    pub frame: u64,

    /// Elapsed milliseconds from the pipeline's clock
    pub elapsed_ms: f64,
}

/// Per-session signal pipeline
///
/// Constructed once per session; all state (motion buffers, beat state,
/// camera influence) lives here rather than in ambient globals, so sessions
/// are independent and unit-testable.
pub struct SignalPipeline {
    analyzer: SpectrumAnalyzer,
    beat: BeatDetector,
    tracker: MotionBrightnessTracker,
    clock: FrameClock,
    camera_was_disabled: bool,
    output: PipelineOutput,
}

impl SignalPipeline {
    /// Create a pipeline with a real-time clock
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, FrameClock::new())
    }

    /// Create a pipeline driven by an explicit clock (fixed-step for
    /// offline runs and tests)
    pub fn with_clock(config: Config, clock: FrameClock) -> Self {
        info!(
            sample_rate = config.spectrum.sample_rate,
            beat_threshold = config.beat.threshold,
            motion_sensitivity = config.camera.motion_sensitivity,
            "signal pipeline ready"
        );

        Self {
            analyzer: SpectrumAnalyzer::with_config(config.spectrum),
            beat: BeatDetector::with_config(config.beat),
            tracker: MotionBrightnessTracker::with_config(config.camera),
            clock,
            camera_was_disabled: true,
            output: PipelineOutput {
                energies: InfluencedEnergyVector::default(),
                raw_energies: EnergyVector::empty(),
                camera: CameraInfluence::default(),
                beat_level: 0.0,
                frame: 0,
                elapsed_ms: 0.0,
            },
        }
    }

    /// Run one tick and return the refreshed output
    pub fn tick(&mut self, input: TickInput<'_>) -> &PipelineOutput {
        let timing = self.clock.tick();

        let raw_energies = self.analyzer.analyze(input.spectrum);
        let beat_level = self.beat.update(input.level, timing.elapsed_ms);

        let camera = match input.camera {
            CameraFeed::Disabled => {
                self.camera_was_disabled = true;
                self.tracker.influence()
            }
            CameraFeed::NotReady => {
                self.on_camera_active(timing.frame);
                self.tracker.influence()
            }
            CameraFeed::Frame(pixels) => {
                self.on_camera_active(timing.frame);
                self.tracker.analyze(pixels)
            }
        };

        self.output = PipelineOutput {
            energies: combine_influences(&raw_energies, &camera),
            raw_energies,
            camera,
            beat_level,
            frame: timing.frame,
            elapsed_ms: timing.elapsed_ms,
        };
        &self.output
    }

    /// Clear stale per-session camera state when the feed comes back after
    /// being disabled, so the first new frame diffs against nothing instead
    /// of a scene from before the toggle
    fn on_camera_active(&mut self, frame: u64) {
        if self.camera_was_disabled {
            debug!(frame, "camera enabled, resetting motion state");
            self.tracker.reset();
            self.camera_was_disabled = false;
        }
    }

    /// The most recent tick's output
    pub fn output(&self) -> &PipelineOutput {
        &self.output
    }

    /// Latest camera influence
    pub fn camera_influence(&self) -> CameraInfluence {
        self.tracker.influence()
    }

    /// Latest beat intensity
    pub fn beat_level(&self) -> f32 {
        self.beat.level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline() -> SignalPipeline {
        SignalPipeline::with_clock(Config::default(), FrameClock::fixed_step(16.0))
    }

    fn uniform_frame(pixel_count: usize, value: u8) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(pixel_count * 4);
        for _ in 0..pixel_count {
            pixels.extend_from_slice(&[value, value, value, 255]);
        }
        pixels
    }

    fn silent_tick<'a>(camera: CameraFeed<'a>) -> TickInput<'a> {
        TickInput { spectrum: &[], level: 0.0, camera }
    }

    #[test]
    fn test_tick_with_no_signals_yields_neutral_output() {
        let mut p = pipeline();
        let out = p.tick(silent_tick(CameraFeed::Disabled));

        assert_eq!(out.energies, InfluencedEnergyVector::default());
        assert_eq!(out.beat_level, 0.0);
        assert_eq!(out.camera, CameraInfluence::default());
        assert_eq!(out.frame, 1);
    }

    #[test]
    fn test_every_tick_produces_output() {
        let mut p = pipeline();
        for frame in 1..=50u64 {
            let out = p.tick(silent_tick(CameraFeed::NotReady));
            assert_eq!(out.frame, frame);
        }
    }

    #[test]
    fn test_beat_triggers_through_pipeline() {
        let mut p = pipeline();
        // First tick is at 16 ms, within the initial refractory window;
        // keep ticking quietly until 200 ms has elapsed, then spike.
        for _ in 0..13 {
            p.tick(silent_tick(CameraFeed::Disabled));
        }
        let out = p.tick(TickInput {
            spectrum: &[],
            level: 0.8,
            camera: CameraFeed::Disabled,
        });
        assert_eq!(out.beat_level, 1.0);
    }

    #[test]
    fn test_camera_not_ready_retains_stale_influence() {
        let mut p = pipeline();
        let frame = uniform_frame(64, 100);
        p.tick(silent_tick(CameraFeed::Frame(&frame)));
        let brighter = uniform_frame(64, 120);
        let moving = *p.tick(silent_tick(CameraFeed::Frame(&brighter)));
        assert!(moving.camera.motion > 0.0);

        let stale = p.tick(silent_tick(CameraFeed::NotReady));
        assert_eq!(stale.camera, moving.camera);
    }

    #[test]
    fn test_camera_disable_freezes_influence() {
        let mut p = pipeline();
        let frame = uniform_frame(64, 200);
        p.tick(silent_tick(CameraFeed::Frame(&frame)));
        let before = p.camera_influence();

        for _ in 0..5 {
            p.tick(silent_tick(CameraFeed::Disabled));
        }
        assert_eq!(p.camera_influence(), before);
    }

    #[test]
    fn test_reenable_resets_motion_state() {
        let mut p = pipeline();
        let dark = uniform_frame(64, 0);
        p.tick(silent_tick(CameraFeed::Frame(&dark)));
        p.tick(silent_tick(CameraFeed::Frame(&dark)));

        p.tick(silent_tick(CameraFeed::Disabled));

        // Scene changed completely while the camera was off; the first
        // re-enabled frame must not report a spurious motion spike.
        let bright = uniform_frame(64, 255);
        let out = p.tick(silent_tick(CameraFeed::Frame(&bright)));
        assert_eq!(out.camera.motion, 0.0);
    }

    #[test]
    fn test_reenable_keeps_influence_frozen_until_first_frame() {
        let mut p = pipeline();
        let dark = uniform_frame(64, 0);
        let bright = uniform_frame(64, 200);
        p.tick(silent_tick(CameraFeed::Frame(&dark)));
        p.tick(silent_tick(CameraFeed::Frame(&bright)));
        let frozen = p.camera_influence();
        assert!(frozen.motion > 0.0);

        p.tick(silent_tick(CameraFeed::Disabled));

        // Camera back on but no pixels yet: the last influence is still
        // what consumers see, only the comparison buffers were cleared
        let out = p.tick(silent_tick(CameraFeed::NotReady));
        assert_eq!(out.camera, frozen);

        // The first real frame of the new session replaces it, motion 0
        let out = p.tick(silent_tick(CameraFeed::Frame(&dark)));
        assert_eq!(out.camera.motion, 0.0);
    }

    #[test]
    fn test_camera_overdrive_flows_into_energies() {
        let mut p = pipeline();
        let spectrum = vec![255.0f32; 1024];

        let dark = uniform_frame(64, 100);
        p.tick(TickInput {
            spectrum: &spectrum,
            level: 0.0,
            camera: CameraFeed::Frame(&dark),
        });

        // Full-motion step: mid should overdrive to ~3x its raw energy
        let bright = uniform_frame(64, 120);
        let out = p.tick(TickInput {
            spectrum: &spectrum,
            level: 0.0,
            camera: CameraFeed::Frame(&bright),
        });
        assert!((out.camera.motion - 1.0).abs() < 1e-6);
        assert!((out.energies.mid - out.raw_energies.mid * 3.0).abs() < 1e-4);
        assert!(out.energies.mid > 1.0);
    }

    #[test]
    fn test_same_spectrum_across_ticks_is_valid() {
        let mut p = pipeline();
        let spectrum = vec![128.0f32; 512];
        let a = p
            .tick(TickInput { spectrum: &spectrum, level: 0.0, camera: CameraFeed::Disabled })
            .raw_energies;
        let b = p
            .tick(TickInput { spectrum: &spectrum, level: 0.0, camera: CameraFeed::Disabled })
            .raw_energies;
        assert_eq!(a, b);
    }
}
