//! # Signal Sources
//!
//! The pipeline's external collaborators, reduced to two trait seams: an
//! audio capability that produces a raw spectrum and an amplitude level,
//! and a capture capability that produces downscaled RGBA frames. Real
//! device plumbing lives outside this crate; the synthetic implementations
//! here drive the offline demo binary and the benchmark with plausible
//! signals.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// A capability that produces a raw frequency spectrum and a current level
pub trait AudioSource {
    /// Latest magnitude spectrum (possibly empty when nothing is loaded)
    fn spectrum(&mut self) -> &[f32];

    /// Current scalar amplitude (0..~1)
    fn level(&self) -> f32;
}

/// A capability that produces downscaled RGBA camera frames
pub trait CameraSource {
    /// Latest frame, or None while the device warms up
    fn frame(&mut self) -> Option<&[u8]>;
}

/// Synthesized audio: a bass pulse plus two tones, FFT'd into a spectrum
/// scaled to the 0-255 magnitude convention the analyzer assumes
pub struct SyntheticAudio {
    fft: Arc<dyn RealToComplex<f32>>,
    samples: Vec<f32>,
    spectrum: Vec<f32>,
    sample_rate: f32,
    window_size: usize,
    phase: f32,
}

impl SyntheticAudio {
    /// Pulse frequency of the synthetic kick, in Hz of "song time"
    const PULSE_HZ: f32 = 2.0;

    pub fn new(sample_rate: u32) -> Self {
        let window_size = 2048;
        let mut planner = RealFftPlanner::new();
        let fft = planner.plan_fft_forward(window_size);

        Self {
            fft,
            samples: vec![0.0; window_size],
            spectrum: vec![0.0; window_size / 2 + 1],
            sample_rate: sample_rate as f32,
            window_size,
            phase: 0.0,
        }
    }

    /// Advance song time by one frame of `dt_ms` milliseconds
    pub fn advance(&mut self, dt_ms: f64) {
        self.phase += (dt_ms / 1000.0) as f32;

        // 120 BPM kick envelope plus a 220 Hz tone and a bright 3.2 kHz tone
        let pulse = (self.phase * Self::PULSE_HZ * std::f32::consts::TAU).sin().max(0.0);
        for (i, sample) in self.samples.iter_mut().enumerate() {
            let t = i as f32 / self.sample_rate;
            let kick = (t * 50.0 * std::f32::consts::TAU).sin() * pulse;
            let tone = (t * 220.0 * std::f32::consts::TAU).sin() * 0.4;
            let sheen = (t * 3200.0 * std::f32::consts::TAU).sin() * 0.2 * pulse;
            *sample = kick + tone + sheen;
        }

        let mut input = self.samples.clone();
        let mut output = self.fft.make_output_vec();
        // Synthetic input can't violate realfft's length contract
        if self.fft.process(&mut input, &mut output).is_ok() {
            let scale = 255.0 * 2.0 / self.window_size as f32;
            for (bin, value) in output.iter().zip(self.spectrum.iter_mut()) {
                *value = (bin.norm() * scale).min(255.0);
            }
        }
    }
}

impl AudioSource for SyntheticAudio {
    fn spectrum(&mut self) -> &[f32] {
        &self.spectrum
    }

    fn level(&self) -> f32 {
        (self.phase * Self::PULSE_HZ * std::f32::consts::TAU).sin().max(0.0)
    }
}

/// Synthesized camera: a noise field whose brightness drifts slowly, with
/// occasional "movement" bursts
pub struct SyntheticCamera {
    rng: SmallRng,
    frame: Vec<u8>,
    width: u32,
    height: u32,
    base_brightness: f32,
    warmup_frames: u32,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32, seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            frame: Vec::new(),
            width,
            height,
            base_brightness: 120.0,
            warmup_frames: 3,
        }
    }
}

impl CameraSource for SyntheticCamera {
    fn frame(&mut self) -> Option<&[u8]> {
        // Real capture devices deliver nothing for the first few requests
        if self.warmup_frames > 0 {
            self.warmup_frames -= 1;
            return None;
        }

        self.base_brightness =
            (self.base_brightness + self.rng.gen_range(-4.0..4.0)).clamp(30.0, 220.0);

        let pixel_count = (self.width * self.height) as usize;
        self.frame.clear();
        self.frame.reserve(pixel_count * 4);
        for _ in 0..pixel_count {
            let value =
                (self.base_brightness + self.rng.gen_range(-10.0..10.0)).clamp(0.0, 255.0) as u8;
            self.frame.extend_from_slice(&[value, value, value, 255]);
        }

        Some(&self.frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_audio_produces_bounded_spectrum() {
        let mut audio = SyntheticAudio::new(44100);
        audio.advance(16.0);
        let spectrum = audio.spectrum();
        assert!(!spectrum.is_empty());
        assert!(spectrum.iter().all(|&v| (0.0..=255.0).contains(&v)));
    }

    #[test]
    fn test_synthetic_audio_level_in_range() {
        let mut audio = SyntheticAudio::new(44100);
        for _ in 0..120 {
            audio.advance(16.0);
            assert!((0.0..=1.0).contains(&audio.level()));
        }
    }

    #[test]
    fn test_synthetic_camera_warms_up_then_delivers() {
        let mut camera = SyntheticCamera::new(160, 120, 7);
        assert!(camera.frame().is_none());
        assert!(camera.frame().is_none());
        assert!(camera.frame().is_none());

        let frame = camera.frame().expect("frame after warmup");
        assert_eq!(frame.len(), 160 * 120 * 4);
    }
}
