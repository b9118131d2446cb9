//! # Influence Combination
//!
//! Merges audio band energies with camera-derived motion/brightness into the
//! single influence vector all animation consumers read. The camera
//! multipliers are fixed design constants: camera dominance is intentional
//! product behavior, so outputs are deliberately NOT clamped back to [0, 1]
//! and can legitimately exceed 1 under high motion or brightness. Consumers
//! must accept that overdrive; clamping here would change observable
//! behavior.

use crate::camera::CameraInfluence;
use crate::spectrum::EnergyVector;

/// How strongly camera motion drives the mid band
pub const MID_MOTION_GAIN: f32 = 2.0;

/// How strongly camera motion drives the high band
pub const HIGH_MOTION_GAIN: f32 = 1.5;

/// How strongly scene brightness drives the bass band
pub const BASS_BRIGHTNESS_GAIN: f32 = 1.2;

/// How strongly scene stability drives the sub-bass band
pub const SUB_BASS_STABILITY_GAIN: f32 = 0.8;

/// The camera-adjusted energy vector consumed by animation
///
/// Same shape as [`EnergyVector`] but a distinct lifecycle: recomputed every
/// frame, never persisted, and its band values may exceed 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InfluencedEnergyVector {
    pub sub_bass: f32,
    pub bass: f32,
    pub low_mid: f32,
    pub mid: f32,
    pub high_mid: f32,
    pub high: f32,
    pub air: f32,
    pub centroid: f32,
}

/// Apply the camera multipliers to one frame's band energies
///
/// Pure function of its inputs; `low_mid`, `high_mid`, `air`, and `centroid`
/// pass through unmodified.
pub fn combine_influences(
    energies: &EnergyVector,
    camera: &CameraInfluence,
) -> InfluencedEnergyVector {
    InfluencedEnergyVector {
        sub_bass: energies.sub_bass * (1.0 + camera.stability * SUB_BASS_STABILITY_GAIN),
        bass: energies.bass * (1.0 + camera.brightness * BASS_BRIGHTNESS_GAIN),
        low_mid: energies.low_mid,
        mid: energies.mid * (1.0 + camera.motion * MID_MOTION_GAIN),
        high_mid: energies.high_mid,
        high: energies.high * (1.0 + camera.motion * HIGH_MOTION_GAIN),
        air: energies.air,
        centroid: energies.centroid,
    }
}
