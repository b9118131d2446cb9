/// A named frequency band with its Hz range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandDefinition {
    /// Band name as exposed to animation consumers
    pub name: &'static str,

    /// Lower frequency edge (Hz, inclusive)
    pub low_hz: f32,

    /// Upper frequency edge (Hz, inclusive)
    pub high_hz: f32,
}

/// The fixed seven-band decomposition, ascending and non-overlapping.
///
/// Immutable configuration of the visualizer, not something derived at
/// runtime; the order here is the order animation consumers rely on.
pub const BANDS: [BandDefinition; 7] = [
    BandDefinition { name: "subBass", low_hz: 20.0, high_hz: 60.0 },
    BandDefinition { name: "bass", low_hz: 60.0, high_hz: 250.0 },
    BandDefinition { name: "lowMid", low_hz: 250.0, high_hz: 500.0 },
    BandDefinition { name: "mid", low_hz: 500.0, high_hz: 2000.0 },
    BandDefinition { name: "highMid", low_hz: 2000.0, high_hz: 4000.0 },
    BandDefinition { name: "high", low_hz: 4000.0, high_hz: 8000.0 },
    BandDefinition { name: "air", low_hz: 8000.0, high_hz: 20000.0 },
];

/// Normalized band energies for one frame of audio
///
/// Each band is in [0, 1] as long as the upstream spectrum respects the
/// configured magnitude ceiling. `centroid` is a magnitude-weighted bin
/// index (0 for an empty spectrum), a proxy for perceived brightness.
///
/// Created fresh every frame and never mutated afterward; the all-zero
/// vector is the defined "no signal" default, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyVector {
    pub sub_bass: f32,
    pub bass: f32,
    pub low_mid: f32,
    pub mid: f32,
    pub high_mid: f32,
    pub high: f32,
    pub air: f32,

    /// Spectral centroid in spectrum-bin units (unbounded, typically
    /// 0..spectrum length)
    pub centroid: f32,
}

impl EnergyVector {
    /// The defined default when no spectrum is available
    pub fn empty() -> Self {
        Self::default()
    }

    /// Band values in [`BANDS`] order, for consumers that iterate
    pub fn as_array(&self) -> [f32; 7] {
        [
            self.sub_bass,
            self.bass,
            self.low_mid,
            self.mid,
            self.high_mid,
            self.high,
            self.air,
        ]
    }
}
