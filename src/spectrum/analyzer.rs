use crate::config::SpectrumConfig;
use crate::spectrum::bands::{BandDefinition, EnergyVector, BANDS};

/// Extracts band energies and the spectral centroid from a raw spectrum
///
/// Stateless; safe to call every frame without coordination. The spectrum is
/// an ordered sequence of non-negative magnitudes indexed by frequency bin,
/// spanning 0 Hz to Nyquist of the configured sample rate.
pub struct SpectrumAnalyzer {
    config: SpectrumConfig,
}

impl SpectrumAnalyzer {
    /// Create an analyzer with default configuration
    pub fn new() -> Self {
        Self::with_config(SpectrumConfig::default())
    }

    /// Create an analyzer with custom configuration
    pub fn with_config(config: SpectrumConfig) -> Self {
        Self { config }
    }

    /// Compute the per-band energies and centroid for one frame
    ///
    /// An empty spectrum yields [`EnergyVector::empty`]; absence of signal
    /// is a normal operating state, not an error.
    pub fn analyze(&self, spectrum: &[f32]) -> EnergyVector {
        if spectrum.is_empty() {
            return EnergyVector::empty();
        }

        let mut energies = [0.0f32; 7];
        for (slot, band) in energies.iter_mut().zip(BANDS.iter()) {
            *slot = self.band_energy(spectrum, band);
        }

        EnergyVector {
            sub_bass: energies[0],
            bass: energies[1],
            low_mid: energies[2],
            mid: energies[3],
            high_mid: energies[4],
            high: energies[5],
            air: energies[6],
            centroid: Self::centroid(spectrum),
        }
    }

    /// Average magnitude over the band's bin range, normalized by the
    /// magnitude ceiling. Values above the ceiling are passed through as
    /// energies above 1.0; the ceiling is a trusted upstream assumption.
    fn band_energy(&self, spectrum: &[f32], band: &BandDefinition) -> f32 {
        let nyquist = self.config.sample_rate as f32 / 2.0;
        let last_bin = spectrum.len() - 1;

        let low_bin = ((band.low_hz / nyquist) * last_bin as f32).floor() as usize;
        let high_bin = ((band.high_hz / nyquist) * last_bin as f32).ceil() as usize;

        let low_bin = low_bin.min(last_bin);
        let high_bin = high_bin.clamp(low_bin, last_bin);

        let sum: f32 = spectrum[low_bin..=high_bin].iter().sum();
        let avg = sum / (high_bin - low_bin + 1) as f32;

        avg / self.config.magnitude_ceiling
    }

    /// Magnitude-weighted mean bin index; 0 when the spectrum sums to zero
    /// (the defined empty-signal behavior, not a failure)
    fn centroid(spectrum: &[f32]) -> f32 {
        let total: f32 = spectrum.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }

        let weighted: f32 = spectrum
            .iter()
            .enumerate()
            .map(|(i, &mag)| i as f32 * mag)
            .sum();

        weighted / total
    }
}

impl Default for SpectrumAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
