//! # Spectrum Analysis Module
//!
//! Turns a raw frequency-magnitude sequence into the seven named band
//! energies plus a spectral centroid that drive all downstream animation.
//!
//! The bin→Hz mapping is derived from the configured sample rate and the
//! length of the incoming sequence; the sequence length is authoritative.
//! An empty spectrum is a normal operating state (no audio loaded yet) and
//! produces the all-zero [`EnergyVector`].

pub mod analyzer;
pub mod bands;

pub use analyzer::SpectrumAnalyzer;
pub use bands::{BandDefinition, EnergyVector, BANDS};
