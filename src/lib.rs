//! # Pulseframe
//!
//! Real-time signal-to-influence pipeline for audio and camera driven
//! generative visuals.
//!
//! Every rendered frame, the pipeline turns a raw frequency spectrum, a
//! scalar amplitude level, and an optional camera frame into one normalized
//! influence vector that animation consumers read without re-validating:
//! seven named band energies, a spectral centroid, a refractory-gated beat
//! level, and camera motion/brightness/stability.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pulseframe::{
//!     config::Config,
//!     pipeline::{CameraFeed, SignalPipeline, TickInput},
//! };
//!
//! let mut pipeline = SignalPipeline::new(Config::default());
//!
//! // Per rendered frame, with whatever the capture capabilities have:
//! let spectrum: Vec<f32> = vec![];
//! let output = pipeline.tick(TickInput {
//!     spectrum: &spectrum,
//!     level: 0.0,
//!     camera: CameraFeed::Disabled,
//! });
//! println!("beat: {}, mid energy: {}", output.beat_level, output.energies.mid);
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`spectrum`] - Band energies and spectral centroid from a raw spectrum
//! - [`beat`] - Refractory-gated beat detection from the amplitude level
//! - [`camera`] - Frame-differencing motion and brightness tracking
//! - [`influence`] - The fixed camera multipliers applied to band energies
//! - [`pipeline`] - Per-session context tying the stages together
//! - [`clock`] - Monotonic frame timing
//! - [`config`] - Configuration management
//!
//! Missing signals (no audio loaded, camera off or not ready) are normal
//! operating states that degrade to neutral defaults; the tick path has no
//! fatal error cases.

pub mod beat;
pub mod camera;
pub mod clock;
pub mod config;
pub mod error;
pub mod influence;
pub mod pipeline;
pub mod sources;
pub mod spectrum;

// Re-export commonly used types for convenience
pub use crate::{
    config::Config,
    error::{PipelineError, Result},
    influence::InfluencedEnergyVector,
    pipeline::{CameraFeed, PipelineOutput, SignalPipeline, TickInput},
};
