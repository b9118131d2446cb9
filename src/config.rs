use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main configuration for the signal pipeline
///
/// Defaults reproduce the tuned constants of the shipped visualizer exactly;
/// change them only if you want different behavior, not for "cleanup".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Spectrum analysis settings
    pub spectrum: SpectrumConfig,

    /// Beat detection settings
    pub beat: BeatConfig,

    /// Camera motion/brightness tracking settings
    pub camera: CameraConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spectrum: SpectrumConfig::default(),
            beat: BeatConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string(),
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.spectrum.validate()?;
        self.beat.validate()?;
        self.camera.validate()?;
        Ok(())
    }
}

/// Spectrum analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpectrumConfig {
    /// Sample rate the spectrum was produced at (Hz); used to map band
    /// frequency edges onto bin indices
    pub sample_rate: u32,

    /// Magnitude ceiling of the incoming spectrum; band energies are divided
    /// by this value. Upstream is trusted to respect it (no re-clamping).
    pub magnitude_ceiling: f32,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            magnitude_ceiling: 255.0,
        }
    }
}

impl SpectrumConfig {
    fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(ConfigError::InvalidValue {
                key: "spectrum.sample_rate".to_string(),
                value: self.sample_rate.to_string(),
            }
            .into());
        }

        if self.magnitude_ceiling <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "spectrum.magnitude_ceiling".to_string(),
                value: self.magnitude_ceiling.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Beat detection configuration
///
/// The defaults are the detector's behavioral contract: a level above 0.3
/// triggers a beat, a beat cannot retrigger within 200 ms, and the beat
/// level decays by 10% per frame between beats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeatConfig {
    /// Amplitude level above which a beat is declared (0.0-1.0)
    pub threshold: f32,

    /// Minimum time between detected beats (ms)
    pub refractory_ms: f64,

    /// Per-frame decay factor toward zero (0.0-1.0)
    pub decay: f32,

    /// Below this, the decaying level snaps to exactly zero
    pub snap_epsilon: f32,
}

impl Default for BeatConfig {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            refractory_ms: 200.0,
            decay: 0.1,
            snap_epsilon: 1e-3,
        }
    }
}

impl BeatConfig {
    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::InvalidValue {
                key: "beat.threshold".to_string(),
                value: self.threshold.to_string(),
            }
            .into());
        }

        if !(0.0..=1.0).contains(&self.decay) {
            return Err(ConfigError::InvalidValue {
                key: "beat.decay".to_string(),
                value: self.decay.to_string(),
            }
            .into());
        }

        if self.refractory_ms < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "beat.refractory_ms".to_string(),
                value: self.refractory_ms.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Camera tracking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Mean absolute brightness delta (0-255 units) that maps to full motion.
    /// Empirically tuned; lower = more sensitive.
    pub motion_sensitivity: f32,

    /// Expected downscaled capture width (informational; the tracker accepts
    /// whatever resolution the capture capability delivers)
    pub width: u32,

    /// Expected downscaled capture height
    pub height: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            motion_sensitivity: 20.0,
            width: 160,
            height: 120,
        }
    }
}

impl CameraConfig {
    fn validate(&self) -> Result<()> {
        if self.motion_sensitivity <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "camera.motion_sensitivity".to_string(),
                value: self.motion_sensitivity.to_string(),
            }
            .into());
        }

        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidValue {
                key: "camera.resolution".to_string(),
                value: format!("{}x{}", self.width, self.height),
            }
            .into());
        }

        Ok(())
    }
}
