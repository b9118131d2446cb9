use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};

use pulseframe::{
    clock::FrameClock,
    config::Config,
    pipeline::{CameraFeed, SignalPipeline, TickInput},
    sources::{AudioSource, CameraSource, SyntheticAudio, SyntheticCamera},
};

#[derive(Parser)]
#[command(
    name = "pulseframe",
    version,
    about = "Run the signal-to-influence pipeline over synthetic sources",
    long_about = "Drives the pulseframe pipeline offline at a fixed frame step over \
synthesized audio and camera signals, logging the influence vector. Useful for tuning \
constants and inspecting pipeline behavior without real devices."
)]
struct Cli {
    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Simulated frame rate
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Disable the synthetic camera feed
    #[arg(long)]
    no_camera: bool,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("Starting pulseframe v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(&config_path)
                .map_err(|e| anyhow::anyhow!("{}", e.user_message()))?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };
    config.validate()?;

    let step_ms = 1000.0 / cli.fps;
    let mut pipeline = SignalPipeline::with_clock(config.clone(), FrameClock::fixed_step(step_ms));
    let mut audio = SyntheticAudio::new(config.spectrum.sample_rate);
    let mut camera = SyntheticCamera::new(config.camera.width, config.camera.height, 42);

    let mut beats = 0u64;
    let mut peak_mid = 0.0f32;

    for _ in 0..cli.frames {
        audio.advance(step_ms);
        let level = audio.level();

        let feed = if cli.no_camera {
            CameraFeed::Disabled
        } else {
            match camera.frame() {
                Some(pixels) => CameraFeed::Frame(pixels),
                None => CameraFeed::NotReady,
            }
        };

        let output = pipeline.tick(TickInput { spectrum: audio.spectrum(), level, camera: feed });

        if output.beat_level == 1.0 {
            beats += 1;
        }
        peak_mid = peak_mid.max(output.energies.mid);

        if output.frame % 60 == 0 {
            info!(
                frame = output.frame,
                beat = output.beat_level,
                mid = output.energies.mid,
                bass = output.energies.bass,
                centroid = output.raw_energies.centroid,
                motion = output.camera.motion,
                "tick"
            );
        }
    }

    info!(
        "Simulated {} frames at {:.0} fps: {} beats, peak mid energy {:.2}",
        cli.frames, cli.fps, beats, peak_mid
    );
    Ok(())
}
