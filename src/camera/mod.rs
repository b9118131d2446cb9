//! # Camera Tracking Module
//!
//! Frame-differencing motion and brightness extraction from a downscaled
//! RGBA camera feed. The capture plumbing (device access, downscaling) is
//! an external collaborator; this module only consumes raw pixel buffers.

pub mod tracker;

pub use tracker::{CameraInfluence, MotionBrightnessTracker};
