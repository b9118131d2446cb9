//! # Frame Clock
//!
//! Single source of truth for frame count and elapsed milliseconds,
//! advanced exactly once per rendered frame. The beat detector's refractory
//! timer and any time-based easing read from here, never from the system
//! clock directly, so an offline run with a fixed step is deterministic.

use std::time::Instant;

/// Timing snapshot for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTiming {
    /// Monotonically increasing frame counter, starting at 1 on the first
    /// tick
    pub frame: u64,

    /// Elapsed milliseconds since the clock was created
    pub elapsed_ms: f64,
}

enum TimeSource {
    /// Wall-clock driven, for live rendering
    RealTime(Instant),

    /// Deterministic fixed step, for offline runs and tests
    FixedStep { step_ms: f64 },
}

/// Monotonic per-frame clock
pub struct FrameClock {
    source: TimeSource,
    frame: u64,
}

impl FrameClock {
    /// Create a real-time clock anchored at "now"
    pub fn new() -> Self {
        Self { source: TimeSource::RealTime(Instant::now()), frame: 0 }
    }

    /// Create a deterministic clock advancing `step_ms` per tick
    pub fn fixed_step(step_ms: f64) -> Self {
        Self { source: TimeSource::FixedStep { step_ms }, frame: 0 }
    }

    /// Advance by one frame and return the new timing snapshot
    pub fn tick(&mut self) -> FrameTiming {
        self.frame += 1;
        FrameTiming { frame: self.frame, elapsed_ms: self.elapsed_ms() }
    }

    /// Frames ticked so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Elapsed milliseconds as of the current frame
    pub fn elapsed_ms(&self) -> f64 {
        match &self.source {
            TimeSource::RealTime(started) => started.elapsed().as_secs_f64() * 1000.0,
            TimeSource::FixedStep { step_ms } => self.frame as f64 * step_ms,
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_step_advances_once_per_tick() {
        let mut clock = FrameClock::fixed_step(16.0);
        assert_eq!(clock.frame(), 0);

        let t1 = clock.tick();
        assert_eq!(t1.frame, 1);
        assert_eq!(t1.elapsed_ms, 16.0);

        let t2 = clock.tick();
        assert_eq!(t2.frame, 2);
        assert_eq!(t2.elapsed_ms, 32.0);
    }

    #[test]
    fn test_fixed_step_is_monotonic() {
        let mut clock = FrameClock::fixed_step(16.667);
        let mut previous = clock.tick();
        for _ in 0..100 {
            let timing = clock.tick();
            assert!(timing.frame > previous.frame);
            assert!(timing.elapsed_ms > previous.elapsed_ms);
            previous = timing;
        }
    }

    #[test]
    fn test_real_time_clock_is_monotonic() {
        let mut clock = FrameClock::new();
        let t1 = clock.tick();
        let t2 = clock.tick();
        assert_eq!(t2.frame, t1.frame + 1);
        assert!(t2.elapsed_ms >= t1.elapsed_ms);
    }
}
