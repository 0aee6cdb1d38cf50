//! Frame timing
//!
//! The host samples a monotonic clock once per frame and feeds it here;
//! no wall clock is read inside the engine.

use crate::consts::{FPS, MAX_FRAME_DT};

/// Turns successive timestamps into per-tick delta times
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    last: Option<f64>,
}

impl SimClock {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Frame budget at the target rate (seconds)
    pub fn frame_budget() -> f32 {
        1.0 / FPS
    }

    /// Record a timestamp (seconds) and return the elapsed time since the
    /// previous one, clamped to `[0, MAX_FRAME_DT]`
    ///
    /// The first call has nothing to measure against and yields one frame
    /// budget.
    pub fn advance(&mut self, now_secs: f64) -> f32 {
        let dt = match self.last {
            Some(last) => (now_secs - last) as f32,
            None => Self::frame_budget(),
        };
        self.last = Some(now_secs);
        dt.clamp(0.0, MAX_FRAME_DT)
    }
}

/// Rolling frames-per-second over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0.0,
        }
    }
}

impl FpsCounter {
    /// Record a frame timestamp (seconds)
    pub fn record(&mut self, now_secs: f64) {
        self.frame_times[self.frame_index] = now_secs;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Oldest sample is the next one to be overwritten
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = now_secs - oldest;
            if elapsed > 0.0 {
                self.fps = ((self.frame_times.len() - 1) as f64 / elapsed) as f32;
            }
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// HUD text, e.g. "FPS: 120.0"
    pub fn label(&self) -> String {
        format!("FPS: {:.1}", self.fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_first_frame_is_budget() {
        let mut clock = SimClock::new();
        assert!((clock.advance(10.0) - 1.0 / FPS).abs() < 1e-6);
        assert!((clock.advance(10.01) - 0.01).abs() < 1e-4);
    }

    #[test]
    fn test_clock_clamps() {
        let mut clock = SimClock::new();
        clock.advance(1.0);
        assert_eq!(clock.advance(5.0), MAX_FRAME_DT);
        // Time going backwards yields zero rather than a negative step
        assert_eq!(clock.advance(4.0), 0.0);
    }

    #[test]
    fn test_fps_counter() {
        let mut counter = FpsCounter::default();
        for i in 0..120 {
            counter.record(1.0 + i as f64 / 120.0);
        }
        assert!((counter.fps() - 120.0).abs() < 0.5);
        assert!(counter.label().starts_with("FPS: 12"));
    }
}
