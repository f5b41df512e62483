//! Frame clock for the per-frame production integral.
//!
//! `draw_web()` calls at a variable rate (~60fps nominally, not guaranteed).
//! Each frame adds `atoms_per_second / fps` to the counters, so the logic
//! needs the effective frame rate of *this* frame, measured from wall-clock
//! timestamps and clamped against pathological deltas.

/// Shortest frame delta accepted, in ms. Guards the division when two
/// animation frames land on the same millisecond.
const MIN_FRAME_MS: f64 = 1.0;

/// Longest frame delta accepted, in ms. A backgrounded tab can stall the
/// animation loop for minutes; crediting that whole gap in one frame would
/// dump a huge production spike, so the gap is treated as a slow frame.
const MAX_FRAME_MS: f64 = 500.0;

pub struct FrameClock {
    /// Timestamp of the last frame (ms), None before the first frame.
    last_timestamp: Option<f64>,
    /// Total frames observed since creation.
    pub frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_timestamp: None,
            frames: 0,
        }
    }

    /// Feed a wall-clock timestamp (from `performance.now()`).
    /// Returns the effective frames-per-second for the elapsed frame, or
    /// `None` on the first frame (no delta to measure yet).
    pub fn update(&mut self, now_ms: f64) -> Option<f64> {
        self.frames += 1;
        let fps = match self.last_timestamp {
            Some(prev) => {
                let delta = (now_ms - prev).clamp(MIN_FRAME_MS, MAX_FRAME_MS);
                Some(1000.0 / delta)
            }
            None => None,
        };
        self.last_timestamp = Some(now_ms);
        fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_has_no_rate() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.update(0.0), None);
        assert_eq!(clock.frames, 1);
    }

    #[test]
    fn steady_60fps() {
        let mut clock = FrameClock::new();
        clock.update(0.0);
        let fps = clock.update(16.667).unwrap();
        assert!((fps - 60.0).abs() < 0.1, "expected ~60, got {fps}");
    }

    #[test]
    fn slow_frame_reports_low_rate() {
        let mut clock = FrameClock::new();
        clock.update(0.0);
        let fps = clock.update(100.0).unwrap();
        assert!((fps - 10.0).abs() < 0.001);
    }

    #[test]
    fn backgrounded_tab_clamps_to_floor_rate() {
        let mut clock = FrameClock::new();
        clock.update(0.0);
        // 10 second gap → clamped to 500ms → 2 fps, not 0.1 fps
        let fps = clock.update(10_000.0).unwrap();
        assert!((fps - 2.0).abs() < 0.001);
    }

    #[test]
    fn zero_delta_clamps_to_ceiling_rate() {
        let mut clock = FrameClock::new();
        clock.update(50.0);
        let fps = clock.update(50.0).unwrap();
        assert!((fps - 1000.0).abs() < 0.001);
    }

    #[test]
    fn frames_count_every_update() {
        let mut clock = FrameClock::new();
        for i in 0..5 {
            clock.update(i as f64 * 16.0);
        }
        assert_eq!(clock.frames, 5);
    }
}
