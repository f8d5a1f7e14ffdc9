//! Frame clock
//!
//! Converts host frame timestamps into per-frame deltas. Every consumer of a
//! frame reads the same [`FrameTime`], so all continuous motion in one frame is
//! computed from one snapshot of time.

/// Default cap on a single frame delta (ms)
pub const DEFAULT_MAX_DT_MS: f32 = 64.0;

/// Timing of one rendered frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Clamped delta since the previous frame (ms)
    pub dt_ms: f32,
    /// Sum of clamped deltas since mount (ms)
    pub elapsed_ms: f64,
    /// Frame counter, starting at 1 for the first tick
    pub frame: u64,
}

impl FrameTime {
    /// Delta in seconds, for spring integration
    pub fn dt_secs(&self) -> f32 {
        self.dt_ms / 1000.0
    }
}

/// Tracks host timestamps across frames
#[derive(Clone, Debug)]
pub struct FrameClock {
    last_timestamp: Option<f64>,
    elapsed_ms: f64,
    frame: u64,
    max_dt_ms: f32,
}

impl FrameClock {
    pub fn new(max_dt_ms: f32) -> Self {
        let max_dt_ms = if max_dt_ms.is_finite() && max_dt_ms > 0.0 {
            max_dt_ms
        } else {
            DEFAULT_MAX_DT_MS
        };
        Self {
            last_timestamp: None,
            elapsed_ms: 0.0,
            frame: 0,
            max_dt_ms,
        }
    }

    /// Advance to a host timestamp (ms)
    ///
    /// The first tick has a zero delta. Deltas above the cap (a backgrounded
    /// tab resuming) are clamped; timestamps going backwards give a zero delta.
    pub fn tick(&mut self, now_ms: f64) -> FrameTime {
        let raw = match self.last_timestamp {
            Some(last) if now_ms.is_finite() => (now_ms - last) as f32,
            _ => 0.0,
        };
        if now_ms.is_finite() {
            self.last_timestamp = Some(match self.last_timestamp {
                Some(last) => last.max(now_ms),
                None => now_ms,
            });
        }

        let dt_ms = if raw.is_finite() && raw > 0.0 {
            if raw > self.max_dt_ms {
                tracing::debug!(raw_ms = raw, cap_ms = self.max_dt_ms, "frame delta clamped");
            }
            raw.min(self.max_dt_ms)
        } else {
            0.0
        };

        self.elapsed_ms += dt_ms as f64;
        self.frame += 1;
        self.current_with(dt_ms)
    }

    fn current_with(&self, dt_ms: f32) -> FrameTime {
        FrameTime {
            dt_ms,
            elapsed_ms: self.elapsed_ms,
            frame: self.frame,
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn max_dt_ms(&self) -> f32 {
        self.max_dt_ms
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DT_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_has_zero_delta() {
        let mut clock = FrameClock::default();
        let time = clock.tick(5000.0);
        assert_eq!(time.dt_ms, 0.0);
        assert_eq!(time.frame, 1);
        assert_eq!(time.elapsed_ms, 0.0);
    }

    #[test]
    fn test_regular_frames_accumulate() {
        let mut clock = FrameClock::default();
        clock.tick(0.0);
        clock.tick(16.0);
        let time = clock.tick(32.0);
        assert_eq!(time.dt_ms, 16.0);
        assert_eq!(time.elapsed_ms, 32.0);
        assert!((time.dt_secs() - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_backgrounded_tab_is_clamped() {
        let mut clock = FrameClock::new(50.0);
        clock.tick(0.0);
        let time = clock.tick(120_000.0);
        assert_eq!(time.dt_ms, 50.0);
        assert_eq!(time.elapsed_ms, 50.0);
    }

    #[test]
    fn test_time_going_backwards() {
        let mut clock = FrameClock::default();
        clock.tick(100.0);
        assert_eq!(clock.tick(90.0).dt_ms, 0.0);
        assert_eq!(clock.tick(116.0).dt_ms, 16.0);
        assert_eq!(clock.tick(f64::NAN).dt_ms, 0.0);
    }

    #[test]
    fn test_invalid_cap_falls_back() {
        assert_eq!(FrameClock::new(0.0).max_dt_ms(), DEFAULT_MAX_DT_MS);
        assert_eq!(FrameClock::new(f32::NAN).max_dt_ms(), DEFAULT_MAX_DT_MS);
    }
}
