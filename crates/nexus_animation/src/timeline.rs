//! Repeating timelines
//!
//! A [`LoopTimeline`] turns elapsed time into eased cycle progress. It keeps no
//! clock of its own: progress is a pure function of the elapsed time passed
//! in, so an infinite loop is exactly periodic and never drifts.

use crate::easing::Easing;
use serde::{Deserialize, Serialize};

/// How many cycles a timeline plays
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    #[default]
    Infinite,
    Count(u32),
}

/// A transform cycle that restarts on completion
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoopTimeline {
    pub duration_ms: u32,
    #[serde(default)]
    pub easing: Easing,
    #[serde(default)]
    pub repeat: Repeat,
}

impl LoopTimeline {
    /// An infinitely repeating timeline
    pub fn infinite(duration_ms: u32, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
            repeat: Repeat::Infinite,
        }
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Number of completed cycles at `elapsed_ms`
    pub fn cycle_at(&self, elapsed_ms: f64) -> u64 {
        if self.duration_ms == 0 || !(elapsed_ms > 0.0) {
            return 0;
        }
        (elapsed_ms / self.duration_ms as f64).floor() as u64
    }

    /// Whether a finite timeline has played all its cycles
    pub fn is_complete(&self, elapsed_ms: f64) -> bool {
        match self.repeat {
            Repeat::Infinite => false,
            Repeat::Count(n) => self.cycle_at(elapsed_ms) >= n as u64,
        }
    }

    /// Linear progress within the current cycle (0.0 to 1.0)
    pub fn phase_at(&self, elapsed_ms: f64) -> f32 {
        if self.duration_ms == 0 || !(elapsed_ms > 0.0) {
            return 0.0;
        }
        if self.is_complete(elapsed_ms) {
            return 1.0;
        }
        let duration = self.duration_ms as f64;
        (elapsed_ms.rem_euclid(duration) / duration) as f32
    }

    /// Eased progress within the current cycle
    pub fn progress_at(&self, elapsed_ms: f64) -> f32 {
        self.easing.apply(self.phase_at(elapsed_ms))
    }
}
