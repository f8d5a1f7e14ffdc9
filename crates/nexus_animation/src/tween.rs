//! Interruptible property tweens
//!
//! A [`Tween`] interpolates a [`MotionProperties`] set from a start to an end
//! over a [`TransitionSpec`]. Calling [`Tween::retarget`] while it runs
//! restarts it from the values it is currently showing, so reversing a
//! half-finished transition never jumps.

use crate::easing::Easing;
use crate::properties::MotionProperties;
use serde::{Deserialize, Serialize};

/// Timing of a single transition
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionSpec {
    pub duration_ms: u32,
    pub delay_ms: u32,
    pub easing: Easing,
}

impl TransitionSpec {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Delay plus duration
    pub fn total_ms(&self) -> u32 {
        self.delay_ms.saturating_add(self.duration_ms)
    }
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self {
            duration_ms: 300,
            delay_ms: 0,
            easing: Easing::EaseOut,
        }
    }
}

/// Where a tween is in its lifetime
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenState {
    /// Waiting out its delay
    Delayed,
    Running,
    Finished,
}

/// A from → to transition of a property set
#[derive(Clone, Debug)]
pub struct Tween {
    from: MotionProperties,
    to: MotionProperties,
    spec: TransitionSpec,
    elapsed_ms: f32,
}

impl Tween {
    pub fn new(from: MotionProperties, to: MotionProperties, spec: TransitionSpec) -> Self {
        Self {
            from,
            to,
            spec,
            elapsed_ms: 0.0,
        }
    }

    /// A tween that is already finished and rests at `at`
    pub fn resting(at: MotionProperties) -> Self {
        Self {
            from: at,
            to: at,
            spec: TransitionSpec::new(0),
            elapsed_ms: 0.0,
        }
    }

    /// Advance by `dt_ms` milliseconds
    pub fn tick(&mut self, dt_ms: f32) {
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }
        let total = self.spec.total_ms() as f32;
        self.elapsed_ms = (self.elapsed_ms + dt_ms).min(total);
    }

    pub fn state(&self) -> TweenState {
        let delay = self.spec.delay_ms as f32;
        if self.elapsed_ms >= self.spec.total_ms() as f32 {
            TweenState::Finished
        } else if self.elapsed_ms < delay {
            TweenState::Delayed
        } else {
            TweenState::Running
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state() == TweenState::Finished
    }

    /// Linear progress of the active part (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        let active = self.elapsed_ms - self.spec.delay_ms as f32;
        if active < 0.0 {
            return 0.0;
        }
        if self.spec.duration_ms == 0 {
            return 1.0;
        }
        (active / self.spec.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// The values to render right now
    pub fn current(&self) -> MotionProperties {
        let eased = self.spec.easing.apply(self.progress());
        self.from.lerp(&self.to, eased)
    }

    pub fn target(&self) -> &MotionProperties {
        &self.to
    }

    pub fn spec(&self) -> &TransitionSpec {
        &self.spec
    }

    /// Cancel the running transition and head for `to` from the live values
    pub fn retarget(&mut self, to: MotionProperties, spec: TransitionSpec) {
        self.from = self.current();
        self.to = to;
        self.spec = spec;
        self.elapsed_ms = 0.0;
    }

    /// Jump to the end state
    pub fn finish(&mut self) {
        self.elapsed_ms = self.spec.total_ms() as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fade(spec: TransitionSpec) -> Tween {
        Tween::new(
            MotionProperties::opacity(0.0),
            MotionProperties::opacity(1.0),
            spec,
        )
    }

    #[test]
    fn test_delay_then_run_then_finish() {
        let mut tween = fade(TransitionSpec::new(100).with_delay(50).with_easing(Easing::Linear));
        assert_eq!(tween.state(), TweenState::Delayed);
        assert_eq!(tween.current().opacity, Some(0.0));

        tween.tick(100.0);
        assert_eq!(tween.state(), TweenState::Running);
        assert!((tween.current().opacity.unwrap() - 0.5).abs() < 1e-5);

        tween.tick(1000.0);
        assert!(tween.is_finished());
        assert_eq!(tween.current().opacity, Some(1.0));
    }

    #[test]
    fn test_retarget_starts_from_live_value() {
        let mut tween = fade(TransitionSpec::new(100).with_easing(Easing::Linear));
        tween.tick(40.0);

        tween.retarget(
            MotionProperties::opacity(0.0),
            TransitionSpec::new(100).with_easing(Easing::Linear),
        );

        // No jump at the moment of reversal
        assert!((tween.current().opacity.unwrap() - 0.4).abs() < 1e-5);
        tween.tick(50.0);
        assert!((tween.current().opacity.unwrap() - 0.2).abs() < 1e-5);
        tween.tick(50.0);
        assert_eq!(tween.current().opacity, Some(0.0));
    }

    #[test]
    fn test_zero_duration_completes_after_delay() {
        let mut tween = fade(TransitionSpec::new(0).with_delay(30));
        assert_eq!(tween.current().opacity, Some(0.0));
        tween.tick(30.0);
        assert!(tween.is_finished());
        assert_eq!(tween.current().opacity, Some(1.0));
    }

    #[test]
    fn test_resting_is_finished() {
        let tween = Tween::resting(MotionProperties::scale(2.0));
        assert!(tween.is_finished());
        assert_eq!(tween.current().scale, Some(2.0));
    }

    #[test]
    fn test_ignores_bad_dt() {
        let mut tween = fade(TransitionSpec::new(100));
        tween.tick(f32::NAN);
        tween.tick(-5.0);
        assert_eq!(tween.progress(), 0.0);
    }

    #[test]
    fn test_spec_deserializes_with_defaults() {
        let spec: TransitionSpec = toml::from_str("duration_ms = 600\ndelay_ms = 200").unwrap();
        assert_eq!(spec.duration_ms, 600);
        assert_eq!(spec.delay_ms, 200);
        assert_eq!(spec.easing, Easing::EaseOut);
    }
}
