//! Damped spring integration
//!
//! A spring pulls `value` toward `target` like a mass on a damped harmonic
//! oscillator. It is used for the smoothed cursor position and for the
//! cursor's size/scale presets.
//!
//! Integration is semi-implicit Euler:
//!
//! ```text
//! velocity += ((target - value) * stiffness - velocity * damping) / mass * dt
//! value    += velocity * dt
//! ```
//!
//! Frame deltas are clamped to [`MAX_FRAME_DT`] and split into sub-steps of at
//! most [`MAX_SUBSTEP_DT`], so a tab resuming after minutes in the background
//! advances by one short, stable step instead of blowing up.

use serde::{Deserialize, Serialize};

/// Largest frame delta (seconds) fed into a spring
pub const MAX_FRAME_DT: f32 = 0.064;

/// Largest single integration step (seconds)
pub const MAX_SUBSTEP_DT: f32 = 1.0 / 240.0;

/// Spring parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Distance to target under which the spring may settle
    pub rest_delta: f32,
    /// Speed under which the spring may settle
    pub rest_speed: f32,
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            stiffness,
            damping,
            ..Self::default()
        }
    }

    /// The cursor follow spring (stiffness 500, damping 28)
    pub fn cursor() -> Self {
        Self::new(500.0, 28.0)
    }

    /// Critically damped spring for the given stiffness (unit mass)
    pub fn critically_damped(stiffness: f32) -> Self {
        Self::new(stiffness, 2.0 * stiffness.max(0.0).sqrt())
    }

    /// `damping / (2 * sqrt(stiffness * mass))`; 1.0 is critical damping
    pub fn damping_ratio(&self) -> f32 {
        let denom = 2.0 * (self.stiffness * self.mass).sqrt();
        if denom > 0.0 {
            self.damping / denom
        } else {
            f32::INFINITY
        }
    }

    /// Peak overshoot (as a fraction of the step) of the continuous system
    /// released from rest; zero when critically or over-damped.
    pub fn overshoot_bound(&self) -> f32 {
        let zeta = self.damping_ratio();
        if zeta >= 1.0 {
            0.0
        } else {
            (-zeta * std::f32::consts::PI / (1.0 - zeta * zeta).sqrt()).exp()
        }
    }

    /// Whether every parameter is finite and positive
    pub fn is_valid(&self) -> bool {
        [self.stiffness, self.damping, self.mass]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
            && self.rest_delta.is_finite()
            && self.rest_speed.is_finite()
    }
}

impl Default for SpringConfig {
    /// The generic `type: spring` transition (stiffness 100, damping 10)
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
            rest_delta: 0.01,
            rest_speed: 0.01,
        }
    }
}

/// A single animated value driven by a spring
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Create a spring resting at `initial`
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SpringConfig) {
        self.config = config;
    }

    /// Move the target; velocity is kept so an interrupted motion bends
    /// toward the new target instead of restarting
    pub fn set_target(&mut self, target: f32) {
        if target.is_finite() {
            self.target = target;
        }
    }

    /// Snap to a value with no motion
    pub fn jump_to(&mut self, value: f32) {
        if value.is_finite() {
            self.value = value;
            self.target = value;
            self.velocity = 0.0;
        }
    }

    /// Advance by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 || self.is_settled() {
            return;
        }
        let dt = dt.min(MAX_FRAME_DT);
        let steps = (dt / MAX_SUBSTEP_DT).ceil().max(1.0) as u32;
        let h = dt / steps as f32;
        let SpringConfig {
            stiffness,
            damping,
            mass,
            ..
        } = self.config;
        let mass = if mass > 0.0 { mass } else { 1.0 };

        for _ in 0..steps {
            let force = (self.target - self.value) * stiffness - self.velocity * damping;
            self.velocity += force / mass * h;
            self.value += self.velocity * h;
        }

        if !self.value.is_finite() || !self.velocity.is_finite() {
            tracing::warn!(target = self.target, "spring diverged, snapping to target");
            self.jump_to(self.target);
            return;
        }

        if (self.target - self.value).abs() < self.config.rest_delta
            && self.velocity.abs() < self.config.rest_speed
        {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    /// At rest on its target
    pub fn is_settled(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }
}
