//! Easing functions for animations
//!
//! Named curves use the same cubic-bezier control points as CSS, so a
//! transition configured as `ease_out` matches what the page would get from a
//! stylesheet.

use serde::{Deserialize, Serialize};

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    /// cubic-bezier(0.42, 0, 1, 1)
    EaseIn,
    /// cubic-bezier(0, 0, 0.58, 1)
    EaseOut,
    /// cubic-bezier(0.42, 0, 0.58, 1)
    EaseInOut,
    /// Circular ease-out, `sqrt(1 - (t - 1)^2)`
    CircOut,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// The overlay wipe and hero title curve
    pub const EXPO_IN_OUT: Easing = Easing::CubicBezier(0.76, 0.0, 0.24, 1.0);

    /// The navigation drop-in curve (slight anticipation)
    pub const NAV_DROP: Easing = Easing::CubicBezier(0.6, 0.05, -0.01, 0.9);

    /// Tailwind's pulse curve
    pub const PULSE: Easing = Easing::CubicBezier(0.4, 0.0, 0.6, 1.0);

    /// Apply the easing function to a progress value (0.0 to 1.0)
    ///
    /// Input is clamped, so callers may pass raw ratios.
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => cubic_bezier(t, 0.42, 0.0, 1.0, 1.0),
            Easing::EaseOut => cubic_bezier(t, 0.0, 0.0, 0.58, 1.0),
            Easing::EaseInOut => cubic_bezier(t, 0.42, 0.0, 0.58, 1.0),
            Easing::CircOut => (1.0 - (t - 1.0) * (t - 1.0)).max(0.0).sqrt(),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, x1, y1, x2, y2),
        }
    }
}

/// Solve a CSS-style cubic bezier for `x == t` and return its `y`.
///
/// Newton-Raphson first, bisection when the slope goes flat. The x control
/// points are clamped to `[0, 1]` as CSS requires, which keeps the curve
/// monotonic in x.
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let cx = Cubic::new(x1.clamp(0.0, 1.0) as f64, x2.clamp(0.0, 1.0) as f64);
    let cy = Cubic::new(y1 as f64, y2 as f64);
    let x = t as f64;

    let mut p = x;
    for _ in 0..8 {
        let err = cx.sample(p) - x;
        if err.abs() < 1e-7 {
            return cy.sample(p) as f32;
        }
        let slope = cx.slope(p);
        if slope.abs() < 1e-7 {
            break;
        }
        p = (p - err / slope).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    p = x;
    for _ in 0..32 {
        let val = cx.sample(p);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    cy.sample(p) as f32
}

/// One axis of a bezier with fixed endpoints 0 and 1, in polynomial form
struct Cubic {
    a: f64,
    b: f64,
    c: f64,
}

impl Cubic {
    fn new(p1: f64, p2: f64) -> Self {
        Self {
            a: 1.0 - 3.0 * p2 + 3.0 * p1,
            b: 3.0 * p2 - 6.0 * p1,
            c: 3.0 * p1,
        }
    }

    #[inline]
    fn sample(&self, t: f64) -> f64 {
        ((self.a * t + self.b) * t + self.c) * t
    }

    #[inline]
    fn slope(&self, t: f64) -> f64 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }
}
