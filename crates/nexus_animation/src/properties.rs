//! Animatable visual properties
//!
//! A sparse set of transform/appearance values handed to the rendering layer.
//! Unset properties mean "leave at the element's base style".

use serde::{Deserialize, Serialize};

/// Properties that can be animated by tweens, reveals and scroll mappings
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionProperties {
    /// Opacity (0.0 to 1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    /// Translation X in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_x: Option<f32>,
    /// Translation Y in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_y: Option<f32>,
    /// Uniform scale factor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    /// Rotation in degrees (Z-axis)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f32>,
    /// Rotation X in degrees (3D tilt)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate_x: Option<f32>,
    /// Horizontal skew in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skew_x: Option<f32>,
    /// Vertical skew in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skew_y: Option<f32>,
    /// Clip circle radius in percent of the element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip_radius: Option<f32>,
    /// Width in percent of the parent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_pct: Option<f32>,
}

impl MotionProperties {
    pub fn opacity(value: f32) -> Self {
        Self {
            opacity: Some(value),
            ..Default::default()
        }
    }

    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            translate_x: Some(x),
            translate_y: Some(y),
            ..Default::default()
        }
    }

    pub fn scale(value: f32) -> Self {
        Self {
            scale: Some(value),
            ..Default::default()
        }
    }

    pub fn clip_radius(percent: f32) -> Self {
        Self {
            clip_radius: Some(percent),
            ..Default::default()
        }
    }

    pub fn with_opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn with_translate_x(mut self, px: f32) -> Self {
        self.translate_x = Some(px);
        self
    }

    pub fn with_translate_y(mut self, px: f32) -> Self {
        self.translate_y = Some(px);
        self
    }

    pub fn with_scale(mut self, value: f32) -> Self {
        self.scale = Some(value);
        self
    }

    pub fn with_rotate(mut self, degrees: f32) -> Self {
        self.rotate = Some(degrees);
        self
    }

    pub fn with_rotate_x(mut self, degrees: f32) -> Self {
        self.rotate_x = Some(degrees);
        self
    }

    pub fn with_skew_x(mut self, degrees: f32) -> Self {
        self.skew_x = Some(degrees);
        self
    }

    pub fn with_skew_y(mut self, degrees: f32) -> Self {
        self.skew_y = Some(degrees);
        self
    }

    pub fn with_width_pct(mut self, percent: f32) -> Self {
        self.width_pct = Some(percent);
        self
    }

    /// Interpolate between two property sets
    ///
    /// A property set on only one side is held at that value.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            opacity: lerp_opt(self.opacity, other.opacity, t),
            translate_x: lerp_opt(self.translate_x, other.translate_x, t),
            translate_y: lerp_opt(self.translate_y, other.translate_y, t),
            scale: lerp_opt(self.scale, other.scale, t),
            rotate: lerp_opt(self.rotate, other.rotate, t),
            rotate_x: lerp_opt(self.rotate_x, other.rotate_x, t),
            skew_x: lerp_opt(self.skew_x, other.skew_x, t),
            skew_y: lerp_opt(self.skew_y, other.skew_y, t),
            clip_radius: lerp_opt(self.clip_radius, other.clip_radius, t),
            width_pct: lerp_opt(self.width_pct, other.width_pct, t),
        }
    }

    /// Overlay `other` on top of `self`; set fields in `other` win
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            opacity: other.opacity.or(self.opacity),
            translate_x: other.translate_x.or(self.translate_x),
            translate_y: other.translate_y.or(self.translate_y),
            scale: other.scale.or(self.scale),
            rotate: other.rotate.or(self.rotate),
            rotate_x: other.rotate_x.or(self.rotate_x),
            skew_x: other.skew_x.or(self.skew_x),
            skew_y: other.skew_y.or(self.skew_y),
            clip_radius: other.clip_radius.or(self.clip_radius),
            width_pct: other.width_pct.or(self.width_pct),
        }
    }

    /// Get the resolved opacity (defaults to 1.0 if not set)
    pub fn resolved_opacity(&self) -> f32 {
        self.opacity.unwrap_or(1.0)
    }

    /// Get the resolved scale (defaults to 1.0 if not set)
    pub fn resolved_scale(&self) -> f32 {
        self.scale.unwrap_or(1.0)
    }

    /// Get the resolved translation (defaults to 0.0 if not set)
    pub fn resolved_translate(&self) -> (f32, f32) {
        (
            self.translate_x.unwrap_or(0.0),
            self.translate_y.unwrap_or(0.0),
        )
    }

    /// Get the resolved rotation (defaults to 0.0 if not set)
    pub fn resolved_rotate(&self) -> f32 {
        self.rotate.unwrap_or(0.0)
    }
}

fn lerp_opt(a: Option<f32>, b: Option<f32>, t: f32) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + (b - a) * t),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_both_sides() {
        let a = MotionProperties::translate(-100.0, 0.0).with_opacity(0.0);
        let b = MotionProperties::translate(0.0, 0.0).with_opacity(1.0);
        let mid = a.lerp(&b, 0.5);

        assert_eq!(mid.translate_x, Some(-50.0));
        assert_eq!(mid.opacity, Some(0.5));
    }

    #[test]
    fn test_lerp_one_sided_holds_value() {
        let a = MotionProperties::opacity(0.0).with_skew_x(20.0);
        let b = MotionProperties::opacity(1.0);
        let mid = a.lerp(&b, 0.25);

        assert_eq!(mid.skew_x, Some(20.0));
        assert_eq!(mid.scale, None);
    }

    #[test]
    fn test_merge_prefers_other() {
        let base = MotionProperties::opacity(0.3).with_rotate(10.0);
        let top = MotionProperties::opacity(0.9);
        let merged = base.merge(&top);

        assert_eq!(merged.opacity, Some(0.9));
        assert_eq!(merged.rotate, Some(10.0));
    }

    #[test]
    fn test_resolved_defaults() {
        let empty = MotionProperties::default();
        assert_eq!(empty.resolved_opacity(), 1.0);
        assert_eq!(empty.resolved_scale(), 1.0);
        assert_eq!(empty.resolved_translate(), (0.0, 0.0));
        assert_eq!(empty.resolved_rotate(), 0.0);
    }

    #[test]
    fn test_serialize_skips_unset() {
        let json = serde_json::to_string(&MotionProperties::opacity(1.0)).unwrap();
        assert_eq!(json, r#"{"opacity":1.0}"#);
    }
}
