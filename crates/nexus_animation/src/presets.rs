//! Transition presets used across the page
//!
//! Each preset pairs a hidden `initial` state with a visible `target` state
//! and default timing. Reveals, the overlay menu and the intro sequence build
//! their tweens from these.

use crate::easing::Easing;
use crate::properties::MotionProperties;
use crate::tween::{TransitionSpec, Tween};
use serde::{Deserialize, Serialize};

/// An entrance transition: where an element starts and where it lands
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionPreset {
    pub initial: MotionProperties,
    pub target: MotionProperties,
    pub spec: TransitionSpec,
}

impl MotionPreset {
    pub fn new(initial: MotionProperties, target: MotionProperties, spec: TransitionSpec) -> Self {
        Self {
            initial,
            target,
            spec,
        }
    }

    pub fn with_delay(mut self, delay_ms: u32) -> Self {
        self.spec.delay_ms = delay_ms;
        self
    }

    pub fn with_spec(mut self, spec: TransitionSpec) -> Self {
        self.spec = spec;
        self
    }

    /// A tween that plays this preset from its initial state
    pub fn enter(&self) -> Tween {
        Tween::new(self.initial, self.target, self.spec)
    }

    /// A tween resting at the hidden initial state
    pub fn hidden(&self) -> Tween {
        Tween::resting(self.initial)
    }
}

/// Pre-built presets for the page's elements
pub struct MotionPresets;

impl MotionPresets {
    // ========================================================================
    // Viewport reveals
    // ========================================================================

    /// Fade in while rising by `distance` px
    pub fn fade_up(distance: f32, duration_ms: u32) -> MotionPreset {
        MotionPreset::new(
            MotionProperties::translate(0.0, distance).with_opacity(0.0),
            MotionProperties::translate(0.0, 0.0).with_opacity(1.0),
            TransitionSpec::new(duration_ms).with_easing(Easing::EaseOut),
        )
    }

    /// Fade in while sliding right from `-distance` px
    pub fn slide_in_left(distance: f32, duration_ms: u32) -> MotionPreset {
        MotionPreset::new(
            MotionProperties::translate(-distance, 0.0).with_opacity(0.0),
            MotionProperties::translate(0.0, 0.0).with_opacity(1.0),
            TransitionSpec::new(duration_ms).with_easing(Easing::EaseOut),
        )
    }

    /// Card flipping up from lying flat
    pub fn flip_in_x(duration_ms: u32) -> MotionPreset {
        MotionPreset::new(
            MotionProperties::opacity(0.0).with_rotate_x(90.0),
            MotionProperties::opacity(1.0).with_rotate_x(0.0),
            TransitionSpec::new(duration_ms).with_easing(Easing::EaseOut),
        )
    }

    /// Progress bar filling to `percent`
    pub fn grow_width(percent: f32, duration_ms: u32) -> MotionPreset {
        MotionPreset::new(
            MotionProperties::default().with_width_pct(0.0),
            MotionProperties::default().with_width_pct(percent),
            TransitionSpec::new(duration_ms).with_easing(Easing::CircOut),
        )
    }

    // ========================================================================
    // Intro sequence
    // ========================================================================

    /// Navigation bar dropping in from above the viewport
    pub fn nav_drop_in() -> MotionPreset {
        MotionPreset::new(
            MotionProperties::default().with_translate_y(-100.0),
            MotionProperties::default().with_translate_y(0.0),
            TransitionSpec::new(800).with_easing(Easing::NAV_DROP),
        )
    }

    /// Hero label: fade, rise and unskew
    pub fn label_rise() -> MotionPreset {
        MotionPreset::new(
            MotionProperties::translate(0.0, 100.0)
                .with_opacity(0.0)
                .with_skew_y(10.0),
            MotionProperties::translate(0.0, 0.0)
                .with_opacity(1.0)
                .with_skew_y(0.0),
            TransitionSpec::new(1000).with_easing(Easing::EaseOut),
        )
    }

    /// Title line sliding up out of its clipped row (`line_height` px tall)
    pub fn line_rise(line_height: f32) -> MotionPreset {
        MotionPreset::new(
            MotionProperties::default().with_translate_y(line_height),
            MotionProperties::default().with_translate_y(0.0),
            TransitionSpec::new(1000).with_easing(Easing::EXPO_IN_OUT),
        )
    }

    // ========================================================================
    // Overlay menu
    // ========================================================================

    /// Circular wipe anchored at the top-right corner
    pub fn overlay_wipe() -> MotionPreset {
        MotionPreset::new(
            MotionProperties::clip_radius(0.0),
            MotionProperties::clip_radius(150.0),
            TransitionSpec::new(800).with_easing(Easing::EXPO_IN_OUT),
        )
    }

    /// Menu entry sliding in from the left and unskewing
    pub fn menu_item_enter() -> MotionPreset {
        MotionPreset::new(
            MotionProperties::default()
                .with_translate_x(-100.0)
                .with_opacity(0.0)
                .with_skew_x(20.0),
            MotionProperties::default()
                .with_translate_x(0.0)
                .with_opacity(1.0)
                .with_skew_x(0.0),
            TransitionSpec::new(600).with_easing(Easing::EaseOut),
        )
    }

    /// Where a menu entry goes when the overlay closes
    pub fn menu_item_exit() -> MotionProperties {
        MotionProperties::default()
            .with_translate_x(100.0)
            .with_opacity(0.0)
    }

    /// Status line under the menu
    pub fn status_fade(delay_ms: u32) -> MotionPreset {
        MotionPreset::new(
            MotionProperties::opacity(0.0),
            MotionProperties::opacity(1.0),
            TransitionSpec::new(300)
                .with_easing(Easing::EaseOut)
                .with_delay(delay_ms),
        )
    }
}
