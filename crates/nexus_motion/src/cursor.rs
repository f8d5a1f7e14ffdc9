//! Cursor State Machine
//!
//! The custom cursor is in exactly one variant at a time. Entering a tagged
//! region switches variant; the most recently entered region wins, and leaving
//! it reverts to `Default`. Regions are not stacked, so leaving a region that
//! was already superseded by another one changes nothing.
//!
//! Each variant has a visual preset. A variant change retargets a set of
//! springs (scale, box size, corner radius, fill) so the cursor morphs between
//! presets, and a change halfway through a morph continues from the live
//! values.

use crate::color::Rgba;
use nexus_animation::{Spring, SpringConfig};
use nexus_core::{StateMachine, TargetId};
use serde::{Deserialize, Serialize};

/// Visual variant of the cursor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorVariant {
    #[default]
    Default,
    /// Over something clickable
    Hover,
    /// Over large menu text: a tall caret
    Text,
}

/// Tag a host element carries to drive the cursor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionTag {
    Hover,
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorEvent {
    EnterHover,
    EnterText,
    Leave,
}

/// Target look of one variant
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CursorPreset {
    pub scale: f32,
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
    pub color: Rgba,
    /// Small inner dot drawn while hovering
    pub show_dot: bool,
}

impl CursorPreset {
    /// Preset for `variant` with a `size` px base box
    pub fn for_variant(variant: CursorVariant, size: f32) -> Self {
        let base = Self {
            scale: 1.0,
            width: size,
            height: size,
            corner_radius: size / 2.0,
            color: Rgba::BLACK,
            show_dot: false,
        };
        match variant {
            CursorVariant::Default => base,
            CursorVariant::Hover => Self {
                scale: 2.5,
                color: Rgba::WHITE,
                show_dot: true,
                ..base
            },
            // Always the base fill, also when entered from Hover: each
            // variant has one fixed look regardless of the previous one
            CursorVariant::Text => Self {
                scale: 4.0,
                width: 4.0,
                height: size,
                corner_radius: 0.0,
                ..base
            },
        }
    }
}

/// What the renderer draws for the cursor this frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CursorFrame {
    pub variant: CursorVariant,
    /// Top-left of the box; the box is centred on the smoothed pointer
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
    pub color: Rgba,
    pub show_dot: bool,
}

#[derive(Clone, Debug)]
struct PresetSprings {
    scale: Spring,
    width: Spring,
    height: Spring,
    corner_radius: Spring,
    color: [Spring; 4],
}

impl PresetSprings {
    fn at(preset: &CursorPreset, config: SpringConfig) -> Self {
        let c = preset.color.to_array();
        Self {
            scale: Spring::new(config, preset.scale),
            width: Spring::new(config, preset.width),
            height: Spring::new(config, preset.height),
            corner_radius: Spring::new(config, preset.corner_radius),
            color: c.map(|channel| Spring::new(config, channel)),
        }
    }

    fn retarget(&mut self, preset: &CursorPreset) {
        self.scale.set_target(preset.scale);
        self.width.set_target(preset.width);
        self.height.set_target(preset.height);
        self.corner_radius.set_target(preset.corner_radius);
        for (spring, channel) in self.color.iter_mut().zip(preset.color.to_array()) {
            spring.set_target(channel);
        }
    }

    fn step(&mut self, dt: f32) {
        self.scale.step(dt);
        self.width.step(dt);
        self.height.step(dt);
        self.corner_radius.step(dt);
        for spring in &mut self.color {
            spring.step(dt);
        }
    }

    fn is_settled(&self) -> bool {
        self.scale.is_settled()
            && self.width.is_settled()
            && self.height.is_settled()
            && self.corner_radius.is_settled()
            && self.color.iter().all(Spring::is_settled)
    }

    fn color(&self) -> Rgba {
        Rgba::from_array([0, 1, 2, 3].map(|i| self.color[i].value().clamp(0.0, 1.0)))
    }
}

/// Cursor variant state plus the springs morphing its look
pub struct CursorStateMachine {
    fsm: StateMachine<CursorVariant, CursorEvent>,
    active_region: Option<TargetId>,
    springs: PresetSprings,
    size: f32,
    changes: u32,
}

impl CursorStateMachine {
    pub fn new(size: f32, config: SpringConfig) -> Self {
        use CursorEvent::*;
        use CursorVariant::*;

        let fsm = StateMachine::builder(Default)
            .on(Default, EnterHover, Hover)
            .on(Default, EnterText, Text)
            .on(Hover, Leave, Default)
            .on(Text, Leave, Default)
            .on(Hover, EnterText, Text)
            .on(Text, EnterHover, Hover)
            .build();

        Self {
            fsm,
            active_region: None,
            springs: PresetSprings::at(&CursorPreset::for_variant(Default, size), config),
            size,
            changes: 0,
        }
    }

    pub fn variant(&self) -> CursorVariant {
        self.fsm.current_state()
    }

    /// Region whose leave event will revert the cursor
    pub fn active_region(&self) -> Option<TargetId> {
        self.active_region
    }

    /// The preset the springs are heading for
    pub fn preset(&self) -> CursorPreset {
        CursorPreset::for_variant(self.variant(), self.size)
    }

    /// Number of variant changes since mount
    pub fn changes(&self) -> u32 {
        self.changes
    }

    pub fn state_machine(&self) -> &StateMachine<CursorVariant, CursorEvent> {
        &self.fsm
    }

    pub fn pointer_enter(&mut self, region: TargetId, tag: RegionTag) -> CursorVariant {
        let event = match tag {
            RegionTag::Hover => CursorEvent::EnterHover,
            RegionTag::Text => CursorEvent::EnterText,
        };
        self.active_region = Some(region);
        self.send(event)
    }

    pub fn pointer_leave(&mut self, region: TargetId) -> CursorVariant {
        if self.active_region != Some(region) {
            tracing::trace!(region, "leave of superseded region ignored");
            return self.variant();
        }
        self.active_region = None;
        self.send(CursorEvent::Leave)
    }

    fn send(&mut self, event: CursorEvent) -> CursorVariant {
        let from = self.variant();
        let to = self.fsm.send(event);
        if to != from {
            self.changes += 1;
            tracing::debug!(?from, ?to, "cursor variant changed");
            self.springs.retarget(&self.preset());
        }
        to
    }

    /// Advance the morph springs by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.springs.step(dt);
    }

    pub fn is_settled(&self) -> bool {
        self.springs.is_settled()
    }

    /// Frame for the renderer, centred on the smoothed pointer
    pub fn render(&self, smoothed: (f32, f32)) -> CursorFrame {
        let width = self.springs.width.value().max(0.0);
        let height = self.springs.height.value().max(0.0);
        CursorFrame {
            variant: self.variant(),
            x: smoothed.0 - width / 2.0,
            y: smoothed.1 - height / 2.0,
            scale: self.springs.scale.value(),
            width,
            height,
            corner_radius: self.springs.corner_radius.value().max(0.0),
            color: self.springs.color(),
            show_dot: self.preset().show_dot,
        }
    }
}

impl Default for CursorStateMachine {
    fn default() -> Self {
        Self::new(32.0, SpringConfig::cursor())
    }
}
