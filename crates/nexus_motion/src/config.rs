//! Motion configuration (motion.toml)
//!
//! Every tunable of the motion layer, grouped by component. All sections and
//! fields are optional; a missing or empty file yields the stock page timing.

use crate::scroll::{default_layers, ParallaxLayer, ScrollTransformPipeline};
use nexus_animation::{Easing, SpringConfig, StaggerConfig, StaggerOrder, TransitionSpec};
use nexus_core::{MotionError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level motion configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    #[serde(default)]
    pub frame: FrameConfig,
    #[serde(default)]
    pub cursor: CursorConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
    #[serde(default)]
    pub loops: LoopConfig,
    #[serde(default)]
    pub intro: IntroConfig,
}

impl MotionConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: MotionConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Reject values the frame loop cannot work with
    pub fn validate(&self) -> Result<()> {
        positive("frame.max_dt_ms", self.frame.max_dt_ms)?;

        spring("cursor.follow", &self.cursor.follow)?;
        spring("cursor.morph", &self.cursor.morph)?;
        positive("cursor.size_px", self.cursor.size_px)?;

        ScrollTransformPipeline::new(self.scroll.layers.clone()).validate()?;

        finite("reveal.card_margin_px", self.reveal.card_margin_px)?;
        if !(0.0..=1.0).contains(&self.reveal.amount) {
            return Err(MotionError::invalid(
                "reveal.amount",
                format!("{} is outside 0..=1", self.reveal.amount),
            ));
        }

        duration("overlay.wipe", &self.overlay.wipe)?;
        duration("overlay.item_enter", &self.overlay.item_enter)?;
        duration("overlay.item_exit", &self.overlay.item_exit)?;
        increasing_stagger("overlay.enter_stagger", &self.overlay.enter_stagger)?;

        for (field, value) in [
            ("loops.marquee_ms", self.loops.marquee_ms),
            ("loops.scroll_hint_ms", self.loops.scroll_hint_ms),
            ("loops.badge_spin_ms", self.loops.badge_spin_ms),
            ("loops.pulse_ms", self.loops.pulse_ms),
        ] {
            if value == 0 {
                return Err(MotionError::invalid(field, "loop duration must be positive"));
            }
        }
        if self.loops.marquee_copies == 0 {
            return Err(MotionError::invalid(
                "loops.marquee_copies",
                "at least one copy is required",
            ));
        }

        spring("intro.badge_spring", &self.intro.badge_spring)?;
        positive("intro.line_height_px", self.intro.line_height_px)?;
        Ok(())
    }
}

fn finite(field: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MotionError::invalid(field, format!("{value} is not finite")))
    }
}

fn positive(field: &str, value: f32) -> Result<()> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(MotionError::invalid(field, format!("{value} must be positive")))
    }
}

fn spring(field: &str, config: &SpringConfig) -> Result<()> {
    if config.is_valid() {
        Ok(())
    } else {
        Err(MotionError::invalid(
            field,
            "stiffness, damping and mass must be finite and positive",
        ))
    }
}

/// Entrance delays must grow with the item index
fn increasing_stagger(field: &str, stagger: &StaggerConfig) -> Result<()> {
    if stagger.order != StaggerOrder::Forward {
        return Err(MotionError::invalid(
            field,
            format!("order must be forward, got {:?}", stagger.order),
        ));
    }
    if stagger.interval_ms == 0 {
        return Err(MotionError::invalid(field, "interval_ms must be positive"));
    }
    Ok(())
}

fn duration(field: &str, spec: &TransitionSpec) -> Result<()> {
    if spec.duration_ms == 0 {
        return Err(MotionError::invalid(field, "duration must be positive"));
    }
    if let Easing::CubicBezier(x1, y1, x2, y2) = spec.easing {
        if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
            return Err(MotionError::invalid(field, "bezier control points must be finite"));
        }
    }
    Ok(())
}

/// Frame loop settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameConfig {
    /// Cap on one frame's delta; longer gaps (a backgrounded tab) are clamped
    #[serde(default = "default_max_dt_ms")]
    pub max_dt_ms: f32,
}

fn default_max_dt_ms() -> f32 {
    nexus_animation::clock::DEFAULT_MAX_DT_MS
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_dt_ms: default_max_dt_ms(),
        }
    }
}

/// Custom cursor settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CursorConfig {
    /// Spring that trails the pointer
    #[serde(default = "default_cursor_spring")]
    pub follow: SpringConfig,
    /// Spring that morphs the cursor between variants
    #[serde(default = "default_cursor_spring")]
    pub morph: SpringConfig,
    /// Edge of the default cursor box
    #[serde(default = "default_cursor_size")]
    pub size_px: f32,
}

fn default_cursor_spring() -> SpringConfig {
    SpringConfig::cursor()
}

fn default_cursor_size() -> f32 {
    32.0
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            follow: default_cursor_spring(),
            morph: default_cursor_spring(),
            size_px: default_cursor_size(),
        }
    }
}

/// Parallax layers driven by scroll
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    #[serde(default = "default_layers")]
    pub layers: Vec<ParallaxLayer>,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            layers: default_layers(),
        }
    }
}

/// Viewport reveal settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Viewport margin for project cards; negative shrinks the viewport
    #[serde(default = "default_card_margin")]
    pub card_margin_px: f32,
    /// Visible fraction needed to count as in view (0 = any pixel)
    #[serde(default)]
    pub amount: f32,
    #[serde(default = "default_card_stagger")]
    pub card_stagger_ms: u32,
    #[serde(default = "default_skill_stagger")]
    pub skill_stagger_ms: u32,
    /// Width the skill bar fills to
    #[serde(default = "default_skill_level")]
    pub skill_level_pct: f32,
}

fn default_card_margin() -> f32 {
    -50.0
}

fn default_card_stagger() -> u32 {
    100
}

fn default_skill_stagger() -> u32 {
    200
}

fn default_skill_level() -> f32 {
    85.0
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            card_margin_px: default_card_margin(),
            amount: 0.0,
            card_stagger_ms: default_card_stagger(),
            skill_stagger_ms: default_skill_stagger(),
            skill_level_pct: default_skill_level(),
        }
    }
}

/// Full-screen menu overlay timing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Circular wipe of the container
    #[serde(default = "default_wipe")]
    pub wipe: TransitionSpec,
    #[serde(default = "default_item_enter")]
    pub item_enter: TransitionSpec,
    /// Entrance delays: `base + index * interval`
    #[serde(default = "default_enter_stagger")]
    pub enter_stagger: StaggerConfig,
    #[serde(default = "default_item_exit")]
    pub item_exit: TransitionSpec,
    /// Exit delays; uniform by default so every entry leaves together
    #[serde(default = "default_exit_stagger")]
    pub exit_stagger: StaggerConfig,
    #[serde(default = "default_status_delay")]
    pub status_delay_ms: u32,
}

fn default_wipe() -> TransitionSpec {
    TransitionSpec::new(800).with_easing(Easing::EXPO_IN_OUT)
}

fn default_item_enter() -> TransitionSpec {
    TransitionSpec::new(600).with_easing(Easing::EaseOut)
}

fn default_enter_stagger() -> StaggerConfig {
    StaggerConfig::new(200, 100)
}

fn default_item_exit() -> TransitionSpec {
    TransitionSpec::new(600).with_easing(Easing::EaseOut)
}

fn default_exit_stagger() -> StaggerConfig {
    StaggerConfig::uniform(0)
}

fn default_status_delay() -> u32 {
    800
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            wipe: default_wipe(),
            item_enter: default_item_enter(),
            enter_stagger: default_enter_stagger(),
            item_exit: default_item_exit(),
            exit_stagger: default_exit_stagger(),
            status_delay_ms: default_status_delay(),
        }
    }
}

/// Ambient loop periods
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoopConfig {
    #[serde(default = "default_marquee_ms")]
    pub marquee_ms: u32,
    /// How many times the phrase list is repeated in the band
    #[serde(default = "default_marquee_copies")]
    pub marquee_copies: usize,
    #[serde(default = "default_scroll_hint_ms")]
    pub scroll_hint_ms: u32,
    #[serde(default = "default_badge_spin_ms")]
    pub badge_spin_ms: u32,
    #[serde(default = "default_pulse_ms")]
    pub pulse_ms: u32,
}

fn default_marquee_ms() -> u32 {
    10_000
}

fn default_marquee_copies() -> usize {
    4
}

fn default_scroll_hint_ms() -> u32 {
    2_000
}

fn default_badge_spin_ms() -> u32 {
    8_000
}

fn default_pulse_ms() -> u32 {
    2_000
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            marquee_ms: default_marquee_ms(),
            marquee_copies: default_marquee_copies(),
            scroll_hint_ms: default_scroll_hint_ms(),
            badge_spin_ms: default_badge_spin_ms(),
            pulse_ms: default_pulse_ms(),
        }
    }
}

/// Entrance sequence played once at mount
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntroConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Height of one hero title row; lines rise by this much
    #[serde(default = "default_line_height")]
    pub line_height_px: f32,
    /// Title line delays: `base + index * interval`
    #[serde(default = "default_line_stagger")]
    pub line_stagger: StaggerConfig,
    #[serde(default = "default_badge_delay")]
    pub badge_delay_ms: u32,
    #[serde(default)]
    pub badge_spring: SpringConfig,
}

fn default_true() -> bool {
    true
}

fn default_line_height() -> f32 {
    144.0
}

fn default_line_stagger() -> StaggerConfig {
    StaggerConfig::new(200, 200)
}

fn default_badge_delay() -> u32 {
    1_000
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            line_height_px: default_line_height(),
            line_stagger: default_line_stagger(),
            badge_delay_ms: default_badge_delay(),
            badge_spring: SpringConfig::default(),
        }
    }
}
