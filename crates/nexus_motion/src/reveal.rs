//! Viewport Reveal Trigger
//!
//! Elements register an entrance preset and are observed against the
//! viewport. Visibility comes either from element bounds plus viewport
//! geometry (the trigger applies the margin itself) or from a visible fraction
//! computed by the host.
//!
//! With [`RevealPolicy::Once`] the first crossing into view starts the
//! entrance transition, sets `has_fired` and stops observation; the entry is
//! inert from then on. With [`RevealPolicy::Toggle`] every crossing reverses
//! the transition from wherever it currently is.

use nexus_animation::{MotionPreset, MotionProperties, Tween};
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a registered reveal
    pub struct RevealId;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPolicy {
    /// Fire on first entry, then stop observing
    #[default]
    Once,
    /// Reverse on every entry and exit
    Toggle,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealOptions {
    /// Grows (positive) or shrinks (negative) the viewport on every side
    pub margin_px: f32,
    /// Fraction of the element that must be visible; 0 means any overlap
    pub amount: f32,
    pub policy: RevealPolicy,
}

impl RevealOptions {
    pub fn once() -> Self {
        Self::default()
    }

    pub fn with_margin(mut self, margin_px: f32) -> Self {
        self.margin_px = margin_px;
        self
    }

    pub fn with_amount(mut self, amount: f32) -> Self {
        self.amount = amount;
        self
    }

    pub fn toggle(mut self) -> Self {
        self.policy = RevealPolicy::Toggle;
        self
    }

    fn crosses(&self, fraction: f32) -> bool {
        if !fraction.is_finite() {
            return false;
        }
        if self.amount <= 0.0 {
            fraction > 0.0
        } else {
            fraction >= self.amount.min(1.0)
        }
    }
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            margin_px: 0.0,
            amount: 0.0,
            policy: RevealPolicy::Once,
        }
    }
}

/// Visible region of the page
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
}

/// Vertical extent of an element in page coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementBounds {
    pub top: f32,
    pub height: f32,
}

impl ElementBounds {
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    /// Fraction of this element inside `viewport` grown by `margin`
    pub fn visible_fraction(&self, viewport: &Viewport, margin: f32) -> f32 {
        let view_top = viewport.scroll_y - margin;
        let view_bottom = viewport.scroll_y + viewport.height + margin;
        if !(view_bottom > view_top) {
            return 0.0;
        }
        let bottom = self.top + self.height.max(0.0);
        if self.height <= 0.0 {
            return if self.top >= view_top && self.top <= view_bottom {
                1.0
            } else {
                0.0
            };
        }
        let overlap = bottom.min(view_bottom) - self.top.max(view_top);
        if overlap.is_finite() {
            (overlap / self.height).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// One observed element
#[derive(Clone, Debug)]
pub struct RevealEntry {
    element: String,
    preset: MotionPreset,
    options: RevealOptions,
    bounds: Option<ElementBounds>,
    tween: Tween,
    has_fired: bool,
    observing: bool,
    in_view: bool,
    transitions_started: u32,
}

impl RevealEntry {
    fn new(element: String, preset: MotionPreset, options: RevealOptions) -> Self {
        Self {
            element,
            tween: preset.hidden(),
            preset,
            options,
            bounds: None,
            has_fired: false,
            observing: true,
            in_view: false,
            transitions_started: 0,
        }
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn options(&self) -> &RevealOptions {
        &self.options
    }

    pub fn has_fired(&self) -> bool {
        self.has_fired
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    pub fn in_view(&self) -> bool {
        self.in_view
    }

    /// Transitions started since registration
    pub fn transitions_started(&self) -> u32 {
        self.transitions_started
    }

    pub fn properties(&self) -> MotionProperties {
        self.tween.current()
    }

    pub fn is_animating(&self) -> bool {
        !self.tween.is_finished()
    }

    /// Feed a visibility sample; returns true if a transition started
    fn observe(&mut self, fraction: f32) -> bool {
        if !self.observing {
            return false;
        }
        let visible = self.options.crosses(fraction);
        if visible == self.in_view {
            return false;
        }
        self.in_view = visible;

        match self.options.policy {
            RevealPolicy::Once => {
                if !visible {
                    return false;
                }
                self.has_fired = true;
                self.observing = false;
                self.tween.retarget(self.preset.target, self.preset.spec);
                tracing::debug!(element = %self.element, "reveal fired");
            }
            RevealPolicy::Toggle => {
                if visible {
                    self.has_fired = true;
                    self.tween.retarget(self.preset.target, self.preset.spec);
                } else {
                    let mut spec = self.preset.spec;
                    spec.delay_ms = 0;
                    self.tween.retarget(self.preset.initial, spec);
                }
                tracing::debug!(element = %self.element, visible, "reveal toggled");
            }
        }
        self.transitions_started += 1;
        true
    }
}

/// Owns every reveal registration of the page
#[derive(Default)]
pub struct ViewportRevealTrigger {
    entries: SlotMap<RevealId, RevealEntry>,
    viewport: Viewport,
}

impl ViewportRevealTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        element: impl Into<String>,
        preset: MotionPreset,
        options: RevealOptions,
    ) -> RevealId {
        let element = element.into();
        tracing::trace!(element = %element, "reveal registered");
        self.entries
            .insert(RevealEntry::new(element, preset, options))
    }

    pub fn unregister(&mut self, id: RevealId) -> bool {
        self.entries.remove(id).is_some()
    }

    /// Record where an element sits on the page and re-check it
    pub fn set_bounds(&mut self, id: RevealId, bounds: ElementBounds) -> bool {
        let viewport = self.viewport;
        let Some(entry) = self.entries.get_mut(id) else {
            return false;
        };
        entry.bounds = Some(bounds);
        if viewport.height > 0.0 {
            let fraction = bounds.visible_fraction(&viewport, entry.options.margin_px);
            entry.observe(fraction)
        } else {
            false
        }
    }

    /// Re-check every observed element with known bounds
    ///
    /// Returns the number of transitions started.
    pub fn update_viewport(&mut self, viewport: Viewport) -> usize {
        self.viewport = viewport;
        if viewport.height <= 0.0 {
            return 0;
        }
        self.entries
            .values_mut()
            .filter(|entry| entry.observing)
            .filter_map(|entry| {
                let bounds = entry.bounds?;
                Some(entry.observe(bounds.visible_fraction(&viewport, entry.options.margin_px)))
            })
            .filter(|started| *started)
            .count()
    }

    /// Feed a visible fraction computed by the host
    ///
    /// The host is expected to have applied the margin already.
    pub fn set_visible_fraction(&mut self, id: RevealId, fraction: f32) -> bool {
        self.entries
            .get_mut(id)
            .map(|entry| entry.observe(fraction))
            .unwrap_or(false)
    }

    pub fn tick(&mut self, dt_ms: f32) {
        for entry in self.entries.values_mut() {
            entry.tween.tick(dt_ms);
        }
    }

    pub fn properties(&self, id: RevealId) -> Option<MotionProperties> {
        self.entries.get(id).map(RevealEntry::properties)
    }

    pub fn has_fired(&self, id: RevealId) -> bool {
        self.entries.get(id).is_some_and(RevealEntry::has_fired)
    }

    pub fn is_observing(&self, id: RevealId) -> bool {
        self.entries.get(id).is_some_and(RevealEntry::is_observing)
    }

    pub fn entry(&self, id: RevealId) -> Option<&RevealEntry> {
        self.entries.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RevealId, &RevealEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}
