//! Loop Animator
//!
//! Ambient motion that starts at mount and runs for the whole session: the
//! marquee band, the scroll hint bob, the ghost badge spin and the menu's
//! pulsing label. Every value is a pure function of elapsed time, so loops
//! never drift and sampling the same instant twice gives the same result.

use crate::config::LoopConfig;
use crate::content::MarqueePhrase;
use nexus_animation::{Easing, KeyframeTrack, LoopTimeline};
use serde::{Deserialize, Serialize};

/// Property a loop drives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopProperty {
    /// Horizontal shift in percent of the element's own width
    TranslateXPct,
    TranslateY,
    Rotate,
    Opacity,
}

/// A named element looping one property through a keyframe track
#[derive(Clone, Debug, PartialEq)]
pub struct LoopBinding {
    pub name: String,
    pub property: LoopProperty,
    pub timeline: LoopTimeline,
    pub track: KeyframeTrack,
}

impl LoopBinding {
    pub fn new(
        name: impl Into<String>,
        property: LoopProperty,
        timeline: LoopTimeline,
        track: KeyframeTrack,
    ) -> Self {
        Self {
            name: name.into(),
            property,
            timeline,
            track,
        }
    }

    pub fn value_at(&self, elapsed_ms: f64) -> f32 {
        self.track.sample(self.timeline.progress_at(elapsed_ms))
    }
}

/// One loop's value in a frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoopSample {
    pub name: String,
    pub property: LoopProperty,
    pub value: f32,
}

#[derive(Clone, Debug, Default)]
pub struct LoopAnimator {
    bindings: Vec<LoopBinding>,
}

impl LoopAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four loops of the page
    pub fn page(config: &LoopConfig) -> Self {
        let mut animator = Self::new();
        animator.add(LoopBinding::new(
            "marquee",
            LoopProperty::TranslateXPct,
            LoopTimeline::infinite(config.marquee_ms, Easing::Linear),
            KeyframeTrack::between(0.0, -50.0, Easing::Linear),
        ));
        animator.add(LoopBinding::new(
            "scroll-hint",
            LoopProperty::TranslateY,
            LoopTimeline::infinite(config.scroll_hint_ms, Easing::Linear),
            KeyframeTrack::evenly(&[0.0, 10.0, 0.0], Easing::EaseInOut),
        ));
        animator.add(LoopBinding::new(
            "ghost-badge",
            LoopProperty::Rotate,
            LoopTimeline::infinite(config.badge_spin_ms, Easing::Linear),
            KeyframeTrack::between(0.0, 360.0, Easing::Linear),
        ));
        animator.add(LoopBinding::new(
            "select-pulse",
            LoopProperty::Opacity,
            LoopTimeline::infinite(config.pulse_ms, Easing::Linear),
            KeyframeTrack::evenly(&[1.0, 0.5, 1.0], Easing::PULSE),
        ));
        animator
    }

    pub fn add(&mut self, binding: LoopBinding) {
        self.bindings.push(binding);
    }

    pub fn bindings(&self) -> &[LoopBinding] {
        &self.bindings
    }

    pub fn sample(&self, elapsed_ms: f64) -> Vec<LoopSample> {
        self.bindings
            .iter()
            .map(|binding| LoopSample {
                name: binding.name.clone(),
                property: binding.property,
                value: binding.value_at(elapsed_ms),
            })
            .collect()
    }

    pub fn value(&self, name: &str, elapsed_ms: f64) -> Option<f32> {
        self.bindings
            .iter()
            .find(|binding| binding.name == name)
            .map(|binding| binding.value_at(elapsed_ms))
    }
}

/// The repeated phrase strip the marquee loop slides
///
/// The strip holds an even number of copies of the phrase list, so shifting it
/// by exactly half its width lands on an identical arrangement and the wrap
/// from -50% back to 0% is invisible.
#[derive(Clone, Debug, PartialEq)]
pub struct MarqueeBand {
    phrases: Vec<MarqueePhrase>,
    copies: usize,
}

impl MarqueeBand {
    pub fn new(phrases: Vec<MarqueePhrase>, copies: usize) -> Self {
        let copies = copies.max(2);
        let copies = copies + copies % 2;
        Self { phrases, copies }
    }

    pub fn copies(&self) -> usize {
        self.copies
    }

    pub fn phrases(&self) -> &[MarqueePhrase] {
        &self.phrases
    }

    /// Every phrase of the strip in display order
    pub fn items(&self) -> impl Iterator<Item = &MarqueePhrase> {
        std::iter::repeat(self.phrases.as_slice())
            .take(self.copies)
            .flatten()
    }

    pub fn len(&self) -> usize {
        self.phrases.len() * self.copies
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> LoopAnimator {
        LoopAnimator::page(&LoopConfig::default())
    }

    #[test]
    fn test_loops_are_periodic() {
        let loops = page();
        for binding in loops.bindings() {
            let period = binding.timeline.duration_ms as f64;
            for t in [0.0, 123.0, 777.5, 1999.0, 4321.0] {
                let a = binding.value_at(t);
                let b = binding.value_at(t + period);
                let c = binding.value_at(t + 7.0 * period);
                assert!((a - b).abs() < 1e-3, "{} at {t}", binding.name);
                assert!((a - c).abs() < 1e-3, "{} at {t}", binding.name);
            }
        }
    }

    #[test]
    fn test_marquee_is_linear() {
        let loops = page();
        assert_eq!(loops.value("marquee", 0.0), Some(0.0));
        assert_eq!(loops.value("marquee", 5_000.0), Some(-25.0));
        let near_end = loops.value("marquee", 9_999.0).unwrap();
        assert!(near_end < -49.9);
        assert_eq!(loops.value("marquee", 10_000.0), Some(0.0));
    }

    #[test]
    fn test_scroll_hint_bobs() {
        let loops = page();
        assert_eq!(loops.value("scroll-hint", 0.0), Some(0.0));
        assert!((loops.value("scroll-hint", 1_000.0).unwrap() - 10.0).abs() < 1e-4);
        let quarter = loops.value("scroll-hint", 500.0).unwrap();
        assert!(quarter > 0.0 && quarter < 10.0);
    }

    #[test]
    fn test_pulse_range() {
        let loops = page();
        for t in (0..2000).step_by(50) {
            let v = loops.value("select-pulse", t as f64).unwrap();
            assert!((0.5 - 1e-4..=1.0 + 1e-4).contains(&v));
        }
    }

    #[test]
    fn test_sample_reports_every_loop() {
        let samples = page().sample(250.0);
        let names: Vec<&str> = samples.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["marquee", "scroll-hint", "ghost-badge", "select-pulse"]);
    }

    #[test]
    fn test_marquee_band_copies_are_even() {
        let phrases = vec![MarqueePhrase::new("A", "text-lime-400")];
        assert_eq!(MarqueeBand::new(phrases.clone(), 4).copies(), 4);
        assert_eq!(MarqueeBand::new(phrases.clone(), 3).copies(), 4);
        assert_eq!(MarqueeBand::new(phrases.clone(), 1).copies(), 2);

        let band = MarqueeBand::new(phrases, 4);
        assert_eq!(band.items().count(), band.len());
        assert!(MarqueeBand::new(Vec::new(), 4).is_empty());
    }
}
