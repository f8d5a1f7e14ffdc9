//! Entrance sequence played once when the page mounts
//!
//! The nav bar drops in, the hero label rises, the three title lines slide up
//! out of their clipped rows one after another, and the ghost badge pops in on
//! a spring once the text has landed.

use crate::color::Rgba;
use crate::config::IntroConfig;
use nexus_animation::{FrameTime, MotionPreset, MotionPresets, MotionProperties, Spring, Tween};
use serde::Serialize;

/// Properties of one named element in a frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ElementFrame {
    pub name: String,
    pub properties: MotionProperties,
    /// Resolved content accent, for elements that carry one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<Rgba>,
}

pub struct IntroSequence {
    tweens: Vec<(String, Tween)>,
    badge: Spring,
    badge_delay_ms: f64,
    elapsed_ms: f64,
}

impl IntroSequence {
    pub fn new(config: &IntroConfig) -> Self {
        let mut presets: Vec<(String, MotionPreset)> = vec![
            ("nav".to_string(), MotionPresets::nav_drop_in()),
            ("hero-label".to_string(), MotionPresets::label_rise()),
        ];
        for slot in config.line_stagger.slots(3) {
            presets.push((
                format!("hero-line-{}", slot.index + 1),
                MotionPresets::line_rise(config.line_height_px).with_delay(slot.delay_ms),
            ));
        }

        let mut tweens: Vec<(String, Tween)> = presets
            .into_iter()
            .map(|(name, preset)| (name, preset.enter()))
            .collect();
        let mut badge = Spring::new(config.badge_spring, 0.0);

        if !config.enabled {
            for (_, tween) in &mut tweens {
                tween.finish();
            }
            badge.jump_to(1.0);
        }

        Self {
            tweens,
            badge,
            badge_delay_ms: config.badge_delay_ms as f64,
            elapsed_ms: 0.0,
        }
    }

    pub fn tick(&mut self, time: FrameTime) {
        self.elapsed_ms = time.elapsed_ms;
        for (_, tween) in &mut self.tweens {
            tween.tick(time.dt_ms);
        }
        if self.elapsed_ms >= self.badge_delay_ms {
            self.badge.set_target(1.0);
            self.badge.step(time.dt_secs());
        }
    }

    pub fn is_complete(&self) -> bool {
        self.tweens.iter().all(|(_, tween)| tween.is_finished()) && self.badge.is_settled()
    }

    pub fn properties(&self, name: &str) -> Option<MotionProperties> {
        if name == "ghost-badge" {
            return Some(MotionProperties::scale(self.badge.value()));
        }
        self.tweens
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, tween)| tween.current())
    }

    pub fn frame(&self) -> Vec<ElementFrame> {
        self.tweens
            .iter()
            .map(|(name, tween)| ElementFrame {
                name: name.clone(),
                properties: tween.current(),
                accent: None,
            })
            .chain(std::iter::once(ElementFrame {
                name: "ghost-badge".to_string(),
                properties: MotionProperties::scale(self.badge.value()),
                accent: None,
            }))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexus_animation::FrameClock;

    fn run(intro: &mut IntroSequence, clock: &mut FrameClock, now: &mut f64, ms: f64) {
        let end = *now + ms;
        while *now < end {
            *now += 16.0;
            intro.tick(clock.tick(*now));
        }
    }

    #[test]
    fn test_starts_hidden() {
        let intro = IntroSequence::new(&IntroConfig::default());
        assert_eq!(intro.properties("nav").unwrap().translate_y, Some(-100.0));
        assert_eq!(intro.properties("hero-line-1").unwrap().translate_y, Some(144.0));
        assert_eq!(intro.properties("ghost-badge").unwrap().scale, Some(0.0));
        assert_eq!(intro.frame().len(), 6);
    }

    #[test]
    fn test_lines_rise_in_order() {
        let mut intro = IntroSequence::new(&IntroConfig::default());
        let mut clock = FrameClock::default();
        let mut now = 0.0;
        intro.tick(clock.tick(now));
        run(&mut intro, &mut clock, &mut now, 300.0);

        let y = |n: &str| intro.properties(n).unwrap().translate_y.unwrap();
        assert!(y("hero-line-1") < 144.0);
        assert_eq!(y("hero-line-2"), 144.0);
        assert_eq!(y("hero-line-3"), 144.0);
    }

    #[test]
    fn test_badge_waits_then_pops() {
        let mut intro = IntroSequence::new(&IntroConfig::default());
        let mut clock = FrameClock::default();
        let mut now = 0.0;
        intro.tick(clock.tick(now));
        run(&mut intro, &mut clock, &mut now, 900.0);
        assert_eq!(intro.properties("ghost-badge").unwrap().scale, Some(0.0));

        run(&mut intro, &mut clock, &mut now, 4000.0);
        assert!(intro.is_complete());
        assert_eq!(intro.properties("ghost-badge").unwrap().scale, Some(1.0));
        assert_eq!(intro.properties("nav").unwrap().translate_y, Some(0.0));
    }

    #[test]
    fn test_disabled_intro_is_already_done() {
        let config = IntroConfig {
            enabled: false,
            ..IntroConfig::default()
        };
        let intro = IntroSequence::new(&config);
        assert!(intro.is_complete());
        assert_eq!(intro.properties("hero-label").unwrap().opacity, Some(1.0));
    }
}
