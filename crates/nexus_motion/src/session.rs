//! Page session
//!
//! Owns every component of the motion layer for one page lifetime. Host
//! events go in through [`PageSession::handle_event`]; once per display frame
//! [`PageSession::frame`] reads the pointer sample, the scroll offset and the
//! clock exactly once and derives every output from that snapshot.
//!
//! Interactive elements are addressed by name (`menu-button`, `project-2`,
//! ...) and resolved to the numeric target ids the host puts on its events.

use crate::color::Rgba;
use crate::config::MotionConfig;
use crate::content::ContentTable;
use crate::cursor::{CursorFrame, CursorStateMachine, RegionTag};
use crate::intro::{ElementFrame, IntroSequence};
use crate::loops::{LoopAnimator, LoopSample, MarqueeBand};
use crate::overlay::{OverlayFrame, OverlayTransition};
use crate::pointer::{PointerSample, PointerTracker, SpringSmoother};
use crate::reveal::{ElementBounds, RevealId, RevealOptions, Viewport, ViewportRevealTrigger};
use crate::scroll::{LayerTransform, ScrollTransformPipeline};
use nexus_animation::{FrameClock, MotionPreset, MotionPresets};
use nexus_core::events::event_types;
use nexus_core::{
    signal, Event, EventData, EventDispatcher, ListenerId, Result, SignalReader, TargetId, WINDOW,
};
use rustc_hash::FxHashMap;
use serde::Serialize;

/// What clicking a target does
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetAction {
    OpenMenu,
    CloseMenu,
    SelectItem(usize),
}

#[derive(Clone, Debug, Default)]
struct TargetSpec {
    name: String,
    region: Option<RegionTag>,
    action: Option<TargetAction>,
    reveal: Option<RevealId>,
}

/// Everything the renderer needs for one frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Frame {
    pub frame: u64,
    pub elapsed_ms: f64,
    pub pointer: PointerSample,
    pub scroll_y: f32,
    pub cursor: CursorFrame,
    pub parallax: Vec<LayerTransform>,
    pub reveals: Vec<ElementFrame>,
    pub overlay: OverlayFrame,
    pub loops: Vec<LoopSample>,
    pub intro: Vec<ElementFrame>,
}

pub struct PageSession {
    config: MotionConfig,
    content: ContentTable,
    dispatcher: EventDispatcher,
    pointer: PointerTracker,
    pointer_sample: SignalReader<PointerSample>,
    scroll_listener: Option<ListenerId>,
    scroll: SignalReader<f32>,
    viewport: (f32, f32),
    clock: FrameClock,
    smoother: SpringSmoother,
    cursor: CursorStateMachine,
    parallax: ScrollTransformPipeline,
    reveals: ViewportRevealTrigger,
    overlay: OverlayTransition,
    loops: LoopAnimator,
    marquee: MarqueeBand,
    intro: IntroSequence,
    targets: FxHashMap<TargetId, TargetSpec>,
    accents: FxHashMap<RevealId, Rgba>,
    names: FxHashMap<String, TargetId>,
    mounted: bool,
}

impl PageSession {
    /// Create every component, signal and listener of the page
    pub fn mount(config: MotionConfig, content: ContentTable) -> Result<Self> {
        config.validate()?;

        let mut dispatcher = EventDispatcher::new();
        let (pointer, pointer_sample) = PointerTracker::mount(&mut dispatcher);

        let (scroll_writer, scroll) = signal(0.0f32);
        let scroll_listener = dispatcher.register(WINDOW, event_types::SCROLL, move |event| {
            if let EventData::Scroll { offset_y } = event.data {
                if offset_y.is_finite() {
                    scroll_writer.set(offset_y);
                }
            }
        });

        let mut session = Self {
            clock: FrameClock::new(config.frame.max_dt_ms),
            smoother: SpringSmoother::new(config.cursor.follow),
            cursor: CursorStateMachine::new(config.cursor.size_px, config.cursor.morph),
            parallax: ScrollTransformPipeline::new(config.scroll.layers.clone()),
            reveals: ViewportRevealTrigger::new(),
            overlay: OverlayTransition::new(content.menu_items.len(), config.overlay.clone()),
            loops: LoopAnimator::page(&config.loops),
            marquee: MarqueeBand::new(content.marquee.clone(), config.loops.marquee_copies),
            intro: IntroSequence::new(&config.intro),
            dispatcher,
            pointer,
            pointer_sample,
            scroll_listener: Some(scroll_listener),
            scroll,
            viewport: (0.0, 0.0),
            targets: FxHashMap::default(),
            accents: FxHashMap::default(),
            names: FxHashMap::default(),
            mounted: true,
            config,
            content,
        };
        session.register_targets();

        tracing::info!(
            targets = session.targets.len(),
            reveals = session.reveals.len(),
            menu_items = session.overlay.item_count(),
            "page session mounted"
        );
        Ok(session)
    }

    fn register_targets(&mut self) {
        let hover = Some(RegionTag::Hover);
        self.add_target("logo", hover, None, None);
        self.add_target("menu-button", hover, Some(TargetAction::OpenMenu), None);
        self.add_target("menu-close", None, Some(TargetAction::CloseMenu), None);
        for i in 0..self.content.menu_items.len() {
            let action = Some(TargetAction::SelectItem(i));
            self.add_target(&format!("menu-item-{i}"), Some(RegionTag::Text), action, None);
        }
        self.add_target("hero-digital", hover, None, None);

        let reveal = &self.config.reveal;
        let amount = reveal.amount;
        let plain = RevealOptions::once().with_amount(amount);
        let cards = plain.with_margin(reveal.card_margin_px);
        let card_stagger = reveal.card_stagger_ms;
        let skill_stagger = reveal.skill_stagger_ms;
        let skill_level = reveal.skill_level_pct;

        let profile = MotionPresets::slide_in_left(50.0, 600);
        self.add_reveal("about-profile", None, profile, plain, None);
        let manifesto = MotionPresets::fade_up(50.0, 600);
        self.add_reveal("about-manifesto", None, manifesto, plain, None);
        for i in 0..self.content.projects.len() {
            // card numbering on the page starts at 1
            let delay = card_stagger.saturating_mul(i as u32 + 1);
            let preset = MotionPresets::fade_up(100.0, 700).with_delay(delay);
            let accent = Some(self.content.project_color(i));
            self.add_reveal(&format!("project-{i}"), hover, preset, cards, accent);
        }
        let bar = MotionPresets::grow_width(skill_level, 1500);
        self.add_reveal("skill-bar", None, bar, plain, None);
        for i in 0..self.content.skills.len() {
            let delay = skill_stagger.saturating_mul(i as u32);
            let preset = MotionPresets::flip_in_x(800).with_delay(delay);
            let accent = Some(self.content.skill_color(i));
            self.add_reveal(&format!("skill-{i}"), None, preset, plain, accent);
        }

        self.add_target("insert-coin", hover, None, None);
    }

    fn next_id(&self) -> TargetId {
        self.targets.len() as TargetId + 1
    }

    fn add_target(
        &mut self,
        name: &str,
        region: Option<RegionTag>,
        action: Option<TargetAction>,
        reveal: Option<RevealId>,
    ) -> TargetId {
        let id = self.next_id();
        self.targets.insert(
            id,
            TargetSpec {
                name: name.to_string(),
                region,
                action,
                reveal,
            },
        );
        self.names.insert(name.to_string(), id);
        id
    }

    fn add_reveal(
        &mut self,
        name: &str,
        region: Option<RegionTag>,
        preset: MotionPreset,
        options: RevealOptions,
        accent: Option<Rgba>,
    ) -> TargetId {
        let reveal = self.reveals.register(name, preset, options);
        if let Some(accent) = accent {
            self.accents.insert(reveal, accent);
        }
        self.add_target(name, region, None, Some(reveal))
    }

    /// Target id of a named element
    pub fn target(&self, name: &str) -> Option<TargetId> {
        self.names.get(name).copied()
    }

    /// Name of a target id
    pub fn target_name(&self, id: TargetId) -> Option<&str> {
        self.targets.get(&id).map(|spec| spec.name.as_str())
    }

    /// Every named target, sorted by id
    pub fn targets(&self) -> Vec<(TargetId, &str)> {
        let mut all: Vec<_> = self
            .targets
            .iter()
            .map(|(id, spec)| (*id, spec.name.as_str()))
            .collect();
        all.sort_by_key(|(id, _)| *id);
        all
    }

    /// Feed a host event
    ///
    /// Returns false when the event had no effect (unknown target, or the
    /// session is unmounted).
    pub fn handle_event(&mut self, mut event: Event) -> bool {
        if !self.mounted {
            tracing::trace!(event_type = event.event_type, "event after unmount ignored");
            return false;
        }

        let delivered = self.dispatcher.dispatch(&mut event) > 0;

        match event.event_type {
            event_types::POINTER_ENTER => {
                let Some(tag) = self.targets.get(&event.target).and_then(|t| t.region) else {
                    return delivered;
                };
                self.cursor.pointer_enter(event.target, tag);
                true
            }
            event_types::POINTER_LEAVE => {
                if !self.targets.contains_key(&event.target) {
                    return delivered;
                }
                self.cursor.pointer_leave(event.target);
                true
            }
            event_types::CLICK => {
                let Some(action) = self.targets.get(&event.target).and_then(|t| t.action) else {
                    return delivered;
                };
                match action {
                    TargetAction::OpenMenu => self.overlay.open(),
                    TargetAction::CloseMenu => self.overlay.close(),
                    TargetAction::SelectItem(index) => self.overlay.select_item(index),
                };
                true
            }
            event_types::RESIZE => {
                if let EventData::Resize { width, height } = event.data {
                    if width.is_finite() && height.is_finite() {
                        self.viewport = (width.max(0.0), height.max(0.0));
                        return true;
                    }
                }
                delivered
            }
            event_types::LAYOUT => {
                let reveal = self.targets.get(&event.target).and_then(|t| t.reveal);
                match (reveal, event.data) {
                    (Some(id), EventData::Bounds { top, height }) => {
                        self.reveals.set_bounds(id, ElementBounds::new(top, height));
                        true
                    }
                    _ => delivered,
                }
            }
            event_types::INTERSECTION => {
                let reveal = self.targets.get(&event.target).and_then(|t| t.reveal);
                match (reveal, event.data) {
                    (Some(id), EventData::Visibility { fraction }) => {
                        self.reveals.set_visible_fraction(id, fraction);
                        true
                    }
                    _ => delivered,
                }
            }
            _ => delivered,
        }
    }

    /// Compute one frame at host time `now_ms`
    ///
    /// Returns `None` once the session is unmounted.
    pub fn frame(&mut self, now_ms: f64) -> Option<Frame> {
        if !self.mounted {
            return None;
        }

        let time = self.clock.tick(now_ms);
        let pointer = self.pointer_sample.get();
        let scroll_y = self.scroll.get();

        self.smoother.step(pointer, time.dt_secs());
        self.cursor.step(time.dt_secs());

        let (width, height) = self.viewport;
        self.reveals.update_viewport(Viewport {
            scroll_y,
            width,
            height,
        });
        self.reveals.tick(time.dt_ms);
        self.overlay.tick(time.dt_ms);
        self.intro.tick(time);

        let reveals = self
            .reveals
            .iter()
            .map(|(id, entry)| ElementFrame {
                name: entry.element().to_string(),
                properties: entry.properties(),
                accent: self.accents.get(&id).copied(),
            })
            .collect();

        tracing::trace!(frame = time.frame, dt_ms = time.dt_ms, scroll_y, "frame");

        Some(Frame {
            frame: time.frame,
            elapsed_ms: time.elapsed_ms,
            pointer,
            scroll_y,
            cursor: self.cursor.render(self.smoother.value()),
            parallax: self.parallax.evaluate(scroll_y),
            reveals,
            overlay: self.overlay.frame(),
            loops: self.loops.sample(time.elapsed_ms),
            intro: self.intro.frame(),
        })
    }

    /// Remove every listener and close the signals
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.pointer.unmount(&mut self.dispatcher);
        if let Some(id) = self.scroll_listener.take() {
            self.dispatcher.unregister(id);
        }
        self.dispatcher.clear();
        self.mounted = false;
        tracing::info!("page session unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn listener_count(&self) -> usize {
        self.dispatcher.listener_count()
    }

    pub fn pointer(&self) -> PointerSample {
        self.pointer_sample.get()
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll.get()
    }

    pub fn pointer_signal(&self) -> SignalReader<PointerSample> {
        self.pointer_sample.clone()
    }

    pub fn scroll_signal(&self) -> SignalReader<f32> {
        self.scroll.clone()
    }

    pub fn cursor(&self) -> &CursorStateMachine {
        &self.cursor
    }

    pub fn overlay(&self) -> &OverlayTransition {
        &self.overlay
    }

    pub fn reveals(&self) -> &ViewportRevealTrigger {
        &self.reveals
    }

    /// Reveal handle of a named element
    pub fn reveal(&self, name: &str) -> Option<RevealId> {
        self.target(name)
            .and_then(|id| self.targets.get(&id))
            .and_then(|spec| spec.reveal)
    }

    pub fn marquee(&self) -> &MarqueeBand {
        &self.marquee
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn content(&self) -> &ContentTable {
        &self.content
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> PageSession {
        PageSession::mount(MotionConfig::default(), ContentTable::default()).unwrap()
    }

    #[test]
    fn test_named_targets() {
        let session = session();
        for name in [
            "logo",
            "menu-button",
            "menu-close",
            "menu-item-0",
            "menu-item-4",
            "hero-digital",
            "project-3",
            "skill-2",
            "skill-bar",
            "about-profile",
            "about-manifesto",
            "insert-coin",
        ] {
            assert!(session.target(name).is_some(), "missing {name}");
        }
        assert_eq!(session.target("menu-item-5"), None);

        let ids: Vec<TargetId> = session.targets().iter().map(|(id, _)| *id).collect();
        assert!(!ids.contains(&WINDOW));
        assert_eq!(session.target_name(ids[0]), Some("logo"));
    }

    #[test]
    fn test_mount_registers_window_listeners() {
        let session = session();
        assert_eq!(session.listener_count(), 2);
        assert!(session.is_mounted());
    }

    #[test]
    fn test_invalid_config_fails_mount() {
        let mut config = MotionConfig::default();
        config.frame.max_dt_ms = 0.0;
        assert!(PageSession::mount(config, ContentTable::default()).is_err());
    }

    #[test]
    fn test_pointer_and_scroll_reach_signals() {
        let mut session = session();
        session.handle_event(Event::pointer_move(200.0, 150.0));
        session.handle_event(Event::scroll(320.0));
        assert_eq!(session.pointer(), PointerSample::new(200.0, 150.0));
        assert_eq!(session.scroll_offset(), 320.0);

        let frame = session.frame(0.0).unwrap();
        assert_eq!(frame.scroll_y, 320.0);
        assert_eq!(frame.pointer, PointerSample::new(200.0, 150.0));
    }

    #[test]
    fn test_click_routes_to_overlay() {
        let mut session = session();
        let button = session.target("menu-button").unwrap();
        assert!(session.handle_event(Event::click(button)));
        assert!(session.overlay().is_visible());

        let item = session.target("menu-item-1").unwrap();
        session.handle_event(Event::click(item));
        assert_eq!(session.overlay().phase(), crate::overlay::OverlayPhase::Closing);
    }

    #[test]
    fn test_unknown_target_is_ignored() {
        let mut session = session();
        assert!(!session.handle_event(Event::click(9_999)));
        assert!(!session.handle_event(Event::pointer_enter(9_999)));
    }

    #[test]
    fn test_unmount_stops_everything() {
        let mut session = session();
        let pointer = session.pointer_signal();
        session.unmount();
        assert_eq!(session.listener_count(), 0);
        assert!(!pointer.is_live());
        assert!(!session.handle_event(Event::pointer_move(1.0, 1.0)));
        assert!(session.frame(16.0).is_none());
    }
}
