//! Overlay Transition State Machine
//!
//! The full-screen menu has four states. `Opening` and `Closing` are timed
//! phases: the container's circular wipe, a staggered entrance (or exit) of
//! every menu entry, and the status line. When every tween of a phase has
//! finished the machine receives `Settled` and lands on the stable state.
//!
//! ```text
//!            Open                 Settled
//!   Closed ────────▶ Opening ─────────────▶ Open
//!     ▲               │  ▲                   │
//!     │        Close/ │  │ Open              │ Close/SelectItem
//!     │    SelectItem ▼  │                   ▼
//!     └────────────── Closing ◀──────────────┘
//!          Settled
//! ```
//!
//! An `Open` during `Closing` (or a `Close` during `Opening`) retargets every
//! tween from its current value, so the overlay never jumps.

use crate::config::OverlayConfig;
use nexus_animation::{MotionPreset, MotionPresets, MotionProperties, StaggerSlot, Tween};
use nexus_core::StateMachine;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayEvent {
    Open,
    Close,
    /// A menu entry was chosen; closes the menu
    SelectItem,
    /// Every tween of the current phase finished
    Settled,
}

/// Overlay output for one frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OverlayFrame {
    pub phase: OverlayPhase,
    pub visible: bool,
    pub container: MotionProperties,
    pub items: Vec<MotionProperties>,
    pub status: MotionProperties,
}

pub struct OverlayTransition {
    fsm: StateMachine<OverlayPhase, OverlayEvent>,
    config: OverlayConfig,
    wipe: MotionPreset,
    item: MotionPreset,
    status_preset: MotionPreset,
    container: Tween,
    items: Vec<Tween>,
    status: Tween,
    selected: Option<usize>,
}

impl OverlayTransition {
    pub fn new(item_count: usize, config: OverlayConfig) -> Self {
        use OverlayEvent as E;
        use OverlayPhase as P;

        let fsm = StateMachine::builder(P::Closed)
            .on(P::Closed, E::Open, P::Opening)
            .on(P::Opening, E::Settled, P::Open)
            .on(P::Open, E::Close, P::Closing)
            .on(P::Open, E::SelectItem, P::Closing)
            .on(P::Closing, E::Settled, P::Closed)
            // interruptions
            .on(P::Opening, E::Close, P::Closing)
            .on(P::Opening, E::SelectItem, P::Closing)
            .on(P::Closing, E::Open, P::Opening)
            .build();

        let wipe = MotionPresets::overlay_wipe().with_spec(config.wipe);
        let item = MotionPresets::menu_item_enter().with_spec(config.item_enter);
        let status_preset = MotionPresets::status_fade(config.status_delay_ms);

        Self {
            fsm,
            container: wipe.hidden(),
            items: (0..item_count).map(|_| item.hidden()).collect(),
            status: status_preset.hidden(),
            wipe,
            item,
            status_preset,
            config,
            selected: None,
        }
    }

    pub fn phase(&self) -> OverlayPhase {
        self.fsm.current_state()
    }

    /// Whether anything of the overlay is on screen
    pub fn is_visible(&self) -> bool {
        self.phase() != OverlayPhase::Closed
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Entry chosen by the last `select_item`
    pub fn selected_item(&self) -> Option<usize> {
        self.selected
    }

    pub fn state_machine(&self) -> &StateMachine<OverlayPhase, OverlayEvent> {
        &self.fsm
    }

    /// Entrance schedule of the menu entries
    pub fn enter_slots(&self) -> Vec<StaggerSlot> {
        self.config.enter_stagger.slots(self.items.len())
    }

    pub fn exit_slots(&self) -> Vec<StaggerSlot> {
        self.config.exit_stagger.slots(self.items.len())
    }

    pub fn open(&mut self) -> OverlayPhase {
        self.send(OverlayEvent::Open)
    }

    pub fn close(&mut self) -> OverlayPhase {
        self.send(OverlayEvent::Close)
    }

    /// Open when closed or closing, close otherwise
    pub fn toggle(&mut self) -> OverlayPhase {
        match self.phase() {
            OverlayPhase::Closed | OverlayPhase::Closing => self.open(),
            OverlayPhase::Opening | OverlayPhase::Open => self.close(),
        }
    }

    pub fn select_item(&mut self, index: usize) -> OverlayPhase {
        if index >= self.items.len() {
            tracing::warn!(index, count = self.items.len(), "menu entry out of range");
            return self.phase();
        }
        let from = self.phase();
        let to = self.send(OverlayEvent::SelectItem);
        if to != from {
            self.selected = Some(index);
        }
        to
    }

    fn send(&mut self, event: OverlayEvent) -> OverlayPhase {
        let from = self.phase();
        let to = self.fsm.send(event);
        if to == from {
            return to;
        }
        tracing::debug!(?from, ?event, ?to, "overlay transition");
        match to {
            OverlayPhase::Opening => self.start_opening(from == OverlayPhase::Closing),
            OverlayPhase::Closing => self.start_closing(),
            OverlayPhase::Closed => self.reset_hidden(),
            OverlayPhase::Open => {}
        }
        to
    }

    fn start_opening(&mut self, interrupted: bool) {
        self.selected = None;
        self.container.retarget(self.wipe.target, self.wipe.spec);

        let slots = self.enter_slots();
        for (tween, slot) in self.items.iter_mut().zip(slots) {
            // A reversal starts moving right away; delays only apply from rest
            let delay_ms = if interrupted { 0 } else { slot.delay_ms };
            tween.retarget(self.item.target, self.item.spec.with_delay(delay_ms));
        }

        let status_delay = if interrupted { 0 } else { self.config.status_delay_ms };
        self.status.retarget(
            self.status_preset.target,
            self.status_preset.spec.with_delay(status_delay),
        );
    }

    fn start_closing(&mut self) {
        self.container
            .retarget(self.wipe.initial, self.wipe.spec.with_delay(0));

        let exit = MotionPresets::menu_item_exit();
        let slots = self.exit_slots();
        for (tween, slot) in self.items.iter_mut().zip(slots) {
            tween.retarget(exit, self.config.item_exit.with_delay(slot.delay_ms));
        }

        self.status
            .retarget(self.status_preset.initial, self.status_preset.spec.with_delay(0));
    }

    /// Back to the pre-entrance look once the overlay is gone
    fn reset_hidden(&mut self) {
        self.container = self.wipe.hidden();
        for tween in &mut self.items {
            *tween = self.item.hidden();
        }
        self.status = self.status_preset.hidden();
    }

    fn phase_finished(&self) -> bool {
        self.container.is_finished()
            && self.status.is_finished()
            && self.items.iter().all(Tween::is_finished)
    }

    /// Advance every tween and settle the phase when they are all done
    pub fn tick(&mut self, dt_ms: f32) -> OverlayPhase {
        self.container.tick(dt_ms);
        self.status.tick(dt_ms);
        for tween in &mut self.items {
            tween.tick(dt_ms);
        }

        match self.phase() {
            OverlayPhase::Opening | OverlayPhase::Closing if self.phase_finished() => {
                self.send(OverlayEvent::Settled)
            }
            phase => phase,
        }
    }

    pub fn frame(&self) -> OverlayFrame {
        OverlayFrame {
            phase: self.phase(),
            visible: self.is_visible(),
            container: self.container.current(),
            items: self.items.iter().map(Tween::current).collect(),
            status: self.status.current(),
        }
    }
}
