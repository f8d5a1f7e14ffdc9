//! Pointer tracking and smoothing
//!
//! [`PointerTracker`] owns the page's pointer sample: a single window-level
//! move listener overwrites it on every host event, with no buffering or
//! history. [`SpringSmoother`] reads that sample once per frame and trails it
//! with one spring per axis, producing the position the cursor is drawn at.

use nexus_animation::{Spring, SpringConfig};
use nexus_core::events::event_types;
use nexus_core::{signal, EventData, EventDispatcher, ListenerId, SignalReader, WINDOW};
use serde::Serialize;

/// Latest raw pointer position in viewport coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

impl PointerSample {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Writes pointer moves into the shared sample
pub struct PointerTracker {
    listener: Option<ListenerId>,
    reader: SignalReader<PointerSample>,
}

impl PointerTracker {
    /// Register the window move listener
    ///
    /// The listener owns the signal's writer, so unregistering it tears the
    /// signal down.
    pub fn mount(dispatcher: &mut EventDispatcher) -> (Self, SignalReader<PointerSample>) {
        let (writer, reader) = signal(PointerSample::default());
        let listener = dispatcher.register(WINDOW, event_types::POINTER_MOVE, move |event| {
            if let EventData::Pointer { x, y } = event.data {
                if x.is_finite() && y.is_finite() {
                    writer.set(PointerSample::new(x, y));
                }
            }
        });
        tracing::debug!("pointer tracker mounted");
        let tracker = Self {
            listener: Some(listener),
            reader: reader.clone(),
        };
        (tracker, reader)
    }

    pub fn sample(&self) -> PointerSample {
        self.reader.get()
    }

    pub fn is_mounted(&self) -> bool {
        self.listener.is_some() && self.reader.is_live()
    }

    pub fn unmount(&mut self, dispatcher: &mut EventDispatcher) {
        if let Some(id) = self.listener.take() {
            dispatcher.unregister(id);
            tracing::debug!("pointer tracker unmounted");
        }
    }
}

/// Two springs trailing the raw pointer
#[derive(Clone, Debug)]
pub struct SpringSmoother {
    x: Spring,
    y: Spring,
}

impl SpringSmoother {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            x: Spring::new(config, 0.0),
            y: Spring::new(config, 0.0),
        }
    }

    /// Aim both springs at `sample` and advance them by `dt_s` seconds
    pub fn step(&mut self, sample: PointerSample, dt_s: f32) {
        self.x.set_target(sample.x);
        self.y.set_target(sample.y);
        self.x.step(dt_s);
        self.y.step(dt_s);
    }

    /// Smoothed position
    pub fn value(&self) -> (f32, f32) {
        (self.x.value(), self.y.value())
    }

    pub fn velocity(&self) -> (f32, f32) {
        (self.x.velocity(), self.y.velocity())
    }

    pub fn is_settled(&self) -> bool {
        self.x.is_settled() && self.y.is_settled()
    }

    /// Place both springs at `sample` with no motion
    pub fn jump_to(&mut self, sample: PointerSample) {
        self.x.jump_to(sample.x);
        self.y.jump_to(sample.y);
    }
}

impl Default for SpringSmoother {
    fn default() -> Self {
        Self::new(SpringConfig::cursor())
    }
}
