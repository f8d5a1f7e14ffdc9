//! Event dispatch system
//!
//! Host input events (pointer, scroll, resize, layout, visibility) enter the
//! motion layer here. Listeners are registered per `(target, event type)` and
//! can be removed again, so nothing fires after a component is unmounted.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

/// Event type identifier
pub type EventType = u32;

/// Identifier of an event target (window, tagged region, observed element)
pub type TargetId = u64;

/// The page-wide target used by window-level listeners
pub const WINDOW: TargetId = 0;

new_key_type! {
    /// Handle returned by [`EventDispatcher::register`]
    pub struct ListenerId;
}

/// Host event types understood by the motion layer
pub mod event_types {
    use super::EventType;

    pub const POINTER_MOVE: EventType = 1;
    pub const POINTER_ENTER: EventType = 2;
    pub const POINTER_LEAVE: EventType = 3;
    pub const CLICK: EventType = 4;
    pub const SCROLL: EventType = 10;
    pub const RESIZE: EventType = 11;
    /// Element bounds reported by the layout layer
    pub const LAYOUT: EventType = 20;
    /// Visible fraction reported by a host intersection observer
    pub const INTERSECTION: EventType = 21;

    // Page lifecycle
    pub const MOUNT: EventType = 30;
    pub const UNMOUNT: EventType = 31;
}

/// A host event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub target: TargetId,
    pub data: EventData,
    /// Host timestamp in milliseconds
    pub timestamp: f64,
    pub propagation_stopped: bool,
}

/// Event-specific data
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EventData {
    /// Pointer position in viewport coordinates
    Pointer { x: f32, y: f32 },
    /// Absolute vertical scroll offset of the page
    Scroll { offset_y: f32 },
    Resize { width: f32, height: f32 },
    /// Element bounds in page coordinates
    Bounds { top: f32, height: f32 },
    /// Fraction of the element inside the (margin-adjusted) viewport
    Visibility { fraction: f32 },
    None,
}

impl Event {
    fn with(event_type: EventType, target: TargetId, data: EventData) -> Self {
        Self {
            event_type,
            target,
            data,
            timestamp: 0.0,
            propagation_stopped: false,
        }
    }

    pub fn pointer_move(x: f32, y: f32) -> Self {
        Self::with(event_types::POINTER_MOVE, WINDOW, EventData::Pointer { x, y })
    }

    pub fn pointer_enter(target: TargetId) -> Self {
        Self::with(event_types::POINTER_ENTER, target, EventData::None)
    }

    pub fn pointer_leave(target: TargetId) -> Self {
        Self::with(event_types::POINTER_LEAVE, target, EventData::None)
    }

    pub fn click(target: TargetId) -> Self {
        Self::with(event_types::CLICK, target, EventData::None)
    }

    pub fn scroll(offset_y: f32) -> Self {
        Self::with(event_types::SCROLL, WINDOW, EventData::Scroll { offset_y })
    }

    pub fn resize(width: f32, height: f32) -> Self {
        Self::with(event_types::RESIZE, WINDOW, EventData::Resize { width, height })
    }

    pub fn layout(target: TargetId, top: f32, height: f32) -> Self {
        Self::with(event_types::LAYOUT, target, EventData::Bounds { top, height })
    }

    pub fn intersection(target: TargetId, fraction: f32) -> Self {
        Self::with(
            event_types::INTERSECTION,
            target,
            EventData::Visibility { fraction },
        )
    }

    /// Attach the host timestamp
    pub fn at(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// Event handler function type
///
/// Handlers run on the animation thread and may own single-threaded state
/// such as a [`SignalWriter`](crate::signal::SignalWriter).
pub type EventHandler = Box<dyn FnMut(&mut Event)>;

struct Listener {
    key: (TargetId, EventType),
    handler: EventHandler,
}

/// Dispatches events to registered handlers
pub struct EventDispatcher {
    listeners: SlotMap<ListenerId, Listener>,
    routes: FxHashMap<(TargetId, EventType), SmallVec<[ListenerId; 2]>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            listeners: SlotMap::with_key(),
            routes: FxHashMap::default(),
        }
    }

    /// Register an event handler for a target and event type
    pub fn register<F>(&mut self, target: TargetId, event_type: EventType, handler: F) -> ListenerId
    where
        F: FnMut(&mut Event) + 'static,
    {
        let key = (target, event_type);
        let id = self.listeners.insert(Listener {
            key,
            handler: Box::new(handler),
        });
        self.routes.entry(key).or_default().push(id);
        tracing::trace!(target, event_type, "listener registered");
        id
    }

    /// Remove a handler; returns false if it was already removed
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let Some(listener) = self.listeners.remove(id) else {
            return false;
        };
        if let Some(route) = self.routes.get_mut(&listener.key) {
            route.retain(|l| *l != id);
            if route.is_empty() {
                self.routes.remove(&listener.key);
            }
        }
        true
    }

    /// Dispatch an event to all handlers registered for its target and type
    ///
    /// Returns the number of handlers that ran.
    pub fn dispatch(&mut self, event: &mut Event) -> usize {
        let Some(route) = self.routes.get(&(event.target, event.event_type)) else {
            return 0;
        };
        let mut delivered = 0;
        for id in route.iter() {
            if event.propagation_stopped {
                break;
            }
            if let Some(listener) = self.listeners.get_mut(*id) {
                (listener.handler)(event);
                delivered += 1;
            }
        }
        delivered
    }

    /// Number of registered handlers
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Drop every handler
    pub fn clear(&mut self) {
        self.listeners.clear();
        self.routes.clear();
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_dispatch_to_matching_route_only() {
        let mut dispatcher = EventDispatcher::new();
        let moves = Rc::new(Cell::new(0));
        let moves_clone = moves.clone();

        dispatcher.register(WINDOW, event_types::POINTER_MOVE, move |_| {
            moves_clone.set(moves_clone.get() + 1);
        });

        assert_eq!(dispatcher.dispatch(&mut Event::pointer_move(1.0, 2.0)), 1);
        assert_eq!(dispatcher.dispatch(&mut Event::scroll(100.0)), 0);
        assert_eq!(dispatcher.dispatch(&mut Event::pointer_enter(7)), 0);
        assert_eq!(moves.get(), 1);
    }

    #[test]
    fn test_unregister_removes_handler() {
        let mut dispatcher = EventDispatcher::new();
        let hits = Rc::new(Cell::new(0));
        let hits_clone = hits.clone();

        let id = dispatcher.register(WINDOW, event_types::SCROLL, move |_| {
            hits_clone.set(hits_clone.get() + 1);
        });
        dispatcher.dispatch(&mut Event::scroll(10.0));

        assert!(dispatcher.unregister(id));
        assert!(!dispatcher.unregister(id));
        dispatcher.dispatch(&mut Event::scroll(20.0));

        assert_eq!(hits.get(), 1);
        assert_eq!(dispatcher.listener_count(), 0);
        // The closure and its captured state are gone
        assert_eq!(Rc::strong_count(&hits), 1);
    }

    #[test]
    fn test_stop_propagation() {
        let mut dispatcher = EventDispatcher::new();
        let second_ran = Rc::new(Cell::new(false));
        let second_clone = second_ran.clone();

        dispatcher.register(3, event_types::CLICK, |event| event.stop_propagation());
        dispatcher.register(3, event_types::CLICK, move |_| second_clone.set(true));

        let mut event = Event::click(3);
        assert_eq!(dispatcher.dispatch(&mut event), 1);
        assert!(event.propagation_stopped);
        assert!(!second_ran.get());
    }

    #[test]
    fn test_handler_reads_event_data() {
        let mut dispatcher = EventDispatcher::new();
        let last = Rc::new(Cell::new((0.0f32, 0.0f32)));
        let last_clone = last.clone();

        dispatcher.register(WINDOW, event_types::POINTER_MOVE, move |event| {
            if let EventData::Pointer { x, y } = event.data {
                last_clone.set((x, y));
            }
        });

        dispatcher.dispatch(&mut Event::pointer_move(42.0, 24.0).at(16.0));
        assert_eq!(last.get(), (42.0, 24.0));
    }
}
