//! NEXUS Page Motion Layer
//!
//! Turns raw host input (pointer moves, scroll, hover, clicks, element layout
//! and visibility) into per-frame transform values for the NEXUS page:
//!
//! - **Cursor**: a spring-smoothed custom cursor that morphs between variants
//! - **Parallax**: scroll-driven transforms for the hero's decorative layers
//! - **Reveals**: one-shot entrance transitions as elements scroll into view
//! - **Overlay**: the full-screen menu's wipe and staggered entries
//! - **Loops**: marquee, scroll hint, badge spin and label pulse
//!
//! # Example
//!
//! ```rust
//! use nexus_core::Event;
//! use nexus_motion::{ContentTable, MotionConfig, PageSession};
//!
//! let mut session = PageSession::mount(MotionConfig::default(), ContentTable::default())?;
//! session.handle_event(Event::resize(1280.0, 800.0));
//! session.handle_event(Event::pointer_move(640.0, 400.0));
//!
//! let menu = session.target("menu-button").unwrap();
//! session.handle_event(Event::click(menu));
//!
//! let frame = session.frame(0.0).unwrap();
//! assert!(frame.overlay.visible);
//! # Ok::<(), nexus_core::MotionError>(())
//! ```

pub mod color;
pub mod config;
pub mod content;
pub mod cursor;
pub mod intro;
pub mod loops;
pub mod overlay;
pub mod pointer;
pub mod reveal;
pub mod scroll;
pub mod session;

pub use color::Rgba;
pub use config::MotionConfig;
pub use content::ContentTable;
pub use cursor::{CursorFrame, CursorPreset, CursorStateMachine, CursorVariant, RegionTag};
pub use intro::{ElementFrame, IntroSequence};
pub use loops::{LoopAnimator, LoopBinding, LoopProperty, LoopSample, MarqueeBand};
pub use overlay::{OverlayEvent, OverlayFrame, OverlayPhase, OverlayTransition};
pub use pointer::{PointerSample, PointerTracker, SpringSmoother};
pub use reveal::{
    ElementBounds, RevealEntry, RevealId, RevealOptions, RevealPolicy, Viewport,
    ViewportRevealTrigger,
};
pub use scroll::{LayerProperty, LayerTransform, ParallaxLayer, ScrollMapping, ScrollTransformPipeline};
pub use session::{Frame, PageSession, TargetAction};
