//! NEXUS Animation Primitives
//!
//! Springs, easing curves, tweens, keyframe tracks and loop timelines used by
//! the page motion layer.
//!
//! # Features
//!
//! - **Spring Physics**: damped springs with bounded-step integration
//! - **Tweens**: eased property transitions that reverse from their live value
//! - **Keyframe Tracks**: multi-point value curves sampled by progress
//! - **Loop Timelines**: periodic progress as a pure function of elapsed time
//! - **Stagger**: per-item delay schedules for lists

pub mod clock;
pub mod easing;
pub mod keyframe;
pub mod presets;
pub mod properties;
pub mod spring;
pub mod stagger;
pub mod timeline;
pub mod tween;

pub use clock::{FrameClock, FrameTime};
pub use easing::Easing;
pub use keyframe::{Keyframe, KeyframeTrack};
pub use presets::{MotionPreset, MotionPresets};
pub use properties::MotionProperties;
pub use spring::{Spring, SpringConfig};
pub use stagger::{StaggerConfig, StaggerOrder, StaggerSlot};
pub use timeline::{LoopTimeline, Repeat};
pub use tween::{TransitionSpec, Tween, TweenState};
