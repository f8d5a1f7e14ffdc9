//! NEXUS Core Runtime
//!
//! Foundational primitives shared by the motion layer:
//!
//! - **Signals**: single-writer broadcast values (pointer sample, scroll offset)
//!   with explicit mount/teardown instead of ambient globals
//! - **State Machines**: flat typed statecharts for cursor and overlay states
//! - **Event Dispatch**: host input events routed to registered listeners
//!
//! # Example
//!
//! ```rust
//! use nexus_core::signal::signal;
//!
//! let (writer, reader) = signal(0.0f32);
//! writer.set(120.0);
//! assert_eq!(reader.get(), 120.0);
//!
//! drop(writer);
//! assert!(!reader.is_live());
//! ```

pub mod error;
pub mod events;
pub mod fsm;
pub mod signal;

pub use error::{MotionError, Result};
pub use events::{Event, EventData, EventDispatcher, EventType, ListenerId, TargetId, WINDOW};
pub use fsm::{StateMachine, Transition};
pub use signal::{signal, SignalReader, SignalWriter};
