//! Event system.
//!
//! - `GameEvent`: closed set of things observers can see
//! - `EventKind`: payload-free discriminant used as subscription key
//! - `EventBus` / `SharedEventBus`: synchronous, ordered delivery

mod bus;
mod event;

pub use bus::{EventBus, EventBusError, EventListener, ListenerError, ListenerId, SharedEventBus};
pub use event::{EventKind, GameEvent};
