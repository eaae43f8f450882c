//! `catalog-events`: in-process publish/subscribe.
//!
//! Used as the transport for UI notifications: producers publish, each
//! renderer holds its own `Subscription` and drains it on its own schedule.

pub mod bus;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
