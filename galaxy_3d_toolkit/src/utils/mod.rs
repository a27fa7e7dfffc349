//! Small shared helpers

mod event;

pub use event::{EventHandlers, SubscriptionId};
