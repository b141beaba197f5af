//! # Hearth Events
//!
//! Name-keyed event dispatch. Listeners are [`AsyncEventHandler`]s registered
//! against an event name with an [`EventPriority`]; the [`EventDispatcher`]
//! runs them highest priority first and stops early when one returns
//! [`EventResult::Stop`].
pub mod dispatcher;
pub mod types;

use std::any::Any;
use std::fmt;

use async_trait::async_trait;

/// Identifier returned when a listener is registered
pub type ListenerId = u64;

/// Listener priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum EventPriority {
    /// Lowest priority, processed last
    Low = 0,
    /// Normal priority
    #[default]
    Normal = 1,
    /// High priority, processed first
    High = 2,
    /// Critical priority, processed before everything else
    Critical = 3,
}

/// Result of event processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was processed and propagation should continue
    Continue,
    /// Event was processed and propagation should stop
    Stop,
}

/// Core event trait
pub trait Event: Any + fmt::Debug + Send + Sync {
    /// Name listeners are registered against
    fn name(&self) -> &str;

    /// Cast to Any for downcasting
    fn as_any(&self) -> &dyn Any;
}

/// Asynchronous event handler trait
#[async_trait]
pub trait AsyncEventHandler: Send + Sync {
    async fn handle(&self, event: &dyn Event) -> EventResult;
}

pub use dispatcher::{
    async_event_handler, sync_event_handler, typed_event_handler, BoxFuture, EventDispatcher,
};
pub use types::{KernelEvent, NamedEvent};

#[cfg(test)]
mod tests;
