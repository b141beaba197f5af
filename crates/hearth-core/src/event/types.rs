use std::any::Any;

use serde_json::Value;

use crate::event::Event;

/// Lifecycle events raised by the kernel during boot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelEvent {
    /// Providers are about to boot
    Booting,
    /// The boot sequence has completed
    Booted,
}

impl KernelEvent {
    pub const BOOTING: &'static str = "kernel.booting";
    pub const BOOTED: &'static str = "kernel.booted";
}

impl Event for KernelEvent {
    fn name(&self) -> &str {
        match self {
            KernelEvent::Booting => Self::BOOTING,
            KernelEvent::Booted => Self::BOOTED,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Application-defined event identified by name, carrying a JSON payload
#[derive(Debug, Clone, PartialEq)]
pub struct NamedEvent {
    pub name: String,
    pub payload: Value,
}

impl NamedEvent {
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

impl Event for NamedEvent {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
