//! # Hearth Kernel
//!
//! The `kernel` module boots a Hearth application.
//!
//! ## Key Responsibilities & Components:
//!
//! - **Boot sequence**: [`KernelBuilder`] collects the base path, provider
//!   definitions and configuration overrides; [`Kernel::boot`] loads the
//!   environment and configuration, registers aliases and providers, boots
//!   the bootable providers and starts the session.
//! - **Application**: [`Application`] owns the service container and the
//!   application paths.
//! - **Process-wide instance**: the `global` submodule holds the booted
//!   application for code that cannot receive it explicitly.
//! - **Error Handling**: [`Error`] aggregates every subsystem error, and
//!   boot failures carry the [`KernelLifecyclePhase`] they happened in.
pub mod application;
pub mod bootstrap;
pub mod constants;
pub mod error;
pub mod global;

pub use application::{AppPaths, Application, DEFAULT_ALIASES};
pub use bootstrap::{Kernel, KernelBuilder};
pub use error::{Error, KernelLifecyclePhase, Result};

#[cfg(test)]
mod tests;
