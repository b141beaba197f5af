//! Process-wide application handle.
//!
//! Passing the [`Application`] explicitly is the primary API. This slot exists
//! for code that cannot be handed one; the first installed application wins.
use std::sync::{Arc, OnceLock};

use crate::kernel::application::Application;
use crate::kernel::error::{Error, Result};

static APP: OnceLock<Arc<Application>> = OnceLock::new();

/// Install `app` as the process-wide application. Returns false if one was
/// already installed, in which case `app` is dropped.
pub fn install(app: Arc<Application>) -> bool {
    let installed = APP.set(app).is_ok();
    if !installed {
        log::debug!("An application is already installed, ignoring");
    }
    installed
}

/// The installed application.
pub fn app() -> Result<Arc<Application>> {
    APP.get()
        .cloned()
        .ok_or(Error::InstanceUnavailable { what: "Application" })
}

pub fn is_installed() -> bool {
    APP.get().is_some()
}
