//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a specific CLI command.

pub mod build;
pub mod clear;
pub mod completions;
pub mod config;
pub mod paths;
pub mod search;

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::services::Services;
use std::sync::Arc;

// Re-export argument types for use in mod.rs
pub use build::BuildArgs;
pub use clear::ClearArgs;
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use paths::PathsArgs;
pub use search::SearchArgs;

/// Services over a copy of the configuration with command-line
/// overrides applied; the shared services when nothing changes.
pub(crate) fn with_overrides(
    services: &Arc<Services>,
    apply: impl FnOnce(&mut Config) -> bool,
) -> Result<Arc<Services>> {
    let mut config = (*services.config).clone();
    if !apply(&mut config) {
        return Ok(Arc::clone(services));
    }
    config.validate()?;
    Ok(Arc::new(Services::new(config)))
}
