//! Clear-index command - remove a persisted index

use crate::cli::output::{colors, print_success};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::storage::{expires_key, index_key};
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the clear-index command
#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Namespace to clear (defaults to the configured namespace)
    #[arg(long, short = 'n')]
    pub namespace: Option<String>,
}

/// Clear result
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub namespace: Option<String>,
    pub removed_keys: Vec<String>,
}

/// Execute the clear-index command
pub async fn execute(
    args: ClearArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let namespace = match args.namespace {
        Some(ns) => Some(ns).filter(|ns| !ns.is_empty()),
        None => services.namespace().map(str::to_string),
    };
    let ns = namespace.as_deref();

    services.store.clear_persisted(ns)?;
    services.store.clear_namespace(ns);

    let response = ClearResponse {
        removed_keys: vec![expires_key(ns), index_key(ns)],
        namespace,
    };

    match format {
        OutputFormat::Human => {
            print_success(&format!(
                "Cleared index for namespace {}",
                colors::namespace(response.namespace.as_deref().unwrap_or("(default)"))
            ));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
