//! List-paths command - show the documents an indexing pass covers

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::config::PathsSetting;
use crate::core::indexer::dedupe_paths;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the list-paths command
#[derive(Args, Debug)]
pub struct PathsArgs {
    /// Override the configured paths setting
    #[arg(long, short = 'p')]
    pub paths: Option<PathsSetting>,
}

/// Resolved path list
#[derive(Debug, Serialize)]
pub struct PathsResponse {
    pub setting: String,
    pub requested: usize,
    pub paths: Vec<String>,
}

/// Execute the list-paths command
pub async fn execute(
    args: PathsArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let setting = args
        .paths
        .unwrap_or_else(|| services.config.search.paths.clone());

    let resolved = services.path_resolver()?.resolve(&setting).await?;
    let response = PathsResponse {
        setting: setting.to_string(),
        requested: resolved.len(),
        paths: dedupe_paths(&resolved),
    };

    match format {
        OutputFormat::Human => {
            println!(
                "{} document(s) from {} ({} before de-duplication):",
                colors::number(&response.paths.len().to_string()),
                colors::label(&response.setting),
                colors::number(&response.requested.to_string())
            );
            for path in &response.paths {
                println!("  {}", colors::file_path(path));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
