//! Config command - show current configuration

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::config::NoDataText;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Also show request header values (hidden by default)
    #[arg(long)]
    pub show_secrets: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub config_file: String,
    pub index_dir: String,
    pub search: SearchSection,
    pub source: SourceSection,
    pub limits: LimitsSection,
}

#[derive(Debug, Serialize)]
pub struct SearchSection {
    pub paths: String,
    pub depth: u8,
    pub max_age_ms: i64,
    pub namespace: Option<String>,
    pub path_namespaces: Option<Vec<String>>,
    pub cache_policy: String,
    pub no_data: NoDataText,
}

#[derive(Debug, Serialize)]
pub struct SourceSection {
    pub root: String,
    pub base_url: Option<String>,
    pub sidebar: String,
    pub request_headers: Vec<(String, String)>,
}

#[derive(Debug, Serialize)]
pub struct LimitsSection {
    pub request_timeout_sec: u64,
    pub max_results: usize,
}

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = &services.config;
    let xdg = crate::core::xdg::XdgDirs::new();

    let response = ConfigResponse {
        config_file: xdg.config_file().to_string_lossy().into_owned(),
        index_dir: config.storage.index_dir.to_string_lossy().into_owned(),
        search: SearchSection {
            paths: config.search.paths.to_string(),
            depth: config.search.depth,
            max_age_ms: config.search.max_age_ms,
            namespace: config.search.namespace.clone(),
            path_namespaces: config.search.path_namespaces.clone(),
            cache_policy: config.search.cache_policy.to_string(),
            no_data: config.search.no_data.clone(),
        },
        source: SourceSection {
            root: config.source.root.to_string_lossy().into_owned(),
            base_url: config.source.base_url.clone(),
            sidebar: config.source.sidebar.clone(),
            request_headers: config
                .source
                .request_headers
                .iter()
                .map(|(name, value)| {
                    let shown = if args.show_secrets { value.clone() } else { "***".to_string() };
                    (name.clone(), shown)
                })
                .collect(),
        },
        limits: LimitsSection {
            request_timeout_sec: config.limits.request_timeout_sec,
            max_results: config.limits.max_results,
        },
    };

    match format {
        OutputFormat::Human => {
            println!("{}", colors::label("Configuration:"));
            println!("  config_file: {}", response.config_file);
            println!("  index_dir: {}", response.index_dir);
            println!("  search:");
            println!("    paths: {}", response.search.paths);
            println!("    depth: {}", response.search.depth);
            println!("    max_age_ms: {}", response.search.max_age_ms);
            println!(
                "    namespace: {}",
                response.search.namespace.as_deref().unwrap_or("(default)")
            );
            if let Some(namespaces) = &response.search.path_namespaces {
                println!("    path_namespaces: {namespaces:?}");
            }
            println!("    cache_policy: {}", response.search.cache_policy);
            println!("    no_data: {}", response.search.no_data);
            println!("  source:");
            match &response.source.base_url {
                Some(url) => println!("    base_url: {url}"),
                None => println!("    root: {}", response.source.root),
            }
            println!("    sidebar: {}", response.source.sidebar);
            for (name, value) in &response.source.request_headers {
                println!("    header: {name}: {value}");
            }
            println!("  limits:");
            println!(
                "    request_timeout_sec: {}",
                response.limits.request_timeout_sec
            );
            println!("    max_results: {}", response.limits.max_results);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
