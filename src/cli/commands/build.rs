//! Build command - index documents and persist the result

use crate::cli::output::{colors, format_duration, format_expiry, print_header};
use crate::cli::OutputFormat;
use crate::core::config::{CachePolicy, PathsSetting};
use crate::core::services::Services;
use crate::core::types::BuildReport;
use clap::Args;
use std::sync::Arc;

/// Arguments for the build-index command
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Documents to index: "auto", a comma-separated list, or a *.json manifest
    #[arg(long, short = 'p')]
    pub paths: Option<PathsSetting>,

    /// Namespace for the persisted index
    #[arg(long, short = 'n')]
    pub namespace: Option<String>,

    /// Deepest heading level that starts a new section (1-6)
    #[arg(long, short = 'd')]
    pub depth: Option<u8>,

    /// Reuse documents from a fresh persisted index instead of refetching
    #[arg(long)]
    pub trust_fresh: bool,
}

/// Execute the build-index command
pub async fn execute(
    args: BuildArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let services = super::with_overrides(services, |config| {
        let mut changed = false;
        if let Some(paths) = args.paths.clone() {
            config.search.paths = paths;
            changed = true;
        }
        if let Some(namespace) = args.namespace.clone() {
            config.search.namespace = Some(namespace).filter(|ns| !ns.is_empty());
            changed = true;
        }
        if let Some(depth) = args.depth {
            config.search.depth = depth;
            changed = true;
        }
        if args.trust_fresh {
            config.search.cache_policy = CachePolicy::TrustFresh;
            changed = true;
        }
        changed
    })?;

    let report = services.build_index().await?;

    match format {
        OutputFormat::Human => print_report(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn print_report(report: &BuildReport) {
    print_header("Index built");
    println!(
        "  Namespace: {}",
        colors::namespace(report.namespace.as_deref().unwrap_or("(default)"))
    );
    println!(
        "  Documents: {} indexed, {} failed, {} reused",
        colors::number(&report.documents_indexed.to_string()),
        colors::number(&report.documents_failed.to_string()),
        colors::number(&report.documents_reused.to_string()),
    );
    println!(
        "  Paths:     {} unique of {} requested",
        colors::number(&report.paths_unique.to_string()),
        colors::number(&report.paths_requested.to_string()),
    );
    println!(
        "  Entries:   {}",
        colors::number(&report.entries_created.to_string())
    );
    println!(
        "  Duration:  {}",
        colors::number(&format_duration(report.duration_ms as f64 / 1000.0))
    );

    match report.expires_at {
        Some(expires_at) if report.persisted => println!(
            "  Persisted: {}",
            colors::success(&format!(
                "yes, expires {}",
                format_expiry(expires_at, chrono::Utc::now().timestamp_millis())
            ))
        ),
        _ => println!("  Persisted: {}", colors::warning("no (in memory only)")),
    }

    if report.documents_failed > 0 {
        println!(
            "\n{}",
            colors::dim("Some documents could not be fetched; see the warnings above")
        );
    }
}
