//! Search command - query the documentation index

use crate::cli::output::{colors, render_html};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query (words, hyphens and slashes split it into keywords)
    pub query: String,

    /// Maximum number of results (defaults to limits.max_results)
    #[arg(long, short = 'k')]
    pub limit: Option<usize>,

    /// Rebuild the index even if the persisted copy is fresh
    #[arg(long)]
    pub rebuild: bool,

    /// Only show result URLs (no snippets)
    #[arg(long)]
    pub urls_only: bool,

    /// Route path used to pick the no-results text
    #[arg(long, default_value = "/")]
    pub route: String,
}

/// Search result item
#[derive(Debug, Serialize)]
pub struct SearchResultItem {
    pub rank: usize,
    pub title: String,
    pub url: String,
    pub score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Search response
#[derive(Debug, Serialize)]
pub struct SearchResponseOutput {
    pub query: String,
    pub total_results: usize,
    pub results: Vec<SearchResultItem>,
}

/// Execute the search command
pub async fn execute(
    args: SearchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.rebuild {
        services.build_index().await?;
    } else {
        services.ensure_index().await?;
    }

    let limit = args
        .limit
        .unwrap_or(services.config.limits.max_results)
        .max(1);
    let results = services.search.search_limited(&args.query, limit);
    let total_results = results.len();

    let output = SearchResponseOutput {
        query: args.query.clone(),
        total_results,
        results: results
            .into_iter()
            .enumerate()
            .map(|(i, r)| SearchResultItem {
                rank: i + 1,
                title: r.title,
                url: r.url,
                score: r.score,
                content: if args.urls_only { None } else { Some(r.content) },
            })
            .collect(),
    };

    match format {
        OutputFormat::Human => {
            if output.results.is_empty() {
                println!("{}", services.config.search.no_data.resolve(&args.route));
                return Ok(());
            }

            println!(
                "Found {} result(s) for '{}':\n",
                colors::number(&output.total_results.to_string()),
                colors::label(&args.query)
            );

            for result in &output.results {
                if args.urls_only {
                    println!("{}", colors::file_path(&result.url));
                    continue;
                }

                let title = if result.title.is_empty() {
                    result.url.clone()
                } else {
                    render_html(&result.title)
                };
                println!(
                    "[{}] {} {} {}",
                    colors::rank(&result.rank.to_string()),
                    colors::label(&title),
                    colors::file_path(&result.url),
                    colors::score(&format!("(score: {})", result.score))
                );
                if let Some(content) = result.content.as_deref().filter(|c| !c.is_empty()) {
                    for line in content.lines().take(5) {
                        println!("    {}", render_html(line));
                    }
                }
                println!();
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
