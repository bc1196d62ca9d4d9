//! CLI adapter for docsift
//!
//! Provides the command-line interface over the core indexing and
//! search services. Depends on `core/`; nothing in `core/` depends on
//! it.
//!
//! ```text
//!   +------------------+
//!   |      cli/        |
//!   |  (clap adapter)  |
//!   +--------+---------+
//!            |
//!            v
//!   +------------------+
//!   |     core/        |
//!   |  (domain logic)  |
//!   +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// docsift - full-text search for markdown documentation
///
/// Index a docs tree (local or published) into heading-scoped
/// sections and search it with weighted keyword matching.
#[derive(Parser, Debug)]
#[command(name = "docsift")]
#[command(version)]
#[command(about = "Full-text search for markdown documentation", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build and persist the search index
    #[command(name = "build-index")]
    BuildIndex(commands::BuildArgs),

    /// Search the index (built first if missing or expired)
    Search(commands::SearchArgs),

    /// Show the documents an indexing pass would cover
    #[command(name = "list-paths")]
    ListPaths(commands::PathsArgs),

    /// Remove the persisted index of a namespace
    #[command(name = "clear-index")]
    ClearIndex(commands::ClearArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  docsift completions bash > ~/.local/share/bash-completion/completions/docsift
    ///   zsh:   docsift completions zsh > ~/.zfunc/_docsift
    ///   fish:  docsift completions fish > ~/.config/fish/completions/docsift.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::{migrate_legacy_paths, XdgDirs};
    use std::sync::Arc;

    // Handle completions command early (doesn't need services)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    // Initialize XDG directories
    let xdg = XdgDirs::new();
    xdg.ensure_dirs_exist()?;
    xdg.log_paths();

    // Run migration from legacy paths (if needed)
    if let Err(e) = migrate_legacy_paths(&xdg) {
        output::print_warning(&format!("Migration issue: {e}"));
    }

    // Load configuration
    let config = Config::load_with_xdg(&xdg)?;
    config.log_config();

    // Create services
    let services = Arc::new(Services::new(config));

    // Execute command
    match cli.command {
        Commands::BuildIndex(args) => commands::build::execute(args, &services, cli.format).await,
        Commands::Search(args) => commands::search::execute(args, &services, cli.format).await,
        Commands::ListPaths(args) => commands::paths::execute(args, &services, cli.format).await,
        Commands::ClearIndex(args) => commands::clear::execute(args, &services, cli.format).await,
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format).await,
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
