//! docsift CLI - search markdown documentation from the terminal
//!
//! # Examples
//!
//! ```bash
//! # Index the docs in the current directory (sidebar links or *.md)
//! docsift build-index
//!
//! # Index a published site under a namespace
//! DOCSIFT_BASE_URL=https://docs.example.com docsift build-index -n v2
//!
//! # Search (builds the index first if it is missing or expired)
//! docsift search "quick start"
//!
//! # Show configuration
//! docsift show-config
//! ```

use clap::Parser;
use docsift::cli::{run, Cli};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging() {
    let json = std::env::var("DOCSIFT_LOG_JSON").is_ok_and(|v| v == "1" || v == "true");

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "docsift=warn".into()))
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
