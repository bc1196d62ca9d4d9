//! Completions command - generate shell completion scripts

use crate::cli::Cli;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

/// Arguments for the completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Command name the script completes (for renamed or aliased installs)
    #[arg(long)]
    pub bin_name: Option<String>,
}

/// Execute the completions command
pub fn execute(args: CompletionsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Cli::command();
    let bin_name = args
        .bin_name
        .unwrap_or_else(|| cmd.get_name().to_string());
    generate(args.shell, &mut cmd, bin_name, &mut io::stdout().lock());
    Ok(())
}
