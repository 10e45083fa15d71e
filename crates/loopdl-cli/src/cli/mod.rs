//! CLI for the loopdl option-resolution layer.
//!
//! Stands in for the out-of-scope presentation surface: raw field
//! values arrive as flags and leave as a resolved command description.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{run_defaults, run_resolve, run_sources, ResolveArgs, SourceArgs};

/// Top-level CLI for the loopdl resolution layer.
#[derive(Debug, Parser)]
#[command(name = "loopdl")]
#[command(about = "loopdl: option resolution for the loop-video download engine", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve raw option values into the engine command description.
    Resolve(ResolveArgs),

    /// Show the effective layered defaults and any configuration errors.
    Defaults,

    /// Parse free-text input fields and list the resulting sources.
    Sources(SourceArgs),
}

impl CliCommand {
    /// Parses the CLI and dispatches. Returns the process exit status.
    pub fn run_from_args() -> Result<i32> {
        let cli = Cli::parse();
        match cli.command {
            CliCommand::Resolve(args) => run_resolve(&args),
            CliCommand::Defaults => run_defaults(),
            CliCommand::Sources(args) => run_sources(&args),
        }
    }
}

#[cfg(test)]
mod tests;
