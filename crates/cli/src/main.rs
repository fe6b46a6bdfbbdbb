//! Unit balance configuration tool.
//!
//! Generates the per-unit balance configuration from a game snapshot dump and
//! audits configurations against the category schema.

mod commands;
mod settings;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{Audit, Generate, Inspect, Schema};

/// Unit balance configuration generator and auditor
#[derive(Parser)]
#[command(name = "unit-balance")]
#[command(about = "Generate and audit unit balance configurations", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Build the default configuration from a snapshot dump
    Generate(Generate),

    /// Audit an existing configuration document
    Audit(Audit),

    /// Show one unit's generated entry and its schema
    Inspect(Inspect),

    /// Print the derived per-category field schema
    Schema(Schema),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for UNIT_BALANCE_* variables)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Generate(cmd) => cmd.execute(),
        Command::Audit(cmd) => cmd.execute(),
        Command::Inspect(cmd) => cmd.execute(),
        Command::Schema(cmd) => cmd.execute(),
    }
}
