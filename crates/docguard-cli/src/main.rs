//! docguard CLI - Command-line interface for docguard
//!
//! Provides commands for:
//! - Replaying the access gateway walkthrough
//! - Viewing and editing records as a given principal
//! - Listing the records held by the store
//! - Inspecting configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod context;
mod output;

use commands::{
    config::ConfigCommand, demo::DemoCommand, edit::EditCommand, records::RecordsCommand,
    view::ViewCommand,
};
use context::AppContext;
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "docguard", version, about = "Clearance-gated access to sensitive records")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay the manager/employee walkthrough and print the audit log
    Demo(DemoCommand),
    /// View a record as a principal
    View(ViewCommand),
    /// Replace a record's content as a principal
    Edit(EditCommand),
    /// List the records held by the store
    Records(RecordsCommand),
    /// View and check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = AppContext::load(cli.config.as_deref())?;

    // Setup tracing
    let env_filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&ctx.config.logging.level)),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match cli.command {
        Commands::Demo(cmd) => cmd.execute(&ctx, format).await,
        Commands::View(cmd) => cmd.execute(&ctx, format).await,
        Commands::Edit(cmd) => cmd.execute(&ctx, format).await,
        Commands::Records(cmd) => cmd.execute(&ctx, format).await,
        Commands::Config(cmd) => cmd.execute(&ctx, format).await,
    }
}
