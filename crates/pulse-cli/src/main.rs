//! Pulse CLI - Operational insight ticker
//!
//! Usage:
//!   pulse insights --file snapshot.json   Evaluate once
//!   pulse watch --file snapshot.json      Rotate through insights
//!   pulse rules                           List rules
//!   pulse config                          Show resolved config

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Insights { file, now, json } => {
            commands::cmd_insights(config, &file, now.as_deref(), json)
        }
        Commands::Watch {
            file,
            interval,
            refresh,
        } => commands::cmd_watch(config, &file, interval, refresh).await,
        Commands::Rules => commands::cmd_rules(config),
        Commands::Config => commands::cmd_config(config),
    }
}
