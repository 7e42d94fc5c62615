//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pulse - Operational insight ticker for the analytics dashboard
#[derive(Parser)]
#[command(name = "pulse")]
#[command(about = "Derive operational alerts from dashboard KPI snapshots", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Insight config file
    ///
    /// Defaults to ~/.local/share/pulse/config/insights.toml when present,
    /// otherwise the built-in defaults are used.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate a dashboard snapshot once and print the insights
    Insights {
        /// Snapshot JSON file ({"kpi": {...}, "threads": [...]})
        #[arg(short, long)]
        file: PathBuf,

        /// Evaluation time as RFC 3339 (defaults to now)
        #[arg(long)]
        now: Option<String>,

        /// Print insights as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rotate through the insights of a snapshot until interrupted
    Watch {
        /// Snapshot JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Seconds each insight stays on screen (overrides config)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Re-read the snapshot every N seconds and restart the rotation
        #[arg(long)]
        refresh: Option<u64>,
    },

    /// List the insight rules in evaluation order
    Rules,

    /// Show the resolved insight configuration
    Config,
}
