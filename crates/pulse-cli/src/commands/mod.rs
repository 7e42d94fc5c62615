//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `insights` - One-shot evaluation of a snapshot file
//! - `watch` - Timer-driven rotation through a snapshot's insights
//! - `status` - Rule listing and resolved configuration

pub mod insights;
pub mod status;
pub mod watch;

// Re-export command functions for main.rs
pub use insights::*;
pub use status::*;
pub use watch::*;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use pulse_core::{ConfigSource, InsightConfig, Severity};

/// Resolve config from an explicit path or the default override location
pub fn load_config(path: Option<&Path>) -> Result<(InsightConfig, ConfigSource)> {
    match path {
        Some(path) => InsightConfig::load_from(Some(path))
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => InsightConfig::load().context("Failed to load insight config"),
    }
}

/// Parse an RFC 3339 evaluation time, defaulting to the current time
pub fn parse_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(s) => Ok(DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("Invalid --now '{}', expected RFC 3339", s))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

/// Badge shown next to each insight, keyed by severity
pub fn severity_badge(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "🔴 CRITICAL",
        Severity::Warning => "🟠 WARNING ",
        Severity::Info => "🔵 INFO    ",
    }
}
