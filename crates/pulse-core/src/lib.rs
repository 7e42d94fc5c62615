//! Pulse Core Library
//!
//! Shared functionality for the Pulse operational insight ticker:
//! - Input records for KPI snapshots and conversation threads
//! - Insight engine that turns those inputs into severity-tagged alerts
//! - Rotation state machine and the timer-driven insight ticker
//! - Layered TOML configuration for fallback values and rotation period
//! - Boundary loader for dashboard snapshot fixtures

pub mod clock;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod insights;
pub mod models;
pub mod rotation;
pub mod ticker;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigSource, FallbackDefaults, InsightConfig};
pub use error::{Error, Result};
pub use fixtures::{load_snapshot, parse_snapshot, DashboardSnapshot};
pub use insights::{Insight, InsightEngine, Rule, RuleId, Severity};
pub use models::{KpiSnapshot, Priority, ResolutionStatus, ThreadRecord};
pub use rotation::{Rotation, RotationState};
pub use ticker::{InsightTicker, TickerFrame};
