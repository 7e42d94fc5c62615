//! Input records supplied by the dashboard's data layer
//!
//! Field names follow the camelCase shape of the upstream analytics JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate KPI counters and rates for the current dashboard window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSnapshot {
    /// Percentage of workload estimated to breach SLA
    pub sla_breach_risk_pct: f64,
    /// Monetary weighting factor per at-risk thread
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_impact_score: Option<f64>,
    /// Items awaiting internal action
    #[serde(default)]
    pub internal_pending_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_resolution_time_days: Option<f64>,
    #[serde(default)]
    pub escalation_rate_pct: f64,
    #[serde(default)]
    pub escalation_count: u64,
}

/// Thread priority as tagged by the triage matrix
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    P1,
    P2,
    P3,
    P4,
    /// Any tag the triage matrix adds later
    Other(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
            Self::P4 => "P4",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        match s.trim().to_uppercase().as_str() {
            "P1" => Self::P1,
            "P2" => Self::P2,
            "P3" => Self::P3,
            "P4" => Self::P4,
            _ => Self::Other(s),
        }
    }
}

impl From<Priority> for String {
    fn from(p: Priority) -> Self {
        p.as_str().to_string()
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err("Empty priority".to_string());
        }
        Ok(Self::from(s.to_string()))
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a thread sits in its resolution lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResolutionStatus {
    Open,
    Closed,
    /// Intermediate states (pending, awaiting-customer, ...)
    Other(String),
}

impl ResolutionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Other(status) => status,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl From<String> for ResolutionStatus {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "open" => Self::Open,
            "closed" => Self::Closed,
            _ => Self::Other(s),
        }
    }
}

impl From<ResolutionStatus> for String {
    fn from(status: ResolutionStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single conversation thread (email, chat, ticket, social or call)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    pub priority: Priority,
    /// Sentiment on a 1-5 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_sentiment: Option<f64>,
    pub resolution_status: ResolutionStatus,
    pub last_message_at: DateTime<Utc>,
}

impl ThreadRecord {
    pub fn new(
        priority: Priority,
        resolution_status: ResolutionStatus,
        last_message_at: DateTime<Utc>,
    ) -> Self {
        Self {
            thread_id: None,
            priority,
            overall_sentiment: None,
            resolution_status,
            last_message_at,
        }
    }

    pub fn with_id(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }

    pub fn with_sentiment(mut self, sentiment: f64) -> Self {
        self.overall_sentiment = Some(sentiment);
        self
    }
}
