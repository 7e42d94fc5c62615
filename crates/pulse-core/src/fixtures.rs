//! Dashboard snapshot loading
//!
//! Boundary between the dashboard's JSON fixtures and the insight engine.
//! Range checks live here so the engine can assume well-formed input.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{KpiSnapshot, ThreadRecord};

const SENTIMENT_RANGE: std::ops::RangeInclusive<f64> = 1.0..=5.0;

/// One dashboard load: KPIs (absent before the first successful load) and threads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    #[serde(default)]
    pub kpi: Option<KpiSnapshot>,
    #[serde(default)]
    pub threads: Vec<ThreadRecord>,
}

/// Read and validate a snapshot file
pub fn load_snapshot(path: &Path, now: DateTime<Utc>) -> Result<DashboardSnapshot> {
    let content = fs::read_to_string(path)?;
    parse_snapshot(&content, now)
}

/// Parse and validate snapshot JSON
///
/// Out-of-range KPI rates and future activity timestamps are rejected.
/// Sentiments outside 1-5 are treated as absent.
pub fn parse_snapshot(json: &str, now: DateTime<Utc>) -> Result<DashboardSnapshot> {
    let mut snapshot: DashboardSnapshot = serde_json::from_str(json)?;

    if let Some(kpi) = &snapshot.kpi {
        validate_kpi(kpi)?;
    }

    for (i, thread) in snapshot.threads.iter_mut().enumerate() {
        if thread.last_message_at > now {
            return Err(Error::InvalidData(format!(
                "thread {} has lastMessageAt {} after evaluation time {}",
                describe(thread, i),
                thread.last_message_at,
                now
            )));
        }

        if let Some(sentiment) = thread.overall_sentiment {
            if !sentiment.is_finite() || !SENTIMENT_RANGE.contains(&sentiment) {
                tracing::warn!(
                    thread = %describe(thread, i),
                    sentiment,
                    "Sentiment outside 1-5, treating as absent"
                );
                thread.overall_sentiment = None;
            }
        }
    }

    tracing::debug!(
        has_kpi = snapshot.kpi.is_some(),
        threads = snapshot.threads.len(),
        "Loaded dashboard snapshot"
    );

    Ok(snapshot)
}

fn validate_kpi(kpi: &KpiSnapshot) -> Result<()> {
    percentage("slaBreachRiskPct", kpi.sla_breach_risk_pct)?;
    percentage("escalationRatePct", kpi.escalation_rate_pct)?;

    if let Some(score) = kpi.business_impact_score {
        non_negative("businessImpactScore", score)?;
    }
    if let Some(days) = kpi.avg_resolution_time_days {
        non_negative("avgResolutionTimeDays", days)?;
    }
    Ok(())
}

fn percentage(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidData(format!(
            "{} must be within 0-100, got {}",
            field, value
        )))
    }
}

fn non_negative(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidData(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )))
    }
}

fn describe(thread: &ThreadRecord, index: usize) -> String {
    thread
        .thread_id
        .clone()
        .unwrap_or_else(|| format!("#{}", index))
}
