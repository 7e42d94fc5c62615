//! Core types for the Insight Engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identifiers of the built-in rules, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    /// Threads likely to miss their SLA today
    SlaBreach,
    /// Hours of work waiting on internal decisions
    DecisionDebt,
    /// Surge of P1 threads
    IntentSpike,
    /// Share of threads with negative sentiment
    Friction,
    /// Escalation rate above tolerance
    Escalation,
    /// Open threads with no recent activity
    Silent,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::SlaBreach => "sla-breach",
            RuleId::DecisionDebt => "decision-debt",
            RuleId::IntentSpike => "intent-spike",
            RuleId::Friction => "friction",
            RuleId::Escalation => "escalation",
            RuleId::Silent => "silent",
        }
    }

    pub fn all() -> &'static [RuleId] {
        &[
            RuleId::SlaBreach,
            RuleId::DecisionDebt,
            RuleId::IntentSpike,
            RuleId::Friction,
            RuleId::Escalation,
            RuleId::Silent,
        ]
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RuleId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleId::all()
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("Unknown rule: {}", s))
    }
}

/// Severity level of an insight
///
/// No built-in rule emits `Info` yet; display surfaces still style it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Info => 1,
            Severity::Warning => 2,
            Severity::Critical => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(Severity::Critical),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// A rendered alert produced by one rule in one evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub id: RuleId,
    pub text: String,
    pub severity: Severity,
}

impl Insight {
    pub fn new(id: RuleId, severity: Severity, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            severity,
        }
    }
}

/// Most urgent severity in a list, if any
pub fn highest_severity(insights: &[Insight]) -> Option<Severity> {
    insights
        .iter()
        .map(|i| i.severity)
        .max_by_key(|s| s.priority())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_id_strings() {
        assert_eq!(RuleId::SlaBreach.as_str(), "sla-breach");
        assert_eq!(RuleId::from_str("decision-debt").unwrap(), RuleId::DecisionDebt);
        assert!(RuleId::from_str("unknown").is_err());
    }

    #[test]
    fn test_rule_id_serde_matches_as_str() {
        for id in RuleId::all() {
            let value = serde_json::to_value(id).unwrap();
            assert_eq!(value, serde_json::json!(id.as_str()));
        }
    }

    #[test]
    fn test_severity_priority() {
        assert!(Severity::Critical.priority() > Severity::Warning.priority());
        assert!(Severity::Warning.priority() > Severity::Info.priority());
    }

    #[test]
    fn test_insight_json_shape() {
        let insight = Insight::new(RuleId::Silent, Severity::Warning, "21 silent threads");
        let value = serde_json::to_value(&insight).unwrap();

        assert_eq!(value["id"], "silent");
        assert_eq!(value["severity"], "warning");
        assert_eq!(value["text"], "21 silent threads");
    }

    #[test]
    fn test_highest_severity() {
        assert_eq!(highest_severity(&[]), None);

        let insights = vec![
            Insight::new(RuleId::Friction, Severity::Warning, "a"),
            Insight::new(RuleId::Silent, Severity::Critical, "b"),
        ];
        assert_eq!(highest_severity(&insights), Some(Severity::Critical));
    }
}
