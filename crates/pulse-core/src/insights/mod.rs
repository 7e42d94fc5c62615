//! Insight Engine - operational alerts for the dashboard ticker
//!
//! The engine scans a KPI snapshot and the current thread collection and
//! emits at most one insight per rule. Rules are registered trait objects so
//! each can be added, removed, and tested in isolation.
//!
//! ## Built-in Rules
//!
//! - **SLA Breach** - threads likely to miss SLA today, with rupee exposure
//! - **Decision Debt** - hours of work waiting on internal action
//! - **Intent Spike** - surge of P1 threads
//! - **Friction** - share of threads with negative sentiment
//! - **Escalation** - escalation rate above tolerance
//! - **Silent** - open threads idle for more than three days
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pulse_core::insights::InsightEngine;
//!
//! let engine = InsightEngine::new();
//! let insights = engine.evaluate(snapshot.kpi.as_ref(), &snapshot.threads, Utc::now());
//! ```

pub mod engine;
pub mod rules;
pub mod types;

pub use engine::InsightEngine;
pub use rules::{
    DecisionDebtRule, EscalationRule, EvaluationContext, FrictionRule, IntentSpikeRule, Rule,
    SilentThreadsRule, SlaBreachRule, Threshold, NEGATIVE_SENTIMENT_BELOW, SILENT_AFTER_DAYS,
};
pub use types::{highest_severity, Insight, RuleId, Severity};
