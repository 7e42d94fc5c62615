//! Insight Engine - runs the registered rule battery over one snapshot

use chrono::{DateTime, Utc};

use crate::clock::Clock;
use crate::config::{FallbackDefaults, InsightConfig};
use crate::models::{KpiSnapshot, ThreadRecord};

use super::rules::{
    DecisionDebtRule, EscalationRule, EvaluationContext, FrictionRule, IntentSpikeRule, Rule,
    SilentThreadsRule, SlaBreachRule,
};
use super::types::{Insight, RuleId};

/// The main insight engine
///
/// Output order is rule registration order, never severity order.
pub struct InsightEngine {
    rules: Vec<Box<dyn Rule>>,
    defaults: FallbackDefaults,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create a new insight engine with the built-in rules
    pub fn new() -> Self {
        Self::with_defaults(FallbackDefaults::default())
    }

    pub fn from_config(config: &InsightConfig) -> Self {
        Self::with_defaults(config.defaults)
    }

    pub fn with_defaults(defaults: FallbackDefaults) -> Self {
        let mut engine = Self {
            rules: vec![],
            defaults,
        };

        // Register built-in rules
        engine.register(Box::new(SlaBreachRule));
        engine.register(Box::new(DecisionDebtRule));
        engine.register(Box::new(IntentSpikeRule));
        engine.register(Box::new(FrictionRule));
        engine.register(Box::new(EscalationRule));
        engine.register(Box::new(SilentThreadsRule));

        engine
    }

    /// Register a rule; it runs after every rule registered before it
    ///
    /// Ids stay unique: a rule whose id is already registered takes the old
    /// rule's place in the order, and the old rule is returned.
    pub fn register(&mut self, rule: Box<dyn Rule>) -> Option<Box<dyn Rule>> {
        let id = rule.id();
        match self.rules.iter().position(|existing| existing.id() == id) {
            Some(slot) => {
                tracing::debug!(rule = id.as_str(), "Replacing registered rule");
                Some(std::mem::replace(&mut self.rules[slot], rule))
            }
            None => {
                self.rules.push(rule);
                None
            }
        }
    }

    /// Evaluate every rule against one snapshot
    ///
    /// Returns an empty list while either input is missing; that is the idle
    /// state before the first load completes, not an error.
    pub fn evaluate(
        &self,
        kpi: Option<&KpiSnapshot>,
        threads: &[ThreadRecord],
        now: DateTime<Utc>,
    ) -> Vec<Insight> {
        let Some(kpi) = kpi else {
            return vec![];
        };
        if threads.is_empty() {
            return vec![];
        }

        let ctx = EvaluationContext {
            kpi,
            threads,
            now,
            defaults: &self.defaults,
        };

        let insights: Vec<Insight> = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(&ctx))
            .collect();

        tracing::debug!(
            threads = threads.len(),
            emitted = insights.len(),
            "Insight evaluation complete"
        );

        insights
    }

    /// Evaluate using `clock` for the current time
    pub fn evaluate_at(
        &self,
        kpi: Option<&KpiSnapshot>,
        threads: &[ThreadRecord],
        clock: &dyn Clock,
    ) -> Vec<Insight> {
        self.evaluate(kpi, threads, clock.now())
    }

    /// Registered rules in evaluation order
    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Get list of registered rule ids
    pub fn rule_ids(&self) -> Vec<RuleId> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    pub fn defaults(&self) -> &FallbackDefaults {
        &self.defaults
    }
}
