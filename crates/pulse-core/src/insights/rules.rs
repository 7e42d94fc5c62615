//! Built-in insight rules
//!
//! Each rule summarizes the whole thread collection into at most one insight.
//! Thresholds are strict: a value must exceed `trigger` to fire and exceed
//! `critical` to escalate.

use chrono::{DateTime, Duration, Utc};

use crate::config::FallbackDefaults;
use crate::models::{KpiSnapshot, Priority, ThreadRecord};

use super::types::{Insight, RuleId, Severity};

/// Sentiment strictly below this counts as negative
pub const NEGATIVE_SENTIMENT_BELOW: f64 = 2.5;

/// Open threads idle longer than this are silent
pub const SILENT_AFTER_DAYS: i64 = 3;

/// Trigger and critical cut-offs for one rule's measured value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    pub trigger: f64,
    pub critical: f64,
}

impl Threshold {
    pub const fn new(trigger: f64, critical: f64) -> Self {
        Self { trigger, critical }
    }

    /// `None` when the value does not exceed the trigger
    pub fn grade(&self, value: f64) -> Option<Severity> {
        if value <= self.trigger {
            None
        } else if value > self.critical {
            Some(Severity::Critical)
        } else {
            Some(Severity::Warning)
        }
    }
}

/// Inputs visible to a rule during one evaluation
///
/// `threads` is never empty; the engine short-circuits before rules run.
pub struct EvaluationContext<'a> {
    pub kpi: &'a KpiSnapshot,
    pub threads: &'a [ThreadRecord],
    pub now: DateTime<Utc>,
    pub defaults: &'a FallbackDefaults,
}

impl EvaluationContext<'_> {
    fn thread_count(&self) -> f64 {
        self.threads.len() as f64
    }
}

/// Trait for insight rules
pub trait Rule: Send + Sync {
    /// Stable identifier carried by every insight this rule emits
    fn id(&self) -> RuleId;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Cut-offs that grade this rule's measured value
    fn threshold(&self) -> Threshold;

    /// Measure the inputs and emit at most one insight
    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Option<Insight>;
}

/// Digits needed to print any finite `f64` exactly
const EXACT_DIGITS: usize = 1100;

/// One decimal place, rounded from the exact stored value with ties going up
///
/// 12.35 is stored as 12.3499... and prints "12.3"; 10.25 is stored exactly
/// and prints "10.3".
pub(crate) fn fixed1(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let (int_part, frac) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let frac = frac.as_bytes();

    // Integer digits followed by the tenths digit
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(std::iter::once(frac.first().copied().unwrap_or(b'0')))
        .map(|b| b - b'0')
        .collect();

    if frac.get(1).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let tenths = digits.pop().unwrap_or(0);
    let whole: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
    let sign = if value.is_sign_negative() && value != 0.0 {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, whole, tenths)
}

pub struct SlaBreachRule;

impl SlaBreachRule {
    pub const THRESHOLD: Threshold = Threshold::new(10.0, 20.0);
}

impl Rule for SlaBreachRule {
    fn id(&self) -> RuleId {
        RuleId::SlaBreach
    }

    fn name(&self) -> &'static str {
        "SLA Breach Risk"
    }

    fn threshold(&self) -> Threshold {
        Self::THRESHOLD
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Option<Insight> {
        let risk_pct = ctx.kpi.sla_breach_risk_pct;
        let severity = Self::THRESHOLD.grade(risk_pct)?;

        let at_risk = (ctx.thread_count() * risk_pct / 100.0).round();
        let impact = ctx
            .kpi
            .business_impact_score
            .unwrap_or(ctx.defaults.business_impact_score);
        let value_in_cr = (at_risk * impact * 10000.0).round() / 100000.0;

        Some(Insight::new(
            self.id(),
            severity,
            format!(
                "{} threads likely to breach SLA today (₹{} Cr)",
                at_risk as u64,
                fixed1(value_in_cr)
            ),
        ))
    }
}

pub struct DecisionDebtRule;

impl DecisionDebtRule {
    pub const THRESHOLD: Threshold = Threshold::new(500.0, 1000.0);
}

impl Rule for DecisionDebtRule {
    fn id(&self) -> RuleId {
        RuleId::DecisionDebt
    }

    fn name(&self) -> &'static str {
        "Decision Debt"
    }

    fn threshold(&self) -> Threshold {
        Self::THRESHOLD
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Option<Insight> {
        let pending = ctx.kpi.internal_pending_count;
        let days = ctx
            .kpi
            .avg_resolution_time_days
            .unwrap_or(ctx.defaults.avg_resolution_time_days);
        let debt_hours = (pending as f64 * days * 24.0).round();
        let severity = Self::THRESHOLD.grade(debt_hours)?;

        Some(Insight::new(
            self.id(),
            severity,
            format!(
                "Decision debt at {}hrs - {} items pending internal action",
                debt_hours as u64, pending
            ),
        ))
    }
}

pub struct IntentSpikeRule;

impl IntentSpikeRule {
    pub const THRESHOLD: Threshold = Threshold::new(50.0, 100.0);
}

impl Rule for IntentSpikeRule {
    fn id(&self) -> RuleId {
        RuleId::IntentSpike
    }

    fn name(&self) -> &'static str {
        "Intent Spike"
    }

    fn threshold(&self) -> Threshold {
        Self::THRESHOLD
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Option<Insight> {
        let p1_count = ctx
            .threads
            .iter()
            .filter(|t| t.priority == Priority::P1)
            .count();
        let severity = Self::THRESHOLD.grade(p1_count as f64)?;

        Some(Insight::new(
            self.id(),
            severity,
            format!(
                "{} P1 threads detected - Intent spike in high-priority communications",
                p1_count
            ),
        ))
    }
}

pub struct FrictionRule;

impl FrictionRule {
    pub const THRESHOLD: Threshold = Threshold::new(30.0, 40.0);
}

impl Rule for FrictionRule {
    fn id(&self) -> RuleId {
        RuleId::Friction
    }

    fn name(&self) -> &'static str {
        "Friction Delta"
    }

    fn threshold(&self) -> Threshold {
        Self::THRESHOLD
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Option<Insight> {
        let negative = ctx
            .threads
            .iter()
            .filter(|t| {
                t.overall_sentiment
                    .unwrap_or(ctx.defaults.overall_sentiment)
                    < NEGATIVE_SENTIMENT_BELOW
            })
            .count();
        // Multiply first so whole percentages compare exactly against thresholds
        let friction_pct = negative as f64 * 100.0 / ctx.thread_count();
        let severity = Self::THRESHOLD.grade(friction_pct)?;

        Some(Insight::new(
            self.id(),
            severity,
            format!(
                "Friction delta {}% - {} threads with negative sentiment",
                fixed1(friction_pct),
                negative
            ),
        ))
    }
}

pub struct EscalationRule;

impl EscalationRule {
    pub const THRESHOLD: Threshold = Threshold::new(10.0, 15.0);
}

impl Rule for EscalationRule {
    fn id(&self) -> RuleId {
        RuleId::Escalation
    }

    fn name(&self) -> &'static str {
        "Escalation Rate"
    }

    fn threshold(&self) -> Threshold {
        Self::THRESHOLD
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Option<Insight> {
        let rate = ctx.kpi.escalation_rate_pct;
        let severity = Self::THRESHOLD.grade(rate)?;

        Some(Insight::new(
            self.id(),
            severity,
            format!(
                "Escalation rate {}% - {} threads escalated",
                fixed1(rate),
                ctx.kpi.escalation_count
            ),
        ))
    }
}

pub struct SilentThreadsRule;

impl SilentThreadsRule {
    pub const THRESHOLD: Threshold = Threshold::new(20.0, 50.0);
}

impl Rule for SilentThreadsRule {
    fn id(&self) -> RuleId {
        RuleId::Silent
    }

    fn name(&self) -> &'static str {
        "Silent Threads"
    }

    fn threshold(&self) -> Threshold {
        Self::THRESHOLD
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Option<Insight> {
        let silent_after = Duration::days(SILENT_AFTER_DAYS);
        let silent_count = ctx
            .threads
            .iter()
            .filter(|t| {
                !t.resolution_status.is_closed() && ctx.now - t.last_message_at > silent_after
            })
            .count();
        let severity = Self::THRESHOLD.grade(silent_count as f64)?;

        Some(Insight::new(
            self.id(),
            severity,
            format!(
                "{} silent threads detected - No activity for >{} days",
                silent_count, SILENT_AFTER_DAYS
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResolutionStatus;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 10, 12, 0, 0).unwrap()
    }

    fn quiet_threads(n: usize) -> Vec<ThreadRecord> {
        (0..n)
            .map(|_| {
                ThreadRecord::new(Priority::P3, ResolutionStatus::Closed, now()).with_sentiment(4.0)
            })
            .collect()
    }

    fn run(rule: &dyn Rule, kpi: &KpiSnapshot, threads: &[ThreadRecord]) -> Option<Insight> {
        let defaults = FallbackDefaults::default();
        let ctx = EvaluationContext {
            kpi,
            threads,
            now: now(),
            defaults: &defaults,
        };
        rule.evaluate(&ctx)
    }

    #[test]
    fn test_threshold_grade_is_strict() {
        let t = Threshold::new(10.0, 20.0);
        assert_eq!(t.grade(10.0), None);
        assert_eq!(t.grade(10.01), Some(Severity::Warning));
        assert_eq!(t.grade(20.0), Some(Severity::Warning));
        assert_eq!(t.grade(20.01), Some(Severity::Critical));
    }

    #[test]
    fn test_fixed1_rounds_half_up() {
        assert_eq!(fixed1(180.75), "180.8");
        assert_eq!(fixed1(31.0), "31.0");
        assert_eq!(fixed1(12.34), "12.3");
        assert_eq!(fixed1(10.25), "10.3");
        assert_eq!(fixed1(0.0), "0.0");
    }

    #[test]
    fn test_fixed1_uses_stored_value() {
        // Each of these is stored just below the printed half
        assert_eq!(fixed1(12.35), "12.3");
        assert_eq!(fixed1(10.35), "10.3");
        assert_eq!(fixed1(0.35), "0.3");
        assert_eq!(fixed1(16.2), "16.2");
        assert_eq!(fixed1(159.06), "159.1");
    }

    #[test]
    fn test_fixed1_carries_into_integer_part() {
        assert_eq!(fixed1(9.96), "10.0");
        assert_eq!(fixed1(99.95000001), "100.0");
        assert_eq!(fixed1(-2.25), "-2.3");
    }

    #[test]
    fn test_escalation_text_rounds_from_stored_rate() {
        let kpi = KpiSnapshot {
            escalation_rate_pct: 12.35,
            escalation_count: 7,
            ..Default::default()
        };
        let insight = run(&EscalationRule, &kpi, &quiet_threads(1)).unwrap();

        assert_eq!(insight.text, "Escalation rate 12.3% - 7 threads escalated");
    }

    #[test]
    fn test_sla_breach_text() {
        let kpi = KpiSnapshot {
            sla_breach_risk_pct: 25.0,
            ..Default::default()
        };
        let insight = run(&SlaBreachRule, &kpi, &quiet_threads(100)).unwrap();

        assert_eq!(insight.severity, Severity::Critical);
        assert_eq!(
            insight.text,
            "25 threads likely to breach SLA today (₹180.8 Cr)"
        );
    }

    #[test]
    fn test_sla_breach_custom_impact() {
        let kpi = KpiSnapshot {
            sla_breach_risk_pct: 15.0,
            business_impact_score: Some(100.0),
            ..Default::default()
        };
        let insight = run(&SlaBreachRule, &kpi, &quiet_threads(40)).unwrap();

        // round(40 * 15 / 100) = 6; 6 * 100 * 10000 / 100000 = 60
        assert_eq!(insight.severity, Severity::Warning);
        assert_eq!(insight.text, "6 threads likely to breach SLA today (₹60.0 Cr)");
    }

    #[test]
    fn test_decision_debt_text() {
        let kpi = KpiSnapshot {
            internal_pending_count: 10,
            ..Default::default()
        };
        let insight = run(&DecisionDebtRule, &kpi, &quiet_threads(1)).unwrap();

        assert_eq!(insight.severity, Severity::Warning);
        assert_eq!(
            insight.text,
            "Decision debt at 552hrs - 10 items pending internal action"
        );
    }

    #[test]
    fn test_decision_debt_boundaries() {
        let kpi = |pending: u64, days: f64| KpiSnapshot {
            internal_pending_count: pending,
            avg_resolution_time_days: Some(days),
            ..Default::default()
        };
        let threads = quiet_threads(1);

        // 125 items at 1/6 day = 500 hours: not above the trigger
        assert!(run(&DecisionDebtRule, &kpi(125, 1.0 / 6.0), &threads).is_none());
        // 125 items at 1/3 day = 1000 hours: warning, not critical
        let at_boundary = run(&DecisionDebtRule, &kpi(125, 1.0 / 3.0), &threads).unwrap();
        assert_eq!(at_boundary.severity, Severity::Warning);
        assert!(at_boundary.text.starts_with("Decision debt at 1000hrs"));
        // 126 items = 1008 hours
        let above = run(&DecisionDebtRule, &kpi(126, 1.0 / 3.0), &threads).unwrap();
        assert_eq!(above.severity, Severity::Critical);
    }

    #[test]
    fn test_intent_spike_boundaries() {
        let kpi = KpiSnapshot::default();
        let with_p1 = |p1: usize, total: usize| {
            let mut threads = quiet_threads(total);
            for t in threads.iter_mut().take(p1) {
                t.priority = Priority::P1;
            }
            threads
        };

        assert!(run(&IntentSpikeRule, &kpi, &with_p1(50, 120)).is_none());
        assert_eq!(
            run(&IntentSpikeRule, &kpi, &with_p1(100, 120)).unwrap().severity,
            Severity::Warning
        );
        let critical = run(&IntentSpikeRule, &kpi, &with_p1(101, 120)).unwrap();
        assert_eq!(critical.severity, Severity::Critical);
        assert_eq!(
            critical.text,
            "101 P1 threads detected - Intent spike in high-priority communications"
        );
    }

    #[test]
    fn test_friction_boundaries() {
        let kpi = KpiSnapshot::default();
        let with_negative = |negative: usize| {
            let mut threads = quiet_threads(100);
            for t in threads.iter_mut().take(negative) {
                t.overall_sentiment = Some(2.0);
            }
            threads
        };

        assert!(run(&FrictionRule, &kpi, &with_negative(30)).is_none());

        let warning = run(&FrictionRule, &kpi, &with_negative(31)).unwrap();
        assert_eq!(warning.severity, Severity::Warning);
        assert_eq!(
            warning.text,
            "Friction delta 31.0% - 31 threads with negative sentiment"
        );

        assert_eq!(
            run(&FrictionRule, &kpi, &with_negative(40)).unwrap().severity,
            Severity::Warning
        );
        assert_eq!(
            run(&FrictionRule, &kpi, &with_negative(41)).unwrap().severity,
            Severity::Critical
        );
    }

    #[test]
    fn test_friction_sentiment_cutoff_is_strict() {
        let kpi = KpiSnapshot::default();
        let threads: Vec<_> = (0..10)
            .map(|_| {
                ThreadRecord::new(Priority::P2, ResolutionStatus::Open, now()).with_sentiment(2.5)
            })
            .collect();

        assert!(run(&FrictionRule, &kpi, &threads).is_none());
    }

    #[test]
    fn test_friction_fractional_percentage() {
        let kpi = KpiSnapshot::default();
        let mut threads = quiet_threads(3);
        threads[0].overall_sentiment = Some(1.0);

        let insight = run(&FrictionRule, &kpi, &threads).unwrap();
        assert_eq!(insight.severity, Severity::Warning);
        assert_eq!(
            insight.text,
            "Friction delta 33.3% - 1 threads with negative sentiment"
        );
    }

    #[test]
    fn test_escalation_boundaries() {
        let kpi = |rate: f64| KpiSnapshot {
            escalation_rate_pct: rate,
            escalation_count: 42,
            ..Default::default()
        };
        let threads = quiet_threads(1);

        assert!(run(&EscalationRule, &kpi(10.0), &threads).is_none());
        assert_eq!(
            run(&EscalationRule, &kpi(15.0), &threads).unwrap().severity,
            Severity::Warning
        );
        let critical = run(&EscalationRule, &kpi(15.01), &threads).unwrap();
        assert_eq!(critical.severity, Severity::Critical);
        assert_eq!(critical.text, "Escalation rate 15.0% - 42 threads escalated");
    }

    #[test]
    fn test_silent_threads_ignore_closed_and_recent() {
        let kpi = KpiSnapshot::default();
        let stale = now() - Duration::days(4);
        let mut threads = Vec::new();
        // 25 stale but closed
        threads.extend(
            (0..25).map(|_| ThreadRecord::new(Priority::P3, ResolutionStatus::Closed, stale)),
        );
        // 25 open, exactly three days old
        threads.extend((0..25).map(|_| {
            ThreadRecord::new(
                Priority::P3,
                ResolutionStatus::Open,
                now() - Duration::days(SILENT_AFTER_DAYS),
            )
        }));

        assert!(run(&SilentThreadsRule, &kpi, &threads).is_none());
    }

    #[test]
    fn test_silent_threads_boundaries() {
        let kpi = KpiSnapshot::default();
        let stale = now() - Duration::days(3) - Duration::seconds(1);
        let with_silent = |silent: usize| {
            let mut threads = quiet_threads(60);
            for t in threads.iter_mut().take(silent) {
                t.resolution_status = ResolutionStatus::Other("pending".to_string());
                t.last_message_at = stale;
            }
            threads
        };

        assert!(run(&SilentThreadsRule, &kpi, &with_silent(20)).is_none());
        let warning = run(&SilentThreadsRule, &kpi, &with_silent(21)).unwrap();
        assert_eq!(warning.severity, Severity::Warning);
        assert_eq!(
            warning.text,
            "21 silent threads detected - No activity for >3 days"
        );
        assert_eq!(
            run(&SilentThreadsRule, &kpi, &with_silent(50)).unwrap().severity,
            Severity::Warning
        );
        assert_eq!(
            run(&SilentThreadsRule, &kpi, &with_silent(51)).unwrap().severity,
            Severity::Critical
        );
    }
}
