//! One-shot insight evaluation

use std::path::Path;

use anyhow::{Context, Result};
use pulse_core::insights::highest_severity;
use pulse_core::{load_snapshot, Insight, InsightEngine};

use super::{load_config, parse_now, severity_badge};

pub fn cmd_insights(
    config_path: Option<&Path>,
    file: &Path,
    now: Option<&str>,
    json: bool,
) -> Result<()> {
    let (config, _) = load_config(config_path)?;
    let now = parse_now(now)?;

    let snapshot = load_snapshot(file, now)
        .with_context(|| format!("Failed to load snapshot {}", file.display()))?;

    let engine = InsightEngine::from_config(&config);
    let insights = engine.evaluate(snapshot.kpi.as_ref(), &snapshot.threads, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
    } else {
        print!("{}", render_insights(&insights));
    }

    Ok(())
}

/// Human-readable insight list
pub fn render_insights(insights: &[Insight]) -> String {
    let mut out = String::new();

    if insights.is_empty() {
        out.push_str("✅ No insights - all monitored signals are within thresholds\n");
        return out;
    }

    out.push('\n');
    out.push_str(&format!("📣 Insights ({})\n", insights.len()));
    out.push_str("   ─────────────────────────────────────────────────────────────\n");
    for insight in insights {
        out.push_str(&format!(
            "   {}  {:<14} {}\n",
            severity_badge(insight.severity),
            insight.id.as_str(),
            insight.text
        ));
    }

    if let Some(worst) = highest_severity(insights) {
        out.push('\n');
        out.push_str(&format!("   Highest severity: {}\n", worst));
    }

    out
}
