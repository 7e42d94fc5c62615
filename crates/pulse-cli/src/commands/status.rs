//! Rule listing and configuration display

use std::path::Path;

use anyhow::Result;
use pulse_core::InsightEngine;

use super::load_config;

pub fn cmd_rules(config_path: Option<&Path>) -> Result<()> {
    let (config, _) = load_config(config_path)?;
    let engine = InsightEngine::from_config(&config);

    println!();
    println!("📏 Insight Rules (evaluation order)");
    println!("   ─────────────────────────────────────────────────────────────");

    for (i, rule) in engine.rules().enumerate() {
        let threshold = rule.threshold();
        println!(
            "   {}. {:<14} {:<18} fires > {:<6} critical > {}",
            i + 1,
            rule.id().as_str(),
            rule.name(),
            threshold.trigger,
            threshold.critical
        );
    }

    println!();
    Ok(())
}

pub fn cmd_config(config_path: Option<&Path>) -> Result<()> {
    let (config, source) = load_config(config_path)?;

    println!();
    println!("⚙️  Insight Config");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Source: {}", source);
    println!();
    println!(
        "   Business impact score:    {}",
        config.defaults.business_impact_score
    );
    println!(
        "   Avg resolution time days: {}",
        config.defaults.avg_resolution_time_days
    );
    println!(
        "   Neutral sentiment:        {}",
        config.defaults.overall_sentiment
    );
    println!(
        "   Rotation interval:        {}s",
        config.rotation_interval.as_secs()
    );
    println!();

    Ok(())
}
