//! Insight ticker display
//!
//! Evaluates a snapshot, rotates through its insights on the configured
//! interval, and optionally re-reads the snapshot to pick up new data.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use pulse_core::{
    load_snapshot, Clock, Insight, InsightEngine, InsightTicker, SystemClock, TickerFrame,
};
use tokio::time::{interval_at, Instant, Interval};
use tracing::{info, warn};

use super::{load_config, severity_badge};

pub async fn cmd_watch(
    config_path: Option<&Path>,
    file: &Path,
    interval: Option<u64>,
    refresh: Option<u64>,
) -> Result<()> {
    let (mut config, _) = load_config(config_path)?;
    if let Some(secs) = interval {
        if secs == 0 {
            bail!("--interval must be at least 1 second");
        }
        config.rotation_interval = Duration::from_secs(secs);
    }

    let engine = InsightEngine::from_config(&config);
    let mut ticker = InsightTicker::from_config(&config);
    let mut frames = ticker.subscribe();

    let insights = evaluate_file(&engine, file, &SystemClock)
        .with_context(|| format!("Failed to load snapshot {}", file.display()))?;
    ticker.publish(insights);
    println!("{}", render_frame(frames.borrow_and_update().as_ref()));

    let mut reload = refresh.filter(|secs| *secs > 0).map(|secs| {
        let period = Duration::from_secs(secs);
        interval_at(Instant::now() + period, period)
    });

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            changed = frames.changed() => {
                if changed.is_err() {
                    break;
                }
                println!("{}", render_frame(frames.borrow_and_update().as_ref()));
            }
            _ = next_reload(&mut reload) => {
                match evaluate_file(&engine, file, &SystemClock) {
                    Ok(insights) => ticker.publish(insights),
                    Err(e) => warn!(error = %e, "Failed to reload snapshot, keeping current insights"),
                }
            }
            _ = &mut shutdown => {
                info!("Stopping insight ticker");
                break;
            }
        }
    }

    ticker.stop();
    Ok(())
}

/// Load a snapshot and evaluate it at the clock's current time
pub fn evaluate_file(
    engine: &InsightEngine,
    file: &Path,
    clock: &dyn Clock,
) -> pulse_core::Result<Vec<Insight>> {
    let now = clock.now();
    let snapshot = load_snapshot(file, now)?;
    Ok(engine.evaluate(snapshot.kpi.as_ref(), &snapshot.threads, now))
}

/// One ticker line, e.g. `[2/5] 🟠 WARNING  Decision debt at 605hrs - ...`
pub fn render_frame(frame: Option<&TickerFrame>) -> String {
    match frame {
        Some(frame) => format!(
            "[{}/{}] {}  {}",
            frame.index + 1,
            frame.total,
            severity_badge(frame.insight.severity),
            frame.insight.text
        ),
        None => "[idle] No insights to display".to_string(),
    }
}

async fn next_reload(reload: &mut Option<Interval>) {
    match reload {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
