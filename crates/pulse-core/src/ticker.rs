//! Timer-driven insight ticker
//!
//! Owns the one repeating rotation timer for a display surface. Publishing a
//! new list, stopping, or dropping the ticker always cancels the running
//! timer first, so a stale timer can never advance into a replaced list.
//!
//! Displays subscribe to a watch channel and receive the current frame after
//! every publish and every tick.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::InsightConfig;
use crate::insights::Insight;
use crate::rotation::Rotation;

/// The insight currently on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerFrame {
    pub index: usize,
    pub total: usize,
    pub insight: Insight,
}

pub struct InsightTicker {
    rotation: Arc<Mutex<Rotation>>,
    period: Duration,
    frames: Arc<watch::Sender<Option<TickerFrame>>>,
    task: Option<JoinHandle<()>>,
}

impl InsightTicker {
    /// Create an idle ticker; a zero period is raised to one millisecond
    pub fn new(period: Duration) -> Self {
        let (frames, _) = watch::channel(None);
        Self {
            rotation: Arc::new(Mutex::new(Rotation::new())),
            period: period.max(Duration::from_millis(1)),
            frames: Arc::new(frames),
            task: None,
        }
    }

    pub fn from_config(config: &InsightConfig) -> Self {
        Self::new(config.rotation_interval)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<TickerFrame>> {
        self.frames.subscribe()
    }

    /// Replace the insight list
    ///
    /// Cancels the running timer, resets the rotation to the first insight
    /// (or idle), broadcasts the new frame, and restarts the timer when there
    /// is something to rotate.
    pub fn publish(&mut self, insights: Vec<Insight>) {
        self.stop();

        let frame = {
            let mut rotation = lock(&self.rotation);
            rotation.replace(insights);
            frame_of(&rotation)
        };
        debug!(
            total = frame.as_ref().map_or(0, |f| f.total),
            "Published insight list"
        );
        self.frames.send_replace(frame);

        self.start();
    }

    /// Start the rotation timer, cancelling any timer already running
    ///
    /// Does nothing while there are no insights or outside a Tokio runtime.
    pub fn start(&mut self) {
        self.stop();

        if lock(&self.rotation).is_empty() {
            return;
        }

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!(error = %e, "No async runtime, insight rotation not started");
                return;
            }
        };

        let rotation = Arc::clone(&self.rotation);
        let frames = Arc::clone(&self.frames);
        let period = self.period;

        self.task = Some(handle.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let frame = {
                    let mut rotation = lock(&rotation);
                    rotation.advance();
                    frame_of(&rotation)
                };
                frames.send_replace(frame);
            }
        }));

        info!(period_secs = period.as_secs_f64(), "Insight rotation started");
    }

    /// Cancel the rotation timer; the current frame stays on screen
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Insight rotation stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    pub fn current(&self) -> Option<TickerFrame> {
        self.frames.borrow().clone()
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for InsightTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn lock(rotation: &Mutex<Rotation>) -> MutexGuard<'_, Rotation> {
    rotation.lock().unwrap_or_else(PoisonError::into_inner)
}

fn frame_of(rotation: &Rotation) -> Option<TickerFrame> {
    let index = rotation.current_index()?;
    let insight = rotation.current()?.clone();
    Some(TickerFrame {
        index,
        total: rotation.len(),
        insight,
    })
}
