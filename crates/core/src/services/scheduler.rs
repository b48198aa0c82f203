use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::models::settings::{Settings, MAX_REFRESH_INTERVAL_SECS};
use crate::ProgressEngine;

/// Periodic driver for [`ProgressEngine::refresh_prices`].
///
/// On start it loads the saved snapshot, refreshes once immediately, then
/// refreshes every `period`. Ticks that fall due while a refresh is still
/// running are skipped, never queued up.
#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    period: Duration,
}

impl RefreshScheduler {
    /// `period` is clamped to between 1ms and [`MAX_REFRESH_INTERVAL_SECS`].
    pub fn new(period: Duration) -> Self {
        let max = Duration::from_secs(MAX_REFRESH_INTERVAL_SECS);
        Self {
            period: period.clamp(Duration::from_millis(1), max),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.refresh_interval())
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Spawn the background task on the current tokio runtime.
    ///
    /// Dropping the returned handle stops the task at its next wake-up.
    pub fn start(&self, engine: Arc<ProgressEngine>) -> SchedulerHandle {
        let period = self.period;
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            tracing::info!(
                refresh_interval_secs = period.as_secs(),
                "Starting price refresh scheduler"
            );

            engine.load_from_store().await;
            engine.refresh_prices().await;

            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        engine.refresh_prices().await;
                    }
                }
            }

            tracing::info!("Price refresh scheduler stopped");
        });

        SchedulerHandle {
            shutdown: Some(shutdown_tx),
            task,
        }
    }
}

/// Handle to a running [`RefreshScheduler`] task.
#[derive(Debug)]
pub struct SchedulerHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Signal the task to stop and wait for it. A refresh in progress is
    /// allowed to finish first.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "Price refresh scheduler task ended abnormally");
        }
    }
}
