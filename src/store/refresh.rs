//! Periodic background refresh.
//!
//! # Responsibilities
//! - Invalidate every registered entry on a fixed interval
//! - Stop when the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::RefreshConfig;
use crate::store::ConfigStore;

pub struct Refresher {
    store: Arc<ConfigStore>,
    interval: Duration,
}

impl Refresher {
    pub fn new(store: Arc<ConfigStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    pub fn from_config(store: Arc<ConfigStore>, config: &RefreshConfig) -> Self {
        Self::new(store, Duration::from_secs(config.interval_secs))
    }

    /// Run until `shutdown` fires. The first cycle starts one interval from now;
    /// entries were loaded when they were registered.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(interval_secs = self.interval.as_secs_f64(), "Refresher starting");

        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.refresh_once().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("Refresher received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    async fn refresh_once(&self) {
        match self.store.invalidate_all().await {
            Ok(true) => tracing::debug!(entries = self.store.len(), "Refresh cycle complete"),
            Ok(false) => tracing::warn!(
                entries = self.store.len(),
                "Refresh cycle complete, some entries kept stale content"
            ),
            Err(e) => tracing::error!(error = %e, "Refresh cycle failed"),
        }
    }
}
