//! Periodic purge of expired revocation entries.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info};

use shop_core::config::AuthConfig;

use super::registry::RevocationRegistry;

/// Background task that keeps the registry bounded by live tokens.
#[derive(Debug, Clone)]
pub struct RevocationSweeper {
    /// The registry to purge.
    registry: Arc<RevocationRegistry>,
    /// Time between sweeps.
    interval: Duration,
}

impl RevocationSweeper {
    /// Creates a sweeper with an explicit interval, never shorter than one second.
    pub fn new(registry: Arc<RevocationRegistry>, interval: Duration) -> Self {
        Self {
            registry,
            interval: interval.max(Duration::from_secs(1)),
        }
    }

    /// Creates a sweeper using `auth.revocation_sweep_interval_seconds`.
    pub fn from_config(registry: Arc<RevocationRegistry>, config: &AuthConfig) -> Self {
        Self::new(
            registry,
            Duration::from_secs(config.revocation_sweep_interval_seconds),
        )
    }

    /// Runs one purge cycle and returns the number of entries removed.
    pub fn sweep_once(&self) -> usize {
        self.registry.purge_expired(Utc::now())
    }

    /// Sweeps on every tick until `shutdown` flips to `true` or its sender is dropped.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
        // First tick completes immediately.
        ticker.tick().await;

        info!(interval_secs = self.interval.as_secs(), "Revocation sweeper started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = self.sweep_once();
                    debug!(removed, remaining = self.registry.len(), "Revocation sweep completed");
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Revocation sweeper stopped");
    }

    /// Spawns [`run`](Self::run) on the current runtime.
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }
}
