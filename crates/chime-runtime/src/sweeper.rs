//! Background stat cache sweeping.
//!
//! Insertions already keep the cache within capacity; the periodic sweep
//! drops expired entries that are never looked up again.

use std::sync::Arc;
use std::time::Duration;

use chime_core::StatCache;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Periodically runs [`StatCache::sweep`] until cancelled.
pub struct CacheSweeper {
    cache: Arc<StatCache>,
    interval: Duration,
    cancel_token: CancellationToken,
}

impl CacheSweeper {
    /// Create a new sweeper.
    ///
    /// # Arguments
    ///
    /// * `cache` - Cache to sweep
    /// * `sweep_interval` - Time between sweeps (e.g., 5 minutes)
    /// * `cancel_token` - Token to signal sweeper shutdown
    pub fn new(
        cache: Arc<StatCache>,
        sweep_interval: Duration,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            cache,
            interval: sweep_interval,
            cancel_token,
        }
    }

    /// Start sweeping on the current runtime.
    ///
    /// The first sweep happens one interval after spawning.
    pub fn spawn(self) -> JoinHandle<()> {
        let Self {
            cache,
            interval: sweep_interval,
            cancel_token,
        } = self;

        tokio::spawn(async move {
            let mut ticker = interval(sweep_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            ticker.tick().await;

            debug!(
                interval_secs = sweep_interval.as_secs(),
                "Starting stat cache sweeper"
            );

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        cache.sweep();
                    }
                    () = cancel_token.cancelled() => {
                        debug!("Stat cache sweeper cancelled");
                        break;
                    }
                }
            }
        })
    }
}
