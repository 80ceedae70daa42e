//! Periodic purge of lapsed revocation entries.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use super::store::RevocationStore;

/// Background task that purges expired revocation entries on an interval.
#[derive(Debug, Clone)]
pub struct RevocationSweeper {
    store: Arc<RevocationStore>,
    interval: Duration,
}

impl RevocationSweeper {
    /// Creates a sweeper for `store` running every `interval`.
    pub fn new(store: Arc<RevocationStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Runs until `shutdown` flips to `true` or its sender is dropped.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            interval_seconds = self.interval.as_secs(),
            "Revocation sweeper started"
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let purged = self.store.purge_expired(Utc::now());
                    if purged > 0 {
                        debug!(purged, remaining = self.store.len(), "Purged expired revocations");
                    }
                }
            }
        }

        info!("Revocation sweeper stopped");
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration as ChronoDuration;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_purges_and_stops() {
        let store = Arc::new(RevocationStore::new());
        store.revoke("lapsed", Utc::now() - ChronoDuration::seconds(1));
        store.revoke("live", Utc::now() + ChronoDuration::hours(1));

        let (tx, rx) = watch::channel(false);
        let sweeper = RevocationSweeper::new(store.clone(), Duration::from_secs(1));
        let handle = tokio::spawn(sweeper.run(rx));

        time::sleep(Duration::from_secs(3)).await;
        assert_eq!(store.len(), 1);
        assert!(store.is_revoked("live"));

        tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_stops_when_sender_dropped() {
        let store = Arc::new(RevocationStore::new());
        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(RevocationSweeper::new(store, Duration::from_secs(60)).run(rx));

        drop(tx);
        handle.await.unwrap();
    }
}
