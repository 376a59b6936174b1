//! Query caching and invalidation
//!
//! Reads go through [`QueryCache::get_or_fetch`] keyed by query identity.
//! Mutations publish [`InvalidationEvent`]s on the [`InvalidationBus`];
//! the listener spawned at startup drops the named entries so the next
//! read refetches.

pub mod invalidation;
pub mod query_cache;

pub use invalidation::{keys, InvalidationAction, InvalidationBus, InvalidationEvent, QueryKey};
pub use query_cache::{CacheStats, QueryCache};

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

/// Wire the cache to the bus. Spawned once at startup; runs for the life
/// of the process.
pub fn spawn_invalidation_listener(
    cache: Arc<QueryCache>,
    bus: &InvalidationBus,
) -> tokio::task::JoinHandle<()> {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    debug!(
                        event_id = %event.event_id,
                        query_key = %event.query_key,
                        "Applying invalidation event"
                    );
                    cache.invalidate(&event.query_key);
                }
                Err(RecvError::Lagged(skipped)) => {
                    // Events were dropped, so the stale scope is unknown.
                    warn!(skipped, "Invalidation listener lagged, clearing cache");
                    cache.clear();
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_listener_drops_entries_named_by_events() {
        let cache = Arc::new(QueryCache::new());
        let bus = InvalidationBus::new(8);
        let _listener = spawn_invalidation_listener(cache.clone(), &bus);

        let _: String = cache
            .get_or_fetch(keys::feed(), Duration::from_secs(30), || async {
                Ok("v1".to_string())
            })
            .await
            .unwrap();
        assert_eq!(cache.stats().entries, 1);

        bus.publish(InvalidationEvent::created(keys::feed()));

        // The listener runs on its own task; poll until it has applied
        // the event.
        for _ in 0..100 {
            if cache.stats().entries == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(cache.stats().entries, 0);

        let refetched: String = cache
            .get_or_fetch(keys::feed(), Duration::from_secs(30), || async {
                Ok("v2".to_string())
            })
            .await
            .unwrap();
        assert_eq!(refetched, "v2");
    }
}
