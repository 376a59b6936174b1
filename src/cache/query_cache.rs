//! In-process query response caching
//!
//! Read queries are cached by query key with a TTL, so repeated reads
//! within the window never hit PostgreSQL or the identity provider twice.
//! Entries are dropped by the invalidation listener when a mutation
//! publishes the matching event, or lazily on expiry.
//!
//! Thread-safety: DashMap gives lock-free concurrent access; handlers on
//! every worker share one instance.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{AppError, Result};

use super::invalidation::QueryKey;

/// Cached entry with TTL metadata
#[derive(Debug, Clone)]
struct CachedEntry {
    data: Value,
    expires_at: Instant,
}

impl CachedEntry {
    /// Check if entry has expired
    #[inline]
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    /// Create new entry with TTL
    fn new(data: Value, ttl: Duration) -> Self {
        // Random jitter (up to 10% of the TTL) spreads expiry to prevent
        // cache stampede
        let jitter_ms = rand::random::<u64>() % (ttl.as_millis() as u64 / 10 + 1);
        Self {
            data,
            expires_at: Instant::now() + ttl + Duration::from_millis(jitter_ms),
        }
    }
}

/// Keyed in-process cache for read query results.
pub struct QueryCache {
    store: DashMap<QueryKey, CachedEntry>,
    max_entries: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    invalidations: AtomicU64,
}

impl QueryCache {
    /// Create a cache with the default entry limit.
    pub fn new() -> Self {
        Self::with_limit(10_000)
    }

    /// Create a cache bounded to `max_entries`.
    pub fn with_limit(max_entries: usize) -> Self {
        debug!(max_entries, "Initializing query cache");

        Self {
            store: DashMap::new(),
            max_entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            invalidations: AtomicU64::new(0),
        }
    }

    /// Get the cached result for `key` or run `fetcher` and cache it.
    ///
    /// A zero TTL executes without storing. Values round-trip through
    /// `serde_json::Value` so one store serves every query shape.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: QueryKey, ttl: Duration, fetcher: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        // Fast path: lock-free read
        if let Some(entry) = self.store.get(&key) {
            if !entry.is_expired() {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(query_key = %key, "Query cache HIT");
                return serde_json::from_value(entry.data.clone()).map_err(|e| {
                    AppError::Internal(format!("Corrupt cache entry for {}: {}", key, e))
                });
            }
            // Release the read guard before removing the expired entry
            drop(entry);
            self.store.remove(&key);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(query_key = %key, "Query cache MISS");

        let value = fetcher().await?;

        if !ttl.is_zero() {
            let data = serde_json::to_value(&value)
                .map_err(|e| AppError::Internal(format!("Failed to serialize cache entry: {}", e)))?;
            self.insert(key, data, ttl);
        }

        Ok(value)
    }

    /// Drop the entry for `key`, forcing the next read to refetch.
    pub fn invalidate(&self, key: &str) {
        if self.store.remove(key).is_some() {
            self.invalidations.fetch_add(1, Ordering::Relaxed);
            debug!(query_key = %key, "Query cache INVALIDATE");
        }
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let count = self.store.len();
        self.store.clear();
        warn!(cleared_entries = count, "Query cache CLEAR");
    }

    /// Insert entry, evicting a slice of the store if the cap is reached
    fn insert(&self, key: QueryKey, data: Value, ttl: Duration) {
        if self.store.len() >= self.max_entries {
            let evict_count = (self.store.len() / 10).max(1);
            warn!(
                entries = self.store.len(),
                evict_count, "Query cache entry limit reached, evicting"
            );

            let keys_to_evict: Vec<QueryKey> = self
                .store
                .iter()
                .take(evict_count)
                .map(|entry| entry.key().clone())
                .collect();
            for stale in keys_to_evict {
                self.store.remove(&stale);
            }
        }

        debug!(query_key = %key, ttl_secs = ttl.as_secs(), "Query cache STORE");
        self.store.insert(key, CachedEntry::new(data, ttl));
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.store.len(),
            hit_count: self.hits.load(Ordering::Relaxed),
            miss_count: self.misses.load(Ordering::Relaxed),
            invalidation_count: self.invalidations.load(Ordering::Relaxed),
        }
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache performance statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub entries: usize,
    pub hit_count: u64,
    pub miss_count: u64,
    pub invalidation_count: u64,
}

impl CacheStats {
    /// Hit rate percentage across the cache's lifetime.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hit_count + self.miss_count;
        if total == 0 {
            0.0
        } else {
            (self.hit_count as f64 / total as f64) * 100.0
        }
    }
}
