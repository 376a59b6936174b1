//! Cache invalidation events
//!
//! Mutations do not touch the query cache directly. A successful mutation
//! publishes an `InvalidationEvent` naming the query key it made stale;
//! the cache listens on the bus and drops matching entries, so the next
//! read refetches. Readers may briefly observe pre-mutation data until the
//! event is processed.
//!
//! # Example
//!
//! ```rust,ignore
//! let bus = InvalidationBus::new(64);
//! bus.publish(InvalidationEvent::created(keys::feed()));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

/// Identity of a cached read query.
pub type QueryKey = String;

/// Query key constructors. One scheme for the whole service so publishers
/// and the cache agree.
pub mod keys {
    use uuid::Uuid;

    use super::QueryKey;

    /// The "all posts" feed query.
    pub fn feed() -> QueryKey {
        "feed".to_string()
    }

    /// The "user by username" profile query.
    pub fn profile(username: &str) -> QueryKey {
        format!("profile:{}", username)
    }

    /// The single-post permalink query.
    pub fn post(id: Uuid) -> QueryKey {
        format!("post:{}", id)
    }
}

/// What happened to the data behind a query key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidationAction {
    Created,
    Updated,
    Deleted,
}

impl std::fmt::Display for InvalidationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidationAction::Created => write!(f, "created"),
            InvalidationAction::Updated => write!(f, "updated"),
            InvalidationAction::Deleted => write!(f, "deleted"),
        }
    }
}

/// Event published when a mutation makes a cached query stale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidationEvent {
    /// Unique event id, for tracing
    pub event_id: Uuid,
    /// The query key that must be dropped
    pub query_key: QueryKey,
    /// What the mutation did
    pub action: InvalidationAction,
    /// When the event was published
    pub timestamp: DateTime<Utc>,
}

impl InvalidationEvent {
    pub fn new(query_key: QueryKey, action: InvalidationAction) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            query_key,
            action,
            timestamp: Utc::now(),
        }
    }

    /// Event for a newly created entity behind `query_key`.
    pub fn created(query_key: QueryKey) -> Self {
        Self::new(query_key, InvalidationAction::Created)
    }
}

/// In-process publish/subscribe channel for invalidation events.
///
/// Cloning shares the underlying channel. Publishing never blocks; if no
/// subscriber is attached yet the event is dropped, which is harmless
/// because an empty cache has nothing to invalidate.
#[derive(Clone)]
pub struct InvalidationBus {
    sender: broadcast::Sender<InvalidationEvent>,
}

impl InvalidationBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: InvalidationEvent) {
        debug!(
            event_id = %event.event_id,
            query_key = %event.query_key,
            action = %event.action,
            "Publishing invalidation event"
        );

        // Err means no active subscribers; nothing is stale in that case.
        let _ = self.sender.send(event);
    }

    /// Subscribe to invalidation events from this point on.
    pub fn subscribe(&self) -> broadcast::Receiver<InvalidationEvent> {
        self.sender.subscribe()
    }
}

impl Default for InvalidationBus {
    fn default() -> Self {
        Self::new(64)
    }
}
