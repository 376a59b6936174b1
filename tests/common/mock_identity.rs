//! Mock identity directory for integration tests
//!
//! Simulates the hosted provider's profile directory so tests run without
//! network access. Tracks call counts so tests can verify batching and
//! cache behavior.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chirp::error::Result;
use chirp::identity::ProfileProvider;
use chirp::models::Author;

#[derive(Clone)]
pub struct MockIdentityDirectory {
    profiles: Arc<Mutex<HashMap<String, Author>>>,
    batch_call_count: Arc<Mutex<usize>>,
    username_call_count: Arc<Mutex<usize>>,
}

impl MockIdentityDirectory {
    /// Create a mock directory with the given profiles, keyed by user id.
    pub fn new(profiles: Vec<Author>) -> Self {
        let map = profiles
            .into_iter()
            .map(|author| (author.id.clone(), author))
            .collect();
        Self {
            profiles: Arc::new(Mutex::new(map)),
            batch_call_count: Arc::new(Mutex::new(0)),
            username_call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a mock directory that knows no one.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Number of batch id lookups made against the directory.
    pub fn batch_call_count(&self) -> usize {
        *self.batch_call_count.lock().unwrap()
    }

    /// Number of username lookups made against the directory.
    pub fn username_call_count(&self) -> usize {
        *self.username_call_count.lock().unwrap()
    }
}

#[async_trait]
impl ProfileProvider for MockIdentityDirectory {
    async fn profiles_by_ids(&self, ids: &[String]) -> Result<Vec<Author>> {
        *self.batch_call_count.lock().unwrap() += 1;
        let profiles = self.profiles.lock().unwrap();
        // Unknown ids are absent from the result, like the real directory
        Ok(ids
            .iter()
            .filter_map(|id| profiles.get(id).cloned())
            .collect())
    }

    async fn profile_by_username(&self, username: &str) -> Result<Option<Author>> {
        *self.username_call_count.lock().unwrap() += 1;
        let profiles = self.profiles.lock().unwrap();
        Ok(profiles
            .values()
            .find(|author| author.username == username)
            .cloned())
    }
}
