// In memory implementation of the Cache port.
//
// Purpose
// - Support repository and inbound tests, and local development without redis.
//
// Responsibilities
// - Honor per-key expiry against a monotonic clock.
// - Record the TTL each entry was set with so tests can assert it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::shared::infrastructure::cache::{Cache, CacheError};

struct CacheRow {
    value: String,
    ttl: Duration,
    inserted: Instant,
}

pub struct InMemoryCache {
    inner: RwLock<HashMap<String, CacheRow>>,
    offline: AtomicBool,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            offline: AtomicBool::new(false),
        }
    }

    pub fn toggle_offline(&self) {
        self.offline.fetch_xor(true, Ordering::SeqCst);
    }

    /// TTL the key was last set with, for assertions on expiry arguments.
    pub async fn ttl_of(&self, key: &str) -> Option<Duration> {
        let guard = self.inner.read().await;
        guard.get(key).map(|row| row.ttl)
    }

    fn check_online(&self) -> Result<(), CacheError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CacheError::Backend("Cache offline".into()));
        }
        Ok(())
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.check_online()?;
        let guard = self.inner.read().await;
        let value = guard
            .get(key)
            .filter(|row| row.inserted.elapsed() < row.ttl)
            .map(|row| row.value.clone());
        Ok(value)
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        ttl: Duration,
        value: &str,
    ) -> Result<(), CacheError> {
        self.check_online()?;
        let mut guard = self.inner.write().await;
        guard.insert(
            key.to_string(),
            CacheRow {
                value: value.to_string(),
                ttl,
                inserted: Instant::now(),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.check_online()?;
        let mut guard = self.inner.write().await;
        guard.remove(key);
        Ok(())
    }
}
