// Cache port.
//
// Purpose
// - Describe the key/value side channel the repository populates and
//   invalidates alongside store reads and writes.
//
// Boundaries
// - Per-key expiry is the backend's job; nothing here evicts or scans.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub mod in_memory;
pub mod redis_impl;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    async fn set_with_expiry(
        &self,
        key: &str,
        ttl: Duration,
        value: &str,
    ) -> Result<(), CacheError>;
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}
