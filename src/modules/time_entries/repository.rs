// Cache-aside orchestration over the durable store.
//
// Responsibilities
// - Serve reads cache-first and fall through to the store on a miss.
// - Refresh the cache after store reads and after every mutation; invalidate
//   on delete.
// - Keep the store authoritative: cache failures never fail an operation.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::modules::time_entries::core::codec;
use crate::modules::time_entries::core::entry::{EntryDraft, EntryId, EntryPatch, TimeEntry};
use crate::shared::infrastructure::cache::{Cache, CacheError};
use crate::shared::infrastructure::store::{EntryStore, StoreError};

/// Entries expire on their own this long after population; hits do not extend
/// it, so staleness is bounded by the TTL set at the last write.
pub const CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Time entry [{0}] not found")]
    NotFound(EntryId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Repository with injected store and cache handles. Shared across requests;
/// takes no locks, so concurrent writers to one id race and the last cache
/// write wins regardless of store write order.
pub struct CacheAsideRepository {
    store: Arc<dyn EntryStore>,
    cache: Arc<dyn Cache>,
}

impl CacheAsideRepository {
    pub fn new(store: Arc<dyn EntryStore>, cache: Arc<dyn Cache>) -> Self {
        Self { store, cache }
    }

    fn cache_key(id: &EntryId) -> String {
        format!("cache:{id}")
    }

    /// Uncached pass-through; list reads always hit the store.
    pub async fn list(&self) -> Result<Vec<TimeEntry>, RepositoryError> {
        Ok(self.store.find().await?)
    }

    pub async fn get_by_id(&self, id: &EntryId) -> Result<TimeEntry, RepositoryError> {
        if let Some(entry) = self.lookup_cached(id).await {
            debug!(%id, "cached entry retrieved");
            return Ok(entry);
        }

        let entry = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))?;
        debug!(%id, "store entry retrieved");

        if let Err(err) = self.refresh(&entry).await {
            warn!(%id, %err, "cache populate failed after read");
        }
        Ok(entry)
    }

    pub async fn create(&self, draft: EntryDraft) -> Result<TimeEntry, RepositoryError> {
        let entry = self.store.insert(draft).await?;
        debug!(id = %entry.id, "time entry saved");

        if let Err(err) = self.refresh(&entry).await {
            warn!(id = %entry.id, %err, "cache populate failed after create");
        }
        Ok(entry)
    }

    pub async fn update(&self, id: &EntryId, patch: EntryPatch) -> Result<TimeEntry, RepositoryError> {
        let entry = self
            .store
            .find_by_id_and_update(id, patch)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))?;
        debug!(%id, "time entry updated");

        if let Err(err) = self.refresh(&entry).await {
            warn!(%id, %err, "cache overwrite failed after update");
        }
        Ok(entry)
    }

    pub async fn delete(&self, id: &EntryId) -> Result<(), RepositoryError> {
        self.store
            .find_by_id_and_delete(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))?;
        debug!(%id, "time entry deleted");

        // Best effort like the refreshes: a failed invalidation leaves a
        // stale entry that expires within the TTL.
        if let Err(err) = self.cache.delete(&Self::cache_key(id)).await {
            warn!(%id, %err, "cache invalidate failed after delete");
        }
        Ok(())
    }

    /// Cache-hit check. Read errors and undecodable payloads degrade to a
    /// miss so the store can answer.
    async fn lookup_cached(&self, id: &EntryId) -> Option<TimeEntry> {
        let raw = match self.cache.get(&Self::cache_key(id)).await {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(%id, %err, "cache read failed, falling through to store");
                return None;
            }
        };
        match codec::decode(&raw) {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(%id, %err, "cached entry undecodable, falling through to store");
                None
            }
        }
    }

    /// Best effort: callers log and discard the error, they never propagate
    /// it. Overwrites whatever was cached for the id, fresh TTL.
    async fn refresh(&self, entry: &TimeEntry) -> Result<(), CacheError> {
        let payload =
            codec::encode(entry).map_err(|err| CacheError::Backend(err.to_string()))?;
        self.cache
            .set_with_expiry(&Self::cache_key(&entry.id), CACHE_TTL, &payload)
            .await
    }
}
