// Durable store port.
//
// Purpose
// - Describe what the repository needs from the durable store as a trait.
//
// Responsibilities
// - Assign `id` and `created`/`updated` on insert; bump `updated` on update.
//
// Boundaries
// - No concrete input or output here. Adapters implement this trait.

use async_trait::async_trait;
use thiserror::Error;

use crate::modules::time_entries::core::entry::{EntryDraft, EntryId, EntryPatch, TimeEntry};

pub mod in_memory;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn find(&self) -> Result<Vec<TimeEntry>, StoreError>;
    async fn find_by_id(&self, id: &EntryId) -> Result<Option<TimeEntry>, StoreError>;
    async fn insert(&self, draft: EntryDraft) -> Result<TimeEntry, StoreError>;
    async fn find_by_id_and_update(
        &self,
        id: &EntryId,
        patch: EntryPatch,
    ) -> Result<Option<TimeEntry>, StoreError>;
    async fn find_by_id_and_delete(&self, id: &EntryId) -> Result<Option<TimeEntry>, StoreError>;
}
