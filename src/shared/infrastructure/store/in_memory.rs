// In memory implementation of the EntryStore port.
//
// Purpose
// - Support repository and inbound tests, and local development without a
//   database.
//
// Responsibilities
// - Assign ids and timestamps the way the durable store would.
// - Count `find_by_id` calls so tests can prove a read was served from cache.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

use crate::modules::time_entries::core::entry::{EntryDraft, EntryId, EntryPatch, TimeEntry};
use crate::shared::infrastructure::store::{EntryStore, StoreError};

pub struct InMemoryStore {
    inner: RwLock<HashMap<EntryId, TimeEntry>>,
    offline: AtomicBool,
    find_by_id_calls: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            offline: AtomicBool::new(false),
            find_by_id_calls: AtomicUsize::new(0),
        }
    }

    pub fn toggle_offline(&self) {
        self.offline.fetch_xor(true, Ordering::SeqCst);
    }

    pub fn find_by_id_calls(&self) -> usize {
        self.find_by_id_calls.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("Store offline".into()));
        }
        Ok(())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl EntryStore for InMemoryStore {
    async fn find(&self) -> Result<Vec<TimeEntry>, StoreError> {
        self.check_online()?;
        let guard = self.inner.read().await;
        let mut entries: Vec<TimeEntry> = guard.values().cloned().collect();
        entries.sort_by(|a, b| a.created.cmp(&b.created));
        Ok(entries)
    }

    async fn find_by_id(&self, id: &EntryId) -> Result<Option<TimeEntry>, StoreError> {
        self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        let guard = self.inner.read().await;
        Ok(guard.get(id).cloned())
    }

    async fn insert(&self, draft: EntryDraft) -> Result<TimeEntry, StoreError> {
        self.check_online()?;
        let now = Utc::now();
        let entry = TimeEntry {
            id: EntryId::generate(),
            description: draft.description,
            time: draft.time,
            created: now,
            updated: now,
        };
        let mut guard = self.inner.write().await;
        guard.insert(entry.id.clone(), entry.clone());
        Ok(entry)
    }

    async fn find_by_id_and_update(
        &self,
        id: &EntryId,
        patch: EntryPatch,
    ) -> Result<Option<TimeEntry>, StoreError> {
        self.check_online()?;
        let mut guard = self.inner.write().await;
        let Some(entry) = guard.get_mut(id) else {
            return Ok(None);
        };
        if let Some(description) = patch.description {
            entry.description = Some(description);
        }
        if let Some(time) = patch.time {
            entry.time = time;
        }
        entry.updated = Utc::now();
        Ok(Some(entry.clone()))
    }

    async fn find_by_id_and_delete(&self, id: &EntryId) -> Result<Option<TimeEntry>, StoreError> {
        self.check_online()?;
        let mut guard = self.inner.write().await;
        Ok(guard.remove(id))
    }
}
