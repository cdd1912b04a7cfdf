// The time entry domain model.
//
// Responsibilities
// - Define the single typed shape every layer passes around; no ad hoc bags.
// - Validate identifier syntax before any backend is consulted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid id format: {0}")]
pub struct InvalidId(pub String);

/// Store-assigned identifier. Lexically a UUID; parsing rejects anything
/// outside the store's key space without touching the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn parse(raw: &str) -> Result<Self, InvalidId> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| InvalidId(raw.to_string()))
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Canonical record as the store persists it. `time` is always UTC; zone-local
/// views are derived projections and never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: EntryId,
    pub description: Option<String>,
    pub time: DateTime<Utc>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Caller-supplied fields for a new entry. The store assigns `id`, `created`
/// and `updated`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EntryDraft {
    pub description: Option<String>,
    pub time: DateTime<Utc>,
}

/// Partial update. Absent fields keep their stored value; the store bumps
/// `updated` on every successful write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EntryPatch {
    pub description: Option<String>,
    pub time: Option<DateTime<Utc>>,
}
