// Zone-local read projection.
//
// Responsibilities
// - Map the canonical UTC `time` into a caller-requested zone.
// - Leave the canonical record untouched; the projection is never persisted.

use chrono_tz::Tz;
use serde::Serialize;
use thiserror::Error;

use crate::modules::time_entries::core::entry::{EntryId, TimeEntry};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid TZ {0}")]
pub struct UnknownZone(pub String);

/// Read-only view of an entry with `time` rendered in a local zone. A separate
/// type so a localized view can never be written back as the canonical record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedEntry {
    pub id: EntryId,
    pub description: Option<String>,
    pub time: String,
    pub created: chrono::DateTime<chrono::Utc>,
    pub updated: chrono::DateTime<chrono::Utc>,
}

/// Projects `entry.time` into `zone`. The zone name is URL-decoded first
/// (query values arrive as e.g. `America%2FNew_York`); unknown names fail,
/// they never fall back to UTC.
pub fn convert(entry: &TimeEntry, zone: &str) -> Result<LocalizedEntry, UnknownZone> {
    let decoded = urlencoding::decode(zone).map_err(|_| UnknownZone(zone.to_string()))?;
    let tz: Tz = decoded
        .parse()
        .map_err(|_| UnknownZone(decoded.to_string()))?;
    let local = entry.time.with_timezone(&tz);
    Ok(LocalizedEntry {
        id: entry.id.clone(),
        description: entry.description.clone(),
        time: local.to_rfc3339(),
        created: entry.created,
        updated: entry.updated,
    })
}
