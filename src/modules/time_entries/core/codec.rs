// Codec for the cache wire format.
//
// Responsibilities
// - Round-trip a time entry across the text-serialized cache boundary.
// - Revive the date fields (`time`, `created`, `updated`) into typed UTC
//   timestamps on decode; everything else decodes as-is.

use thiserror::Error;

use crate::modules::time_entries::core::entry::TimeEntry;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Serializes an entry to the JSON payload stored under `cache:{id}`. Dates
/// are written as RFC 3339 text so the payload stays readable from any redis
/// client.
pub fn encode(entry: &TimeEntry) -> Result<String, CodecError> {
    serde_json::to_string(entry).map_err(CodecError::Encode)
}

/// Rebuilds a typed entry from a cached payload. A revived date field supports
/// the same comparisons and zone conversions as one freshly read from the
/// store.
pub fn decode(raw: &str) -> Result<TimeEntry, CodecError> {
    serde_json::from_str(raw).map_err(CodecError::Decode)
}
