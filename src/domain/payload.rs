// src/domain/payload.rs
use crate::domain::record::BookmarkRecord;
use crate::domain::stats::BookmarkStats;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Everything a source delivers in one fetch: the flat record list plus the
/// envelope fields that travel with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkPayload {
    pub records: Vec<BookmarkRecord>,
    pub timestamp: Option<DateTime<Utc>>,
    pub version: Option<String>,
    /// Count as claimed by the producer; not checked against `records`.
    pub count: Option<u64>,
    /// Opaque display/sync settings, passed through.
    pub settings: Map<String, Value>,
    /// Stats precomputed by the producer, if it shipped readable ones.
    pub preset_stats: Option<BookmarkStats>,
}

impl BookmarkPayload {
    pub fn from_records(records: Vec<BookmarkRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }
}
