// src/domain/stats.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary numbers for a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkStats {
    pub total_bookmarks: usize,
    pub total_folders: usize,
    pub max_depth: usize,
    #[serde(default)]
    pub last_sync: Option<DateTime<Utc>>,
}

impl BookmarkStats {
    pub fn total_records(&self) -> usize {
        self.total_bookmarks + self.total_folders
    }
}
