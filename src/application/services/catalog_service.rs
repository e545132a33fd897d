// src/application/services/catalog_service.rs
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::payload::BookmarkPayload;
use crate::domain::record::BookmarkRecord;
use crate::domain::stats::BookmarkStats;
use crate::domain::tree::BookmarkTree;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::fmt::{self, Debug};
use std::sync::Arc;
use tokio::sync::watch;

/// Which source delivered the current snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOrigin {
    Primary,
    Fallback,
}

impl fmt::Display for SnapshotOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotOrigin::Primary => write!(f, "primary"),
            SnapshotOrigin::Fallback => write!(f, "fallback"),
        }
    }
}

/// One immutable load result. Replaced as a whole on every (re)load.
#[derive(Debug)]
pub struct CatalogSnapshot {
    pub tree: BookmarkTree,
    pub origin: SnapshotOrigin,
    pub source: String,
    pub version: Option<String>,
    pub count: Option<u64>,
    pub settings: Map<String, Value>,
    pub preset_stats: Option<BookmarkStats>,
    pub loaded_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    pub fn new(payload: BookmarkPayload, origin: SnapshotOrigin, source: String) -> Self {
        let tree = BookmarkTree::new(payload.records).with_last_sync(payload.timestamp);
        Self {
            tree,
            origin,
            source,
            version: payload.version,
            count: payload.count,
            settings: payload.settings,
            preset_stats: payload.preset_stats,
            loaded_at: Utc::now(),
        }
    }

    /// Stats shipped with the payload when present, computed otherwise.
    pub fn effective_stats(&self) -> BookmarkStats {
        self.preset_stats
            .clone()
            .unwrap_or_else(|| self.tree.compute_stats())
    }

    pub fn require_record(&self, id: &str) -> ApplicationResult<&BookmarkRecord> {
        self.tree
            .find_by_id(id)
            .ok_or_else(|| ApplicationError::RecordNotFound(id.to_string()))
    }
}

pub type SnapshotReceiver = watch::Receiver<Option<Arc<CatalogSnapshot>>>;

/// Application context around the bookmark tree: owns the current snapshot,
/// knows where to (re)load it from and tells subscribers when it changes.
pub trait CatalogService: Send + Sync + Debug {
    /// Fetches a fresh payload and swaps it in. Falls back to the secondary
    /// source when the primary one fails.
    fn load(&self) -> ApplicationResult<Arc<CatalogSnapshot>>;

    /// Same as `load`; named for the user-facing action.
    fn refresh(&self) -> ApplicationResult<Arc<CatalogSnapshot>> {
        self.load()
    }

    /// `None` until the first successful load.
    fn snapshot(&self) -> Option<Arc<CatalogSnapshot>>;

    fn current(&self) -> ApplicationResult<Arc<CatalogSnapshot>> {
        self.snapshot().ok_or(ApplicationError::NotLoaded)
    }

    /// Snapshot if loaded, otherwise loads it.
    fn ensure_loaded(&self) -> ApplicationResult<Arc<CatalogSnapshot>> {
        match self.snapshot() {
            Some(snapshot) => Ok(snapshot),
            None => self.load(),
        }
    }

    /// Receiver that observes every snapshot swap.
    fn subscribe(&self) -> SnapshotReceiver;

    /// Whether the primary source answers right now.
    fn check_source(&self) -> bool;

    fn source_description(&self) -> String;
}
