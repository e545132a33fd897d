// src/application/services/catalog_service_impl.rs
use crate::application::error::ApplicationResult;
use crate::application::services::catalog_service::{
    CatalogService, CatalogSnapshot, SnapshotOrigin, SnapshotReceiver,
};
use crate::domain::repositories::bookmark_source::BookmarkSource;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

#[derive(Debug)]
pub struct CatalogServiceImpl {
    primary: Arc<dyn BookmarkSource>,
    fallback: Option<Arc<dyn BookmarkSource>>,
    current: watch::Sender<Option<Arc<CatalogSnapshot>>>,
}

impl CatalogServiceImpl {
    pub fn new(
        primary: Arc<dyn BookmarkSource>,
        fallback: Option<Arc<dyn BookmarkSource>>,
    ) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            primary,
            fallback,
            current,
        }
    }
}

impl CatalogService for CatalogServiceImpl {
    #[instrument(skip(self), level = "debug")]
    fn load(&self) -> ApplicationResult<Arc<CatalogSnapshot>> {
        let (payload, origin, source) = match self.primary.fetch() {
            Ok(payload) => (payload, SnapshotOrigin::Primary, self.primary.describe()),
            Err(primary_err) => {
                let Some(fallback) = &self.fallback else {
                    return Err(primary_err.into());
                };
                warn!(
                    "Loading from {} failed, using {}: {}",
                    self.primary.describe(),
                    fallback.describe(),
                    primary_err
                );
                let payload = fallback
                    .fetch()
                    .map_err(|e| e.context(format!("fallback after '{}'", primary_err)))?;
                (payload, SnapshotOrigin::Fallback, fallback.describe())
            }
        };

        let snapshot = Arc::new(CatalogSnapshot::new(payload, origin, source));
        info!(
            "Loaded {} records from {} ({})",
            snapshot.tree.len(),
            snapshot.source,
            snapshot.origin
        );

        self.current.send_replace(Some(snapshot.clone()));
        debug!("Snapshot swapped, {} subscriber(s)", self.current.receiver_count());
        Ok(snapshot)
    }

    fn snapshot(&self) -> Option<Arc<CatalogSnapshot>> {
        self.current.borrow().clone()
    }

    fn subscribe(&self) -> SnapshotReceiver {
        self.current.subscribe()
    }

    fn check_source(&self) -> bool {
        self.primary.is_available()
    }

    fn source_description(&self) -> String {
        self.primary.describe()
    }
}
