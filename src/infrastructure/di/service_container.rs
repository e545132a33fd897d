// src/infrastructure/di/service_container.rs
use crate::application::error::ApplicationResult;
use crate::application::services::catalog_service::CatalogService;
use crate::application::CatalogServiceImpl;
use crate::config::Settings;
use crate::domain::repositories::bookmark_source::BookmarkSource;
use crate::infrastructure::repositories::{create_source, EmbeddedSource};
use std::sync::Arc;
use tracing::debug;

/// Production service container, the single place where sources and
/// services are wired together.
pub struct ServiceContainer {
    pub primary_source: Arc<dyn BookmarkSource>,
    pub catalog: Arc<dyn CatalogService>,
}

impl ServiceContainer {
    /// Configured source as primary, built-in sample data as fallback.
    /// Without a configured source the sample data is the primary.
    pub fn new(config: &Settings) -> ApplicationResult<Self> {
        let embedded: Arc<dyn BookmarkSource> = Arc::new(EmbeddedSource::new());

        let (primary, fallback) = match config.source.as_deref() {
            Some(location) => {
                let primary = create_source(location, config.http_timeout_ms)?;
                (primary, Some(embedded))
            }
            None => {
                debug!("No source configured, using built-in bookmarks");
                (embedded, None)
            }
        };

        Ok(Self::with_sources(primary, fallback))
    }

    pub fn with_sources(
        primary: Arc<dyn BookmarkSource>,
        fallback: Option<Arc<dyn BookmarkSource>>,
    ) -> Self {
        let catalog = Arc::new(CatalogServiceImpl::new(primary.clone(), fallback));
        Self {
            primary_source: primary,
            catalog,
        }
    }
}

impl std::fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("primary_source", &self.primary_source.describe())
            .field("catalog", &"Arc<dyn CatalogService>")
            .finish()
    }
}
