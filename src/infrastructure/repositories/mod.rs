pub mod embedded_source;
pub mod file_source;
pub mod http_source;

use crate::domain::error::DomainResult;
use crate::domain::repositories::bookmark_source::BookmarkSource;
use std::sync::Arc;
use tracing::debug;

pub use embedded_source::EmbeddedSource;
pub use file_source::FileSource;
pub use http_source::HttpSource;

/// Picks the source implementation from a location string: `http(s)://` URLs
/// are fetched over the network, anything else is read as a local file.
pub fn create_source(location: &str, timeout_ms: u64) -> DomainResult<Arc<dyn BookmarkSource>> {
    let trimmed = location.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        debug!("Using HTTP source: {}", trimmed);
        Ok(Arc::new(HttpSource::new(trimmed, timeout_ms)?))
    } else {
        debug!("Using file source: {}", trimmed);
        Ok(Arc::new(FileSource::new(trimmed)))
    }
}
