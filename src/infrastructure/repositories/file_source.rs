// src/infrastructure/repositories/file_source.rs
use crate::domain::error::DomainResult;
use crate::domain::payload::BookmarkPayload;
use crate::domain::repositories::bookmark_source::BookmarkSource;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::json::parse_payload;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Bookmark export stored as a local JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// `~` and environment variables in `path` are expanded.
    pub fn new(path: &str) -> Self {
        let expanded = shellexpand::full(path)
            .map(|p| p.into_owned())
            .unwrap_or_else(|_| path.to_string());
        Self {
            path: PathBuf::from(expanded),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BookmarkSource for FileSource {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn fetch(&self) -> DomainResult<BookmarkPayload> {
        let text = fs::read_to_string(&self.path)
            .map_err(|e| InfrastructureError::from(e).at(self.describe()))?;
        debug!("Read {} bytes", text.len());

        parse_payload(&text).map_err(|e| e.context(self.describe()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }
}
