// src/infrastructure/repositories/embedded_source.rs
use crate::domain::error::DomainResult;
use crate::domain::payload::BookmarkPayload;
use crate::domain::repositories::bookmark_source::BookmarkSource;
use crate::infrastructure::json::parse_payload;

const DEFAULT_BOOKMARKS: &str = include_str!("../../../resources/default_bookmarks.json");

/// Sample collection compiled into the binary; the last resort when the
/// configured source cannot be read.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedSource;

impl EmbeddedSource {
    pub fn new() -> Self {
        Self
    }
}

impl BookmarkSource for EmbeddedSource {
    fn fetch(&self) -> DomainResult<BookmarkPayload> {
        parse_payload(DEFAULT_BOOKMARKS).map_err(|e| e.context("built-in bookmarks"))
    }

    fn describe(&self) -> String {
        "built-in sample bookmarks".to_string()
    }

    fn is_available(&self) -> bool {
        true
    }
}
