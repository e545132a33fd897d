// src/domain/repositories/bookmark_source.rs
use crate::domain::error::DomainResult;
use crate::domain::payload::BookmarkPayload;
use std::fmt::Debug;

/// Somewhere a complete bookmark payload can be fetched from.
///
/// A fetch always delivers the whole collection; there is no partial or
/// incremental loading.
pub trait BookmarkSource: Send + Sync + Debug {
    fn fetch(&self) -> DomainResult<BookmarkPayload>;

    /// Human readable location, used in logs and `info` output.
    fn describe(&self) -> String;

    /// Cheap reachability probe; must not fail.
    fn is_available(&self) -> bool;
}
