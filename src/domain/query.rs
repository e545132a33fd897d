// src/domain/query.rs
use crate::domain::error::DomainError;
use crate::domain::record::BookmarkRecord;
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use std::collections::HashSet;
use std::marker::PhantomData;
use std::str::FromStr;

/*
 * Filters are specifications: small predicates over a record that can be
 * combined with AND. A SearchFilter is the user-facing bundle
 * (kind, date range, tags) and turns itself into one combined specification.
 */

/// A predicate that determines if an entity matches criteria
pub trait Specification<T> {
    fn is_satisfied_by(&self, entity: &T) -> bool;
}

impl<T> Specification<T> for Box<dyn Specification<T>> {
    fn is_satisfied_by(&self, entity: &T) -> bool {
        (**self).is_satisfied_by(entity)
    }
}

impl<T, S> Specification<T> for &S
where
    S: Specification<T> + ?Sized,
{
    fn is_satisfied_by(&self, entity: &T) -> bool {
        (**self).is_satisfied_by(entity)
    }
}

/// Combines specifications with logical AND
pub struct AndSpecification<T, A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    spec_a: A,
    spec_b: B,
    _marker: PhantomData<T>,
}

impl<T, A, B> AndSpecification<T, A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    pub fn new(spec_a: A, spec_b: B) -> Self {
        Self {
            spec_a,
            spec_b,
            _marker: PhantomData,
        }
    }
}

impl<T, A, B> Specification<T> for AndSpecification<T, A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    fn is_satisfied_by(&self, entity: &T) -> bool {
        self.spec_a.is_satisfied_by(entity) && self.spec_b.is_satisfied_by(entity)
    }
}

/// Matches everything.
pub struct AnySpecification;

impl<T> Specification<T> for AnySpecification {
    fn is_satisfied_by(&self, _entity: &T) -> bool {
        true
    }
}

/// Folder/link selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKindFilter {
    Folder,
    Link,
}

impl FromStr for RecordKindFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "folder" | "folders" => Ok(RecordKindFilter::Folder),
            "link" | "links" | "bookmark" | "bookmarks" => Ok(RecordKindFilter::Link),
            other => Err(DomainError::InvalidInput(format!(
                "unknown record kind '{}', expected 'folder' or 'link'",
                other
            ))),
        }
    }
}

pub struct KindSpecification {
    kind: RecordKindFilter,
}

impl KindSpecification {
    pub fn new(kind: RecordKindFilter) -> Self {
        Self { kind }
    }

    pub fn folders() -> Self {
        Self::new(RecordKindFilter::Folder)
    }

    pub fn links() -> Self {
        Self::new(RecordKindFilter::Link)
    }
}

impl Specification<BookmarkRecord> for KindSpecification {
    fn is_satisfied_by(&self, record: &BookmarkRecord) -> bool {
        match self.kind {
            RecordKindFilter::Folder => record.is_folder(),
            RecordKindFilter::Link => !record.is_folder(),
        }
    }
}

/// `dateAdded` within `[start, end]`; either bound may be open.
pub struct DateRangeSpecification {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl DateRangeSpecification {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }
}

impl Specification<BookmarkRecord> for DateRangeSpecification {
    fn is_satisfied_by(&self, record: &BookmarkRecord) -> bool {
        let added = record.date_added;
        self.start.map_or(true, |s| added >= s.timestamp_millis())
            && self.end.map_or(true, |e| added <= e.timestamp_millis())
    }
}

/// At least one of the given tags (exact, case-sensitive).
pub struct AnyTagSpecification {
    tags: HashSet<String>,
}

impl AnyTagSpecification {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }
}

impl Specification<BookmarkRecord> for AnyTagSpecification {
    fn is_satisfied_by(&self, record: &BookmarkRecord) -> bool {
        record.tags().iter().any(|t| self.tags.contains(t))
    }
}

/// Case-insensitive substring on name or url.
pub struct TextSearchSpecification {
    query: String,
}

impl TextSearchSpecification {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_lowercase(),
        }
    }
}

impl Specification<BookmarkRecord> for TextSearchSpecification {
    fn is_satisfied_by(&self, record: &BookmarkRecord) -> bool {
        record.name.to_lowercase().contains(&self.query)
            || record
                .url()
                .is_some_and(|u| u.to_lowercase().contains(&self.query))
    }
}

/// Extension trait to make combining specifications more readable
pub trait SpecificationExt<T>: Specification<T> {
    fn and<S: Specification<T>>(self, other: S) -> AndSpecification<T, Self, S>
    where
        Self: Sized,
    {
        AndSpecification::new(self, other)
    }
}

impl<T, S> SpecificationExt<T> for S where S: Specification<T> {}

/// Optional narrowing applied on top of a text search.
#[derive(Builder, Debug, Clone, Default, PartialEq)]
#[builder(setter(into), default)]
pub struct SearchFilter {
    pub kind: Option<RecordKindFilter>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

impl SearchFilter {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.since.is_none() && self.until.is_none() && self.tags.is_empty()
    }

    /// All set criteria ANDed together.
    pub fn to_specification(&self) -> Box<dyn Specification<BookmarkRecord>> {
        let mut spec: Box<dyn Specification<BookmarkRecord>> = Box::new(AnySpecification);

        if let Some(kind) = self.kind {
            spec = Box::new(spec.and(KindSpecification::new(kind)));
        }
        if self.since.is_some() || self.until.is_some() {
            spec = Box::new(spec.and(DateRangeSpecification::new(self.since, self.until)));
        }
        if !self.tags.is_empty() {
            spec = Box::new(spec.and(AnyTagSpecification::new(self.tags.clone())));
        }
        spec
    }
}
