// src/domain/search.rs
use crate::domain::record::BookmarkRecord;
use itertools::Itertools;
use regex::RegexBuilder;
use serde::Serialize;
use std::ops::Range;

/// Maximum number of entries returned by [`suggestions`].
pub const SUGGESTION_LIMIT: usize = 5;

/// A matching record together with its ancestor folder names.
///
/// Serializes as the record's own fields plus `path`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub record: BookmarkRecord,
    pub path: Vec<String>,
}

impl SearchHit {
    /// Path rendered as a breadcrumb, `"Work > Docs"`.
    pub fn breadcrumb(&self) -> String {
        self.path.join(" > ")
    }
}

/// Names and urls containing `query` (case-insensitive), first-seen order, no duplicates.
pub fn suggestions(records: &[BookmarkRecord], query: &str, limit: usize) -> Vec<String> {
    let needle = query.to_lowercase();
    records
        .iter()
        .flat_map(|record| {
            let name = Some(record.name.as_str()).filter(|n| n.to_lowercase().contains(&needle));
            let url = record.url().filter(|u| u.to_lowercase().contains(&needle));
            name.into_iter().chain(url)
        })
        .unique()
        .take(limit)
        .map(str::to_string)
        .collect()
}

/// Byte ranges of case-insensitive, literal occurrences of `query` in `text`.
pub fn highlight_ranges(text: &str, query: &str) -> Vec<Range<usize>> {
    if query.is_empty() {
        return Vec::new();
    }
    match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re.find_iter(text).map(|m| m.range()).collect(),
        Err(_) => Vec::new(),
    }
}
