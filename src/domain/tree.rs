// src/domain/tree.rs
use crate::domain::query::{Specification, SpecificationExt, TextSearchSpecification};
use crate::domain::record::{is_root_sentinel, BookmarkRecord, ROOT_ID};
use crate::domain::search::SearchHit;
use crate::domain::stats::BookmarkStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument, warn};

/// Where an upward path walk ends.
///
/// `PrimaryOnly` stops when the parent is `"0"`; a record sitting below the
/// legacy sentinel `"1"` therefore still lists the record `"1"` (if present)
/// as an ancestor. `AnyRoot` stops at either sentinel, consistent with
/// root detection in [`BookmarkTree::root_items`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathTermination {
    #[default]
    #[serde(rename = "primary")]
    PrimaryOnly,
    #[serde(rename = "any")]
    AnyRoot,
}

impl PathTermination {
    fn stops_at(self, parent_id: &str) -> bool {
        match self {
            PathTermination::PrimaryOnly => parent_id == ROOT_ID,
            PathTermination::AnyRoot => is_root_sentinel(parent_id),
        }
    }
}

/// Read-only index over a flat record list.
///
/// Holds one immutable snapshot; `load` discards it and indexes a new one.
/// Queries never fail: absence is an empty result or `None`, malformed
/// parent links are cut off at the first repeat or after as many steps as
/// there are records.
#[derive(Debug, Clone, Default)]
pub struct BookmarkTree {
    records: Vec<BookmarkRecord>,
    by_id: HashMap<String, usize>,
    by_parent: HashMap<String, Vec<usize>>,
    last_sync: Option<DateTime<Utc>>,
}

impl BookmarkTree {
    pub fn new(records: Vec<BookmarkRecord>) -> Self {
        let mut tree = Self::default();
        tree.load(records);
        tree
    }

    pub fn with_last_sync(mut self, last_sync: Option<DateTime<Utc>>) -> Self {
        self.last_sync = last_sync;
        self
    }

    /// Replaces the held collection wholesale.
    #[instrument(level = "debug", skip(self, records), fields(count = records.len()))]
    pub fn load(&mut self, records: Vec<BookmarkRecord>) {
        let mut by_id = HashMap::with_capacity(records.len());
        let mut by_parent: HashMap<String, Vec<usize>> = HashMap::new();

        for (idx, record) in records.iter().enumerate() {
            if let Some(id) = &record.id {
                // first occurrence wins, like a linear find
                by_id.entry(id.clone()).or_insert(idx);
            }
            by_parent
                .entry(record.parent_id.clone())
                .or_default()
                .push(idx);
        }

        if by_id.len() < records.iter().filter(|r| r.id.is_some()).count() {
            warn!("Snapshot contains duplicate ids, lookups use the first occurrence");
        }

        self.records = records;
        self.by_id = by_id;
        self.by_parent = by_parent;
        self.last_sync = None;
        debug!("Indexed {} records", self.records.len());
    }

    pub fn records(&self) -> &[BookmarkRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last_sync(&self) -> Option<DateTime<Utc>> {
        self.last_sync
    }

    /// Records whose parent is either root sentinel, in source order.
    pub fn root_items(&self) -> Vec<&BookmarkRecord> {
        self.root_indices().map(|idx| &self.records[idx]).collect()
    }

    /// One level below `parent_id`, in source order.
    ///
    /// `"0"` is an alias for [`root_items`](Self::root_items); no other id is special.
    pub fn children(&self, parent_id: &str) -> Vec<&BookmarkRecord> {
        if parent_id == ROOT_ID {
            return self.root_items();
        }
        self.child_indices(parent_id)
            .iter()
            .map(|&idx| &self.records[idx])
            .collect()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&BookmarkRecord> {
        self.by_id.get(id).map(|&idx| &self.records[idx])
    }

    /// Ancestor names from the top down to the direct parent, excluding the record itself.
    pub fn build_path(&self, id: &str) -> Vec<String> {
        self.build_path_with(id, PathTermination::PrimaryOnly)
    }

    pub fn build_path_with(&self, id: &str, termination: PathTermination) -> Vec<String> {
        let Some(&start) = self.by_id.get(id) else {
            return Vec::new();
        };

        let mut names = Vec::new();
        let mut visited = HashSet::from([start]);
        let mut current = &self.records[start];

        while !termination.stops_at(&current.parent_id) && names.len() < self.records.len() {
            let Some(&parent_idx) = self.by_id.get(&current.parent_id) else {
                break;
            };
            if !visited.insert(parent_idx) {
                warn!("Cyclic parent chain at '{}' while building path for '{}'", current.parent_id, id);
                break;
            }
            current = &self.records[parent_idx];
            names.push(current.name.clone());
        }

        names.reverse();
        names
    }

    /// Case-insensitive substring match on name or url over the whole list.
    ///
    /// An empty query matches every record; callers wanting "no results" must not call it.
    #[instrument(level = "debug", skip(self))]
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        self.matching(&TextSearchSpecification::new(query))
    }

    /// [`search`](Self::search) narrowed by an additional predicate.
    pub fn search_filtered<S>(&self, query: &str, filter: &S) -> Vec<SearchHit>
    where
        S: Specification<BookmarkRecord> + ?Sized,
    {
        self.matching(&TextSearchSpecification::new(query).and(filter))
    }

    fn matching<S>(&self, spec: &S) -> Vec<SearchHit>
    where
        S: Specification<BookmarkRecord>,
    {
        self.records
            .iter()
            .filter(|record| spec.is_satisfied_by(record))
            .map(|record| self.hit_for(record))
            .collect()
    }

    pub fn compute_stats(&self) -> BookmarkStats {
        let total_folders = self.records.iter().filter(|r| r.is_folder()).count();
        let total_bookmarks = self.records.len() - total_folders;

        let max_depth = self
            .root_indices()
            .filter(|&idx| self.records[idx].is_folder())
            .map(|idx| self.folder_depth(idx, 2))
            .fold(1, usize::max);

        BookmarkStats {
            total_bookmarks,
            total_folders,
            max_depth,
            last_sync: self.last_sync,
        }
    }

    /// Deepest folder level below `root` (inclusive), where `root` sits at `root_depth`.
    /// Link children never add a level.
    fn folder_depth(&self, root: usize, root_depth: usize) -> usize {
        let cap = self.records.len() + root_depth;
        let mut deepest = root_depth;
        let mut visited = HashSet::from([root]);
        let mut stack = vec![(root, root_depth)];

        while let Some((idx, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if depth >= cap {
                continue;
            }
            let Some(id) = self.records[idx].id.as_deref() else {
                continue;
            };
            for &child in self.child_indices(id) {
                if self.records[child].is_folder() && visited.insert(child) {
                    stack.push((child, depth + 1));
                }
            }
        }
        deepest
    }

    /// Pre-order walk below `id` (`"0"` walks from the roots), paired with the
    /// level relative to the start (direct children are level 0).
    ///
    /// Each record is yielded at most once, so cyclic parent links terminate.
    pub fn descendants(&self, id: &str, max_depth: Option<usize>) -> Vec<(usize, &BookmarkRecord)> {
        let start: Vec<usize> = if id == ROOT_ID {
            self.root_indices().collect()
        } else {
            self.child_indices(id).to_vec()
        };

        let mut out = Vec::new();
        let mut visited: HashSet<usize> = self.by_id.get(id).copied().into_iter().collect();
        let mut stack: Vec<(usize, usize)> = start.into_iter().rev().map(|idx| (idx, 0)).collect();

        while let Some((idx, level)) = stack.pop() {
            if !visited.insert(idx) {
                continue;
            }
            let record = &self.records[idx];
            out.push((level, record));

            if max_depth.is_some_and(|max| level + 1 >= max) {
                continue;
            }
            if let Some(child_id) = record.id.as_deref() {
                for &child in self.child_indices(child_id).iter().rev() {
                    stack.push((child, level + 1));
                }
            }
        }
        out
    }

    fn hit_for(&self, record: &BookmarkRecord) -> SearchHit {
        let path = record
            .id
            .as_deref()
            .map(|id| self.build_path(id))
            .unwrap_or_default();
        SearchHit {
            record: record.clone(),
            path,
        }
    }

    fn root_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.is_root_level())
            .map(|(idx, _)| idx)
    }

    fn child_indices(&self, parent_id: &str) -> &[usize] {
        self.by_parent
            .get(parent_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
