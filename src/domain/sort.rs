// src/domain/sort.rs
use crate::domain::error::DomainError;
use crate::domain::record::BookmarkRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Date,
    Type,
}

/// Sort direction enum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "date" | "dateadded" => Ok(SortKey::Date),
            "type" => Ok(SortKey::Type),
            other => Err(DomainError::InvalidInput(format!(
                "unknown sort key '{}', expected name, date or type",
                other
            ))),
        }
    }
}

impl FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(DomainError::InvalidInput(format!(
                "unknown sort order '{}', expected asc or desc",
                other
            ))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Name => write!(f, "name"),
            SortKey::Date => write!(f, "date"),
            SortKey::Type => write!(f, "type"),
        }
    }
}

/// Key plus direction; parses from `"date"` or `"date:desc"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Folders first regardless of direction; direction only flips the within-group order.
    pub fn compare(&self, a: &BookmarkRecord, b: &BookmarkRecord) -> Ordering {
        match (a.is_folder(), b.is_folder()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }

        let ordering = match self.key {
            SortKey::Name | SortKey::Type => compare_names(&a.name, &b.name),
            SortKey::Date => a.date_added.cmp(&b.date_added),
        };

        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Stable in-place sort.
    pub fn sort<R>(&self, records: &mut [R])
    where
        R: AsRef<BookmarkRecord>,
    {
        records.sort_by(|a, b| self.compare(a.as_ref(), b.as_ref()));
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, direction) = match s.split_once(':') {
            Some((key, direction)) => (key.parse()?, direction.parse()?),
            None => (s.parse()?, SortDirection::Ascending),
        };
        Ok(Self { key, direction })
    }
}

impl AsRef<BookmarkRecord> for BookmarkRecord {
    fn as_ref(&self) -> &BookmarkRecord {
        self
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
