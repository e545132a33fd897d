// src/domain/record.rs
use chrono::{DateTime, TimeZone, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Primary root sentinel: `parentId` of every top-level record.
pub const ROOT_ID: &str = "0";

/// Legacy root sentinel (Chrome's "Bookmarks bar" id). Records below it are shown at top level too.
pub const LEGACY_ROOT_ID: &str = "1";

/// True for both root sentinels.
pub fn is_root_sentinel(parent_id: &str) -> bool {
    parent_id == ROOT_ID || parent_id == LEGACY_ROOT_ID
}

/// What a record is. Folders carry nothing beyond the shared header,
/// links carry the target plus optional user annotations.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordKind {
    Folder,
    Link {
        url: String,
        tags: Vec<String>,
        /// Opaque; passed through unchanged.
        metadata: Option<Map<String, Value>>,
    },
}

/// A single entry of the flat bookmark list.
///
/// The wire form is the Chrome-export shape (`isFolder` plus nullable `url`);
/// conversion happens at the serde boundary, see [`RawRecord`].
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(setter(into))]
#[serde(from = "RawRecord", into = "RawRecord")]
pub struct BookmarkRecord {
    /// `None` when the source record had no id; such records never match a lookup.
    #[builder(setter(into, strip_option), default)]
    pub id: Option<String>,
    pub parent_id: String,
    pub name: String,
    #[builder(default)]
    pub index: i64,
    /// Epoch milliseconds.
    #[builder(default)]
    pub date_added: i64,
    #[builder(default = "RecordKind::Folder")]
    pub kind: RecordKind,
}

impl BookmarkRecord {
    pub fn folder(id: &str, parent_id: &str, name: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            parent_id: parent_id.to_string(),
            name: name.to_string(),
            index: 0,
            date_added: 0,
            kind: RecordKind::Folder,
        }
    }

    pub fn link(id: &str, parent_id: &str, name: &str, url: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            parent_id: parent_id.to_string(),
            name: name.to_string(),
            index: 0,
            date_added: 0,
            kind: RecordKind::Link {
                url: url.to_string(),
                tags: Vec::new(),
                metadata: None,
            },
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, RecordKind::Folder)
    }

    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            RecordKind::Link { url, .. } => Some(url.as_str()),
            RecordKind::Folder => None,
        }
    }

    pub fn tags(&self) -> &[String] {
        match &self.kind {
            RecordKind::Link { tags, .. } => tags,
            RecordKind::Folder => &[],
        }
    }

    pub fn metadata(&self) -> Option<&Map<String, Value>> {
        match &self.kind {
            RecordKind::Link { metadata, .. } => metadata.as_ref(),
            RecordKind::Folder => None,
        }
    }

    pub fn id_str(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }

    /// Directly below one of the root sentinels.
    pub fn is_root_level(&self) -> bool {
        is_root_sentinel(&self.parent_id)
    }

    pub fn date_added_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.date_added).single()
    }
}

impl fmt::Display for BookmarkRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id.as_deref().unwrap_or("?");
        match self.url() {
            Some(url) => write!(f, "{}: {} <{}>", id, self.name, url),
            None => write!(f, "{}: {}/", id, self.name),
        }
    }
}

/// Chrome-export wire shape of a record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub is_folder: Option<bool>,
    #[serde(default)]
    pub index: Option<i64>,
    #[serde(default)]
    pub date_added: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(default, skip_serializing)]
    pub children: Vec<RawRecord>,
}

impl RawRecord {
    /// Appends this record and its nested `children` (pre-order) to `out`.
    /// Nested children without a `parentId` inherit the id of their container.
    pub fn flatten_into(mut self, out: &mut Vec<BookmarkRecord>) {
        let children = std::mem::take(&mut self.children);
        let own_id = self.id.clone();
        out.push(BookmarkRecord::from(self));
        for mut child in children {
            if child.parent_id.is_none() {
                child.parent_id = own_id.clone();
            }
            child.flatten_into(out);
        }
    }
}

impl From<RawRecord> for BookmarkRecord {
    fn from(raw: RawRecord) -> Self {
        let is_folder = raw.is_folder.unwrap_or(raw.url.is_none());
        let kind = if is_folder {
            RecordKind::Folder
        } else {
            RecordKind::Link {
                url: raw.url.unwrap_or_default(),
                tags: raw.tags.unwrap_or_default(),
                metadata: raw.metadata,
            }
        };

        Self {
            id: raw.id,
            parent_id: raw.parent_id.unwrap_or_default(),
            name: raw.name.unwrap_or_default(),
            index: raw.index.unwrap_or_default(),
            date_added: raw.date_added.unwrap_or_default(),
            kind,
        }
    }
}

impl From<BookmarkRecord> for RawRecord {
    fn from(record: BookmarkRecord) -> Self {
        let (url, is_folder, tags, metadata) = match record.kind {
            RecordKind::Folder => (None, true, None, None),
            RecordKind::Link {
                url,
                tags,
                metadata,
            } => {
                let tags = if tags.is_empty() { None } else { Some(tags) };
                (Some(url), false, tags, metadata)
            }
        };

        Self {
            id: record.id,
            parent_id: Some(record.parent_id),
            name: Some(record.name),
            url,
            is_folder: Some(is_folder),
            index: Some(record.index),
            date_added: Some(record.date_added),
            tags,
            metadata,
            children: Vec::new(),
        }
    }
}

/// Exports disagree on whether ids are strings or numbers; accept both.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
