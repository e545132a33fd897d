// src/infrastructure/json.rs

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::payload::BookmarkPayload;
use crate::domain::record::{BookmarkRecord, RawRecord};
use crate::domain::stats::BookmarkStats;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Write;
use tracing::{debug, instrument, warn};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEnvelope {
    #[serde(default)]
    bookmarks: Vec<RawRecord>,
    #[serde(default)]
    timestamp: Option<Value>,
    #[serde(default)]
    version: Option<Value>,
    #[serde(default)]
    count: Option<Value>,
    #[serde(default)]
    settings: Option<Map<String, Value>>,
    #[serde(default)]
    stats: Option<Value>,
}

/// Parses a bookmark payload.
///
/// Accepted shapes:
/// - the envelope `{"bookmarks": [...], "timestamp": ..., "settings": ..., "stats": ...}`
/// - a bare array of records
/// - either of the above double-encoded as a JSON string (what a key-value
///   backend returns when it stores the blob as text)
///
/// Nested `children` arrays are flattened pre-order into the flat list.
#[instrument(level = "debug", skip(text), fields(len = text.len()))]
pub fn parse_payload(text: &str) -> DomainResult<BookmarkPayload> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| DomainError::DeserializationError(format!("Invalid JSON: {}", e)))?;
    payload_from_value(value, true)
}

fn payload_from_value(value: Value, allow_nested_string: bool) -> DomainResult<BookmarkPayload> {
    match value {
        Value::String(inner) if allow_nested_string => {
            debug!("Payload is a JSON string, decoding inner document");
            let inner: Value = serde_json::from_str(&inner).map_err(|e| {
                DomainError::DeserializationError(format!("Invalid JSON inside string: {}", e))
            })?;
            payload_from_value(inner, false)
        }
        Value::Array(_) => {
            let raw: Vec<RawRecord> = serde_json::from_value(value)?;
            Ok(BookmarkPayload::from_records(flatten(raw)))
        }
        Value::Object(_) => {
            let envelope: WireEnvelope = serde_json::from_value(value)?;
            Ok(from_envelope(envelope))
        }
        Value::Null => Err(DomainError::DeserializationError(
            "payload is empty (null)".to_string(),
        )),
        other => Err(DomainError::DeserializationError(format!(
            "expected an object or array of bookmarks, got {}",
            json_type_name(&other)
        ))),
    }
}

fn from_envelope(envelope: WireEnvelope) -> BookmarkPayload {
    let records = flatten(envelope.bookmarks);
    let preset_stats = envelope.stats.and_then(parse_preset_stats);
    debug!(
        "Envelope: {} records, preset stats: {}",
        records.len(),
        preset_stats.is_some()
    );

    BookmarkPayload {
        records,
        timestamp: envelope.timestamp.as_ref().and_then(parse_timestamp),
        version: envelope.version.map(|v| match v {
            Value::String(s) => s,
            other => other.to_string(),
        }),
        count: envelope.count.as_ref().and_then(parse_count),
        settings: envelope.settings.unwrap_or_default(),
        preset_stats,
    }
}

fn flatten(raw: Vec<RawRecord>) -> Vec<BookmarkRecord> {
    let mut records = Vec::with_capacity(raw.len());
    for record in raw {
        record.flatten_into(&mut records);
    }
    records
}

/// Non-negative integer; anything else is dropped with a warning.
fn parse_count(value: &Value) -> Option<u64> {
    let count = value.as_u64();
    if count.is_none() && !value.is_null() {
        warn!("Ignoring unreadable payload count: {}", value);
    }
    count
}

/// RFC 3339 string or epoch milliseconds. Anything else is dropped with a warning.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let parsed = match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        Value::Null => return None,
        _ => None,
    };
    if parsed.is_none() {
        warn!("Ignoring unreadable payload timestamp: {}", value);
    }
    parsed
}

/// Preset stats only count when the object is non-empty and has the numeric fields.
fn parse_preset_stats(value: Value) -> Option<BookmarkStats> {
    if !matches!(&value, Value::Object(map) if !map.is_empty()) {
        return None;
    }
    match serde_json::from_value(value) {
        Ok(stats) => Some(stats),
        Err(e) => {
            debug!("Preset stats not usable: {}", e);
            None
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Writes a value as pretty JSON to standard output.
/// Standard output is used for pipeable content without colors or formatting
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> DomainResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| DomainError::SerializationError(e.to_string()))?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_envelope_when_parse_then_records_and_meta() {
        let payload = parse_payload(
            r#"{
                "bookmarks": [
                    {"id": "1", "name": "Work", "url": null, "parentId": "0", "isFolder": true},
                    {"id": "2", "name": "Rust", "url": "https://rust-lang.org", "parentId": "1", "isFolder": false}
                ],
                "timestamp": "2024-08-22T12:00:00.000Z",
                "version": "1.2.0",
                "count": 2,
                "settings": {"syncEnabled": true}
            }"#,
        )
        .unwrap();

        assert_eq!(payload.records.len(), 2);
        assert_eq!(payload.version.as_deref(), Some("1.2.0"));
        assert_eq!(payload.count, Some(2));
        assert_eq!(
            payload.timestamp.map(|t| t.to_rfc3339()),
            Some("2024-08-22T12:00:00+00:00".to_string())
        );
        assert_eq!(payload.settings["syncEnabled"], Value::Bool(true));
        assert!(payload.preset_stats.is_none());
    }

    #[rstest::rstest]
    #[case(r#""12""#)]
    #[case("-1")]
    #[case("2.5")]
    fn given_unusable_count_when_parse_then_envelope_kept_without_count(#[case] count: &str) {
        let payload = parse_payload(&format!(
            r#"{{"bookmarks": [{{"id": "1", "name": "Work", "parentId": "0", "isFolder": true}}], "version": "1.0", "count": {}}}"#,
            count
        ))
        .unwrap();

        assert_eq!(payload.records.len(), 1);
        assert_eq!(payload.version.as_deref(), Some("1.0"));
        assert_eq!(payload.count, None);
    }

    #[test]
    fn given_bare_array_when_parse_then_records_without_meta() {
        let payload =
            parse_payload(r#"[{"id": "1", "name": "a", "parentId": "0", "url": "https://a"}]"#)
                .unwrap();

        assert_eq!(payload.records.len(), 1);
        assert!(payload.timestamp.is_none());
        assert!(payload.settings.is_empty());
    }

    #[test]
    fn given_double_encoded_payload_when_parse_then_decodes_inner_document() {
        let inner = r#"{"bookmarks": [{"id": "1", "name": "a", "parentId": "0", "isFolder": true}]}"#;
        let outer = serde_json::to_string(inner).unwrap();

        let payload = parse_payload(&outer).unwrap();
        assert_eq!(payload.records.len(), 1);
    }

    #[test]
    fn given_triple_encoded_payload_when_parse_then_error() {
        let inner = serde_json::to_string("[]").unwrap();
        let outer = serde_json::to_string(&inner).unwrap();
        assert!(parse_payload(&outer).is_err());
    }

    #[test]
    fn given_null_or_scalar_when_parse_then_error() {
        assert!(parse_payload("null").is_err());
        let err = parse_payload("42").unwrap_err();
        assert!(err.to_string().contains("a number"));
        assert!(parse_payload("{not json").is_err());
    }

    #[test]
    fn given_preset_stats_when_parse_then_kept() {
        let payload = parse_payload(
            r#"{"bookmarks": [], "stats": {"totalBookmarks": 12, "totalFolders": 7, "maxDepth": 3, "lastSync": "2024-08-21T18:30:00.000Z"}}"#,
        )
        .unwrap();
        let stats = payload.preset_stats.unwrap();
        assert_eq!(stats.total_bookmarks, 12);
        assert_eq!(stats.max_depth, 3);
    }

    #[test]
    fn given_empty_or_partial_stats_when_parse_then_ignored() {
        let empty = parse_payload(r#"{"bookmarks": [], "stats": {}}"#).unwrap();
        let partial = parse_payload(r#"{"bookmarks": [], "stats": {"maxDepth": 3}}"#).unwrap();
        assert!(empty.preset_stats.is_none());
        assert!(partial.preset_stats.is_none());
    }

    #[test]
    fn given_bad_timestamp_when_parse_then_absent() {
        let payload = parse_payload(r#"{"bookmarks": [], "timestamp": "yesterday"}"#).unwrap();
        assert!(payload.timestamp.is_none());

        let millis = parse_payload(r#"{"bookmarks": [], "timestamp": 1627894500000}"#).unwrap();
        assert_eq!(millis.timestamp.map(|t| t.timestamp_millis()), Some(1627894500000));
    }

    #[test]
    fn given_nested_children_when_parse_then_flattened() {
        let payload = parse_payload(
            r#"{"bookmarks": [{"id": "1", "parentId": "0", "name": "Work", "isFolder": true,
                "children": [{"id": "11", "parentId": "1", "name": "Docs", "url": "https://d"}]}]}"#,
        )
        .unwrap();

        let ids: Vec<_> = payload.records.iter().filter_map(|r| r.id_str()).collect();
        assert_eq!(ids, ["1", "11"]);
    }
}
