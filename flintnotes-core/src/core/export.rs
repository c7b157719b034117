//! Bulk JSON import and export of the full note set.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::note::now_iso;
use crate::{FlintnotesError, NoteStore, Result};

/// Counts returned after a completed import.
///
/// `skipped` elements failed validation and were left out; they are not
/// errors and do not abort the import.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// Serializes the full note set as pretty-printed JSON, in the same order
/// as [`NoteStore::get_all`].
///
/// # Errors
///
/// Returns [`crate::FlintnotesError::Database`] if the notes cannot be read.
pub fn export_notes(store: &NoteStore) -> Result<String> {
    let notes = store.get_all()?;
    Ok(serde_json::to_string_pretty(&notes)?)
}

/// Replaces the entire note set with the contents of `json`.
///
/// `json` must be a JSON array of note objects. Elements missing required
/// string fields (`title`, `content`) or carrying unparseable timestamps are
/// skipped and counted, never fatal. Valid elements keep their `id` when one
/// is present, so an exported file round-trips exactly; absent ids are
/// assigned fresh, and absent timestamps default to the import time.
///
/// The delete-and-reinsert runs inside a single transaction: a mid-import
/// failure rolls back and leaves the previous note set intact.
///
/// # Errors
///
/// Returns [`crate::FlintnotesError::InvalidFormat`] if `json` is not valid
/// JSON or not a top-level array (the store is untouched), or
/// [`crate::FlintnotesError::Database`] if a write inside the transaction
/// fails.
pub fn import_notes(store: &mut NoteStore, json: &str) -> Result<ImportSummary> {
    let parsed: Value = serde_json::from_str(json)
        .map_err(|e| FlintnotesError::InvalidFormat(e.to_string()))?;
    let elements = parsed.as_array().ok_or_else(|| {
        FlintnotesError::InvalidFormat("expected a top-level array of notes".to_string())
    })?;

    let now = now_iso();
    let mut records = Vec::with_capacity(elements.len());
    let mut skipped = 0usize;
    for (index, element) in elements.iter().enumerate() {
        match validate_element(element, &now) {
            Some(record) => records.push(record),
            None => {
                log::warn!("skipping invalid note at index {index}");
                skipped += 1;
            }
        }
    }

    let tx = store.connection_mut().transaction()?;
    tx.execute("DELETE FROM notes", [])?;
    for record in &records {
        tx.execute(
            "INSERT INTO notes (id, title, content, isMarkdown, createdAt, updatedAt)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                record.id,
                record.title,
                record.content,
                record.is_markdown as i64,
                record.created_at,
                record.updated_at,
            ],
        )?;
    }
    tx.commit()?;

    Ok(ImportSummary {
        imported: records.len(),
        skipped,
    })
}

/// One validated import element. `id` is `None` when the element carried no
/// usable id; the insert then lets SQLite assign a fresh one.
struct ImportRecord {
    id: Option<i64>,
    title: String,
    content: String,
    is_markdown: bool,
    created_at: String,
    updated_at: String,
}

fn validate_element(element: &Value, now: &str) -> Option<ImportRecord> {
    let title = element.get("title")?.as_str()?.to_string();
    let content = element.get("content")?.as_str()?.to_string();
    let created_at = timestamp_field(element, "createdAt", now)?;
    let updated_at = timestamp_field(element, "updatedAt", now)?;
    Some(ImportRecord {
        id: element.get("id").and_then(Value::as_i64),
        title,
        content,
        is_markdown: is_truthy(element.get("isMarkdown")),
        created_at,
        updated_at,
    })
}

/// Reads an optional timestamp field. Absent or null falls back to `now`;
/// a present value must be an RFC 3339 string or the element is rejected.
fn timestamp_field(element: &Value, key: &str, now: &str) -> Option<String> {
    match element.get(key) {
        None | Some(Value::Null) => Some(now.to_string()),
        Some(Value::String(s)) if chrono::DateTime::parse_from_rfc3339(s).is_ok() => {
            Some(s.clone())
        }
        Some(_) => None,
    }
}

/// JavaScript-style truthiness for `isMarkdown`, which older exports stored
/// as 0/1 integers or strings rather than booleans.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(false, |v| v != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
