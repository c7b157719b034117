use serde::{Deserialize, Serialize};

/// A single persisted note.
///
/// Serializes with camelCase field names, matching both the on-disk column
/// names and the JSON export format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub is_markdown: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Current UTC time as an ISO-8601 string with millisecond precision,
/// e.g. `2024-01-01T00:00:00.000Z`. All stored timestamps use this format.
pub(crate) fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
