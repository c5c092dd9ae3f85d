use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a note: the wall-clock millisecond timestamp of its creation.
pub type NoteId = i64;

/// A single user-authored entry.
///
/// Every field except `id` falls back to its default when missing from the
/// stored JSON, so files written by older builds (without `isFavourite` or
/// `colorIndex`) still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_date: i64,
    #[serde(default)]
    pub is_favourite: bool,
    #[serde(default)]
    pub color_index: i32,
}

impl Note {
    /// Creates an empty note stamped with the current time.
    pub fn new() -> Self {
        let now = Utc::now().timestamp_millis();
        Self::with_id(now, now)
    }

    /// Creates an empty note with an explicit id and creation timestamp.
    pub fn with_id(id: NoteId, created_date: i64) -> Self {
        Self {
            id,
            title: String::new(),
            content: String::new(),
            created_date,
            is_favourite: false,
            color_index: 0,
        }
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self { title: title.into(), ..self }
    }

    pub fn with_content(self, content: impl Into<String>) -> Self {
        Self { content: content.into(), ..self }
    }

    pub fn with_favourite(self, is_favourite: bool) -> Self {
        Self { is_favourite, ..self }
    }

    pub fn with_color_index(self, color_index: i32) -> Self {
        Self { color_index, ..self }
    }

    /// Returns `true` once the title holds something other than whitespace.
    /// Drafts are not persisted before that.
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Creation date formatted as `dd/MM/yyyy` in the local time zone.
    pub fn created_date_label(&self) -> String {
        DateTime::<Utc>::from_timestamp_millis(self.created_date)
            .map(|dt| dt.with_timezone(&Local).format("%d/%m/%Y").to_string())
            .unwrap_or_default()
    }
}

impl Default for Note {
    fn default() -> Self {
        Self::new()
    }
}
