//! Journal entry types
//!
//! A [`JournalEntry`] is one post: an identifier assigned by the store, a
//! title, a display date string, and a body. The date is not a structured
//! timestamp — it is formatted once at write time and stored as text, so
//! what was rendered when the entry was saved is exactly what is rendered
//! forever after.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Format for the stored date string, e.g. "April 05, 2024".
pub const DATE_FORMAT: &str = "%B %d, %Y";

/// One journal post.
///
/// The identifier is assigned by the store on insert and never changes;
/// title, date and body are overwritten in place by edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub body: String,
}

/// The write-model for an entry: what a validated form submission carries.
///
/// Drafts never contain an identifier or a date — the store assigns the id
/// and the handler stamps the date at the moment of handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub title: String,
    pub body: String,
}

/// Render a wall-clock instant as the stored display date.
pub fn display_date(now: DateTime<Local>) -> String {
    now.format(DATE_FORMAT).to_string()
}
