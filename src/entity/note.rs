// src/entity/note.rs
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{NotekitError, Result};

/// Longest title the editor accepts, in characters.
pub const TITLE_MAX_CHARS: usize = 80;

/// Shown wherever a note has no title yet.
pub const UNTITLED: &str = "Untitled";

/// A titled text record.
///
/// Serialized as `{id, title, content, updated}` with `updated` in epoch
/// milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated: DateTime<Utc>,
}

impl Note {
    /// Allocate a fresh note. It is not part of any collection until saved.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            title: title.into(),
            content: content.into(),
            updated: now_millis(),
        }
    }

    /// Title as it should be displayed.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }

    /// The random part of a generated id, or the whole id if it has none.
    pub fn short_id(&self) -> &str {
        match self.id.split_once('_') {
            Some((_, suffix)) if !suffix.is_empty() => suffix,
            _ => &self.id,
        }
    }

    pub fn touch(&mut self) {
        self.updated = now_millis();
    }

    pub fn apply(&mut self, patch: NotePatch) {
        if let Some(title) = patch.title {
            self.title = cap_title(title);
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
    }
}

/// Partial change to a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NotePatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: None,
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            title: None,
            content: Some(content.into()),
        }
    }
}

/// Reject titles that are empty once surrounding whitespace is removed.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(NotekitError::EmptyTitle);
    }
    Ok(())
}

fn cap_title(title: String) -> String {
    match title.char_indices().nth(TITLE_MAX_CHARS) {
        Some((cut, _)) => title[..cut].to_string(),
        None => title,
    }
}

// Stored timestamps only carry milliseconds.
fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

fn generate_id() -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{}_{}", Utc::now().timestamp_millis(), &random[..12])
}
