use std::collections::HashSet;

use serde_json::Value;

use crate::entity::Note;
use crate::error::Result;

use super::KeyValueStore;

pub const DEFAULT_STORAGE_KEY: &str = "personal_notes_v1";

/// Reads and writes the whole note list under a single key.
pub struct NoteStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> NoteStore<S> {
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Load the stored notes. Missing or corrupt data yields an empty list.
    pub fn load(&self) -> Vec<Note> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "could not read notes, starting empty");
                return Vec::new();
            }
        };

        let records: Vec<Value> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "stored notes are not a JSON array, starting empty");
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let mut notes = Vec::with_capacity(records.len());
        for (idx, record) in records.into_iter().enumerate() {
            let note: Note = match serde_json::from_value(record) {
                Ok(note) => note,
                Err(e) => {
                    tracing::warn!(index = idx, error = %e, "skipping malformed note record");
                    continue;
                }
            };
            if note.title.trim().is_empty() {
                tracing::warn!(index = idx, id = %note.id, "skipping note with blank title");
                continue;
            }
            if !seen.insert(note.id.clone()) {
                tracing::warn!(index = idx, id = %note.id, "skipping note with duplicate id");
                continue;
            }
            notes.push(note);
        }

        tracing::debug!(key = %self.key, count = notes.len(), "loaded notes");
        notes
    }

    /// Overwrite the stored blob with the full list.
    pub fn save(&mut self, notes: &[Note]) -> Result<()> {
        let blob = serde_json::to_string(notes)?;
        self.backend.set(&self.key, &blob)?;
        tracing::info!(key = %self.key, count = notes.len(), "saved notes");
        Ok(())
    }
}
