// src/entity/collection.rs
use super::Note;

/// Ordered list of notes. Newest-created first; updates keep their slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteCollection {
    notes: Vec<Note>,
}

impl NoteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    pub fn as_slice(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.notes.iter().position(|n| n.id == id)
    }

    pub fn first_id(&self) -> Option<&str> {
        self.notes.first().map(|n| n.id.as_str())
    }

    /// Prepend a note whose id is not yet present.
    ///
    /// Returns `false` and leaves the collection alone if the id is taken.
    pub fn insert(&mut self, note: Note) -> bool {
        if self.contains(&note.id) {
            return false;
        }
        self.notes.insert(0, note);
        true
    }

    /// Replace the entry with the same id in place and stamp it.
    ///
    /// An unknown id is a no-op and returns `false`.
    pub fn update(&mut self, mut note: Note) -> bool {
        match self.notes.iter_mut().find(|n| n.id == note.id) {
            Some(slot) => {
                note.touch();
                *slot = note;
                true
            }
            None => false,
        }
    }

    /// Drop the entry with this id, if any.
    pub fn remove(&mut self, id: &str) -> Option<Note> {
        let idx = self.position(id)?;
        Some(self.notes.remove(idx))
    }

    /// Look a note up by 1-based list position, exact id, or a prefix of
    /// its id or short id.
    ///
    /// An all-digit query is a position, or else an exact id / short id; it
    /// never prefix-matches since generated ids start with a timestamp. A
    /// prefix that fits more than one note resolves to nothing.
    pub fn resolve(&self, query: &str) -> Option<&Note> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let exact = |n: &&Note| n.id == query || n.short_id() == query;

        if query.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(pos) = query.parse::<usize>() {
                if (1..=self.notes.len()).contains(&pos) {
                    return self.notes.get(pos - 1);
                }
            }
            return self.notes.iter().find(exact);
        }

        if let Some(note) = self.notes.iter().find(exact) {
            return Some(note);
        }

        let mut matches = self
            .notes
            .iter()
            .filter(|n| n.id.starts_with(query) || n.short_id().starts_with(query));
        match (matches.next(), matches.next()) {
            (Some(note), None) => Some(note),
            _ => None,
        }
    }
}

impl From<Vec<Note>> for NoteCollection {
    fn from(notes: Vec<Note>) -> Self {
        Self { notes }
    }
}

impl<'a> IntoIterator for &'a NoteCollection {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}
