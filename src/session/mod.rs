//! Note selection and edit-mode state machine.
//!
//! A [`Session`] owns the note collection, the persistence adapter and the
//! current selection. Every transition runs to completion synchronously and
//! leaves the session consistent: an active id always names a stored note,
//! and the draft exists exactly while editing.

mod intent;
mod prompt;

pub use intent::Intent;
pub use prompt::{Prompter, ScriptedPrompter};

use crate::entity::{validate_title, Note, NoteCollection, NotePatch};
use crate::error::{NotekitError, Result};
use crate::storage::{KeyValueStore, NoteStore};

pub const DELETE_QUESTION: &str = "Delete this note?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Viewing,
    /// `draft` is a private copy; the collection only sees it on save.
    Editing { draft: Note },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(String),
    Updated(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(String),
    Declined,
}

/// Result of dispatching an [`Intent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The intent did not apply in the current state.
    Ignored,
    /// Selection or mode changed; the collection did not.
    Moved,
    Saved(SaveOutcome),
    Deleted(DeleteOutcome),
}

pub struct Session<S> {
    notes: NoteCollection,
    store: NoteStore<S>,
    active_id: Option<String>,
    mode: Mode,
}

impl<S: KeyValueStore> Session<S> {
    /// Load the stored notes and select the first one.
    pub fn open(store: NoteStore<S>) -> Self {
        let notes = NoteCollection::from(store.load());
        let active_id = notes.first_id().map(str::to_owned);
        tracing::debug!(count = notes.len(), active = ?active_id, "session opened");
        Self {
            notes,
            store,
            active_id,
            mode: Mode::Viewing,
        }
    }

    pub fn notes(&self) -> &NoteCollection {
        &self.notes
    }

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn active_note(&self) -> Option<&Note> {
        self.active_id.as_deref().and_then(|id| self.notes.get(id))
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Editing { .. })
    }

    pub fn draft(&self) -> Option<&Note> {
        match &self.mode {
            Mode::Editing { draft } => Some(draft),
            Mode::Viewing => None,
        }
    }

    /// The note the detail view should show: the draft while editing,
    /// otherwise the active note.
    pub fn current_note(&self) -> Option<&Note> {
        self.draft().or_else(|| self.active_note())
    }

    /// Route a front-end event to its transition.
    pub fn dispatch<P: Prompter>(&mut self, intent: Intent, prompter: &mut P) -> Result<Outcome> {
        let outcome = match intent {
            Intent::Add => {
                self.new_note();
                Outcome::Moved
            }
            Intent::Select(id) => {
                self.select_note(&id);
                Outcome::Moved
            }
            Intent::BeginEdit => moved_if(self.begin_edit()),
            Intent::Change(patch) => moved_if(self.change_draft(patch)),
            Intent::Cancel => moved_if(self.cancel_edit()),
            Intent::Save => Outcome::Saved(self.save_draft(prompter)?),
            Intent::Delete => Outcome::Deleted(self.delete_draft(prompter)?),
        };
        Ok(outcome)
    }

    /// Start editing a blank note that is not yet in the collection.
    /// Returns the id reserved for it.
    pub fn new_note(&mut self) -> String {
        let draft = Note::new("", "");
        let id = draft.id.clone();
        tracing::debug!(%id, "new draft");
        self.mode = Mode::Editing { draft };
        id
    }

    /// Show a note, discarding any unsaved draft.
    pub fn select_note(&mut self, id: &str) {
        if self.is_editing() {
            tracing::debug!("discarding draft on select");
        }
        self.mode = Mode::Viewing;
        self.active_id = Some(id.to_string());
        self.reconcile();
    }

    /// Copy the active note into a draft. Returns `false` when there is no
    /// active note or an edit is already in progress.
    pub fn begin_edit(&mut self) -> bool {
        if self.is_editing() {
            return false;
        }
        let Some(note) = self.active_note() else {
            return false;
        };
        let draft = note.clone();
        tracing::debug!(id = %draft.id, "editing note");
        self.mode = Mode::Editing { draft };
        true
    }

    /// Apply a patch to the draft. No-op while viewing.
    pub fn change_draft(&mut self, patch: NotePatch) -> bool {
        match &mut self.mode {
            Mode::Editing { draft } => {
                draft.apply(patch);
                true
            }
            Mode::Viewing => false,
        }
    }

    /// Commit the draft: insert it if new, otherwise update it in place.
    ///
    /// A blank title is reported through `prompter` and leaves the draft
    /// open. A storage failure is reported the same way and nothing is
    /// committed.
    pub fn save_draft<P: Prompter>(&mut self, prompter: &mut P) -> Result<SaveOutcome> {
        let draft = match &self.mode {
            Mode::Editing { draft } => draft.clone(),
            Mode::Viewing => return Err(NotekitError::NoDraft),
        };

        if let Err(e) = validate_title(&draft.title) {
            tracing::debug!(id = %draft.id, "rejected save with blank title");
            prompter.notify(&e.to_string());
            return Err(e);
        }

        let id = draft.id.clone();
        let mut next = self.notes.clone();
        let outcome = if next.contains(&id) {
            next.update(draft);
            SaveOutcome::Updated(id.clone())
        } else {
            let mut note = draft;
            note.touch();
            next.insert(note);
            SaveOutcome::Created(id.clone())
        };

        self.commit(next, prompter)?;
        self.active_id = Some(id);
        self.mode = Mode::Viewing;
        self.reconcile();
        tracing::debug!(?outcome, "draft saved");
        Ok(outcome)
    }

    /// Remove the draft's note after the user confirms, then select the
    /// first remaining note.
    pub fn delete_draft<P: Prompter>(&mut self, prompter: &mut P) -> Result<DeleteOutcome> {
        let id = match &self.mode {
            Mode::Editing { draft } => draft.id.clone(),
            Mode::Viewing => return Err(NotekitError::NoDraft),
        };

        if !prompter.confirm(DELETE_QUESTION) {
            tracing::debug!(%id, "delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        let mut next = self.notes.clone();
        if next.remove(&id).is_some() {
            self.commit(next, prompter)?;
        }

        self.active_id = self.notes.first_id().map(str::to_owned);
        self.mode = Mode::Viewing;
        self.reconcile();
        tracing::debug!(%id, "note deleted");
        Ok(DeleteOutcome::Deleted(id))
    }

    /// Drop the draft and go back to the previous selection.
    pub fn cancel_edit(&mut self) -> bool {
        if !self.is_editing() {
            return false;
        }
        self.mode = Mode::Viewing;
        self.reconcile();
        true
    }

    // Persist first so memory and storage never disagree after a failure.
    fn commit<P: Prompter>(&mut self, next: NoteCollection, prompter: &mut P) -> Result<()> {
        if let Err(e) = self.store.save(next.as_slice()) {
            tracing::warn!(error = %e, "failed to save notes");
            prompter.notify(&format!("Could not save notes: {}", e));
            return Err(e);
        }
        self.notes = next;
        Ok(())
    }

    fn reconcile(&mut self) {
        let stale = match &self.active_id {
            Some(id) => !self.notes.contains(id),
            None => false,
        };
        if stale {
            let fallback = self.notes.first_id().map(str::to_owned);
            tracing::debug!(stale = ?self.active_id, fallback = ?fallback, "active note missing");
            self.active_id = fallback;
            self.mode = Mode::Viewing;
        }
    }
}

fn moved_if(changed: bool) -> Outcome {
    if changed {
        Outcome::Moved
    } else {
        Outcome::Ignored
    }
}
