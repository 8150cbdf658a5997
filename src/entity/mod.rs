mod collection;
mod note;

pub use collection::NoteCollection;
pub use note::{validate_title, Note, NotePatch, TITLE_MAX_CHARS, UNTITLED};
