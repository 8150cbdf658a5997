mod kv;
mod note_store;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use note_store::{NoteStore, DEFAULT_STORAGE_KEY};
