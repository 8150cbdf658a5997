pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod logging;
pub mod session;
pub mod storage;
pub mod view;

pub use config::Config;
pub use entity::{Note, NoteCollection, NotePatch};
pub use error::{NotekitError, Result};
pub use session::{Intent, Mode, Prompter, Session};
pub use storage::{FileStore, KeyValueStore, MemoryStore, NoteStore};
