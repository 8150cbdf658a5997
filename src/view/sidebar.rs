use std::fmt::Write;

use crate::session::Session;
use crate::storage::KeyValueStore;

pub fn render_sidebar<S: KeyValueStore>(session: &Session<S>) -> String {
    let mut out = String::from("Notes\n");
    let notes = session.notes();

    if notes.is_empty() {
        out.push_str("  No notes yet\n");
    } else {
        let active = session.active_id();
        for (idx, note) in notes.iter().enumerate() {
            let marker = if Some(note.id.as_str()) == active { '>' } else { ' ' };
            let _ = writeln!(out, "{} {:>3}. {}", marker, idx + 1, note.display_title());
        }
    }

    out.push_str("-- Personal Notes --\n");
    out
}
