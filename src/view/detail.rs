use std::fmt::Write;

use chrono::Local;

use crate::entity::Note;
use crate::session::Session;
use crate::storage::KeyValueStore;

pub fn render_detail<S: KeyValueStore>(session: &Session<S>) -> String {
    match (session.draft(), session.active_note()) {
        (Some(draft), _) => render_editor(draft),
        (None, Some(note)) => render_note(note),
        (None, None) => "No note selected\nSelect a note or create a new one.\n".to_string(),
    }
}

fn render_note(note: &Note) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}", note.display_title());
    out.push('\n');

    if note.content.is_empty() {
        out.push_str("No content.\n");
    } else {
        for line in note.content.split('\n') {
            let _ = writeln!(out, "{}", line);
        }
    }

    out.push('\n');
    let _ = writeln!(
        out,
        "Last edited: {}",
        note.updated.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    );
    out
}

fn render_editor(draft: &Note) -> String {
    let mut out = String::from("[editing]\n");
    let _ = writeln!(out, "Title: {}", draft.title);
    out.push_str("Content:\n");
    for line in draft.content.split('\n') {
        let _ = writeln!(out, "  {}", line);
    }
    out
}
