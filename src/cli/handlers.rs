use std::io::{self, Read, Write};

use crate::config::Config;
use crate::entity::NotePatch;
use crate::error::{NotekitError, Result};
use crate::session::{DeleteOutcome, Prompter, SaveOutcome, Session};
use crate::storage::{FileStore, NoteStore};
use crate::view::render_detail;

use super::shell::run_shell;

/// Confirms on the controlling terminal.
///
/// One-shot commands print the returned error themselves, so notices only go
/// to the log.
pub struct TerminalPrompter {
    assume_yes: bool,
}

impl TerminalPrompter {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{} [y/N] ", question);
        let _ = io::stderr().flush();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return false;
        }
        matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
    }

    fn notify(&mut self, message: &str) {
        tracing::debug!(notice = message, "user notice");
    }
}

fn open_session(config: &Config) -> Session<FileStore> {
    let store = NoteStore::with_key(FileStore::new(&config.data_dir), config.storage_key.clone());
    Session::open(store)
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    Ok(content)
}

fn resolve_id(session: &Session<FileStore>, query: &str) -> Result<String> {
    session
        .notes()
        .resolve(query)
        .map(|n| n.id.clone())
        .ok_or_else(|| NotekitError::NoteNotFound(query.to_string()))
}

fn print_saved(session: &Session<FileStore>, id: &str, verb: &str, json: bool) -> Result<()> {
    let note = session
        .notes()
        .get(id)
        .ok_or_else(|| NotekitError::NoteNotFound(id.to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(note)?);
    } else {
        let pos = session.notes().position(id).map_or(0, |p| p + 1);
        println!("{} note {} ({}) - {}", verb, pos, note.short_id(), note.title);
    }
    Ok(())
}

pub fn handle_list(config: &Config, json: bool) -> Result<()> {
    let session = open_session(config);
    let notes = session.notes();

    if json {
        println!("{}", serde_json::to_string_pretty(notes.as_slice())?);
        return Ok(());
    }

    if notes.is_empty() {
        println!("No notes yet.");
        return Ok(());
    }

    println!("Notes:\n");
    for (idx, note) in notes.iter().enumerate() {
        println!(
            "  {:>3}. {} ({})  {}",
            idx + 1,
            note.display_title(),
            note.short_id(),
            note.updated
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

pub fn handle_show(config: &Config, id: String, json: bool) -> Result<()> {
    let mut session = open_session(config);
    let id = resolve_id(&session, &id)?;
    session.select_note(&id);

    if json {
        if let Some(note) = session.active_note() {
            println!("{}", serde_json::to_string_pretty(note)?);
        }
    } else {
        print!("{}", render_detail(&session));
    }
    Ok(())
}

pub fn handle_add(
    config: &Config,
    title: String,
    content: Option<String>,
    stdin: bool,
    json: bool,
) -> Result<()> {
    let mut session = open_session(config);
    let content = if stdin { read_stdin()? } else { content.unwrap_or_default() };

    session.new_note();
    session.change_draft(NotePatch {
        title: Some(title),
        content: Some(content),
    });

    let mut prompter = TerminalPrompter::new(false);
    let outcome = session.save_draft(&mut prompter)?;
    let (SaveOutcome::Created(id) | SaveOutcome::Updated(id)) = outcome;
    print_saved(&session, &id, "Created", json)
}

pub fn handle_edit(
    config: &Config,
    id: String,
    title: Option<String>,
    content: Option<String>,
    stdin: bool,
    json: bool,
) -> Result<()> {
    let mut session = open_session(config);
    let id = resolve_id(&session, &id)?;
    let content = if stdin { Some(read_stdin()?) } else { content };

    session.select_note(&id);
    if !session.begin_edit() {
        return Err(NotekitError::NoteNotFound(id));
    }
    session.change_draft(NotePatch { title, content });

    let mut prompter = TerminalPrompter::new(false);
    session.save_draft(&mut prompter)?;
    print_saved(&session, &id, "Updated", json)
}

pub fn handle_delete(config: &Config, id: String, force: bool) -> Result<()> {
    let mut session = open_session(config);
    let id = resolve_id(&session, &id)?;

    if !force && !atty::is(atty::Stream::Stdin) {
        return Err(NotekitError::NonInteractive);
    }

    session.select_note(&id);
    if !session.begin_edit() {
        return Err(NotekitError::NoteNotFound(id));
    }
    let (short, title) = session
        .draft()
        .map(|d| (d.short_id().to_string(), d.display_title().to_string()))
        .unwrap_or_default();

    let mut prompter = TerminalPrompter::new(force);
    match session.delete_draft(&mut prompter)? {
        DeleteOutcome::Deleted(_) => println!("Deleted note ({}) - {}", short, title),
        DeleteOutcome::Declined => println!("Cancelled."),
    }
    Ok(())
}

pub fn handle_shell(config: &Config) -> Result<()> {
    let mut session = open_session(config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_shell(&mut session, stdin.lock(), stdout.lock())
}
