//! Line-oriented interactive front end.
//!
//! Each input line is one user action. Confirmation questions consume the
//! next input line; alerts are written to the output.

use std::io::{BufRead, Write};

use crate::entity::NotePatch;
use crate::error::{NotekitError, Result};
use crate::session::{Intent, Outcome, Prompter, Session};
use crate::storage::KeyValueStore;
use crate::view::{render_screen, render_sidebar};

const PROMPT: &str = "notekit> ";

const HELP: &str = "\
Commands:
  list              show the note list
  new               start a new note
  select <ID>       show a note (list position or id prefix)
  edit              edit the shown note
  title <text>      set the draft title
  content <text>    replace the draft content
  append <text>     add a line to the draft content
  save              save the draft
  cancel            discard the draft
  delete            delete the note being edited
  help              show this help
  quit              leave";

#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    List,
    Help,
    Quit,
    Empty,
    Intent(Intent),
}

struct ShellPrompter<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> Prompter for ShellPrompter<'_, R, W> {
    fn confirm(&mut self, question: &str) -> bool {
        let _ = write!(self.output, "{} [y/N] ", question);
        let _ = self.output.flush();

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        }
    }

    fn notify(&mut self, message: &str) {
        let _ = writeln!(self.output, "! {}", message);
    }
}

/// Drive `session` from `input` until `quit` or end of input.
pub fn run_shell<S, R, W>(session: &mut Session<S>, mut input: R, mut output: W) -> Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    write!(output, "{}", render_screen(session))?;

    let mut line = String::new();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        let command = match parse_line(line.trim_end_matches(['\r', '\n']), session) {
            Ok(command) => command,
            Err(message) => {
                writeln!(output, "{}", message)?;
                continue;
            }
        };

        match command {
            ShellCommand::Empty => {}
            ShellCommand::Quit => break,
            ShellCommand::Help => writeln!(output, "{}", HELP)?,
            ShellCommand::List => write!(output, "{}", render_sidebar(session))?,
            ShellCommand::Intent(intent) => {
                let mut prompter = ShellPrompter {
                    input: &mut input,
                    output: &mut output,
                };
                match session.dispatch(intent, &mut prompter) {
                    Ok(Outcome::Ignored) => writeln!(output, "Nothing to do here.")?,
                    Ok(_) => write!(output, "{}", render_screen(session))?,
                    Err(NotekitError::NoDraft) => writeln!(output, "{}", NotekitError::NoDraft)?,
                    // Already reported through the prompter.
                    Err(_) => {}
                }
            }
        }
    }

    Ok(())
}

fn parse_line<S: KeyValueStore>(
    line: &str,
    session: &Session<S>,
) -> std::result::Result<ShellCommand, String> {
    let trimmed = line.trim_start();
    let (word, rest) = match trimmed.split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (trimmed.trim_end(), ""),
    };

    let command = match word {
        "" => ShellCommand::Empty,
        "list" | "ls" => ShellCommand::List,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        "new" | "add" => ShellCommand::Intent(Intent::Add),
        "edit" => ShellCommand::Intent(Intent::BeginEdit),
        "save" => ShellCommand::Intent(Intent::Save),
        "cancel" => ShellCommand::Intent(Intent::Cancel),
        "delete" | "rm" => ShellCommand::Intent(Intent::Delete),
        "title" => ShellCommand::Intent(Intent::Change(NotePatch::title(rest))),
        "content" => ShellCommand::Intent(Intent::Change(NotePatch::content(rest))),
        "append" => {
            let Some(draft) = session.draft() else {
                return Err("Nothing to do here.".to_string());
            };
            let content = if draft.content.is_empty() {
                rest.to_string()
            } else {
                format!("{}\n{}", draft.content, rest)
            };
            ShellCommand::Intent(Intent::Change(NotePatch::content(content)))
        }
        "select" | "open" => {
            let query = rest.trim();
            if query.is_empty() {
                return Err("Usage: select <ID>".to_string());
            }
            let note = session
                .notes()
                .resolve(query)
                .ok_or_else(|| NotekitError::NoteNotFound(query.to_string()).to_string())?;
            ShellCommand::Intent(Intent::Select(note.id.clone()))
        }
        other => return Err(format!("Unknown command '{}'. Type 'help'.", other)),
    };
    Ok(command)
}
