use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn notekit_cmd(data_dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_notekit"));
    cmd.arg("--data-dir").arg(data_dir);
    cmd.env_remove("NOTEKIT_LOG");
    cmd
}

fn run(data_dir: &Path, args: &[&str]) -> Output {
    notekit_cmd(data_dir).args(args).output().unwrap()
}

fn run_with_stdin(data_dir: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = notekit_cmd(data_dir)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn stored_notes(data_dir: &Path) -> Vec<serde_json::Value> {
    let raw = std::fs::read_to_string(data_dir.join("personal_notes_v1.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn test_list_empty() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["list"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No notes yet."));
    assert!(!tmp.path().join("personal_notes_v1.json").exists());
}

#[test]
fn test_full_note_workflow() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["add", "Use Rust", "--content", "for the core"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Created note 1"));
    assert!(stdout(&output).contains("Use Rust"));

    let output = run(tmp.path(), &["add", "Second"]);
    assert!(output.status.success());

    // Newest first
    let output = run(tmp.path(), &["list"]);
    assert!(output.status.success());
    let out = stdout(&output);
    let second = out.find("1. Second").unwrap();
    let first = out.find("2. Use Rust").unwrap();
    assert!(second < first);

    let output = run(tmp.path(), &["show", "2"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("# Use Rust"));
    assert!(out.contains("for the core"));
    assert!(out.contains("Last edited:"));

    let output = run(tmp.path(), &["edit", "2", "--title", "Use Rust everywhere"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Updated note 2"));

    let notes = stored_notes(tmp.path());
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0]["title"], "Second");
    assert_eq!(notes[1]["title"], "Use Rust everywhere");
    assert_eq!(notes[1]["content"], "for the core");
    assert!(notes[1]["updated"].is_i64());

    let output = run(tmp.path(), &["delete", "1", "--force"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Deleted note"));

    let notes = stored_notes(tmp.path());
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["title"], "Use Rust everywhere");
}

#[test]
fn test_add_blank_title_fails() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["add", "   "]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Title cannot be empty."));
    assert!(!tmp.path().join("personal_notes_v1.json").exists());
}

#[test]
fn test_add_from_stdin_and_json() {
    let tmp = TempDir::new().unwrap();

    let output = run_with_stdin(
        tmp.path(),
        &["add", "Piped", "--stdin", "--json"],
        "line one\nline two\n",
    );
    assert!(output.status.success());
    let note: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(note["title"], "Piped");
    assert_eq!(note["content"], "line one\nline two\n");

    let output = run(tmp.path(), &["list", "--json"]);
    let notes: Vec<serde_json::Value> = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["id"], note["id"]);
}

#[test]
fn test_edit_requires_a_change() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["add", "Note"]);

    let output = run(tmp.path(), &["edit", "1"]);
    assert!(!output.status.success());
}

#[test]
fn test_unknown_note_fails() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["show", "7"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Note not found: 7"));
}

#[test]
fn test_position_past_end_does_not_match_an_id() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["add", "Keep me"]);
    run(tmp.path(), &["add", "Also keep"]);
    let path = tmp.path().join("personal_notes_v1.json");
    let before = std::fs::read_to_string(&path).unwrap();

    // Ids start with an epoch-ms timestamp, so "17" is a prefix of both.
    for query in ["3", "17"] {
        let output = run(tmp.path(), &["show", query]);
        assert!(!output.status.success());
        assert!(stderr(&output).contains("Note not found"));

        let output = run(tmp.path(), &["delete", query, "--force"]);
        assert!(!output.status.success());
        assert!(stderr(&output).contains("Note not found"));
    }

    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_listed_short_ids_select_distinct_notes() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["add", "First"]);
    run(tmp.path(), &["add", "Second"]);

    let notes = stored_notes(tmp.path());
    let out = stdout(&run(tmp.path(), &["list"]));
    for note in &notes {
        let id = note["id"].as_str().unwrap();
        let short = id.split_once('_').unwrap().1;
        assert!(out.contains(&format!("({})", short)));

        let output = run(tmp.path(), &["show", short, "--json"]);
        assert!(output.status.success());
        let shown: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(shown["id"], note["id"]);
    }
}

#[test]
fn test_delete_without_force_refuses_non_interactive() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["add", "Keep me"]);

    let output = run(tmp.path(), &["delete", "1"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--force"));
    assert_eq!(stored_notes(tmp.path()).len(), 1);
}

#[test]
fn test_corrupt_store_is_treated_as_empty() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("personal_notes_v1.json"), "{{ definitely not json").unwrap();

    let output = run(tmp.path(), &["list"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No notes yet."));

    let output = run(tmp.path(), &["add", "Fresh start"]);
    assert!(output.status.success());
    assert_eq!(stored_notes(tmp.path()).len(), 1);
}

#[test]
fn test_config_file_changes_storage_key() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("config.yaml"), "storage_key: work\n").unwrap();

    let output = run(tmp.path(), &["add", "Standup"]);
    assert!(output.status.success());
    assert!(tmp.path().join("work.json").exists());
    assert!(!tmp.path().join("personal_notes_v1.json").exists());
}

#[test]
fn test_data_dir_from_env() {
    let tmp = TempDir::new().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_notekit"))
        .env("NOTEKIT_DATA_DIR", tmp.path())
        .args(["add", "From env"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stored_notes(tmp.path())[0]["title"], "From env");
}

#[test]
fn test_shell_session() {
    let tmp = TempDir::new().unwrap();

    let script = "\
new
title Sample Note
content hello
save
new
save
cancel
select 1
edit
title
save
cancel
quit
";
    let output = run_with_stdin(tmp.path(), &["shell"], script);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("No note selected"));
    assert!(out.contains(">   1. Sample Note"));
    assert_eq!(out.matches("! Title cannot be empty.").count(), 2);

    let notes = stored_notes(tmp.path());
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["title"], "Sample Note");
    assert_eq!(notes[0]["content"], "hello");
}

#[test]
fn test_shell_delete_with_confirmation() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["add", "A"]);
    run(tmp.path(), &["add", "B"]);

    let output = run_with_stdin(tmp.path(), &["shell"], "select 2\nedit\ndelete\ny\nquit\n");
    assert!(output.status.success());
    assert!(stdout(&output).contains("Delete this note? [y/N]"));

    let notes = stored_notes(tmp.path());
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["title"], "B");
}
