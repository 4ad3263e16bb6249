//! Tests for driving editing sessions through the command interpreter.

use std::fs;

use batch_cli::script::{Outcome, run};
use batch_editor::{EditorSession, SessionState};
use batch_model::BatchSchema;
use batch_store::BatchFile;
use tempfile::tempdir;

fn ready_session(path: &std::path::Path, is_new: bool) -> EditorSession {
    let mut session = EditorSession::new(BatchSchema::default()).unwrap();
    session.open(path, is_new).unwrap();
    session
}

#[test]
fn script_builds_and_commits_batch_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("batch.xml");
    let mut session = ready_session(&path, true);

    let script = "\
# build one component set
add 1 Base
select 1 1
add 2 Main
select 2 1
add 3 input.xml
commit
add 1 ignored after commit
";
    let mut out = Vec::new();
    let outcome = run(&mut session, script.as_bytes(), &mut out).unwrap();

    assert_eq!(outcome, Outcome::Committed(path.clone()));
    assert_eq!(session.state(), SessionState::Closed);
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("<ComponentSet name=\"Base\">"), "{content}");
    assert!(content.contains("<Value>input.xml</Value>"), "{content}");
}

#[test]
fn rejected_commands_are_reported_and_skipped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("batch.xml");
    let mut session = ready_session(&path, true);

    let script = "\
add 2 Orphan
add 1 Base
add 1 Base
select 1 5
bogus
commit
";
    let mut out = Vec::new();
    let outcome = run(&mut session, script.as_bytes(), &mut out).unwrap();
    let output = String::from_utf8(out).unwrap();

    assert!(matches!(outcome, Outcome::Committed(_)));
    assert_eq!(output.matches("error:").count(), 4, "{output}");
    assert!(output.contains("already exists"), "{output}");
    assert!(output.contains("unknown command 'bogus'"), "{output}");

    let loaded = BatchFile::load(&path).unwrap();
    let root = loaded.document().root();
    assert_eq!(
        loaded
            .document()
            .children_with_tag(root, "ComponentSet")
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn end_of_input_discards() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("batch.xml");
    fs::write(&path, "<ComponentSets><ComponentSet name=\"Base\"/></ComponentSets>").unwrap();
    let before = fs::read(&path).unwrap();
    let mut session = ready_session(&path, false);

    let mut out = Vec::new();
    let outcome = run(&mut session, "remove 1 1\n".as_bytes(), &mut out).unwrap();

    assert_eq!(outcome, Outcome::Discarded);
    assert!(String::from_utf8(out).unwrap().contains("discarding changes"));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn closed_session_is_rejected() {
    let dir = tempdir().unwrap();
    let mut session = EditorSession::new(BatchSchema::default()).unwrap();
    assert!(session.open(dir.path().join("missing.xml"), false).is_err());

    let mut out = Vec::new();
    assert!(run(&mut session, "list\n".as_bytes(), &mut out).is_err());
}

#[test]
fn failed_commit_reports_message_and_hint() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("batch.xml");
    // A non-empty directory cannot be replaced by the saved file.
    fs::create_dir(&path).unwrap();
    fs::write(path.join("keep.txt"), "x").unwrap();
    let mut session = ready_session(&path, true);

    let script = "\
add 1 Base
commit
add 1 Second
discard
";
    let mut out = Vec::new();
    let outcome = run(&mut session, script.as_bytes(), &mut out).unwrap();
    let output = String::from_utf8(out).unwrap();

    assert_eq!(outcome, Outcome::Discarded);
    assert!(
        output.contains(&format!("error: Could not save the file to {}", path.display())),
        "{output}"
    );
    assert!(
        output.contains("hint: Free up disk space or try saving to a different location."),
        "{output}"
    );
    // Editing continued after the failed save.
    assert!(output.contains("2) Second"), "{output}");
    assert!(path.join("keep.txt").exists());
    assert!(!dir.path().join("batch.xml.tmp").exists());
}
