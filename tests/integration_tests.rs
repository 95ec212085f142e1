//! Integration tests for pwshell.
//!
//! These tests drive the database through the encrypted vault engine and the
//! shell command dispatcher, the way the binary does.

use pwshell::shell::command::{BrowseState, CommandResult};
use pwshell::{AccountDb, ErrorKind, FieldId, Record, SearchCursor, Shell, VaultEngine};
use std::path::Path;
use tempfile::TempDir;

const PASSWORD: &str = "correct horse";

fn open(path: &Path, password: &str) -> AccountDb {
    AccountDb::new(path, Box::new(VaultEngine::new())).with_password(password)
}

fn setup_test_env() -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("accounts.db");
    (temp_dir, db_path)
}

fn entry(group: &str, title: &str, user: &str) -> Record {
    Record::with_fields([
        (FieldId::Group, group),
        (FieldId::Title, title),
        (FieldId::User, user),
    ])
}

fn titles(db: &AccountDb) -> Vec<String> {
    db.records()
        .iter()
        .map(|r| r.get_or(FieldId::Title, "").to_string())
        .collect()
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_write_then_read_preserves_records_and_order() {
    let (_temp_dir, path) = setup_test_env();

    let mut db = open(&path, PASSWORD);
    db.records_mut().save(entry("web", "mail", "bob"));
    db.records_mut().save(entry("bank", "checking", "alice"));
    let mut with_notes = entry("web", "forum", "");
    with_notes.set(FieldId::Notes, "line one\nline two");
    with_notes.set(FieldId::Password, "p@ss \"quoted\"");
    db.records_mut().save(with_notes);
    assert!(db.is_dirty());
    db.write().expect("write should succeed");
    assert!(!db.is_dirty());

    let mut reopened = open(&path, PASSWORD);
    assert!(reopened.exists());
    assert!(reopened.check_password(PASSWORD));
    assert_eq!(reopened.read().expect("read should succeed"), 3);
    assert!(!reopened.is_dirty());
    assert_eq!(titles(&reopened), vec!["checking", "forum", "mail"]);

    let forum = reopened.records().get(1).unwrap();
    assert_eq!(forum.get(FieldId::Notes), Some("line one\nline two"));
    assert_eq!(forum.get(FieldId::Password), Some("p@ss \"quoted\""));
    assert_eq!(forum.get(FieldId::User), None);

    let uuids: Vec<&str> = db
        .records()
        .iter()
        .filter_map(|r| r.get(FieldId::Uuid))
        .collect();
    let reread: Vec<&str> = reopened
        .records()
        .iter()
        .filter_map(|r| r.get(FieldId::Uuid))
        .collect();
    assert_eq!(uuids, reread);
}

#[test]
fn test_wrong_password_is_reported() {
    let (_temp_dir, path) = setup_test_env();
    let mut db = open(&path, PASSWORD);
    db.records_mut().save(entry("", "a", ""));
    db.write().unwrap();

    let mut other = open(&path, "wrong");
    assert!(!other.check_password("wrong"));
    let err = other.read().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::WrongPassword);
    assert!(other.records().is_empty());
}

#[test]
fn test_missing_file_is_not_found() {
    let (_temp_dir, path) = setup_test_env();
    let mut db = open(&path, PASSWORD);
    assert!(!db.exists());
    assert_eq!(db.read().unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn test_garbage_file_is_corrupt() {
    let (_temp_dir, path) = setup_test_env();
    std::fs::write(&path, "not a vault").unwrap();
    let mut db = open(&path, PASSWORD);
    assert_eq!(
        db.read().unwrap_err().kind(),
        ErrorKind::CorruptOrUnreadable
    );
}

#[test]
fn test_read_only_write_leaves_file_untouched() {
    let (_temp_dir, path) = setup_test_env();
    let mut db = open(&path, PASSWORD);
    db.records_mut().save(entry("", "a", ""));
    db.write().unwrap();
    let before = std::fs::read(&path).unwrap();

    let mut ro = open(&path, PASSWORD).with_read_only(true);
    ro.read().unwrap();
    ro.records_mut().save(entry("", "b", ""));
    assert_eq!(ro.write().unwrap_err().kind(), ErrorKind::ReadOnly);
    assert!(ro.is_dirty());
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

// ============================================================================
// Ordering and search
// ============================================================================

#[test]
fn test_save_reports_sorted_position() {
    let (_temp_dir, path) = setup_test_env();
    let mut db = open(&path, PASSWORD);
    db.records_mut().save(entry("g1", "b", ""));
    db.records_mut().save(entry("g1", "c", ""));
    let pos = db.records_mut().save(entry("a0", "z", ""));
    assert_eq!(pos, 0);
    assert_eq!(titles(&db), vec!["z", "b", "c"]);

    // Editing a record in place moves it and reports where it went.
    let mut moved = db.records().get(0).unwrap().clone();
    moved.set(FieldId::Group, "g2");
    let pos = db.records_mut().save(moved);
    assert_eq!(pos, 2);
    assert_eq!(db.records().len(), 3);
}

#[test]
fn test_search_wraps_after_reload() {
    let (_temp_dir, path) = setup_test_env();
    let mut db = open(&path, PASSWORD);
    db.records_mut().save(entry("", "a other", ""));
    db.records_mut().save(entry("", "b Mail", ""));
    db.records_mut().save(entry("", "c mail", ""));
    db.write().unwrap();

    let mut db = open(&path, PASSWORD);
    db.read().unwrap();
    let store = db.records();

    let mut cursor = SearchCursor::open(store, Some(2));
    assert_eq!(cursor.set_query(store, "MAIL"), Some(1));
    assert_eq!(cursor.find_next_match(store), Some(2));
    assert_eq!(cursor.find_next_match(store), Some(1));
    assert_eq!(cursor.cancel(store), Some(2));
}

// ============================================================================
// Shell flows
// ============================================================================

fn run(shell: &Shell, db: &mut AccountDb, state: &mut BrowseState, line: &str) -> CommandResult {
    shell.execute_line(line, db, state)
}

#[test]
fn test_shell_edit_save_and_reopen() {
    let (_temp_dir, path) = setup_test_env();
    let shell = Shell::new();
    let mut db = open(&path, PASSWORD);
    let mut state = BrowseState::default();

    assert!(matches!(
        run(&shell, &mut db, &mut state, "new GitHub"),
        CommandResult::Success(Some(_))
    ));
    run(&shell, &mut db, &mut state, "set user octocat");
    run(&shell, &mut db, &mut state, "set password hunter2");
    run(&shell, &mut db, &mut state, "new Bank");
    run(&shell, &mut db, &mut state, "set group money");
    assert!(matches!(
        run(&shell, &mut db, &mut state, "save"),
        CommandResult::Success(Some(_))
    ));
    assert!(!db.is_dirty());

    let mut reopened = open(&path, PASSWORD);
    reopened.read().unwrap();
    assert_eq!(titles(&reopened), vec!["GitHub", "Bank"]);
    let mut state = BrowseState::default();
    match run(&shell, &mut reopened, &mut state, "get password 1") {
        CommandResult::Success(Some(secret)) => assert_eq!(secret, "hunter2"),
        other => panic!("Expected password, got {:?}", other),
    }
}

#[test]
fn test_shell_search_session() {
    let (_temp_dir, path) = setup_test_env();
    let shell = Shell::new();
    let mut db = open(&path, PASSWORD);
    for title in ["alpha", "bravo mail", "charlie", "delta mail"] {
        db.records_mut().save(entry("", title, ""));
    }
    let mut state = BrowseState::default();

    run(&shell, &mut db, &mut state, "select 3");
    run(&shell, &mut db, &mut state, "find mail");
    assert_eq!(state.selection, Some(3));
    run(&shell, &mut db, &mut state, "next");
    assert_eq!(state.selection, Some(1));
    run(&shell, &mut db, &mut state, "done");
    assert!(state.search.is_none());
    assert_eq!(state.selection, Some(1));

    run(&shell, &mut db, &mut state, "/ delta");
    run(&shell, &mut db, &mut state, "cancel");
    assert_eq!(state.selection, Some(1));
}

#[test]
fn test_shell_read_only_refuses_edits() {
    let (_temp_dir, path) = setup_test_env();
    let mut db = open(&path, PASSWORD);
    db.records_mut().save(entry("", "a", ""));
    db.write().unwrap();

    let shell = Shell::new();
    let mut ro = open(&path, PASSWORD).with_read_only(true);
    ro.read().unwrap();
    let mut state = BrowseState::default();

    for line in ["new b", "remove 1", "set title x"] {
        let result = run(&shell, &mut ro, &mut state, line);
        assert!(matches!(result, CommandResult::Error(_)), "{}", line);
    }
    assert_eq!(ro.records().len(), 1);
    assert!(!ro.is_dirty());
}

#[test]
fn test_shell_export() {
    let (temp_dir, path) = setup_test_env();
    let shell = Shell::new();
    let mut db = open(&path, PASSWORD);
    db.records_mut().save(entry("web", "mail", "bob"));
    let mut state = BrowseState::default();

    let out = temp_dir.path().join("export.csv");
    let line = format!("export {}", out.display());
    assert!(matches!(
        run(&shell, &mut db, &mut state, &line),
        CommandResult::Success(_)
    ));

    let csv = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("\"web\",\"mail\",\"bob\",\"\",\"\""));
}

#[test]
fn test_shell_values_keep_spacing_through_vault() {
    let (_temp_dir, path) = setup_test_env();
    let shell = Shell::new();
    let mut db = open(&path, PASSWORD);
    let mut state = BrowseState::default();

    run(&shell, &mut db, &mut state, "new Work  mail");
    run(&shell, &mut db, &mut state, "set password a  b\tc");
    run(&shell, &mut db, &mut state, "save");

    let mut reopened = open(&path, PASSWORD);
    reopened.read().unwrap();
    let mut state = BrowseState::default();
    run(&shell, &mut reopened, &mut state, "find work  MAIL");
    assert_eq!(state.selection, Some(0));
    match run(&shell, &mut reopened, &mut state, "get password") {
        CommandResult::Success(Some(secret)) => assert_eq!(secret, "a  b\tc"),
        other => panic!("Expected password, got {:?}", other),
    }
}
