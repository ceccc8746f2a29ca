use chrono::Utc;
use roomshare_core::{storage::SessionStorage, CoreError};
use roomshare_domain::{Expense, Roster, Session, SettlementInstruction};
use roomshare_storage_json::{
    JsonSessionStorage, StoragePaths, EXPENSES_FILE, ROSTER_FILE, SETTLEMENTS_FILE,
};
use std::fs;
use tempfile::tempdir;

fn storage_in(dir: &std::path::Path) -> (JsonSessionStorage, StoragePaths) {
    let paths = StoragePaths {
        session_root: dir.join("session"),
        backup_root: dir.join("backups"),
    };
    let storage = JsonSessionStorage::new(paths.clone()).expect("create storage");
    (storage, paths)
}

fn sample_session() -> Session {
    let mut session = Session::new(Roster::new(["Asha", "Ben", ""]));
    session.expenses.push(Expense::new("Rent", 1200.0, "Asha", 2));
    session
        .settlements
        .push(SettlementInstruction::new("Ben", "Asha", 600.0).into_record(Utc::now()));
    session
}

#[test]
fn missing_collections_load_documented_defaults() {
    let dir = tempdir().expect("tempdir");
    let (storage, _) = storage_in(dir.path());

    let session = storage.load_session().expect("load defaults");
    assert!(session.expenses.is_empty());
    assert_eq!(session.roster.slots(), &[String::new()]);
    assert!(session.settlements.is_empty());
}

#[test]
fn collections_are_saved_to_independent_files() {
    let dir = tempdir().expect("tempdir");
    let (storage, paths) = storage_in(dir.path());
    let session = sample_session();

    storage.save_session(&session).expect("save session");
    for file in [EXPENSES_FILE, ROSTER_FILE, SETTLEMENTS_FILE] {
        assert!(paths.session_root.join(file).exists(), "{file} missing");
    }

    let roster_json = fs::read_to_string(paths.session_root.join(ROSTER_FILE)).unwrap();
    let roster: Vec<String> = serde_json::from_str(&roster_json).unwrap();
    assert_eq!(roster, vec!["Asha", "Ben", ""]);

    let loaded = storage.load_session().expect("load session");
    assert_eq!(loaded, session);
}

#[test]
fn saving_one_collection_leaves_the_others_alone() {
    let dir = tempdir().expect("tempdir");
    let (storage, paths) = storage_in(dir.path());

    storage
        .save_roster(&Roster::new(["Asha"]))
        .expect("save roster");
    assert!(!paths.session_root.join(EXPENSES_FILE).exists());
    assert_eq!(storage.load_roster().unwrap().active(), vec!["Asha"]);
    assert!(storage.load_expenses().unwrap().is_empty());
}

#[test]
fn corrupt_collection_reports_serde_error() {
    let dir = tempdir().expect("tempdir");
    let (storage, paths) = storage_in(dir.path());
    fs::write(paths.session_root.join(EXPENSES_FILE), "{not json").unwrap();

    let err = storage.load_expenses().expect_err("corrupt file");
    assert!(matches!(err, CoreError::Serde(ref message) if message.contains(EXPENSES_FILE)));
}

#[test]
fn backups_can_be_listed_and_restored() {
    let dir = tempdir().expect("tempdir");
    let (storage, _) = storage_in(dir.path());
    let session = sample_session();

    let info = storage
        .backup_session(&session, Some("before move"))
        .expect("create backup");
    assert!(info.id.starts_with("session_"));
    assert!(info.id.ends_with("_before-move.json"));

    let backups = storage.list_backups().expect("list backups");
    assert!(backups.iter().any(|entry| entry.id == info.id));

    storage.save_session(&Session::default()).expect("overwrite");
    let restored = storage.restore_backup(&info).expect("restore backup");
    assert_eq!(restored, session);
    assert_eq!(storage.load_session().unwrap(), session);
}

#[test]
fn backups_are_pruned_to_retention() {
    let dir = tempdir().expect("tempdir");
    let paths = StoragePaths {
        session_root: dir.path().join("session"),
        backup_root: dir.path().join("backups"),
    };
    let storage = JsonSessionStorage::with_retention(paths, 2).expect("create storage");
    let session = sample_session();

    for note in ["one", "two", "three"] {
        storage
            .backup_session(&session, Some(note))
            .expect("create backup");
    }
    assert_eq!(storage.list_backups().unwrap().len(), 2);
}

#[test]
fn backups_in_quick_succession_do_not_overwrite_each_other() {
    let dir = tempdir().expect("tempdir");
    let (storage, _) = storage_in(dir.path());
    let mut session = sample_session();

    let first = storage.backup_session(&session, None).expect("first backup");
    session.expenses.clear();
    let second = storage.backup_session(&session, None).expect("second backup");
    assert_ne!(first.id, second.id);

    let backups = storage.list_backups().expect("list");
    assert_eq!(backups.len(), 2);
    assert_eq!(backups[0].id, second.id);

    let restored = storage.restore_backup(&backups[1]).expect("restore older");
    assert_eq!(restored.expenses.len(), 1);
}

#[test]
fn restoring_a_missing_backup_fails() {
    let dir = tempdir().expect("tempdir");
    let (storage, _) = storage_in(dir.path());
    let info = storage
        .backup_session(&sample_session(), None)
        .expect("create backup");
    storage.delete_backup(&info.id).expect("delete backup");

    let err = storage.restore_backup(&info).expect_err("backup removed");
    assert!(matches!(err, CoreError::BackupNotFound(_)));
}
