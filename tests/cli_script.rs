use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use roomshare_core::storage::SessionStorage;
use roomshare_storage_json::{JsonSessionStorage, StoragePaths};
use tempfile::TempDir;

fn run_script(home: &TempDir, script: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("roomshare_cli")
        .unwrap()
        .env("ROOMSHARE_CLI_SCRIPT", "1")
        .env("ROOMSHARE_HOME", home.path())
        .env("NO_COLOR", "1")
        .write_stdin(script.to_string())
        .assert()
}

fn stored_session(home: &TempDir) -> roomshare_domain::Session {
    let storage = JsonSessionStorage::new(StoragePaths {
        session_root: home.path().join("session"),
        backup_root: home.path().join("backups"),
    })
    .unwrap();
    storage.load_session().unwrap()
}

#[test]
fn script_mode_plans_settlements() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
roommate set 0 A
roommate add B
roommate add C
expense add Groceries 300 A
balances
settlements
exit
";

    run_script(&home, script).success().stdout(
        contains("Expense `Groceries` added")
            .and(contains("split 3 ways"))
            .and(contains("[0] B pays A ₹100.00"))
            .and(contains("[1] C pays A ₹100.00")),
    );

    let session = stored_session(&home);
    assert_eq!(session.roster.active(), vec!["A", "B", "C"]);
    assert_eq!(session.expenses.len(), 1);
}

#[test]
fn recorded_settlements_shrink_the_plan() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
roommate set 0 A
roommate add B
roommate add C
expense add Groceries 300 A
settle 0
settlements
history
";

    run_script(&home, script).success().stdout(
        contains("Recorded: B paid A ₹100.00")
            .and(contains("[0] C pays A ₹100.00"))
            .and(contains("B -> A ₹100.00 (settled)")),
    );

    let session = stored_session(&home);
    assert_eq!(session.settlements.len(), 1);
}

#[test]
fn removing_a_roommate_spreads_their_share_over_the_rest() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
roommate set 0 A
roommate add B
roommate add C
expense add Groceries 300 A
settle 0
roommate remove 2
balances
settlements
";

    run_script(&home, script).success().stdout(
        contains("Removed `C` from [2].")
            .and(contains("1 expense(s) recorded for more people"))
            .and(contains("now shared by the 2 remaining roommate(s)"))
            .and(contains("[0] B pays A ₹50.00")),
    );

    let session = stored_session(&home);
    assert_eq!(session.roster.active(), vec!["A", "B"]);
    assert_eq!(session.expenses.len(), 1);
}

#[test]
fn balanced_expenses_need_no_transfers() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
roommate set 0 A
roommate add B
expense add Dinner 100 A
expense add Taxi 100 B
settlements
";

    run_script(&home, script)
        .success()
        .stdout(contains("Everyone is settled up."));
}

#[test]
fn invalid_input_is_reported_and_shell_continues() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
roommate set 0 A
expense add Rent abc A
expense add Rent 100 Zed
balanses
roommate list
";

    run_script(&home, script).success().stdout(
        contains("invalid amount `abc`")
            .and(contains("Invalid input"))
            .and(contains("Suggestion: `balances`?"))
            .and(contains("[0] A")),
    );
}

#[test]
fn backups_round_trip_through_the_shell() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
roommate set 0 A
roommate add B
expense add Rent 1000 A
backup create before cleanup
expense remove 0
backup list
backup restore 0
";

    run_script(&home, script).success().stdout(
        contains("_before-cleanup.json")
            .and(contains("Removed expense Rent (1000.00 paid by A, split 2 ways)"))
            .and(contains("Session restored from")),
    );

    let session = stored_session(&home);
    assert_eq!(session.expenses.len(), 1);
    assert_eq!(session.expenses[0].description, "Rent");
}

#[test]
fn config_changes_currency_rendering() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
config set currency_symbol $
config set locale en-US
roommate set 0 A
roommate add B
expense add Deposit 250000 A
settlements
config show
";

    run_script(&home, script).success().stdout(
        contains("B pays A $125,000.00")
            .and(contains("currency_symbol"))
            .and(contains("config.json")),
    );
}

#[test]
fn help_and_version_are_available() {
    let home = tempfile::tempdir().unwrap();
    run_script(&home, "help\nhelp expense\nversion\n")
        .success()
        .stdout(
            contains("Available commands")
                .and(contains("Usage: expense <add"))
                .and(contains("Roomshare ")),
        );
}
