use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

/// A `taskbot` invocation isolated from the developer's environment and
/// working directory, so no real config or credentials leak in.
fn taskbot(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("taskbot").unwrap();
    cmd.current_dir(dir)
        .env_remove("TASKBOT_CONFIG")
        .env_remove("TASKBOT_TOKEN")
        .env_remove("TASKBOT_SPREADSHEET_ID")
        .env_remove("TASKBOT_CREDENTIALS")
        .env_remove("TASKBOT_ACCESS_TOKEN");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let dir = tempfile::tempdir().unwrap();
    taskbot(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Run the bot"))
        .stdout(predicate::str::contains("project"))
        .stdout(predicate::str::contains("secret"));
}

#[test]
fn version_flag_works() {
    let dir = tempfile::tempdir().unwrap();
    taskbot(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("taskbot"));
}

#[test]
fn operator_command_without_spreadsheet_fails() {
    let dir = tempfile::tempdir().unwrap();
    taskbot(dir.path())
        .args(["project", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("spreadsheet id not configured"));
}

#[test]
fn run_without_credentials_fails() {
    let dir = tempfile::tempdir().unwrap();
    taskbot(dir.path())
        .args(["--spreadsheet-id", "sheet-1", "run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no Sheets credentials"));
}

#[test]
fn explicit_missing_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    taskbot(dir.path())
        .args(["--config", "does-not-exist.yaml", "project", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn config_file_in_working_directory_is_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    let mut file = std::fs::File::create(dir.path().join("taskbot.yaml")).unwrap();
    writeln!(file, "spreadsheet_id: sheet-1").unwrap();

    // The failure moves past the spreadsheet-id check to the credentials
    // check; proof the file was read.
    taskbot(dir.path())
        .args(["secret", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no Sheets credentials"));
}

#[test]
fn malformed_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("taskbot.yaml"), "bot_token: [unclosed").unwrap();

    taskbot(dir.path())
        .args(["project", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config file"));
}
