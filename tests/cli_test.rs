/// CLI binary integration tests using assert_cmd
///
/// These tests invoke the actual binary and verify command-line behavior
use assert_cmd::Command;
use predicates::prelude::*;

fn console_cmd() -> Command {
    let mut cmd = Command::cargo_bin("assistant-console").unwrap();
    // Keep the caller's settings out of the tests
    cmd.env_remove("ASSISTANT_CONSOLE_URL")
        .env_remove("ASSISTANT_CONSOLE_TIMEOUT_SECS")
        .env_remove("ASSISTANT_CONSOLE_DOWNLOAD_DIR")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_help() {
    console_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Operator console"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn test_cli_version() {
    console_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_invalid_command() {
    console_cmd()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_cli_rejects_invalid_url() {
    console_cmd()
        .args(["--url", "ftp://example.com", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --url"));
}

#[test]
fn test_cli_rejects_invalid_timeout_env() {
    console_cmd()
        .env("ASSISTANT_CONSOLE_TIMEOUT_SECS", "soon")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_cli_list_unreachable_server_fails() {
    console_cmd()
        .args(["--url", "http://127.0.0.1:9", "--timeout", "2", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not load history"));
}

#[test]
fn test_cli_stats_falls_back_to_sample_data() {
    console_cmd()
        .args(["--url", "http://127.0.0.1:9", "--timeout", "2", "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SAMPLE DATA"))
        .stdout(predicate::str::contains("reproduce | 5 | 33.3%"))
        .stdout(predicate::str::contains("Total commands: 15"))
        .stdout(predicate::str::contains("Top command:    reproduce (5)"))
        .stdout(predicate::str::contains("Peak hour:      14:00 (7)"));
}

#[test]
fn test_cli_delete_declined_at_prompt() {
    console_cmd()
        .args(["--url", "http://127.0.0.1:9", "delete", "7"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));
}
