use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("gmail-settings").unwrap();
    // Nothing in these tests may reach a real endpoint.
    cmd.env("GMAIL_SETTINGS_LOGIN_URL", "http://127.0.0.1:9/accounts/ClientLogin")
        .env("GMAIL_SETTINGS_API_URL", "http://127.0.0.1:9/feeds")
        .env_remove("RUST_LOG");
    cmd
}

const CREDENTIALS: [&str; 6] = [
    "--username",
    "admin",
    "--password",
    "secret",
    "--domain",
    "example.com",
];

#[test]
fn help_prints_usage_and_fails() {
    cmd()
        .args(CREDENTIALS)
        .args(["--setting", "imap", "--help"])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("Usage: gmail-settings"));
}

#[test]
fn missing_username_prints_usage() {
    cmd()
        .args(["--password", "secret", "--domain", "example.com", "--setting", "imap"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage:"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn get_without_destination_user_prints_usage() {
    cmd()
        .args(CREDENTIALS)
        .args(["--setting", "SeNdAs", "--get", "true"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn unknown_setting_prints_usage_without_network() {
    cmd()
        .args(CREDENTIALS)
        .args(["--setting", "calendar"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage:"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn filter_get_is_not_supported() {
    cmd()
        .args(CREDENTIALS)
        .args(["--setting", "filter", "--get", "true", "--destination_user", "joe"])
        .assert()
        .code(1)
        .stdout(
            predicate::str::contains("Retrieving filter settings is not supported.")
                .and(predicate::str::contains("Usage:")),
        );
}

#[test]
fn unreachable_service_is_reported_on_stderr() {
    cmd()
        .args(CREDENTIALS)
        .args(["--setting", "imap", "--destination_user", "joe"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("request failed"));
}

#[test]
fn malformed_login_url_is_reported_on_stderr() {
    cmd()
        .env("GMAIL_SETTINGS_LOGIN_URL", "not a url")
        .args(CREDENTIALS)
        .args(["--setting", "pop", "--get", "true", "--destination_user", "joe"])
        .assert()
        .success()
        .stderr(predicate::str::contains("malformed service url"));
}
