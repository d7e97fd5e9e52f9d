#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;

#[test]
fn test_help_lists_subcommands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("marathon");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("adjust"))
        .stdout(predicate::str::contains("bot"));
}

#[test]
fn test_plan_requires_title() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("marathon");
    cmd.arg("plan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<TITLE>"));
}

#[test]
fn test_adjust_rejects_zero_minutes() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("marathon");
    cmd.args(["adjust", "Titanic", "--minutes", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--minutes"));
}

#[test]
fn test_completions_bash() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("marathon");
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("marathon"));
}

#[test]
fn test_plan_without_tmdb_token() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("marathon");
    cmd.env_remove("TMDB_API_TOKEN")
        .arg("--dir")
        .arg(dir.path())
        .args(["plan", "Breaking", "Bad"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "TMDB_API_TOKEN environment variable is required",
        ));
}

#[test]
fn test_bot_without_telegram_token() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("marathon");
    cmd.env_remove("TELEGRAM_BOT_TOKEN")
        .env("TMDB_API_TOKEN", "unused")
        .arg("--dir")
        .arg(dir.path())
        .arg("bot")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "TELEGRAM_BOT_TOKEN environment variable is required",
        ));
}

#[test]
fn test_invalid_config_is_reported() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[catalog]\nlanguage = \"\"\n",
    )
    .unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("marathon");
    cmd.env("TMDB_API_TOKEN", "unused")
        .arg("--dir")
        .arg(dir.path())
        .args(["search", "Titanic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("language"));
}

#[test]
fn test_init_writes_config_once() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act
    let mut first = cargo_bin_cmd!("marathon");
    first.arg("--dir").arg(dir.path()).arg("init").assert().success();
    let mut second = cargo_bin_cmd!("marathon");
    let again = second.arg("--dir").arg(dir.path()).arg("init").assert();

    // Assert
    let written = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(written.contains("[catalog]"));
    again
        .failure()
        .stderr(predicate::str::contains("config file already exists"));
}
