use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::common::{FileAssert, TestProject};
use pomflat_cli::test_utils::ProjectFixture;

#[test]
fn test_missing_descriptor_reports_suggestion() {
    let temp = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("pomflat").unwrap();
    cmd.current_dir(temp.path())
        .env("NO_COLOR", "1")
        .arg("generate-pom")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Project descriptor not found: pom.xml"))
        .stderr(predicate::str::contains("--pom"));
}

#[test]
fn test_generate_pom_without_graph_is_fatal() {
    let project = TestProject::new(&ProjectFixture::sample().without_graph()).unwrap();

    project
        .run_pomflat(&["generate-pom"])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("Failed to build dependency graph");

    FileAssert::not_exists(project.target_file("effective-pom.xml"));
}

#[test]
fn test_malformed_descriptor() {
    let project = TestProject::new(&ProjectFixture {
        pom: "<project><groupId>g</groupId>".to_string(),
        graph: None,
    })
    .unwrap();

    project
        .run_pomflat(&["list-dependencies"])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("Invalid project descriptor");
}

#[test]
fn test_invalid_config_file() {
    let project = TestProject::new(&ProjectFixture::sample()).unwrap();
    project.write_file("pomflat.toml", "[generate-pom]\noutptu = \"x.xml\"\n").unwrap();

    project
        .run_pomflat(&["generate-pom"])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("Configuration error");
}

#[test]
fn test_explicit_config_must_exist() {
    let project = TestProject::new(&ProjectFixture::sample()).unwrap();

    project
        .run_pomflat(&["--config", "missing.toml", "list-dependencies"])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("Configuration file not found");
}

#[test]
fn test_help_lists_commands() {
    let mut cmd = Command::cargo_bin("pomflat").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate-pom"))
        .stdout(predicate::str::contains("list-dependencies"));
}
