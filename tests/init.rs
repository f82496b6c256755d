mod common;

use assert_fs::TempDir;
use common::command::{repository_dir, run_bitstore_command};
use pretty_assertions::assert_eq;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn init_creates_metadata_layout(repository_dir: TempDir) {
    let expected = format!(
        "Initialized git directory at {}\n",
        repository_dir.path().canonicalize().unwrap().display()
    );

    run_bitstore_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(expected);

    let git_dir = repository_dir.path().join(".git");
    assert!(git_dir.join("objects").is_dir());
    assert!(git_dir.join("refs").is_dir());

    let head = std::fs::read_to_string(git_dir.join("HEAD")).unwrap();
    assert_eq!(head, "ref: refs/heads/main\n");
}

#[rstest]
fn init_accepts_a_target_directory(repository_dir: TempDir) {
    run_bitstore_command(repository_dir.path(), &["init", "nested"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nested"));

    assert!(repository_dir.path().join("nested/.git/objects").is_dir());
}

#[rstest]
fn init_twice_keeps_existing_head(repository_dir: TempDir) {
    run_bitstore_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let head_path = repository_dir.path().join(".git").join("HEAD");
    std::fs::write(&head_path, "ref: refs/heads/topic\n").unwrap();

    run_bitstore_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let head = std::fs::read_to_string(head_path).unwrap();
    assert_eq!(head, "ref: refs/heads/topic\n");
}

#[rstest]
fn metadata_directory_name_is_configurable(repository_dir: TempDir) {
    run_bitstore_command(repository_dir.path(), &["init"])
        .env("BIT_DIR", "store")
        .assert()
        .success();

    assert!(repository_dir.path().join("store/objects").is_dir());
    assert!(!repository_dir.path().join(".git").exists());
}

#[rstest]
#[case(".")]
#[case("..")]
fn metadata_directory_cannot_alias_the_root(repository_dir: TempDir, #[case] git_dir: &str) {
    run_bitstore_command(repository_dir.path(), &["init"])
        .env("BIT_DIR", git_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("BIT_DIR must be a plain directory name"));

    assert!(!repository_dir.path().join("objects").exists());
}
