mod common;

use assert_fs::TempDir;
use common::ROOT_TREE_OID;
use common::command::{bitstore_commit_tree, init_repository_dir, run_bitstore_command, stdout_of};
use pretty_assertions::assert_eq;
use predicates::prelude::*;
use rstest::rstest;

const INITIAL_COMMIT_OID: &str = "e972be13fc5b660dd06f6de2e96b36a6b93bbcd7";

fn write_root_tree(dir: &TempDir) {
    run_bitstore_command(dir.path(), &["write-tree"])
        .assert()
        .success();
}

#[rstest]
fn commit_tree_is_deterministic(init_repository_dir: TempDir) {
    write_root_tree(&init_repository_dir);

    bitstore_commit_tree(
        init_repository_dir.path(),
        ROOT_TREE_OID,
        &["-m", "Initial commit"],
    )
    .assert()
    .success()
    .stdout(format!("{}\n", INITIAL_COMMIT_OID));

    run_bitstore_command(
        init_repository_dir.path(),
        &["cat-file", "-t", INITIAL_COMMIT_OID],
    )
    .assert()
    .success()
    .stdout("commit\n");
}

#[rstest]
fn commit_body_prints_verbatim(init_repository_dir: TempDir) {
    write_root_tree(&init_repository_dir);
    bitstore_commit_tree(
        init_repository_dir.path(),
        ROOT_TREE_OID,
        &["-m", "Initial commit"],
    )
    .assert()
    .success();

    let expected = format!(
        "tree {}\n\
         author fake_user <fake_email@email.com> 1672574400 +0000\n\
         committer fake_user <fake_email@email.com> 1672574400 +0000\n\
         \n\
         Initial commit\n",
        ROOT_TREE_OID
    );

    run_bitstore_command(
        init_repository_dir.path(),
        &["cat-file", "-p", INITIAL_COMMIT_OID],
    )
    .assert()
    .success()
    .stdout(expected);
}

#[rstest]
fn commit_tree_records_parent(init_repository_dir: TempDir) {
    write_root_tree(&init_repository_dir);
    bitstore_commit_tree(
        init_repository_dir.path(),
        ROOT_TREE_OID,
        &["-m", "Initial commit"],
    )
    .assert()
    .success();

    let second = stdout_of(bitstore_commit_tree(
        init_repository_dir.path(),
        ROOT_TREE_OID,
        &["-p", INITIAL_COMMIT_OID, "-m", "Second commit"],
    ));
    assert_eq!(second.len(), 40);
    assert_ne!(second, INITIAL_COMMIT_OID);

    run_bitstore_command(init_repository_dir.path(), &["cat-file", "-p", &second])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "parent {}\n",
            INITIAL_COMMIT_OID
        )));
}

#[rstest]
fn commit_tree_rejects_a_blob_as_tree(init_repository_dir: TempDir) {
    let blob = stdout_of(run_bitstore_command(
        init_repository_dir.path(),
        &["hash-object", "-w", "1.txt"],
    ));

    bitstore_commit_tree(init_repository_dir.path(), &blob, &["-m", "broken"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a valid tree object"));
}

#[rstest]
fn commit_tree_rejects_a_missing_parent(init_repository_dir: TempDir) {
    write_root_tree(&init_repository_dir);

    bitstore_commit_tree(
        init_repository_dir.path(),
        ROOT_TREE_OID,
        &["-p", INITIAL_COMMIT_OID, "-m", "orphan"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("is not a valid commit object"));
}

#[rstest]
fn commit_tree_requires_a_message(init_repository_dir: TempDir) {
    write_root_tree(&init_repository_dir);

    bitstore_commit_tree(init_repository_dir.path(), ROOT_TREE_OID, &[])
        .assert()
        .failure();
}
