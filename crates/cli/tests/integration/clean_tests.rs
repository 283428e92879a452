//! Clean command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn clean_removes_target_dir() {
  let env = TestEnv::from_fixture("two_platforms.yaml");
  env.write_file("target/linux/app", "binary");

  env
    .graven_cmd()
    .arg("clean")
    .assert()
    .success()
    .stdout(predicate::str::contains("Removed"));

  assert!(!env.root().join("target").exists());
  assert!(env.root().join("project.yaml").exists());
}

#[test]
fn clean_without_target_dir_succeeds() {
  let env = TestEnv::from_fixture("two_platforms.yaml");

  env.graven_cmd().arg("clean").assert().success();
}

#[test]
fn clean_with_explicit_project_dir() {
  let env = TestEnv::from_fixture("two_platforms.yaml");
  env.write_file("target/linux/app", "binary");
  let elsewhere = tempfile::TempDir::new().unwrap();

  env
    .graven_cmd()
    .current_dir(elsewhere.path())
    .args(["clean", "--project"])
    .arg(env.root())
    .assert()
    .success();

  assert!(!env.root().join("target").exists());
}
