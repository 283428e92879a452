//! Build command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn build_two_platforms() {
  let env = TestEnv::from_fixture("two_platforms.yaml");

  env
    .graven_cmd()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("Built linux/app"))
    .stdout(predicate::str::contains("Built darwin/app"))
    .stdout(predicate::str::contains("Units failed: 0"));

  let linux = std::fs::read_to_string(env.output("linux/app")).unwrap();
  let darwin = std::fs::read_to_string(env.output("darwin/app")).unwrap();
  assert!(linux.contains("GOOS=linux"));
  assert!(darwin.contains("GOOS=darwin"));
  assert!(linux.contains("package=./cmd/app"));
}

#[test]
fn build_reports_failing_unit_and_keeps_siblings() {
  let env = TestEnv::from_fixture("darwin_fails.yaml");

  env
    .graven_cmd()
    .arg("build")
    .assert()
    .failure()
    .stdout(predicate::str::contains("Built linux/app"))
    .stderr(predicate::str::contains("darwin/app"))
    .stderr(predicate::str::contains("1 of 2 build units failed"));

  assert!(env.output("linux/app").exists());
  assert!(!env.output("darwin/app").exists());
}

#[test]
fn build_json_output_lists_failures() {
  let env = TestEnv::from_fixture("darwin_fails.yaml");

  let assert = env.graven_cmd().args(["--output", "json", "build"]).assert().failure();

  let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
  let summary: serde_json::Value = serde_json::from_str(&stdout).unwrap();
  assert_eq!(summary["project"], "github.com/org/app");
  assert_eq!(summary["built"], serde_json::json!(["linux/app"]));
  assert_eq!(summary["failed"].as_array().unwrap().len(), 1);
  assert_eq!(summary["failed"][0]["unit"], "darwin/app");
  assert_eq!(summary["failed"][0]["kind"], "exit");
}

#[test]
fn build_stages_resources_and_rejects_project_root() {
  let env = TestEnv::from_fixture("with_resources.yaml");
  env.write_file("res/config.yaml", "port: 8080");

  env
    .graven_cmd()
    .arg("build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("resource path cannot be the entire project folder"))
    .stderr(predicate::str::contains("win/app.exe"));

  assert_eq!(
    std::fs::read_to_string(env.output("linux/config.yaml")).unwrap(),
    "port: 8080"
  );
  assert!(env.output("linux/app").exists());
  assert!(!env.output("win/app.exe").exists());
}

#[test]
fn build_cleans_previous_output() {
  let env = TestEnv::from_fixture("two_platforms.yaml");
  env.write_file("target/stale/old-binary", "stale");

  env.graven_cmd().arg("build").assert().success();

  assert!(!env.output("stale").exists());
  assert!(env.output("linux/app").exists());
}

#[test]
fn build_no_clean_keeps_previous_output() {
  let env = TestEnv::from_fixture("two_platforms.yaml");
  env.write_file("target/stale/old-binary", "stale");

  env.graven_cmd().args(["build", "--no-clean"]).assert().success();

  assert!(env.output("stale/old-binary").exists());
}

#[test]
fn build_from_subdirectory_finds_project() {
  let env = TestEnv::from_fixture("two_platforms.yaml");
  env.write_file("cmd/app/main.go", "package main");

  env
    .graven_cmd()
    .current_dir(env.root().join("cmd").join("app"))
    .arg("build")
    .assert()
    .success();

  assert!(env.output("linux/app").exists());
}

#[test]
fn build_compiler_flag_overrides_env() {
  let env = TestEnv::from_fixture("two_platforms.yaml");

  env
    .graven_cmd()
    .args(["build", "--compiler", "/nonexistent/go build"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to launch /nonexistent/go"));
}
