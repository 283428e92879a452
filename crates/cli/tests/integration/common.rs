//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Isolated test environment.
///
/// Each test gets its own project directory containing a `project.yaml` and a
/// copy of the fake compiler script.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Create from a fixture file, copied to `project.yaml`.
  pub fn from_fixture(name: &str) -> Self {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("project.yaml"), fixture_content(name)).unwrap();
    std::fs::write(temp.path().join("fake-go.sh"), fixture_content("fake-go.sh")).unwrap();
    Self { temp }
  }

  /// Project root (canonicalized, so it compares equal to paths printed by the binary).
  pub fn root(&self) -> PathBuf {
    dunce::canonicalize(self.temp.path()).unwrap()
  }

  /// Write a file relative to the project root.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Path of a build output, relative to `target/`.
  pub fn output(&self, relative_path: &str) -> PathBuf {
    self.temp.path().join("target").join(relative_path)
  }

  /// Get a pre-configured Command for the graven binary.
  ///
  /// Runs in the project root with the fake compiler and nothing forwarded from
  /// the test environment:
  /// - `GRAVEN_COMPILER`: `/bin/sh <root>/fake-go.sh`
  /// - `GRAVEN_FORWARD_ENV`: empty
  pub fn graven_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("graven");
    let script = self.temp.path().join("fake-go.sh");
    cmd.current_dir(self.temp.path());
    cmd.env("GRAVEN_COMPILER", format!("/bin/sh {}", script.display()));
    cmd.env("GRAVEN_FORWARD_ENV", "");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
