//! Project model types.
//!
//! A [`Project`] is the read-only description of what to build. It is produced
//! once (usually by [`super::load_project`]) and shared by every build unit of a
//! run without locking.
//!
//! # Structure
//!
//! - [`Project`]: name, version, root directory and the ordered artifacts
//! - [`Artifact`]: one build variant, keyed by its classifier (e.g. `linux`)
//! - [`Target`]: one compiler invocation producing one executable

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::TARGET_DIR;

/// Root of a build description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
  pub name: String,
  pub version: String,
  #[serde(default)]
  pub artifacts: Vec<Artifact>,

  /// Directory containing the project definition. Every relative path in the
  /// project resolves against it.
  #[serde(skip)]
  pub root: PathBuf,
}

/// A build variant grouping resources and the targets compiled for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
  /// Variant identifier, also the output subdirectory name.
  pub classifier: String,
  /// Directories (relative to the project root) copied into the output directory.
  #[serde(default)]
  pub resources: Vec<String>,
  /// Packaging format hint. Not interpreted by the build.
  #[serde(default)]
  pub archive: String,
  #[serde(default)]
  pub targets: Vec<Target>,
}

/// One compiler invocation producing one named executable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Target {
  /// Output file name, written into the artifact's output directory.
  pub executable: String,
  /// Input selector passed to the compiler as its positional argument.
  pub package: String,
  /// Extra compiler flag passed as a single token. Empty means none.
  #[serde(default)]
  pub flags: String,
  #[serde(default)]
  pub environment: BTreeMap<String, String>,
}

impl Project {
  /// Returns a copy of this project rooted at `root`.
  pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
    self.root = root.into();
    self
  }

  /// Resolve `relative` against the project root.
  ///
  /// Resolution is lexical: `.` components are dropped and `..` removes the
  /// preceding component, so `"."` and `"sub/.."` both resolve to the root
  /// itself. The filesystem is not consulted.
  pub fn project_path(&self, relative: impl AsRef<Path>) -> PathBuf {
    normalize(&self.root.join(relative))
  }

  /// Directory receiving all build output (`<root>/target`).
  pub fn target_dir(&self) -> PathBuf {
    self.project_path(TARGET_DIR)
  }

  /// Number of (artifact, target) pairs, i.e. the number of build units of a run.
  pub fn unit_count(&self) -> usize {
    self.artifacts.iter().map(|a| a.targets.len()).sum()
  }
}

/// Lexically normalize a path without touching the filesystem.
///
/// `..` never climbs above the root or prefix of an absolute path.
pub(crate) fn normalize(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => match out.components().next_back() {
        Some(Component::Normal(_)) => {
          out.pop();
        }
        Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
        _ => out.push(".."),
      },
      other => out.push(other.as_os_str()),
    }
  }
  out
}
