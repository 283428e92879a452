//! Types for build execution.
//!
//! This module defines the error types, the identity of a build unit, and the
//! aggregated result of a build run.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building a single unit.
#[derive(Debug, Error)]
pub enum BuildError {
  /// A resource resolved to the project root itself.
  #[error("resource path cannot be the entire project folder: {}", path.display())]
  ResourceIsProjectRoot { path: PathBuf },

  /// A resource resolved to a path outside the project root.
  #[error("resource path is outside the project folder: {}", path.display())]
  ResourceOutsideProject { path: PathBuf },

  #[error("failed to create output directory {}: {source}", path.display())]
  CreateOutputDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to copy resource {} to {}: {source}", from.display(), to.display())]
  CopyResource {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to remove {}: {source}", path.display())]
  Clean {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The compiler process could not be started.
  #[error("failed to launch {program}: {source}")]
  CompilerLaunch {
    program: String,
    classifier: String,
    executable: String,
    #[source]
    source: std::io::Error,
  },

  /// The compiler ran but did not exit successfully. `code` is `None` when it was killed by a signal.
  #[error(
    "build command exited in an error state ({}): {cmd}",
    code.map_or_else(|| "terminated by signal".to_string(), |c| format!("exit code {c}"))
  )]
  CompilerFailed {
    cmd: String,
    classifier: String,
    executable: String,
    code: Option<i32>,
  },

  /// The task running the unit panicked.
  #[error("build task panicked: {0}")]
  TaskPanicked(String),
}

/// Coarse classification of a [`BuildError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// Invalid project definition.
  Configuration,
  /// Directory creation, copy or removal failed.
  Filesystem,
  /// The compiler could not be started.
  Launch,
  /// The compiler exited with a failure status.
  Exit,
  /// The build task itself failed.
  Internal,
}

impl BuildError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      BuildError::ResourceIsProjectRoot { .. } | BuildError::ResourceOutsideProject { .. } => ErrorKind::Configuration,
      BuildError::CreateOutputDir { .. } | BuildError::CopyResource { .. } | BuildError::Clean { .. } => {
        ErrorKind::Filesystem
      }
      BuildError::CompilerLaunch { .. } => ErrorKind::Launch,
      BuildError::CompilerFailed { .. } => ErrorKind::Exit,
      BuildError::TaskPanicked(_) => ErrorKind::Internal,
    }
  }
}

/// Identifies one (artifact, target) pair of a build run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildUnit {
  pub classifier: String,
  pub executable: String,
}

impl BuildUnit {
  pub fn new(classifier: impl Into<String>, executable: impl Into<String>) -> Self {
    Self {
      classifier: classifier.into(),
      executable: executable.into(),
    }
  }
}

impl fmt::Display for BuildUnit {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.classifier, self.executable)
  }
}

/// A build unit together with the error that stopped it.
#[derive(Debug, Error)]
#[error("{unit}: {error}")]
pub struct UnitFailure {
  pub unit: BuildUnit,
  #[source]
  pub error: BuildError,
}

/// Result of a build run in which every unit succeeded.
#[derive(Debug, Default, Clone)]
pub struct BuildReport {
  /// Units that produced their executable, in completion order.
  pub built: Vec<BuildUnit>,
}

/// Every failure of a build run, in the order the failing units finished.
#[derive(Debug, Default)]
pub struct BuildFailures {
  pub failures: Vec<UnitFailure>,
  /// Units that succeeded despite the failures of their siblings.
  pub built: Vec<BuildUnit>,
}

impl BuildFailures {
  pub fn len(&self) -> usize {
    self.failures.len()
  }

  pub fn is_empty(&self) -> bool {
    self.failures.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &UnitFailure> {
    self.failures.iter()
  }

  /// Failures belonging to the given classifier.
  pub fn for_classifier<'a>(&'a self, classifier: &'a str) -> impl Iterator<Item = &'a UnitFailure> + 'a {
    self.failures.iter().filter(move |f| f.unit.classifier == classifier)
  }
}

impl fmt::Display for BuildFailures {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let noun = if self.failures.len() == 1 { "error" } else { "errors" };
    write!(f, "{} {} occurred:", self.failures.len(), noun)?;
    for failure in &self.failures {
      write!(f, "\n\t* {}", failure)?;
    }
    Ok(())
  }
}

impl std::error::Error for BuildFailures {}
