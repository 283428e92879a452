//! Project definition discovery and loading.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::Project;
use crate::consts::PROJECT_FILE;

/// Errors that can occur while locating or reading a project definition.
#[derive(Debug, Error)]
pub enum ProjectError {
  /// No project file in the start directory or any of its parents.
  #[error("could not find project.yaml in {} or any parent directory", start.display())]
  NotFound { start: PathBuf },

  #[error("failed to read {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_yaml::Error,
  },
}

/// Find the nearest project file, starting at `start` and walking up through its parents.
pub fn find_project_file(start: &Path) -> Result<PathBuf, ProjectError> {
  let start = dunce::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());

  for dir in start.ancestors() {
    let candidate = dir.join(PROJECT_FILE);
    if candidate.is_file() {
      debug!(path = ?candidate, "found project file");
      return Ok(candidate);
    }
  }

  Err(ProjectError::NotFound { start })
}

/// Load a project definition file. The project root is the file's directory.
pub fn load_project(path: &Path) -> Result<Project, ProjectError> {
  let content = std::fs::read_to_string(path).map_err(|source| ProjectError::Read {
    path: path.to_path_buf(),
    source,
  })?;

  let project: Project = serde_yaml::from_str(&content).map_err(|source| ProjectError::Parse {
    path: path.to_path_buf(),
    source,
  })?;

  let root = path
    .parent()
    .map(Path::to_path_buf)
    .unwrap_or_else(|| PathBuf::from("."));
  let root = dunce::canonicalize(&root).unwrap_or(root);

  debug!(
    name = %project.name,
    version = %project.version,
    artifacts = project.artifacts.len(),
    root = ?root,
    "loaded project"
  );

  Ok(project.with_root(root))
}

/// Discover and load the project enclosing `start`.
pub fn find_project(start: &Path) -> Result<Project, ProjectError> {
  let path = find_project_file(start)?;
  load_project(&path)
}
