//! Resource staging.
//!
//! Copies the resource directories declared on an artifact into its output
//! directory, merging them into whatever is already there.

use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::build::types::BuildError;
use crate::project::{Artifact, Project, normalize};

/// Resolve a resource path and check that it lies strictly inside the project root.
///
/// Works for relative roots too: a normalized relative path keeps its `..`
/// components at the front, so any left over after the root prefix means the
/// resource climbed out of the root.
pub fn resolve_resource(project: &Project, resource: &str) -> Result<PathBuf, BuildError> {
  let root = normalize(&project.root);
  let path = project.project_path(resource);

  match path.strip_prefix(&root) {
    Ok(rest) if rest.components().any(|c| c == Component::ParentDir) => {
      Err(BuildError::ResourceOutsideProject { path })
    }
    Ok(rest) if rest.as_os_str().is_empty() => Err(BuildError::ResourceIsProjectRoot { path }),
    Ok(_) => Ok(path),
    Err(_) => Err(BuildError::ResourceOutsideProject { path }),
  }
}

/// Stage every resource of `artifact` into `out_dir`, in declaration order.
///
/// Each resource is validated immediately before it is copied, so a bad entry
/// stops staging without copying anything from that entry onwards.
pub async fn stage_resources(project: &Project, artifact: &Artifact, out_dir: &Path) -> Result<(), BuildError> {
  for resource in &artifact.resources {
    let from = resolve_resource(project, resource)?;

    info!(
      classifier = %artifact.classifier,
      resource = ?from,
      "staging resource"
    );

    let to = out_dir.to_path_buf();
    let src = from.clone();
    let copied = tokio::task::spawn_blocking(move || copy_dir(&src, &to))
      .await
      .map_err(|e| BuildError::TaskPanicked(e.to_string()))?;

    copied.map_err(|source| BuildError::CopyResource {
      from,
      to: out_dir.to_path_buf(),
      source,
    })?;
  }

  Ok(())
}

/// Copy the tree under `src` into `dst`, preserving subdirectories.
///
/// Existing files in `dst` with the same relative path are overwritten; other
/// contents of `dst` are left alone. Returns the number of files copied.
pub fn copy_dir(src: &Path, dst: &Path) -> io::Result<usize> {
  let mut copied = 0;

  for entry in WalkDir::new(src).follow_links(true) {
    let entry = entry.map_err(io::Error::from)?;
    let rel = entry
      .path()
      .strip_prefix(src)
      .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let target = dst.join(rel);

    if entry.file_type().is_dir() {
      std::fs::create_dir_all(&target)?;
    } else {
      if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
      }
      std::fs::copy(entry.path(), &target)?;
      copied += 1;
    }
  }

  debug!(src = ?src, dst = ?dst, files = copied, "copied directory");
  Ok(copied)
}
