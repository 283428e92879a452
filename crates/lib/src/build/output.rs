//! Per-classifier output directories (`<root>/target/<classifier>`).

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::build::types::BuildError;
use crate::consts::TARGET_DIR;

/// Output directory of `classifier` under `project_root`.
pub fn output_dir(project_root: &Path, classifier: &str) -> PathBuf {
  project_root.join(TARGET_DIR).join(classifier)
}

/// Ensure the output directory of `classifier` exists, creating missing parents.
///
/// Safe to call concurrently for the same classifier: a directory created by a
/// sibling task in the meantime counts as success.
pub async fn ensure_output_dir(project_root: &Path, classifier: &str) -> Result<PathBuf, BuildError> {
  let path = output_dir(project_root, classifier);

  match fs::create_dir_all(&path).await {
    Ok(()) => {}
    Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && path.is_dir() => {}
    Err(source) => return Err(BuildError::CreateOutputDir { path, source }),
  }

  debug!(path = ?path, "output directory ready");
  Ok(path)
}
