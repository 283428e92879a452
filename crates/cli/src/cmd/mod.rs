mod build;
mod clean;

use std::path::Path;

use anyhow::{Context, Result};

use graven_lib::project::{Project, find_project};

pub use build::cmd_build;
pub use clean::cmd_clean;

/// Locate and load the project enclosing `dir`, or the current directory when not given.
fn load_project(dir: Option<&Path>) -> Result<Project> {
  let start = match dir {
    Some(dir) => dir.to_path_buf(),
    None => std::env::current_dir().context("Failed to determine current directory")?,
  };

  find_project(&start).context("Failed to load project")
}
