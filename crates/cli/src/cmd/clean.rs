//! Implementation of the `graven clean` command.

use std::path::Path;

use anyhow::{Context, Result};

use graven_lib::clean_project;

use crate::output::{OutputFormat, print_json, print_success};

/// Remove the project's `target` directory.
pub fn cmd_clean(project_dir: Option<&Path>, output: OutputFormat) -> Result<()> {
  let project = super::load_project(project_dir)?;
  let target_dir = project.target_dir();

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  rt.block_on(clean_project(&project))
    .context("Failed to clean output directory")?;

  if output.is_json() {
    print_json(&serde_json::json!({ "removed": target_dir }))?;
  } else {
    print_success(&format!("Removed {}", target_dir.display()));
  }

  Ok(())
}
