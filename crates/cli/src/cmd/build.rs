//! Implementation of the `graven build` command.
//!
//! Cleans the project's output directory, then builds every target of every
//! artifact concurrently and reports each failing unit.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::info;

use graven_lib::build::{BuildConfig, BuildUnit, CompilerCommand, UnitFailure, build_project, clean_project};

use crate::output::{OutputFormat, format_duration, print_error, print_info, print_json, print_stat, print_success};

#[derive(Debug, Serialize)]
struct BuildSummary {
  project: String,
  version: String,
  built: Vec<String>,
  failed: Vec<FailureSummary>,
}

#[derive(Debug, Serialize)]
struct FailureSummary {
  unit: String,
  kind: String,
  error: String,
}

impl From<&UnitFailure> for FailureSummary {
  fn from(failure: &UnitFailure) -> Self {
    Self {
      unit: failure.unit.to_string(),
      kind: format!("{:?}", failure.error.kind()).to_lowercase(),
      error: failure.error.to_string(),
    }
  }
}

/// Execute the build command.
///
/// `compiler` replaces the configured compiler command line when given.
/// With `clean` set, the `target` directory is removed first.
pub fn cmd_build(project_dir: Option<&Path>, compiler: Option<&str>, clean: bool, output: OutputFormat) -> Result<()> {
  let start = Instant::now();
  let project = super::load_project(project_dir)?;

  let mut config = BuildConfig::from_env();
  if let Some(line) = compiler {
    config.compiler = CompilerCommand::parse(line).context("--compiler must not be empty")?;
  }
  info!(compiler = %config.compiler, forward_env = ?config.forward_env, "build configuration");

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

  if clean {
    rt.block_on(clean_project(&project))
      .context("Failed to clean output directory")?;
  }

  let result = rt.block_on(build_project(&project, &config));

  let (built, failures) = match &result {
    Ok(report) => (report.built.as_slice(), &[][..]),
    Err(failures) => (failures.built.as_slice(), failures.failures.as_slice()),
  };

  if output.is_json() {
    print_json(&BuildSummary {
      project: project.name.clone(),
      version: project.version.clone(),
      built: built.iter().map(BuildUnit::to_string).collect(),
      failed: failures.iter().map(FailureSummary::from).collect(),
    })?;
  } else {
    print_info(&format!("Building {} {}", project.name, project.version));
    for unit in built {
      print_success(&format!("Built {}", unit));
    }
    for failure in failures {
      print_error(&failure.to_string());
    }
    println!();
    print_stat("Units built", &built.len().to_string());
    print_stat("Units failed", &failures.len().to_string());
    print_stat("Duration", &format_duration(start.elapsed()));
  }

  if !failures.is_empty() {
    bail!("{} of {} build units failed", failures.len(), built.len() + failures.len());
  }

  Ok(())
}
