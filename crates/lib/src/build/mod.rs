//! Build orchestration.
//!
//! A build run turns every (artifact, target) pair of a [`Project`] into one
//! build unit and runs all units concurrently. Each unit:
//! 1. Ensures its classifier's output directory exists
//! 2. Stages the artifact's resources into it
//! 3. Invokes the compiler for its target
//!
//! Units never cancel each other. Every failure is recorded and the run
//! reports all of them once every unit has finished.
//!
//! # Submodules
//!
//! - [`compile`] - compiler invocation for one target
//! - [`config`] - compiler command and forwarded environment
//! - [`output`] - per-classifier output directories
//! - [`stage`] - resource staging

pub mod compile;
pub mod config;
pub mod output;
pub mod stage;
mod types;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinSet;
use tracing::{Instrument, debug, error, info};

use crate::project::Project;

pub use compile::execute_target;
pub use config::{BuildConfig, CompilerCommand};
pub use output::{ensure_output_dir, output_dir};
pub use stage::stage_resources;
pub use types::*;

/// Outcomes recorded by finished units, guarded by a single mutex.
#[derive(Default)]
struct Outcomes {
  failures: Vec<UnitFailure>,
  built: Vec<BuildUnit>,
}

type SharedOutcomes = Arc<Mutex<Outcomes>>;

fn record(outcomes: &SharedOutcomes, unit: BuildUnit, result: Result<(), BuildError>) {
  let mut guard = outcomes.lock().unwrap_or_else(PoisonError::into_inner);
  match result {
    Ok(()) => guard.built.push(unit),
    Err(error) => guard.failures.push(UnitFailure { unit, error }),
  }
}

/// Build every target of every artifact in `project`.
///
/// All units are spawned at once and awaited to completion, whatever their
/// siblings do. Returns the built units when nothing failed, otherwise every
/// failure in the order the failing units finished.
pub async fn build_project(project: &Project, config: &BuildConfig) -> Result<BuildReport, BuildFailures> {
  info!(
    project = %project.name,
    version = %project.version,
    units = project.unit_count(),
    "starting build"
  );

  let project = Arc::new(project.clone());
  let config = Arc::new(config.clone());
  let outcomes = SharedOutcomes::default();

  let mut join_set = JoinSet::new();
  let mut units = HashMap::new();

  for (a, artifact) in project.artifacts.iter().enumerate() {
    for (t, target) in artifact.targets.iter().enumerate() {
      let unit = BuildUnit::new(&artifact.classifier, &target.executable);
      let task_unit = unit.clone();
      let project = project.clone();
      let config = config.clone();
      let outcomes = outcomes.clone();

      let handle = join_set.spawn(
        async move {
          debug!(unit = %task_unit, "unit running");
          let result = build_unit(&project, a, t, &config).await;
          match &result {
            Ok(()) => info!(unit = %task_unit, "unit succeeded"),
            Err(e) => error!(unit = %task_unit, error = %e, "unit failed"),
          }
          record(&outcomes, task_unit, result);
        }
        .in_current_span(),
      );
      units.insert(handle.id(), unit);
    }
  }

  while let Some(joined) = join_set.join_next_with_id().await {
    if let Err(e) = joined {
      let unit = units
        .remove(&e.id())
        .unwrap_or_else(|| BuildUnit::new("<unknown>", "<unknown>"));
      error!(unit = %unit, error = %e, "build task panicked");
      record(&outcomes, unit, Err(BuildError::TaskPanicked(e.to_string())));
    }
  }

  let Outcomes { failures, built } = std::mem::take(&mut *outcomes.lock().unwrap_or_else(PoisonError::into_inner));

  info!(built = built.len(), failed = failures.len(), "build complete");

  if failures.is_empty() {
    Ok(BuildReport { built })
  } else {
    Err(BuildFailures { failures, built })
  }
}

/// Run one unit: output directory, then resources, then the compiler.
async fn build_unit(project: &Project, artifact: usize, target: usize, config: &BuildConfig) -> Result<(), BuildError> {
  let artifact = &project.artifacts[artifact];
  let target = &artifact.targets[target];

  let out_dir = ensure_output_dir(&project.root, &artifact.classifier).await?;
  stage_resources(project, artifact, &out_dir).await?;
  execute_target(&project.root, &artifact.classifier, &out_dir, target, config).await
}

/// Remove the project's whole output directory. A missing directory is not an error.
pub async fn clean_project(project: &Project) -> Result<(), BuildError> {
  let path = project.target_dir();

  match tokio::fs::remove_dir_all(&path).await {
    Ok(()) => {
      info!(path = ?path, "removed output directory");
      Ok(())
    }
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
      debug!(path = ?path, "output directory already absent");
      Ok(())
    }
    Err(source) => Err(BuildError::Clean { path, source }),
  }
}
