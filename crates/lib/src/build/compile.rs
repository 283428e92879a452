//! Compiler invocation for a single target.
//!
//! Runs the configured compiler once per target with an explicit environment:
//! - Clears all environment variables
//! - Forwards the ambient variables named in [`BuildConfig::forward_env`]
//! - Adds the target's own environment, which wins on conflicts
//!
//! Standard streams are inherited, so compiler output from concurrent units
//! interleaves on the console.

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use crate::build::config::BuildConfig;
use crate::build::types::BuildError;
use crate::project::Target;

/// Arguments passed to the compiler after its configured leading arguments.
///
/// `-o <out_dir>/<executable>`, then the flags token when non-empty, then the package.
pub fn target_args(out_dir: &Path, target: &Target) -> Vec<OsString> {
  let mut args = vec![OsString::from("-o"), out_dir.join(&target.executable).into_os_string()];
  if !target.flags.is_empty() {
    args.push(OsString::from(&target.flags));
  }
  args.push(OsString::from(&target.package));
  args
}

/// Build the compiler command for `target` without running it.
pub fn compiler_command(
  project_root: &Path,
  out_dir: &Path,
  target: &Target,
  config: &BuildConfig,
) -> Command {
  let mut command = Command::new(&config.compiler.program);
  command
    .args(&config.compiler.args)
    .args(target_args(out_dir, target))
    .current_dir(project_root)
    .env_clear()
    .envs(config.ambient_env())
    .envs(&target.environment)
    .stdin(Stdio::inherit())
    .stdout(Stdio::inherit())
    .stderr(Stdio::inherit());
  command
}

/// Compile `target` into `out_dir`.
///
/// Succeeds only when the compiler starts and exits with status zero.
pub async fn execute_target(
  project_root: &Path,
  classifier: &str,
  out_dir: &Path,
  target: &Target,
  config: &BuildConfig,
) -> Result<(), BuildError> {
  let cmd_line = describe(config, out_dir, target);
  info!(
    classifier = %classifier,
    executable = %target.executable,
    cmd = %cmd_line,
    "compiling target"
  );

  let mut command = compiler_command(project_root, out_dir, target, config);
  debug!(cwd = ?project_root, env = ?target.environment, "spawning compiler");

  let status = command.status().await.map_err(|source| BuildError::CompilerLaunch {
    program: config.compiler.program.clone(),
    classifier: classifier.to_string(),
    executable: target.executable.clone(),
    source,
  })?;

  if !status.success() {
    return Err(BuildError::CompilerFailed {
      cmd: cmd_line,
      classifier: classifier.to_string(),
      executable: target.executable.clone(),
      code: status.code(),
    });
  }

  debug!(classifier = %classifier, executable = %target.executable, "compiler finished");
  Ok(())
}

/// Human-readable command line for logs and error messages.
fn describe(config: &BuildConfig, out_dir: &Path, target: &Target) -> String {
  let mut line = config.compiler.to_string();
  for arg in target_args(out_dir, target) {
    line.push(' ');
    line.push_str(&arg.to_string_lossy());
  }
  line
}
