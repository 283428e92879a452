//! Build configuration.
//!
//! Selects the compiler command and the ambient variables forwarded into the
//! compiler's otherwise empty environment. Defaults target the Go toolchain and
//! can be overridden through the process environment:
//!
//! - `GRAVEN_COMPILER`: whitespace-separated command line replacing `go build`
//! - `GRAVEN_FORWARD_ENV`: comma-separated variable names replacing the default forward list

use std::ffi::OsString;
use std::fmt;

/// Environment variable overriding the compiler command line.
pub const COMPILER_ENV: &str = "GRAVEN_COMPILER";

/// Environment variable overriding the list of forwarded ambient variables.
pub const FORWARD_ENV_ENV: &str = "GRAVEN_FORWARD_ENV";

/// Ambient variables the Go toolchain needs to locate itself, its cache and the workspace.
pub const DEFAULT_FORWARD_ENV: &[&str] = &["GOPATH", "GOROOT", "GOCACHE", "HOME", "PATH"];

/// The compiler program and the arguments placed before the per-target arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerCommand {
  pub program: String,
  pub args: Vec<String>,
}

impl CompilerCommand {
  pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
    Self {
      program: program.into(),
      args: args.into_iter().map(Into::into).collect(),
    }
  }

  /// Parse a whitespace-separated command line. Returns `None` for a blank line.
  pub fn parse(line: &str) -> Option<Self> {
    let mut words = line.split_whitespace();
    let program = words.next()?;
    Some(Self::new(program, words))
  }
}

impl Default for CompilerCommand {
  fn default() -> Self {
    Self::new("go", ["build"])
  }
}

impl fmt::Display for CompilerCommand {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}

/// Configuration for a build run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
  pub compiler: CompilerCommand,

  /// Names of variables copied from this process into the compiler's environment,
  /// when set. Target environment entries take precedence over them.
  pub forward_env: Vec<String>,
}

impl Default for BuildConfig {
  fn default() -> Self {
    Self {
      compiler: CompilerCommand::default(),
      forward_env: DEFAULT_FORWARD_ENV.iter().map(|s| s.to_string()).collect(),
    }
  }
}

impl BuildConfig {
  /// Defaults with overrides from `GRAVEN_COMPILER` and `GRAVEN_FORWARD_ENV`.
  pub fn from_env() -> Self {
    let mut config = Self::default();

    if let Ok(line) = std::env::var(COMPILER_ENV)
      && let Some(compiler) = CompilerCommand::parse(&line)
    {
      config.compiler = compiler;
    }

    if let Ok(list) = std::env::var(FORWARD_ENV_ENV) {
      config.forward_env = list
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    }

    config
  }

  /// Forwarded variables that are set in this process, with their values.
  ///
  /// Values are passed through as raw OS strings, so non-UTF-8 paths survive.
  pub fn ambient_env(&self) -> Vec<(String, OsString)> {
    self
      .forward_env
      .iter()
      .filter_map(|name| std::env::var_os(name).map(|value| (name.clone(), value)))
      .collect()
  }
}
