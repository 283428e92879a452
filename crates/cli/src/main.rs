mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use output::OutputFormat;

/// graven - A build automation tool for Go
#[derive(Parser)]
#[command(name = "graven")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build every target of every artifact
  Build {
    /// Directory to search for project.yaml (default: current directory and its parents)
    #[arg(short, long)]
    project: Option<PathBuf>,

    /// Compiler command line (default: $GRAVEN_COMPILER or "go build")
    #[arg(long)]
    compiler: Option<String>,

    /// Keep the existing target directory instead of removing it first
    #[arg(long)]
    no_clean: bool,
  },

  /// Remove the target directory
  Clean {
    /// Directory to search for project.yaml (default: current directory and its parents)
    #[arg(short, long)]
    project: Option<PathBuf>,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Build {
      project,
      compiler,
      no_clean,
    } => cmd::cmd_build(project.as_deref(), compiler.as_deref(), !no_clean, cli.output),
    Commands::Clean { project } => cmd::cmd_clean(project.as_deref(), cli.output),
  }
}
