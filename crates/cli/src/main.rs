mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mkgen_lib::consts::PROJECT_FILENAME;

use crate::output::OutputFormat;

/// mkgen - incremental Makefile rule tree generator
#[derive(Parser)]
#[command(name = "mkgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Generate the rule tree for a project snapshot
  Generate {
    /// Path to the project snapshot
    #[arg(default_value = PROJECT_FILENAME)]
    project: PathBuf,

    /// Do not suppress echoing of executed commands
    #[arg(long)]
    verbose_makefile: bool,

    /// Forward $(MAKEFLAGS) explicitly to recursive make invocations
    #[arg(long)]
    pass_makeflags: bool,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// List each target's object files without writing anything
  Objects {
    /// Path to the project snapshot
    #[arg(default_value = PROJECT_FILENAME)]
    project: PathBuf,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Generate {
      project,
      verbose_makefile,
      pass_makeflags,
      output,
    } => cmd::cmd_generate(
      &project,
      cmd::GenerateFlags {
        verbose_makefile,
        pass_makeflags,
      },
      output,
    ),
    Commands::Objects { project, output } => cmd::cmd_objects(&project, output),
  }
}
