//! Command-line interface for pomflat.
//!
//! # Commands
//!
//! - `generate-pom` - write a self-contained effective `pom.xml`
//! - `list-dependencies` - write a delimited report of every resolved artifact
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - debug logging
//! - `--quiet` / `-q` - errors only
//! - `--pom <PATH>` - descriptor to work on (default `./pom.xml`)
//! - `--config <PATH>` - configuration file (default `pomflat.toml` next to the descriptor)
//!
//! `RUST_LOG`, when set, overrides the level chosen by `--verbose`/`--quiet`.
//! Logs go to stderr.
//!
//! # Examples
//!
//! ```bash
//! pomflat generate-pom --group-id com.example.release --version 2.0.0
//! pomflat --pom module/pom.xml list-dependencies --separator ,
//! ```

pub mod common;
mod generate_pom;
mod list_dependencies;

pub use generate_pom::GeneratePomCommand;
pub use list_dependencies::ListDependenciesCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Runtime settings derived from the global flags.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Default log level when `RUST_LOG` is unset
    pub log_level: Level,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: Level::INFO,
        }
    }
}

impl CliConfig {
    /// Install the global tracing subscriber.
    ///
    /// Only the first call has an effect.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.log_level.as_str().to_lowercase()));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }
}

/// Flatten Maven descriptors into portable, self-contained ones.
#[derive(Parser, Debug)]
#[command(
    name = "pomflat",
    about = "Flatten a Maven pom.xml and its resolved dependency graph",
    version,
    long_about = "pomflat writes an effective pom.xml that lists every resolved dependency \
                  explicitly and uses ${project.*} placeholders instead of absolute paths, \
                  and can report the resolved dependency set as a delimited file."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the project descriptor
    #[arg(long, global = true, value_name = "PATH")]
    pom: Option<PathBuf>,

    /// Path to a pomflat.toml configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a self-contained effective descriptor
    GeneratePom(GeneratePomCommand),

    /// Write a delimited report of all resolved dependencies
    ListDependencies(ListDependenciesCommand),
}

impl Cli {
    /// Run the selected command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Settings implied by the global flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::ERROR
        } else {
            Level::INFO
        };

        CliConfig {
            log_level,
        }
    }

    /// Run the selected command with explicit settings.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::GeneratePom(cmd) => cmd.execute_with_project(self.pom, self.config).await,
            Commands::ListDependencies(cmd) => {
                cmd.execute_with_project(self.pom, self.config).await
            }
        }
    }
}
