//! `list-dependencies`: write a delimited report of the resolved artifacts.
//!
//! Unlike `generate-pom`, a graph that cannot be built is not fatal: it is
//! logged and the report is written without its dependency section.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::ProjectSession;
use crate::config::resolve;
use crate::constants::{DEFAULT_SEPARATOR, DEPENDENCIES_REPORT_FILE_NAME, DEPENDENCY_GRAPH_FILE_NAME};
use crate::core::PomflatError;
use crate::graph::{DependencyGraphBuilder, flatten};
use crate::report::format_report;
use crate::utils::write_output;

/// Write the dependency report.
#[derive(Args, Debug, Default)]
pub struct ListDependenciesCommand {
    /// Output file [default: <build-dir>/dependencies.properties]
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Field delimiter [default: |]
    #[arg(short, long)]
    separator: Option<String>,

    /// Resolved dependency graph [default: <build-dir>/dependency-graph.json]
    #[arg(long, value_name = "PATH")]
    graph: Option<PathBuf>,
}

impl ListDependenciesCommand {
    /// Run against the descriptor at `pom` with configuration from `config`.
    pub async fn execute_with_project(
        self,
        pom: Option<PathBuf>,
        config: Option<PathBuf>,
    ) -> Result<()> {
        let session = ProjectSession::load(pom, config).await?;
        let settings = &session.config.list_dependencies;

        let output =
            session.resolve_path(self.output, settings.output.as_ref(), DEPENDENCIES_REPORT_FILE_NAME);
        let graph_path =
            session.resolve_path(self.graph, settings.graph.as_ref(), DEPENDENCY_GRAPH_FILE_NAME);
        let separator =
            resolve(self.separator, settings.separator.clone(), || DEFAULT_SEPARATOR.to_string());
        if separator.is_empty() {
            return Err(PomflatError::ConfigError {
                message: "separator must not be empty".to_string(),
            }
            .into());
        }

        let artifacts = match session.graph_source(graph_path).build_dependency_graph(&session.descriptor) {
            Ok(root) => Some(flatten(&root)),
            Err(e) => {
                tracing::warn!("{e}");
                tracing::warn!("Writing report without dependencies");
                None
            }
        };

        let report = format_report(&session.descriptor, artifacts.as_ref(), &separator);

        tracing::info!("Writing to: {}", output.display());
        write_output(&output, &report).await?;

        match &artifacts {
            Some(artifacts) => println!(
                "{} Wrote {} ({} artifacts)",
                "✓".green(),
                output.display(),
                artifacts.len()
            ),
            None => println!(
                "{} Wrote {} without dependencies",
                "!".yellow(),
                output.display()
            ),
        }
        Ok(())
    }
}
