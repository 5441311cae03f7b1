//! `generate-pom`: write a self-contained effective descriptor.
//!
//! Pipeline: load descriptor → build graph → flatten → merge → serialize →
//! rewrite paths → write. A graph that cannot be built aborts the command,
//! since a descriptor missing resolvable dependencies must not be published.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::ProjectSession;
use crate::config::resolve;
use crate::constants::{DEPENDENCY_GRAPH_FILE_NAME, EFFECTIVE_POM_FILE_NAME};
use crate::descriptor::{ProjectContext, write_descriptor};
use crate::graph::{DependencyGraphBuilder, flatten};
use crate::merge::{CoordinateOverrides, merge};
use crate::rewrite::rewrite_paths;
use crate::utils::write_output;

/// Write the effective descriptor.
#[derive(Args, Debug, Default)]
pub struct GeneratePomCommand {
    /// Output file [default: <build-dir>/effective-pom.xml]
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// groupId the output declares [default: the project's]
    #[arg(long)]
    group_id: Option<String>,

    /// artifactId the output declares [default: the project's]
    #[arg(long)]
    artifact_id: Option<String>,

    /// version the output declares [default: the project's]
    #[arg(long)]
    version: Option<String>,

    /// Resolved dependency graph [default: <build-dir>/dependency-graph.json]
    #[arg(long, value_name = "PATH")]
    graph: Option<PathBuf>,
}

impl GeneratePomCommand {
    /// Run against the descriptor at `pom` with configuration from `config`.
    pub async fn execute_with_project(
        self,
        pom: Option<PathBuf>,
        config: Option<PathBuf>,
    ) -> Result<()> {
        let session = ProjectSession::load(pom, config).await?;
        let settings = &session.config.generate_pom;
        let project = &session.descriptor;

        let output = session.resolve_path(self.output, settings.output.as_ref(), EFFECTIVE_POM_FILE_NAME);
        let graph_path =
            session.resolve_path(self.graph, settings.graph.as_ref(), DEPENDENCY_GRAPH_FILE_NAME);
        let overrides = CoordinateOverrides::new(
            resolve(self.group_id, settings.group_id.clone(), || project.group_id.clone()),
            resolve(self.artifact_id, settings.artifact_id.clone(), || project.artifact_id.clone()),
            resolve(self.version, settings.version.clone(), || project.version.clone()),
        );

        let root = session.graph_source(graph_path).build_dependency_graph(project)?;
        let artifacts = flatten(&root);

        let context = ProjectContext::discover(project).await?;
        let outcome = merge(project, &context, &artifacts, &overrides);

        let xml = write_descriptor(&outcome.descriptor)
            .with_context(|| format!("Failed to generate descriptor for {}", session.descriptor_path.display()))?;
        let portable = rewrite_paths(
            &xml,
            &outcome.descriptor.project_directory,
            &outcome.descriptor.build.directory,
        );

        tracing::info!("Writing to: {}", output.display());
        tracing::info!("Effective descriptor length: {} bytes", portable.len());
        write_output(&output, &portable).await?;

        println!(
            "{} Wrote {} ({} artifacts, {} changes)",
            "✓".green(),
            output.display(),
            artifacts.len(),
            outcome.changes.len()
        );
        Ok(())
    }
}
