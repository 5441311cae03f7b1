//! Where resolved dependency graphs come from.
//!
//! Resolution itself is out of scope: the graph is produced by the build
//! tool's resolver and handed to pomflat. [`DependencyGraphBuilder`] is the
//! seam for that hand-over. The shipped implementation, [`JsonGraphFile`],
//! reads a graph the resolver exported as JSON.

use std::path::{Path, PathBuf};

use super::DependencyGraphNode;
use crate::core::PomflatError;
use crate::descriptor::ProjectDescriptor;

/// Produces the resolved dependency graph for a project.
///
/// Implementations may perform slow I/O. Callers treat the call as opaque and
/// never retry it.
pub trait DependencyGraphBuilder {
    /// Build the full graph for `project` with no filter applied.
    ///
    /// Any failure is reported as [`PomflatError::GraphBuildFailed`].
    fn build_dependency_graph(
        &self,
        project: &ProjectDescriptor,
    ) -> Result<DependencyGraphNode, PomflatError>;
}

/// An already-built graph is its own builder.
impl DependencyGraphBuilder for DependencyGraphNode {
    fn build_dependency_graph(
        &self,
        _project: &ProjectDescriptor,
    ) -> Result<DependencyGraphNode, PomflatError> {
        Ok(self.clone())
    }
}

/// Reads a graph exported by the resolver as a JSON tree.
///
/// The document is one node object, `{"groupId", "artifactId", "version",
/// "classifier"?, "type"?, "scope"?, "file"?, "snapshot"?, "children": [...]}`,
/// rooted at the project artifact.
#[derive(Debug, Clone)]
pub struct JsonGraphFile {
    path: PathBuf,
}

impl JsonGraphFile {
    /// Read the graph from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    /// The graph document location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn failure(&self, reason: impl ToString) -> PomflatError {
        PomflatError::GraphBuildFailed {
            source_path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl DependencyGraphBuilder for JsonGraphFile {
    fn build_dependency_graph(
        &self,
        project: &ProjectDescriptor,
    ) -> Result<DependencyGraphNode, PomflatError> {
        tracing::debug!("Loading dependency graph from {}", self.path.display());

        let content = std::fs::read_to_string(&self.path).map_err(|e| self.failure(e))?;
        let root: DependencyGraphNode =
            serde_json::from_str(&content).map_err(|e| self.failure(e))?;

        if root.artifact.group_id != project.group_id
            || root.artifact.artifact_id != project.artifact_id
        {
            tracing::warn!(
                "Dependency graph is rooted at {} but the descriptor declares {}:{}",
                root.artifact,
                project.group_id,
                project.artifact_id
            );
        }

        tracing::debug!("Loaded dependency graph with {} nodes", root.node_count());
        Ok(root)
    }
}
