//! The project descriptor model.
//!
//! [`ProjectDescriptor`] is the in-memory form of a `pom.xml` after the host
//! has built its effective model: identifiers inherited from the parent are
//! filled in, `${...}` expressions are interpolated and build paths are
//! absolute. The merger works on this model, the [`writer`] serializes it and
//! the [`reader`] produces it.
//!
//! Only the parts the engine reasons about are modelled field by field.
//! Everything else under `<project>` is carried through [`ElementSlot::Raw`]
//! verbatim, in source order.

pub mod context;
pub mod reader;
pub mod writer;

pub use context::ProjectContext;
pub use reader::{load_descriptor, parse_descriptor};
pub use writer::write_descriptor;

use std::path::PathBuf;

use crate::constants::DEFAULT_PACKAGING;
use crate::coordinate::ArtifactCoordinate;

/// Reference to a parent descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentReference {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    /// `<relativePath>` as written, if any
    pub relative_path: Option<String>,
}

impl std::fmt::Display for ParentReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// A `<exclusion>` inside a dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusion {
    pub group_id: String,
    pub artifact_id: String,
}

/// One `<dependency>` entry of the descriptor.
///
/// Same shape as an [`ArtifactCoordinate`] but owned by the descriptor, so
/// version, type and scope may be left unspecified.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub classifier: Option<String>,
    pub dependency_type: Option<String>,
    pub scope: Option<String>,
    pub optional: Option<bool>,
    pub system_path: Option<String>,
    pub exclusions: Vec<Exclusion>,
}

impl Dependency {
    /// A dependency on `group:artifact:version` with everything else unset.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: Some(version.into()),
            ..Self::default()
        }
    }

    /// Build an explicit entry from a resolved coordinate.
    ///
    /// Copies group, artifact, version, classifier, scope and type.
    pub fn from_artifact(artifact: &ArtifactCoordinate) -> Self {
        Self {
            group_id: artifact.group_id.clone(),
            artifact_id: artifact.artifact_id.clone(),
            version: Some(artifact.version.clone()),
            classifier: artifact.classifier().map(str::to_string),
            dependency_type: Some(artifact.artifact_type.clone()),
            scope: artifact.scope.clone(),
            ..Self::default()
        }
    }

    /// Whether this entry names the same (group, artifact) pair.
    pub fn is_same_artifact(&self, group_id: &str, artifact_id: &str) -> bool {
        self.group_id == group_id && self.artifact_id == artifact_id
    }
}

impl std::fmt::Display for Dependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)?;
        if let Some(version) = &self.version {
            write!(f, ":{version}")?;
        }
        Ok(())
    }
}

/// The `<dependencyManagement>` block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DependencyManagement {
    pub dependencies: Vec<Dependency>,
}

/// Absolute build paths of the effective model, plus the rest of `<build>` verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPaths {
    /// Build output directory (`target` by default)
    pub directory: PathBuf,
    pub output_directory: PathBuf,
    pub test_output_directory: PathBuf,
    pub source_directory: PathBuf,
    pub test_source_directory: PathBuf,
    /// Other `<build>` children, as XML fragments
    pub extra: Vec<String>,
}

impl BuildPaths {
    /// Maven's default layout under `project_directory`.
    pub fn defaults(project_directory: &std::path::Path) -> Self {
        let directory = project_directory.join("target");
        Self {
            output_directory: directory.join("classes"),
            test_output_directory: directory.join("test-classes"),
            source_directory: project_directory.join("src").join("main").join("java"),
            test_source_directory: project_directory.join("src").join("test").join("java"),
            directory,
            extra: Vec::new(),
        }
    }
}

/// Position of a top-level `<project>` child in the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementSlot {
    /// An element the engine does not model, kept as written (after interpolation)
    Raw {
        name: String,
        xml: String,
    },
    /// Where `<dependencies>` appeared
    Dependencies,
    /// Where `<dependencyManagement>` appeared
    DependencyManagement,
    /// Where `<build>` appeared
    Build,
}

/// The effective project model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    pub model_version: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub packaging: String,
    pub parent: Option<ParentReference>,
    pub dependencies: Vec<Dependency>,
    pub dependency_management: Option<DependencyManagement>,
    pub build: BuildPaths,
    /// Absolute project root (`${project.basedir}`)
    pub project_directory: PathBuf,
    /// Opening `<project ...>` tag, namespaces included
    pub root_tag: String,
    /// Top-level children in source order
    pub layout: Vec<ElementSlot>,
}

impl ProjectDescriptor {
    /// A minimal `jar` descriptor rooted at the current directory.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        let project_directory = PathBuf::from(".");
        Self {
            model_version: "4.0.0".to_string(),
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            packaging: DEFAULT_PACKAGING.to_string(),
            parent: None,
            dependencies: Vec::new(),
            dependency_management: None,
            build: BuildPaths::defaults(&project_directory),
            project_directory,
            root_tag: "<project>".to_string(),
            layout: Vec::new(),
        }
    }

    /// Whether the descriptor declares a parent.
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    /// File name of the main artifact, `artifactId-version.packaging`.
    pub fn main_artifact_file_name(&self) -> String {
        format!("{}-{}.{}", self.artifact_id, self.version, self.packaging)
    }
}
