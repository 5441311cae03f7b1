//! Merging a flattened dependency graph into a project descriptor.
//!
//! [`merge`] turns a descriptor that relies on its parent chain and on
//! transitive resolution into one that states everything explicitly. Given
//! the descriptor, the host [`ProjectContext`], the [`FlattenedArtifacts`] and
//! the [`CoordinateOverrides`], it:
//!
//! 1. replaces groupId / artifactId / version where the override differs
//! 2. sets `<parent><version>` to the live parent version
//! 3. appends every flattened artifact whose (group, artifact) is not yet an
//!    explicit dependency, then gives versionless entries their resolved
//!    version
//! 4. rewrites explicit entries whose group and version equal the original
//!    project group and version to the override group and version
//! 5. drops `<dependencyManagement>` when a parent exists, and otherwise
//!    applies the step 4 rewrite to the managed entries
//!
//! Artifacts sharing the graph root's group and version are the release
//! family as resolved. They also match under the override group, which keeps
//! a second run over renamed output from re-adding them.
//!
//! The input descriptor is never touched: the result is a new model plus the
//! list of [`MergeChange`]s that produced it.

use std::fmt;

use crate::coordinate::ArtifactCoordinate;
use crate::descriptor::{Dependency, ProjectContext, ProjectDescriptor};
use crate::graph::FlattenedArtifacts;

/// Identifiers the output descriptor should declare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateOverrides {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl CoordinateOverrides {
    /// Explicit overrides.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    /// Overrides equal to the descriptor's current identifiers, i.e. no rename.
    pub fn from_descriptor(descriptor: &ProjectDescriptor) -> Self {
        Self::new(&descriptor.group_id, &descriptor.artifact_id, &descriptor.version)
    }
}

/// One modification made while merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeChange {
    GroupId {
        from: String,
        to: String,
    },
    ArtifactId {
        from: String,
        to: String,
    },
    Version {
        from: String,
        to: String,
    },
    ParentVersion {
        from: String,
        to: String,
    },
    /// A resolved artifact promoted to an explicit dependency
    DependencyAdded {
        dependency: String,
    },
    /// A versionless dependency given the version it resolved to
    VersionResolved {
        dependency: String,
    },
    /// A release-family dependency moved to the new group and version
    DependencyRemapped {
        dependency: String,
        managed: bool,
    },
    DependencyManagementDropped {
        entries: usize,
    },
}

impl fmt::Display for MergeChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GroupId {
                from,
                to,
            } => write!(f, "groupId: {from} -> {to}"),
            Self::ArtifactId {
                from,
                to,
            } => write!(f, "artifactId: {from} -> {to}"),
            Self::Version {
                from,
                to,
            } => write!(f, "version: {from} -> {to}"),
            Self::ParentVersion {
                from,
                to,
            } => write!(f, "parent version: {from} -> {to}"),
            Self::DependencyAdded {
                dependency,
            } => write!(f, "added dependency {dependency}"),
            Self::VersionResolved {
                dependency,
            } => write!(f, "resolved version of {dependency}"),
            Self::DependencyRemapped {
                dependency,
                managed: false,
            } => write!(f, "remapped dependency {dependency}"),
            Self::DependencyRemapped {
                dependency,
                managed: true,
            } => write!(f, "remapped managed dependency {dependency}"),
            Self::DependencyManagementDropped {
                entries,
            } => write!(f, "dropped dependencyManagement ({entries} entries)"),
        }
    }
}

/// The merged descriptor and how it was obtained.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub descriptor: ProjectDescriptor,
    pub changes: Vec<MergeChange>,
}

impl MergeOutcome {
    /// Whether the merge left the descriptor as it was.
    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Merge `artifacts` into a copy of `descriptor`.
pub fn merge(
    descriptor: &ProjectDescriptor,
    context: &ProjectContext,
    artifacts: &FlattenedArtifacts,
    overrides: &CoordinateOverrides,
) -> MergeOutcome {
    let mut merger = Merger {
        model: descriptor.clone(),
        original_group_id: descriptor.group_id.clone(),
        original_artifact_id: descriptor.artifact_id.clone(),
        original_version: descriptor.version.clone(),
        resolved_family: artifacts
            .root()
            .map(|root| (root.group_id.clone(), root.version.clone())),
        overrides,
        changes: Vec::new(),
    };

    merger.apply_overrides();
    merger.sync_parent_version(context);
    merger.add_missing_dependencies(artifacts);
    merger.fill_missing_versions(artifacts);
    merger.remap_release_family();
    merger.reconcile_dependency_management();

    for change in &merger.changes {
        tracing::debug!("{change}");
    }
    tracing::info!(
        "Merged {} artifacts into {}:{} ({} changes)",
        artifacts.len(),
        merger.model.group_id,
        merger.model.artifact_id,
        merger.changes.len()
    );

    MergeOutcome {
        descriptor: merger.model,
        changes: merger.changes,
    }
}

struct Merger<'a> {
    model: ProjectDescriptor,
    original_group_id: String,
    original_artifact_id: String,
    original_version: String,
    /// (group, version) of the graph root
    resolved_family: Option<(String, String)>,
    overrides: &'a CoordinateOverrides,
    changes: Vec<MergeChange>,
}

impl Merger<'_> {
    fn apply_overrides(&mut self) {
        if self.overrides.group_id != self.model.group_id {
            self.changes.push(MergeChange::GroupId {
                from: std::mem::replace(&mut self.model.group_id, self.overrides.group_id.clone()),
                to: self.overrides.group_id.clone(),
            });
        }

        if self.overrides.artifact_id != self.model.artifact_id {
            self.changes.push(MergeChange::ArtifactId {
                from: std::mem::replace(
                    &mut self.model.artifact_id,
                    self.overrides.artifact_id.clone(),
                ),
                to: self.overrides.artifact_id.clone(),
            });
        }

        if self.overrides.version != self.model.version {
            self.changes.push(MergeChange::Version {
                from: std::mem::replace(&mut self.model.version, self.overrides.version.clone()),
                to: self.overrides.version.clone(),
            });
        }
    }

    fn sync_parent_version(&mut self, context: &ProjectContext) {
        let (Some(parent), Some(live)) = (self.model.parent.as_mut(), context.live_parent.as_ref())
        else {
            return;
        };

        if parent.version != live.version {
            self.changes.push(MergeChange::ParentVersion {
                from: std::mem::replace(&mut parent.version, live.version.clone()),
                to: live.version.clone(),
            });
        }
    }

    fn add_missing_dependencies(&mut self, artifacts: &FlattenedArtifacts) {
        let root = artifacts.root();

        for artifact in artifacts {
            if root == Some(artifact) || self.is_project_itself(&artifact.group_id, &artifact.artifact_id) {
                continue;
            }

            let present = self.model.dependencies.iter().any(|dep| self.matches(dep, artifact));
            if present {
                continue;
            }

            let dependency = Dependency::from_artifact(artifact);
            self.changes.push(MergeChange::DependencyAdded {
                dependency: dependency.to_string(),
            });
            self.model.dependencies.push(dependency);
        }
    }

    fn fill_missing_versions(&mut self, artifacts: &FlattenedArtifacts) {
        let mut dependencies = std::mem::take(&mut self.model.dependencies);

        for dep in dependencies.iter_mut().filter(|dep| dep.version.is_none()) {
            let Some(version) = self.resolved_version(dep, artifacts) else {
                tracing::warn!("No resolved version for {dep}, leaving it versionless");
                continue;
            };

            dep.version = Some(version);
            self.changes.push(MergeChange::VersionResolved {
                dependency: dep.to_string(),
            });
        }

        self.model.dependencies = dependencies;
    }

    /// Version `dep` resolved to, preferring an artifact with the same classifier.
    fn resolved_version(&self, dep: &Dependency, artifacts: &FlattenedArtifacts) -> Option<String> {
        let mut candidates = artifacts.iter().filter(|artifact| self.matches(dep, artifact));
        let first = candidates.next()?;
        let chosen = std::iter::once(first)
            .chain(candidates)
            .find(|artifact| artifact.classifier() == dep.classifier.as_deref())
            .unwrap_or(first);

        match self.release_alias(chosen) {
            Some((group, version)) if dep.group_id == group => Some(version.to_string()),
            _ => Some(chosen.version.clone()),
        }
    }

    /// Whether `dep` names `artifact`, directly or through its release alias.
    fn matches(&self, dep: &Dependency, artifact: &ArtifactCoordinate) -> bool {
        dep.is_same_artifact(&artifact.group_id, &artifact.artifact_id)
            || self
                .release_alias(artifact)
                .is_some_and(|(group, _)| dep.is_same_artifact(group, &artifact.artifact_id))
    }

    /// Override (group, version) for an artifact of the resolved release family.
    fn release_alias(&self, artifact: &ArtifactCoordinate) -> Option<(&str, &str)> {
        let (group, version) = self.resolved_family.as_ref()?;
        (artifact.group_id == *group && artifact.version == *version)
            .then_some((self.overrides.group_id.as_str(), self.overrides.version.as_str()))
    }

    fn is_project_itself(&self, group_id: &str, artifact_id: &str) -> bool {
        (group_id == self.original_group_id && artifact_id == self.original_artifact_id)
            || (group_id == self.model.group_id && artifact_id == self.model.artifact_id)
    }

    fn remap_release_family(&mut self) {
        let mut dependencies = std::mem::take(&mut self.model.dependencies);
        self.remap(&mut dependencies, false);
        self.model.dependencies = dependencies;
    }

    fn reconcile_dependency_management(&mut self) {
        if self.model.has_parent() {
            if let Some(management) = self.model.dependency_management.take() {
                self.changes.push(MergeChange::DependencyManagementDropped {
                    entries: management.dependencies.len(),
                });
            }
            return;
        }

        if let Some(mut management) = self.model.dependency_management.take() {
            self.remap(&mut management.dependencies, true);
            self.model.dependency_management = Some(management);
        }
    }

    fn remap(&mut self, dependencies: &mut [Dependency], managed: bool) {
        let unchanged = self.original_group_id == self.overrides.group_id
            && self.original_version == self.overrides.version;
        if unchanged {
            return;
        }

        for dep in dependencies.iter_mut() {
            let in_family = dep.group_id == self.original_group_id
                && dep.version.as_deref() == Some(self.original_version.as_str());
            if !in_family {
                continue;
            }

            dep.group_id.clone_from(&self.overrides.group_id);
            dep.version = Some(self.overrides.version.clone());
            self.changes.push(MergeChange::DependencyRemapped {
                dependency: dep.to_string(),
                managed,
            });
        }
    }
}
