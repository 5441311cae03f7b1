//! Artifact coordinates and their canonical names.
//!
//! An [`ArtifactCoordinate`] is one resolved artifact as reported by the
//! dependency resolver. Its canonical name is the string used as the
//! deduplication key when a dependency graph is flattened, so it has to be
//! stable for identical input across runs:
//!
//! - if the resolver materialized the artifact on disk, the file name wins
//! - otherwise `artifactId-version[-classifier][-SNAPSHOT]` is synthesized
//!
//! ```rust
//! use pomflat_cli::coordinate::ArtifactCoordinate;
//!
//! let coord = ArtifactCoordinate::new("org.x", "core", "1.0-SNAPSHOT");
//! assert_eq!(coord.canonical_name(), "core-1.0-SNAPSHOT");
//! assert_eq!(coord.canonical_file_name(), "core-1.0-SNAPSHOT.jar");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::constants::{DEFAULT_PACKAGING, SNAPSHOT_SUFFIX};

fn default_type() -> String {
    DEFAULT_PACKAGING.to_string()
}

/// One resolved artifact: the (group, artifact, version, classifier, type, scope) tuple
/// plus the file the resolver downloaded for it, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactCoordinate {
    /// Group identifier, e.g. `org.apache.commons`
    pub group_id: String,
    /// Artifact identifier, e.g. `commons-lang3`
    pub artifact_id: String,
    /// Resolved version
    pub version: String,
    /// Optional classifier such as `tests` or `sources`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    /// Artifact type / packaging
    #[serde(rename = "type", default = "default_type")]
    pub artifact_type: String,
    /// Dependency scope (`compile`, `runtime`, `test`, `provided`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// The resolved file on disk, when the artifact was materialized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Explicit snapshot flag from the resolver; derived from the version when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<bool>,
}

impl ArtifactCoordinate {
    /// Create a `jar` coordinate with no classifier, scope or file.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            classifier: None,
            artifact_type: default_type(),
            scope: None,
            file: None,
            snapshot: None,
        }
    }

    /// Set the classifier.
    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    /// Set the artifact type.
    #[must_use]
    pub fn with_type(mut self, artifact_type: impl Into<String>) -> Self {
        self.artifact_type = artifact_type.into();
        self
    }

    /// Set the scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Set the resolved file.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Classifier, treating an empty string as absent.
    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref().filter(|c| !c.is_empty())
    }

    /// Whether this coordinate refers to a snapshot build.
    ///
    /// An explicit resolver flag wins; otherwise the version decides, either
    /// ending in `SNAPSHOT` or carrying a deployed-snapshot timestamp
    /// (`1.0-20240102.030405-7`).
    pub fn is_snapshot(&self) -> bool {
        self.snapshot
            .unwrap_or_else(|| self.version.ends_with(SNAPSHOT_SUFFIX) || is_timestamped(&self.version))
    }

    /// The deduplication key for this coordinate.
    ///
    /// The resolved file name when present, else
    /// `artifactId-version[-classifier][-SNAPSHOT]`. The snapshot suffix is
    /// never doubled.
    pub fn canonical_name(&self) -> String {
        match self.resolved_file_name() {
            Some(name) => name,
            None => self.synthesized_name(),
        }
    }

    /// Like [`canonical_name`](Self::canonical_name) but always a file name:
    /// synthesized names get `.` + type appended.
    pub fn canonical_file_name(&self) -> String {
        match self.resolved_file_name() {
            Some(name) => name,
            None => format!("{}.{}", self.synthesized_name(), self.artifact_type),
        }
    }

    fn resolved_file_name(&self) -> Option<String> {
        self.file
            .as_ref()
            .and_then(|file| file.file_name())
            .map(|name| name.to_string_lossy().into_owned())
    }

    fn synthesized_name(&self) -> String {
        let mut name = format!("{}-{}", self.artifact_id, self.version);

        if let Some(classifier) = self.classifier() {
            name.push('-');
            name.push_str(classifier);
        }

        if self.is_snapshot() && !name.ends_with(SNAPSHOT_SUFFIX) {
            name.push('-');
            name.push_str(SNAPSHOT_SUFFIX);
        }

        name
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.artifact_type)?;
        if let Some(classifier) = self.classifier() {
            write!(f, ":{classifier}")?;
        }
        write!(f, ":{}", self.version)?;
        if let Some(scope) = &self.scope {
            write!(f, ":{scope}")?;
        }
        Ok(())
    }
}

/// Matches the `-yyyyMMdd.HHmmss-N` tail of a deployed snapshot version.
fn is_timestamped(version: &str) -> bool {
    let mut parts = version.rsplitn(3, '-');
    let (Some(build), Some(timestamp), Some(base)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    !base.is_empty()
        && !build.is_empty()
        && build.bytes().all(|b| b.is_ascii_digit())
        && timestamp.len() == 15
        && timestamp
            .bytes()
            .enumerate()
            .all(|(i, b)| if i == 8 { b == b'.' } else { b.is_ascii_digit() })
}
