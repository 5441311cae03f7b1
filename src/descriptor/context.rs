//! Host knowledge about a project that is not written in its own descriptor.

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::{ParentReference, ProjectDescriptor, parse_descriptor};
use crate::constants::DESCRIPTOR_FILE_NAME;

/// What the build knows about the project beyond its descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectContext {
    /// The parent actually found for this build, which may be newer than the
    /// version the descriptor's `<parent>` element declares
    pub live_parent: Option<ParentReference>,
}

impl ProjectContext {
    /// A context with a known live parent.
    pub fn with_live_parent(parent: ParentReference) -> Self {
        Self {
            live_parent: Some(parent),
        }
    }

    /// Locate the live parent on disk.
    ///
    /// Follows `<relativePath>` (default `../pom.xml`; a directory means its
    /// `pom.xml`). The parent counts as live only when the descriptor found
    /// there has the referenced group and artifact. Anything unreadable or
    /// unrelated yields an empty context, never an error.
    pub async fn discover(project: &ProjectDescriptor) -> Result<Self> {
        let Some(parent) = &project.parent else {
            return Ok(Self::default());
        };

        let Some(path) = parent_descriptor_path(&project.project_directory, parent).await else {
            return Ok(Self::default());
        };

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("No parent descriptor at {}: {}", path.display(), e);
                return Ok(Self::default());
            }
        };

        let parent_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let found = match parse_descriptor(&content, &parent_dir) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!("Ignoring unreadable parent descriptor {}: {}", path.display(), e);
                return Ok(Self::default());
            }
        };

        if found.group_id != parent.group_id || found.artifact_id != parent.artifact_id {
            tracing::debug!(
                "Descriptor at {} is {}:{}, not the referenced parent {}",
                path.display(),
                found.group_id,
                found.artifact_id,
                parent
            );
            return Ok(Self::default());
        }

        Ok(Self::with_live_parent(ParentReference {
            group_id: found.group_id,
            artifact_id: found.artifact_id,
            version: found.version,
            relative_path: parent.relative_path.clone(),
        }))
    }
}

async fn parent_descriptor_path(
    project_directory: &Path,
    parent: &ParentReference,
) -> Option<PathBuf> {
    let relative = match parent.relative_path.as_deref() {
        // An explicitly empty <relativePath/> disables the lookup.
        Some("") => return None,
        Some(relative) => relative,
        None => "../pom.xml",
    };

    let path = project_directory.join(relative);
    let is_dir = tokio::fs::metadata(&path).await.is_ok_and(|meta| meta.is_dir());
    if is_dir {
        Some(path.join(DESCRIPTOR_FILE_NAME))
    } else {
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PARENT: &str = "<project><groupId>org.x</groupId><artifactId>parent</artifactId>\
                          <version>2.5</version><packaging>pom</packaging></project>";

    fn child_pom(relative_path: &str) -> String {
        format!(
            "<project><parent><groupId>org.x</groupId><artifactId>parent</artifactId>\
             <version>2.0</version>{relative_path}</parent><artifactId>child</artifactId></project>"
        )
    }

    async fn context_for(temp: &TempDir, child: &str) -> ProjectContext {
        let child_dir = temp.path().join("child");
        std::fs::create_dir_all(&child_dir).unwrap();
        let project = parse_descriptor(child, &child_dir).unwrap();
        ProjectContext::discover(&project).await.unwrap()
    }

    #[tokio::test]
    async fn test_discovers_live_parent_version() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("pom.xml"), PARENT).unwrap();

        let context = context_for(&temp, &child_pom("")).await;
        assert_eq!(context.live_parent.unwrap().version, "2.5");
    }

    #[tokio::test]
    async fn test_relative_path_directory() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("parents")).unwrap();
        std::fs::write(temp.path().join("parents").join("pom.xml"), PARENT).unwrap();

        let context =
            context_for(&temp, &child_pom("<relativePath>../parents</relativePath>")).await;
        assert_eq!(context.live_parent.unwrap().version, "2.5");
    }

    #[tokio::test]
    async fn test_relative_path_to_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("parent.xml"), PARENT).unwrap();

        let context =
            context_for(&temp, &child_pom("<relativePath>../parent.xml</relativePath>")).await;
        assert_eq!(context.live_parent.unwrap().version, "2.5");
    }

    #[tokio::test]
    async fn test_missing_relative_path_target_is_ignored() {
        let temp = TempDir::new().unwrap();

        let context =
            context_for(&temp, &child_pom("<relativePath>../nowhere</relativePath>")).await;
        assert!(context.live_parent.is_none());
    }

    #[tokio::test]
    async fn test_unrelated_parent_is_ignored() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("pom.xml"),
            "<project><groupId>org.other</groupId><artifactId>x</artifactId><version>1</version></project>",
        )
        .unwrap();

        let context = context_for(&temp, &child_pom("")).await;
        assert!(context.live_parent.is_none());
    }

    #[tokio::test]
    async fn test_empty_relative_path_disables_lookup() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("pom.xml"), PARENT).unwrap();

        let context = context_for(&temp, &child_pom("<relativePath/>")).await;
        assert!(context.live_parent.is_none());
    }

    #[tokio::test]
    async fn test_no_parent_means_empty_context() {
        let project = ProjectDescriptor::new("org.x", "root", "1");
        assert_eq!(ProjectContext::discover(&project).await.unwrap(), ProjectContext::default());
    }
}
