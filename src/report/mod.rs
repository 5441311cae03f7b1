//! The delimited dependency report written by `list-dependencies`.
//!
//! Layout:
//!
//! ```text
//! # Main Jar:
//! #  GroupId | ArtifactId | Version | Name
//! org.x|app|1.0|app-1.0.jar
//!
//!
//! # Dependencies:
//! #  GroupId | ArtifactId | Version | Classifier | Type | Scope | Name
//! org.y|lib|2.0||jar|compile|lib-2.0.jar
//! ```
//!
//! Without a dependency set (the graph could not be built) the report stops
//! after the main artifact line.

use crate::descriptor::ProjectDescriptor;
use crate::graph::FlattenedArtifacts;

const MAIN_HEADER: &str = "# Main Jar: \n#  GroupId | ArtifactId | Version | Name\n";
const DEPENDENCIES_HEADER: &str =
    "\n\n# Dependencies: \n#  GroupId | ArtifactId | Version | Classifier | Type | Scope | Name\n";

/// Render the report for `project`.
///
/// Dependency lines follow the iteration order of `artifacts`, which is
/// sorted by canonical name.
pub fn format_report(
    project: &ProjectDescriptor,
    artifacts: Option<&FlattenedArtifacts>,
    separator: &str,
) -> String {
    let mut report = String::from(MAIN_HEADER);
    report.push_str(&join_fields(
        &[
            project.group_id.as_str(),
            project.artifact_id.as_str(),
            project.version.as_str(),
            project.main_artifact_file_name().as_str(),
        ],
        separator,
    ));
    report.push('\n');

    let Some(artifacts) = artifacts else {
        return report;
    };

    report.push_str(DEPENDENCIES_HEADER);
    for artifact in artifacts {
        let line = join_fields(
            &[
                artifact.group_id.as_str(),
                artifact.artifact_id.as_str(),
                artifact.version.as_str(),
                artifact.classifier().unwrap_or(""),
                artifact.artifact_type.as_str(),
                artifact.scope.as_deref().unwrap_or(""),
                artifact.canonical_file_name().as_str(),
            ],
            separator,
        );
        tracing::debug!("{line}");
        report.push_str(&line);
        report.push('\n');
    }

    report
}

fn join_fields(fields: &[&str], separator: &str) -> String {
    fields.join(separator)
}
