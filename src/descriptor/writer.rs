//! Serializing a [`ProjectDescriptor`] back to `pom.xml` text.
//!
//! The head of the document (`modelVersion`, `parent`, coordinates,
//! `packaging`) is always written first, in Maven order. The remaining
//! top-level elements follow the source layout: preserved elements are
//! copied verbatim, and the dependency, dependency-management and build slots
//! are rendered from the model. Modelled sections the source never had are
//! appended at the end. Indentation is two spaces.

use super::{BuildPaths, Dependency, ElementSlot, ProjectDescriptor};
use crate::core::PomflatError;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Serialize the model.
///
/// Fails with [`PomflatError::SerializationFailed`] when the model is missing
/// required identifiers, e.g. a dependency with an empty artifact id.
pub fn write_descriptor(project: &ProjectDescriptor) -> Result<String, PomflatError> {
    validate(project)?;

    let mut xml = XmlWriter::default();
    xml.line(0, XML_DECLARATION);
    xml.line(0, &project.root_tag);

    xml.element(1, "modelVersion", &project.model_version);
    if let Some(parent) = &project.parent {
        xml.open(1, "parent");
        xml.element(2, "groupId", &parent.group_id);
        xml.element(2, "artifactId", &parent.artifact_id);
        xml.element(2, "version", &parent.version);
        if let Some(relative_path) = &parent.relative_path {
            xml.element(2, "relativePath", relative_path);
        }
        xml.close(1, "parent");
    }
    xml.element(1, "groupId", &project.group_id);
    xml.element(1, "artifactId", &project.artifact_id);
    xml.element(1, "version", &project.version);
    xml.element(1, "packaging", &project.packaging);

    let mut wrote_dependencies = false;
    let mut wrote_management = false;
    let mut wrote_build = false;

    for slot in &project.layout {
        match slot {
            ElementSlot::Raw {
                xml: raw,
                ..
            } => xml.line(1, raw),
            ElementSlot::DependencyManagement => {
                write_management(&mut xml, project);
                wrote_management = true;
            }
            ElementSlot::Dependencies => {
                write_dependencies(&mut xml, 1, &project.dependencies);
                wrote_dependencies = true;
            }
            ElementSlot::Build => {
                write_build(&mut xml, &project.build);
                wrote_build = true;
            }
        }
    }

    if !wrote_management {
        write_management(&mut xml, project);
    }
    if !wrote_dependencies {
        write_dependencies(&mut xml, 1, &project.dependencies);
    }
    if !wrote_build {
        write_build(&mut xml, &project.build);
    }

    xml.line(0, "</project>");
    Ok(xml.finish())
}

fn validate(project: &ProjectDescriptor) -> Result<(), PomflatError> {
    let missing = |what: &str| PomflatError::SerializationFailed {
        reason: format!("{what} is empty"),
    };

    if project.group_id.is_empty() {
        return Err(missing("project groupId"));
    }
    if project.artifact_id.is_empty() {
        return Err(missing("project artifactId"));
    }
    if project.version.is_empty() {
        return Err(missing("project version"));
    }

    let managed = project.dependency_management.iter().flat_map(|m| m.dependencies.iter());
    for dep in project.dependencies.iter().chain(managed) {
        if dep.group_id.is_empty() || dep.artifact_id.is_empty() {
            return Err(PomflatError::SerializationFailed {
                reason: format!("dependency '{dep}' has an empty groupId or artifactId"),
            });
        }
    }

    Ok(())
}

fn write_management(xml: &mut XmlWriter, project: &ProjectDescriptor) {
    if let Some(management) = &project.dependency_management {
        xml.open(1, "dependencyManagement");
        write_dependencies(xml, 2, &management.dependencies);
        xml.close(1, "dependencyManagement");
    }
}

fn write_dependencies(xml: &mut XmlWriter, depth: usize, dependencies: &[Dependency]) {
    if dependencies.is_empty() {
        return;
    }

    xml.open(depth, "dependencies");
    for dep in dependencies {
        let inner = depth + 2;
        xml.open(depth + 1, "dependency");
        xml.element(inner, "groupId", &dep.group_id);
        xml.element(inner, "artifactId", &dep.artifact_id);
        xml.optional(inner, "version", dep.version.as_deref());
        xml.optional(inner, "type", dep.dependency_type.as_deref());
        xml.optional(inner, "classifier", dep.classifier.as_deref());
        xml.optional(inner, "scope", dep.scope.as_deref());
        xml.optional(inner, "systemPath", dep.system_path.as_deref());
        if !dep.exclusions.is_empty() {
            xml.open(inner, "exclusions");
            for exclusion in &dep.exclusions {
                xml.open(inner + 1, "exclusion");
                xml.element(inner + 2, "groupId", &exclusion.group_id);
                xml.element(inner + 2, "artifactId", &exclusion.artifact_id);
                xml.close(inner + 1, "exclusion");
            }
            xml.close(inner, "exclusions");
        }
        if let Some(optional) = dep.optional {
            xml.element(inner, "optional", if optional { "true" } else { "false" });
        }
        xml.close(depth + 1, "dependency");
    }
    xml.close(depth, "dependencies");
}

fn write_build(xml: &mut XmlWriter, build: &BuildPaths) {
    xml.open(1, "build");
    xml.element(2, "sourceDirectory", &build.source_directory.display().to_string());
    xml.element(2, "testSourceDirectory", &build.test_source_directory.display().to_string());
    xml.element(2, "outputDirectory", &build.output_directory.display().to_string());
    xml.element(2, "testOutputDirectory", &build.test_output_directory.display().to_string());
    xml.element(2, "directory", &build.directory.display().to_string());
    for extra in &build.extra {
        xml.line(2, extra);
    }
    xml.close(1, "build");
}

#[derive(Default)]
struct XmlWriter {
    out: String,
}

impl XmlWriter {
    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn open(&mut self, depth: usize, name: &str) {
        self.line(depth, &format!("<{name}>"));
    }

    fn close(&mut self, depth: usize, name: &str) {
        self.line(depth, &format!("</{name}>"));
    }

    fn element(&mut self, depth: usize, name: &str, value: &str) {
        self.line(depth, &format!("<{name}>{}</{name}>", escape_text(value)));
    }

    fn optional(&mut self, depth: usize, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.element(depth, name, value);
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Escape `&`, `<` and `>` for use in element text.
pub(crate) fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}
