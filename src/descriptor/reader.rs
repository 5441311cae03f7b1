//! Parsing `pom.xml` into an effective [`ProjectDescriptor`].
//!
//! This stands in for the host build tool's model builder, covering what the
//! flattening engine depends on:
//!
//! - `groupId` / `version` inherited from `<parent>` when omitted
//! - `${...}` interpolation from `<properties>`, `project.*`, `project.parent.*`
//!   and `basedir`, applied to coordinates, build paths and preserved elements
//! - build paths resolved to absolute paths with Maven's defaults
//! - dependency versions and scopes filled in from `<dependencyManagement>`
//!
//! Unknown expressions are left untouched. The document is parsed with
//! `roxmltree`; source byte ranges let unmodelled elements be carried through
//! verbatim.

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use roxmltree::{Document, Node};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::writer::escape_text;
use super::{
    BuildPaths, Dependency, DependencyManagement, ElementSlot, Exclusion, ParentReference,
    ProjectDescriptor,
};
use crate::constants::DEFAULT_PACKAGING;
use crate::core::PomflatError;

/// Interpolation stops after this many passes so self-referencing properties terminate.
const MAX_INTERPOLATION_PASSES: usize = 10;

/// Read and parse the descriptor at `path`.
///
/// The project directory is the descriptor's parent directory made absolute,
/// so every build path in the returned model is absolute.
pub async fn load_descriptor(path: &Path) -> Result<ProjectDescriptor> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(PomflatError::DescriptorNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read descriptor: {}", path.display()))?;

    let absolute = std::path::absolute(path)
        .with_context(|| format!("Failed to resolve descriptor path: {}", path.display()))?;
    let project_directory = absolute.parent().map(Path::to_path_buf).unwrap_or_default();

    let descriptor = parse_descriptor(&content, &project_directory).map_err(|e| match e {
        PomflatError::DescriptorParseError {
            reason,
            ..
        } => PomflatError::DescriptorParseError {
            file: path.display().to_string(),
            reason,
        },
        other => other,
    })?;

    tracing::debug!(
        "Loaded descriptor {}:{}:{} from {}",
        descriptor.group_id,
        descriptor.artifact_id,
        descriptor.version,
        path.display()
    );

    Ok(descriptor)
}

/// Parse descriptor text into an effective model rooted at `project_directory`.
pub fn parse_descriptor(
    source: &str,
    project_directory: &Path,
) -> Result<ProjectDescriptor, PomflatError> {
    let doc = Document::parse(source).map_err(|e| parse_error(e.to_string()))?;
    let root = doc.root_element();

    if root.tag_name().name() != "project" {
        return Err(parse_error(format!(
            "expected <project> root element, found <{}>",
            root.tag_name().name()
        )));
    }

    let mut interpolator = Interpolator::new();
    interpolator.insert("basedir", project_directory.display().to_string());
    interpolator.insert("project.basedir", project_directory.display().to_string());

    if let Some(properties) = child(root, "properties") {
        for property in properties.children().filter(Node::is_element) {
            interpolator.insert(
                property.tag_name().name(),
                property.text().unwrap_or_default().trim().to_string(),
            );
        }
    }

    let parent = child(root, "parent").map(|node| parse_parent(node, &interpolator)).transpose()?;
    if let Some(parent) = &parent {
        interpolator.insert("project.parent.groupId", parent.group_id.clone());
        interpolator.insert("project.parent.artifactId", parent.artifact_id.clone());
        interpolator.insert("project.parent.version", parent.version.clone());
    }

    let group_id = child_text(root, "groupId")
        .map(|g| interpolator.interpolate(&g))
        .or_else(|| parent.as_ref().map(|p| p.group_id.clone()))
        .ok_or_else(|| parse_error("missing <groupId> and no <parent> to inherit it from"))?;
    let artifact_id = child_text(root, "artifactId")
        .map(|a| interpolator.interpolate(&a))
        .ok_or_else(|| parse_error("missing <artifactId>"))?;
    let version = child_text(root, "version")
        .map(|v| interpolator.interpolate(&v))
        .or_else(|| parent.as_ref().map(|p| p.version.clone()))
        .ok_or_else(|| parse_error("missing <version> and no <parent> to inherit it from"))?;
    let packaging = child_text(root, "packaging")
        .map(|p| interpolator.interpolate(&p))
        .unwrap_or_else(|| DEFAULT_PACKAGING.to_string());

    interpolator.insert("project.groupId", group_id.clone());
    interpolator.insert("project.artifactId", artifact_id.clone());
    interpolator.insert("project.version", version.clone());
    interpolator.insert("project.packaging", packaging.clone());

    let build = parse_build(child(root, "build"), source, project_directory, &mut interpolator);

    let dependency_management = child(root, "dependencyManagement").map(|node| DependencyManagement {
        dependencies: child(node, "dependencies")
            .map(|deps| parse_dependencies(deps, &interpolator))
            .unwrap_or_default(),
    });

    let mut dependencies = child(root, "dependencies")
        .map(|deps| parse_dependencies(deps, &interpolator))
        .unwrap_or_default();
    if let Some(management) = &dependency_management {
        apply_management(&mut dependencies, management);
    }

    let layout = root
        .children()
        .filter(Node::is_element)
        .filter_map(|node| match node.tag_name().name() {
            "modelVersion" | "parent" | "groupId" | "artifactId" | "version" | "packaging" => None,
            "dependencies" => Some(ElementSlot::Dependencies),
            "dependencyManagement" => Some(ElementSlot::DependencyManagement),
            "build" => Some(ElementSlot::Build),
            name => Some(ElementSlot::Raw {
                name: name.to_string(),
                xml: interpolator.interpolate_xml(&source[node.range()]),
            }),
        })
        .collect();

    Ok(ProjectDescriptor {
        model_version: child_text(root, "modelVersion").unwrap_or_else(|| "4.0.0".to_string()),
        group_id,
        artifact_id,
        version,
        packaging,
        parent,
        dependencies,
        dependency_management,
        build,
        project_directory: project_directory.to_path_buf(),
        root_tag: start_tag(source, root.range().start),
        layout,
    })
}

fn parse_error(reason: impl Into<String>) -> PomflatError {
    PomflatError::DescriptorParseError {
        file: "<memory>".to_string(),
        reason: reason.into(),
    }
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.is_element() && c.has_tag_name(name))
}

fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    child(node, name)
        .and_then(|c| c.text())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

fn parse_parent(node: Node<'_, '_>, interpolator: &Interpolator) -> Result<ParentReference, PomflatError> {
    let field = |name: &str| {
        child_text(node, name)
            .map(|value| interpolator.interpolate(&value))
            .ok_or_else(|| parse_error(format!("<parent> is missing <{name}>")))
    };

    Ok(ParentReference {
        group_id: field("groupId")?,
        artifact_id: field("artifactId")?,
        version: field("version")?,
        relative_path: child(node, "relativePath")
            .map(|c| c.text().unwrap_or_default().trim().to_string()),
    })
}

fn parse_dependencies(node: Node<'_, '_>, interpolator: &Interpolator) -> Vec<Dependency> {
    node.children()
        .filter(|c| c.is_element() && c.has_tag_name("dependency"))
        .map(|dep| {
            let field = |name: &str| child_text(dep, name).map(|v| interpolator.interpolate(&v));

            Dependency {
                group_id: field("groupId").unwrap_or_default(),
                artifact_id: field("artifactId").unwrap_or_default(),
                version: field("version"),
                classifier: field("classifier"),
                dependency_type: field("type"),
                scope: field("scope"),
                optional: field("optional").map(|o| o.eq_ignore_ascii_case("true")),
                system_path: field("systemPath"),
                exclusions: child(dep, "exclusions")
                    .map(|exclusions| {
                        exclusions
                            .children()
                            .filter(|c| c.is_element() && c.has_tag_name("exclusion"))
                            .map(|e| Exclusion {
                                group_id: child_text(e, "groupId").unwrap_or_default(),
                                artifact_id: child_text(e, "artifactId").unwrap_or_default(),
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
            }
        })
        .collect()
}

/// Fill unspecified versions and scopes from matching managed entries.
fn apply_management(dependencies: &mut [Dependency], management: &DependencyManagement) {
    for dep in dependencies.iter_mut() {
        let managed = management.dependencies.iter().find(|m| {
            m.is_same_artifact(&dep.group_id, &dep.artifact_id)
                && m.dependency_type.as_deref().unwrap_or(DEFAULT_PACKAGING)
                    == dep.dependency_type.as_deref().unwrap_or(DEFAULT_PACKAGING)
                && m.classifier == dep.classifier
        });

        if let Some(managed) = managed {
            if dep.version.is_none() {
                dep.version.clone_from(&managed.version);
            }
            if dep.scope.is_none() {
                dep.scope.clone_from(&managed.scope);
            }
        }
    }
}

fn parse_build(
    node: Option<Node<'_, '_>>,
    source: &str,
    project_directory: &Path,
    interpolator: &mut Interpolator,
) -> BuildPaths {
    const PATH_ELEMENTS: [(&str, &str); 5] = [
        ("directory", "${project.basedir}/target"),
        ("outputDirectory", "${project.build.directory}/classes"),
        ("testOutputDirectory", "${project.build.directory}/test-classes"),
        ("sourceDirectory", "${project.basedir}/src/main/java"),
        ("testSourceDirectory", "${project.basedir}/src/test/java"),
    ];

    let mut resolved = Vec::with_capacity(PATH_ELEMENTS.len());
    for (name, default) in PATH_ELEMENTS {
        let raw = node.and_then(|n| child_text(n, name)).unwrap_or_else(|| default.to_string());
        let path = resolve_path(project_directory, &interpolator.interpolate(&raw));
        interpolator.insert(format!("project.build.{name}"), path.display().to_string());
        resolved.push(path);
    }

    let extra = node
        .map(|n| {
            n.children()
                .filter(|c| {
                    c.is_element() && !PATH_ELEMENTS.iter().any(|(name, _)| c.has_tag_name(*name))
                })
                .map(|c| interpolator.interpolate_xml(&source[c.range()]))
                .collect()
        })
        .unwrap_or_default();

    let mut paths = resolved.into_iter();
    let mut next = || paths.next().unwrap_or_default();
    BuildPaths {
        directory: next(),
        output_directory: next(),
        test_output_directory: next(),
        source_directory: next(),
        test_source_directory: next(),
        extra,
    }
}

fn resolve_path(project_directory: &Path, value: &str) -> PathBuf {
    let path = Path::new(value);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_directory.join(path)
    }
}

/// The opening tag starting at `start`, e.g. `<project xmlns="...">`.
fn start_tag(source: &str, start: usize) -> String {
    let mut quote = None;
    for (offset, ch) in source[start..].char_indices() {
        match (quote, ch) {
            (None, '"' | '\'') => quote = Some(ch),
            (Some(q), c) if c == q => quote = None,
            (None, '>') => {
                let tag = &source[start..=start + offset];
                return match tag.strip_suffix("/>") {
                    Some(open) => format!("{}>", open.trim_end()),
                    None => tag.to_string(),
                };
            }
            _ => {}
        }
    }
    "<project>".to_string()
}

/// Expands `${name}` expressions from a table of known values.
struct Interpolator {
    values: HashMap<String, String>,
    pattern: Option<Regex>,
}

impl Interpolator {
    fn new() -> Self {
        Self {
            values: HashMap::new(),
            pattern: Regex::new(r"\$\{([^}]+)\}").ok(),
        }
    }

    fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    fn interpolate(&self, input: &str) -> String {
        self.expand(input, |value| value.to_string())
    }

    /// Interpolate inside XML markup, escaping substituted values.
    fn interpolate_xml(&self, input: &str) -> String {
        self.expand(input, escape_text)
    }

    fn expand(&self, input: &str, render: impl Fn(&str) -> String) -> String {
        let Some(pattern) = &self.pattern else {
            return input.to_string();
        };

        let mut current = input.to_string();
        for _ in 0..MAX_INTERPOLATION_PASSES {
            let next = pattern
                .replace_all(&current, |caps: &Captures<'_>| match self.values.get(&caps[1]) {
                    Some(value) => render(value),
                    None => caps[0].to_string(),
                })
                .into_owned();
            if next == current {
                break;
            }
            current = next;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <modelVersion>4.0.0</modelVersion>
  <parent>
    <groupId>org.example</groupId>
    <artifactId>parent</artifactId>
    <version>2.0</version>
  </parent>
  <artifactId>app</artifactId>
  <name>Example app</name>
  <properties>
    <lib.version>3.1</lib.version>
  </properties>
  <dependencyManagement>
    <dependencies>
      <dependency>
        <groupId>org.lib</groupId>
        <artifactId>managed</artifactId>
        <version>9.9</version>
        <scope>test</scope>
      </dependency>
    </dependencies>
  </dependencyManagement>
  <dependencies>
    <dependency>
      <groupId>org.lib</groupId>
      <artifactId>lib</artifactId>
      <version>${lib.version}</version>
      <exclusions>
        <exclusion>
          <groupId>org.bad</groupId>
          <artifactId>bad</artifactId>
        </exclusion>
      </exclusions>
    </dependency>
    <dependency>
      <groupId>org.lib</groupId>
      <artifactId>managed</artifactId>
    </dependency>
    <dependency>
      <groupId>${project.groupId}</groupId>
      <artifactId>sibling</artifactId>
      <version>${project.version}</version>
    </dependency>
  </dependencies>
  <build>
    <finalName>app</finalName>
    <outputDirectory>${project.build.directory}/out</outputDirectory>
  </build>
  <reporting>
    <outputDirectory>${project.build.directory}/site</outputDirectory>
  </reporting>
</project>
"#;

    fn parse() -> ProjectDescriptor {
        parse_descriptor(POM, Path::new("/work/app")).unwrap()
    }

    #[test]
    fn test_inherits_group_and_version_from_parent() {
        let project = parse();
        assert_eq!(project.group_id, "org.example");
        assert_eq!(project.artifact_id, "app");
        assert_eq!(project.version, "2.0");
        assert_eq!(project.packaging, "jar");
        assert_eq!(project.parent.as_ref().unwrap().artifact_id, "parent");
    }

    #[test]
    fn test_interpolates_dependency_coordinates() {
        let project = parse();
        assert_eq!(project.dependencies[0].version.as_deref(), Some("3.1"));
        assert_eq!(project.dependencies[0].exclusions.len(), 1);
        assert_eq!(project.dependencies[2].group_id, "org.example");
        assert_eq!(project.dependencies[2].version.as_deref(), Some("2.0"));
    }

    #[test]
    fn test_fills_version_and_scope_from_management() {
        let project = parse();
        let managed = &project.dependencies[1];
        assert_eq!(managed.version.as_deref(), Some("9.9"));
        assert_eq!(managed.scope.as_deref(), Some("test"));
    }

    #[test]
    fn test_resolves_build_paths() {
        let project = parse();
        assert_eq!(project.build.directory, Path::new("/work/app/target"));
        assert_eq!(project.build.output_directory, Path::new("/work/app/target/out"));
        assert_eq!(project.build.test_output_directory, Path::new("/work/app/target/test-classes"));
        assert_eq!(project.build.extra, vec!["<finalName>app</finalName>".to_string()]);
    }

    #[test]
    fn test_layout_preserves_source_order_and_interpolates() {
        let project = parse();
        let names: Vec<String> = project
            .layout
            .iter()
            .map(|slot| match slot {
                ElementSlot::Raw {
                    name,
                    ..
                } => name.clone(),
                other => format!("{other:?}"),
            })
            .collect();
        assert_eq!(
            names,
            vec!["name", "properties", "DependencyManagement", "Dependencies", "Build", "reporting"]
        );

        let ElementSlot::Raw {
            xml,
            ..
        } = &project.layout[5]
        else {
            panic!("expected raw reporting element");
        };
        assert!(xml.contains("<outputDirectory>/work/app/target/site</outputDirectory>"));
    }

    #[test]
    fn test_keeps_root_tag_with_namespaces() {
        let project = parse();
        assert!(project.root_tag.starts_with("<project xmlns=\"http://maven.apache.org/POM/4.0.0\""));
        assert!(project.root_tag.ends_with('>'));
    }

    #[test]
    fn test_missing_artifact_id_is_parse_error() {
        let err = parse_descriptor(
            "<project><groupId>g</groupId><version>1</version></project>",
            Path::new("/p"),
        )
        .unwrap_err();
        assert!(matches!(err, PomflatError::DescriptorParseError { .. }));
    }

    #[test]
    fn test_wrong_root_is_parse_error() {
        let err = parse_descriptor("<settings/>", Path::new("/p")).unwrap_err();
        assert!(err.to_string().contains("<settings>"));
    }

    #[test]
    fn test_unknown_expressions_are_kept() {
        let pom = "<project><groupId>g</groupId><artifactId>a</artifactId><version>${revision}</version></project>";
        let project = parse_descriptor(pom, Path::new("/p")).unwrap();
        assert_eq!(project.version, "${revision}");
    }

    #[test]
    fn test_self_referencing_property_terminates() {
        let pom = "<project><properties><loop>${loop}x</loop></properties><groupId>g</groupId>\
                   <artifactId>a</artifactId><version>${loop}</version></project>";
        let project = parse_descriptor(pom, Path::new("/p")).unwrap();
        assert!(project.version.starts_with("${loop}"));
    }

    #[test]
    fn test_start_tag_handles_quoted_gt() {
        let source = r#"<project a="x>y" b='1'><x/></project>"#;
        assert_eq!(start_tag(source, 0), r#"<project a="x>y" b='1'>"#);
        assert_eq!(start_tag("<project/>", 0), "<project>");
    }
}
