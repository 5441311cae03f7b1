//! Global constants used throughout the pomflat codebase.
//!
//! File names, placeholder expressions and defaults that more than one module
//! needs to agree on.

/// Placeholder written in place of the absolute build output directory.
pub const BUILD_DIRECTORY_PLACEHOLDER: &str = "${project.build.directory}";

/// Placeholder written in place of the absolute project root.
pub const BASEDIR_PLACEHOLDER: &str = "${project.basedir}";

/// Stand-in for the `<directory>` declaration while other build-dir paths are rewritten.
///
/// Contains NUL, which is not a legal XML character, so it never collides
/// with descriptor content.
pub const DIRECTORY_DECLARATION_SENTINEL: &str = "\u{0}__pomflat_directory_declaration__\u{0}";

/// Default descriptor file name.
pub const DESCRIPTOR_FILE_NAME: &str = "pom.xml";

/// Default output file for `generate-pom`, relative to the build directory.
pub const EFFECTIVE_POM_FILE_NAME: &str = "effective-pom.xml";

/// Default output file for `list-dependencies`, relative to the build directory.
pub const DEPENDENCIES_REPORT_FILE_NAME: &str = "dependencies.properties";

/// Default location of the exported dependency graph, relative to the build directory.
pub const DEPENDENCY_GRAPH_FILE_NAME: &str = "dependency-graph.json";

/// Optional per-project configuration file, looked up next to the descriptor.
pub const CONFIG_FILE_NAME: &str = "pomflat.toml";

/// Default field delimiter for the dependency report.
pub const DEFAULT_SEPARATOR: &str = "|";

/// Default packaging/type when a descriptor or dependency omits it.
pub const DEFAULT_PACKAGING: &str = "jar";

/// Suffix marking snapshot versions.
pub const SNAPSHOT_SUFFIX: &str = "SNAPSHOT";
