//! Turning absolute paths in serialized descriptor text into placeholders.
//!
//! A generated descriptor is full of paths such as `/home/build/proj/target`.
//! [`rewrite_paths`] replaces them with `${project.build.directory}` and
//! `${project.basedir}` so the output does not depend on where it was built.
//!
//! The `<directory>` declaration itself keeps its concrete value: it is
//! swapped for a sentinel before any substitution and restored at the end.
//! The build directory is substituted before the project root because it
//! normally lives under it.

use std::path::Path;

use crate::constants::{
    BASEDIR_PLACEHOLDER, BUILD_DIRECTORY_PLACEHOLDER, DIRECTORY_DECLARATION_SENTINEL,
};
use crate::descriptor::writer::escape_text;

/// Replace absolute `project_root` and `build_directory` occurrences in `text`.
///
/// Returns a new string. An empty path is never substituted.
pub fn rewrite_paths(text: &str, project_root: &Path, build_directory: &Path) -> String {
    let build_dir = escape_text(&build_directory.display().to_string());
    let root = escape_text(&project_root.display().to_string());

    if build_dir.is_empty() {
        return replace_root(text.to_string(), &root);
    }

    let declaration = format!("<directory>{build_dir}</directory>");
    let declarations = text.matches(&declaration).count();
    tracing::debug!(
        "Protecting {} build directory declaration(s) while rewriting {}",
        declarations,
        build_dir
    );

    let protected = text
        .replace(&declaration, DIRECTORY_DECLARATION_SENTINEL)
        .replace(&build_dir, BUILD_DIRECTORY_PLACEHOLDER);

    replace_root(protected, &root).replace(DIRECTORY_DECLARATION_SENTINEL, &declaration)
}

fn replace_root(text: String, root: &str) -> String {
    if root.is_empty() {
        return text;
    }
    text.replace(root, BASEDIR_PLACEHOLDER)
}
