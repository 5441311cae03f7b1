//! pomflat - portable effective descriptors for Maven projects
//!
//! pomflat turns a project's `pom.xml` plus its resolved dependency graph
//! into a self-contained descriptor: every resolved artifact is listed
//! explicitly, coordinates can be republished under a new group or version,
//! and absolute paths are replaced by `${project.*}` placeholders so the
//! output is identical wherever it is built. It can also report the resolved
//! artifacts as a delimited file.
//!
//! # Pipeline
//!
//! ```text
//! pom.xml ──► descriptor ─┐
//!                         ├─► merge ─► writer ─► rewrite ─► effective-pom.xml
//! graph.json ─► flatten ──┘
//!                 └──────────► report ───────────────────► dependencies.properties
//! ```
//!
//! # Core Modules
//!
//! - [`coordinate`] - artifact coordinates and their canonical names
//! - [`graph`] - resolved dependency trees, graph sources and flattening
//! - [`descriptor`] - the project model, its reader, writer and host context
//! - [`merge`] - promoting resolved artifacts into the descriptor
//! - [`rewrite`] - absolute path to placeholder substitution
//! - [`report`] - the delimited dependency report
//!
//! # Supporting Modules
//!
//! - [`cli`] - command-line interface
//! - [`config`] - `pomflat.toml`
//! - [`core`] - error types and user-facing error reporting
//! - [`constants`] - shared file names and placeholders
//! - [`utils`] - output file handling
//!
//! # Example
//!
//! ```rust,no_run
//! use pomflat_cli::descriptor::{ProjectContext, parse_descriptor, write_descriptor};
//! use pomflat_cli::graph::{DependencyGraphNode, flatten};
//! use pomflat_cli::coordinate::ArtifactCoordinate;
//! use pomflat_cli::merge::{CoordinateOverrides, merge};
//! use pomflat_cli::rewrite::rewrite_paths;
//! use std::path::Path;
//!
//! # fn example(pom: &str) -> anyhow::Result<()> {
//! let project = parse_descriptor(pom, Path::new("/work/app"))?;
//! let graph = DependencyGraphNode::new(ArtifactCoordinate::new("org.x", "app", "1.0"));
//!
//! let outcome = merge(
//!     &project,
//!     &ProjectContext::default(),
//!     &flatten(&graph),
//!     &CoordinateOverrides::from_descriptor(&project),
//! );
//! let xml = write_descriptor(&outcome.descriptor)?;
//! let portable = rewrite_paths(&xml, &project.project_directory, &project.build.directory);
//! # Ok(())
//! # }
//! ```

// Engine
pub mod coordinate;
pub mod descriptor;
pub mod graph;
pub mod merge;
pub mod report;
pub mod rewrite;

// Supporting modules
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
