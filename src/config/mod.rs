//! Optional project configuration (`pomflat.toml`).
//!
//! The file sits next to `pom.xml` (or wherever `--config` points) and holds
//! one table per command:
//!
//! ```toml
//! [generate-pom]
//! output = "dist/effective-pom.xml"
//! group-id = "com.example.release"
//! version = "2.0.0"
//! graph = "target/dependency-graph.json"
//!
//! [list-dependencies]
//! separator = ","
//! ```
//!
//! Every key is optional. Command-line flags win over the file, and the file
//! wins over the built-in defaults (see [`resolve`]).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::CONFIG_FILE_NAME;
use crate::core::PomflatError;

/// Settings for `generate-pom`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GeneratePomConfig {
    /// Destination of the effective descriptor
    pub output: Option<PathBuf>,
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    /// Resolved dependency graph document
    pub graph: Option<PathBuf>,
}

/// Settings for `list-dependencies`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ListDependenciesConfig {
    /// Destination of the report
    pub output: Option<PathBuf>,
    /// Field delimiter
    pub separator: Option<String>,
    pub graph: Option<PathBuf>,
}

/// Contents of `pomflat.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PomflatConfig {
    #[serde(default)]
    pub generate_pom: GeneratePomConfig,
    #[serde(default)]
    pub list_dependencies: ListDependenciesConfig,
}

impl PomflatConfig {
    /// Load the configuration for a project.
    ///
    /// An explicit `path` must exist. Without one, `pomflat.toml` in
    /// `project_directory` is used when present and defaults otherwise.
    pub async fn load_with_optional(
        path: Option<&Path>,
        project_directory: &Path,
    ) -> Result<Self> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(PomflatError::ConfigError {
                    message: format!("Configuration file not found: {}", path.display()),
                }
                .into());
            }
            return Self::load_from(path).await;
        }

        let default_path = project_directory.join(CONFIG_FILE_NAME);
        if default_path.exists() {
            Self::load_from(&default_path).await
        } else {
            tracing::debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, project_directory.display());
            Ok(Self::default())
        }
    }

    /// Load the configuration from `path`.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

/// Pick a setting: the command line wins, then the file, then `default`.
pub fn resolve<T>(cli: Option<T>, config: Option<T>, default: impl FnOnce() -> T) -> T {
    cli.or(config).unwrap_or_else(default)
}
