//! Loading shared by every command: the descriptor and its configuration.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::PomflatConfig;
use crate::constants::DESCRIPTOR_FILE_NAME;
use crate::descriptor::{ProjectDescriptor, load_descriptor};
use crate::graph::JsonGraphFile;

/// A loaded project ready for a command to work on.
#[derive(Debug, Clone)]
pub struct ProjectSession {
    /// Descriptor location as given (or the default)
    pub descriptor_path: PathBuf,
    /// Effective model
    pub descriptor: ProjectDescriptor,
    /// Contents of `pomflat.toml`, or defaults
    pub config: PomflatConfig,
}

impl ProjectSession {
    /// Load the descriptor at `pom` (default `./pom.xml`) and its configuration.
    pub async fn load(pom: Option<PathBuf>, config: Option<PathBuf>) -> Result<Self> {
        let descriptor_path = pom.unwrap_or_else(|| PathBuf::from(DESCRIPTOR_FILE_NAME));
        let descriptor = load_descriptor(&descriptor_path).await?;
        let config =
            PomflatConfig::load_with_optional(config.as_deref(), &descriptor.project_directory)
                .await?;

        Ok(Self {
            descriptor_path,
            descriptor,
            config,
        })
    }

    /// Resolve a path taken from the configuration file.
    ///
    /// Relative paths are relative to the project directory.
    pub fn config_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.descriptor.project_directory.join(path)
        }
    }

    /// `file_name` inside the build output directory.
    pub fn build_file(&self, file_name: &str) -> PathBuf {
        self.descriptor.build.directory.join(file_name)
    }

    /// Pick an output or input path: command line, then configuration, then
    /// `file_name` in the build directory.
    pub fn resolve_path(
        &self,
        cli: Option<PathBuf>,
        config: Option<&PathBuf>,
        file_name: &str,
    ) -> PathBuf {
        crate::config::resolve(cli, config.map(|path| self.config_path(path)), || {
            self.build_file(file_name)
        })
    }

    /// The graph source for this project.
    pub fn graph_source(&self, path: PathBuf) -> JsonGraphFile {
        JsonGraphFile::new(path)
    }
}
