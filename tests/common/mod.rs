//! Shared helpers for the integration suite.

#![allow(dead_code)]

use anyhow::{Context, Result};
use pomflat_cli::test_utils::{PARENT_POM, ProjectFixture};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A throwaway workspace holding one Maven project.
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    root_dir: PathBuf,
    project_dir: PathBuf,
}

impl TestProject {
    /// A standalone project at the workspace root.
    pub fn new(fixture: &ProjectFixture) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root_dir = temp_dir.path().to_path_buf();
        fixture.write_to(&root_dir)?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_dir: root_dir.clone(),
            root_dir,
        })
    }

    /// A module in `module/` with its parent descriptor at the workspace root.
    pub fn with_parent(fixture: &ProjectFixture) -> Result<Self> {
        Self::with_parent_pom(PARENT_POM, fixture)
    }

    /// Like [`TestProject::with_parent`] with a custom parent descriptor.
    pub fn with_parent_pom(parent_pom: &str, fixture: &ProjectFixture) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root_dir = temp_dir.path().to_path_buf();
        fs::write(root_dir.join("pom.xml"), parent_pom)?;

        let project_dir = root_dir.join("module");
        fixture.write_to(&project_dir)?;

        Ok(Self {
            _temp_dir: temp_dir,
            root_dir,
            project_dir,
        })
    }

    /// Directory containing the project's `pom.xml`
    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }

    /// Workspace root
    pub fn root_path(&self) -> &Path {
        &self.root_dir
    }

    /// `target/<name>` inside the project
    pub fn target_file(&self, name: &str) -> PathBuf {
        self.project_dir.join("target").join(name)
    }

    /// Write a file relative to the project directory.
    pub fn write_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.project_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Read a file relative to the project directory.
    pub fn read_file(&self, relative: &str) -> String {
        let path = self.project_dir.join(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
    }

    /// Run pomflat in the project directory
    pub fn run_pomflat(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new(env!("CARGO_BIN_EXE_pomflat"))
            .args(args)
            .current_dir(&self.project_dir)
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .output()
            .context("Failed to run pomflat command")?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}

/// Command output helper
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Assert the command succeeded
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success,
            "Command failed with code {:?}\nStderr: {}",
            self.code, self.stderr
        );
        self
    }

    /// Assert the command failed with exit code 1
    pub fn assert_failure(&self) -> &Self {
        assert_eq!(self.code, Some(1), "Expected exit code 1\nStdout: {}", self.stdout);
        self
    }

    /// Assert stdout contains the given text
    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Expected stdout to contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    /// Assert stderr contains the given text
    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Expected stderr to contain '{}'\nActual stderr: {}",
            text,
            self.stderr
        );
        self
    }
}

/// File assertion helpers
pub struct FileAssert;

impl FileAssert {
    /// Assert a file exists
    pub fn exists(path: impl AsRef<Path>) {
        let path = path.as_ref();
        assert!(path.exists(), "Expected file to exist: {}", path.display());
    }

    /// Assert a file does not exist
    pub fn not_exists(path: impl AsRef<Path>) {
        let path = path.as_ref();
        assert!(!path.exists(), "Expected file to not exist: {}", path.display());
    }

    /// Assert a file contains the expected text
    pub fn contains(path: impl AsRef<Path>, expected: &str) {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
        assert!(
            content.contains(expected),
            "Expected {} to contain '{}'\nActual content:\n{}",
            path.display(),
            expected,
            content
        );
    }
}
