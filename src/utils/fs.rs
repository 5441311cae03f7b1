//! File system helpers for writing generated outputs.
//!
//! Outputs are never truncated in place: an existing file is removed first
//! and the new content is written through a handle that is flushed and
//! closed before returning. A failure part-way through therefore leaves no
//! output file rather than a half-overwritten one.

use anyhow::{Context, Result};
use std::path::Path;
use tokio::io::AsyncWriteExt;

use crate::core::PomflatError;

fn fs_error(operation: &str, path: &Path) -> PomflatError {
    PomflatError::FileSystemError {
        operation: operation.to_string(),
        path: path.display().to_string(),
    }
}

/// Create `path` and any missing ancestors.
///
/// Fails if `path` exists but is not a directory.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).with_context(|| fs_error("create directory", path))?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display()));
    }
    Ok(())
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

/// Write `content` to `path`, replacing any previous file.
pub async fn write_output(path: &Path, content: &str) -> Result<()> {
    ensure_parent_dir(path)?;

    if tokio::fs::try_exists(path).await.with_context(|| fs_error("inspect", path))? {
        tracing::debug!("Removing previous output {}", path.display());
        tokio::fs::remove_file(path).await.with_context(|| fs_error("delete", path))?;
    }

    {
        let mut file =
            tokio::fs::File::create(path).await.with_context(|| fs_error("create", path))?;
        file.write_all(content.as_bytes()).await.with_context(|| fs_error("write", path))?;
        file.flush().await.with_context(|| fs_error("flush", path))?;
    }

    tracing::info!("Wrote {}", path.display());
    Ok(())
}
