//! Filesystem locations of the project

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable overriding the project root
pub const ROOT_ENV_VAR: &str = "PIPELINE_ROOT";

/// Resolve the project root directory
///
/// Uses `PIPELINE_ROOT` when set, otherwise the current working directory.
pub fn root_directory() -> Result<PathBuf> {
    match std::env::var_os(ROOT_ENV_VAR) {
        Some(root) if !root.is_empty() => Ok(PathBuf::from(root)),
        _ => std::env::current_dir().context("Failed to resolve current directory"),
    }
}

/// Directory holding run journals under `root`
pub fn logs_directory(root: &Path) -> PathBuf {
    root.join("logs").join("journals")
}
