//! # distpack Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! This module centralizes the small filesystem operations the packing
//! pipeline needs around the archive itself. They are async wrappers around
//! `tokio::fs` that add context to errors.
//!
//! ## Architecture
//!
//! - **`ensure_dir_exists`**: Creates a directory (and missing parents) when
//!   absent, and rejects a path that exists but is not a directory.
//! - **`resolve_output_path`**: Turns an output directory plus a file name
//!   into a normalized absolute path, canonicalizing the holding directory.
//! - **`remove_file_if_exists`**: Deletes a previous archive before it is
//!   rewritten.
//! - **`absolute_path`**: Joins a relative path onto the current working
//!   directory, without touching the filesystem.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! io::ensure_dir_exists(Path::new("./release")).await?;
//! let target = io::resolve_output_path(Path::new("./release"), "dist.zip").await?;
//! io::remove_file_if_exists(&target).await?;
//! ```
//!
use crate::core::error::{PackError, Result};
use anyhow::Context;
use std::env;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist, this function creates the directory,
/// including any necessary parent directories (similar to `mkdir -p`).
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) if metadata.is_dir() => {
            debug!("Directory already exists: {:?}", path);
        }
        Ok(_) => {
            anyhow::bail!(PackError::FileSystem(format!(
                "Path exists but is not a directory: {:?}",
                path
            )));
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tokio::fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory {:?}", path))?;
            info!("Created directory: {:?}", path);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to inspect directory {:?}", path));
        }
    }
    Ok(())
}

/// Makes `path` absolute by joining it onto the current working directory.
/// Already absolute paths are returned unchanged.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let current_dir = env::current_dir().context("Failed to get current working directory")?;
    Ok(current_dir.join(path))
}

/// Resolves `dir/file_name` to a normalized absolute path.
///
/// `file_name` may itself contain directories (`"../dist.zip"`,
/// `"nested/dist.zip"`). The directory that ends up holding the file is
/// created when missing and canonicalized, so no `.` or `..` component
/// survives.
///
/// # Errors
///
/// Returns an `Err` if `dir/file_name` does not end in a file name, or the
/// holding directory cannot be created or resolved.
pub async fn resolve_output_path(dir: &Path, file_name: &str) -> Result<PathBuf> {
    let joined = dir.join(file_name);
    let name = joined.file_name().ok_or_else(|| {
        PackError::FileSystem(format!(
            "Output path {:?} does not end in a file name",
            joined
        ))
    })?;
    let parent = match joined.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir_exists(parent).await?;
    let canonical_dir = tokio::fs::canonicalize(parent)
        .await
        .with_context(|| format!("Failed to resolve output directory {:?}", parent))?;
    let resolved = canonical_dir.join(name);
    debug!("Resolved output path: {}", resolved.display());
    Ok(resolved)
}

/// Removes the file at `path` if there is one.
///
/// Returns `Ok(true)` when a file was removed and `Ok(false)` when nothing
/// existed at `path`.
pub async fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("Failed to remove existing file {:?}", path)),
    }
}
