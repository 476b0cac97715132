//! # ZIP Serializer (`common::archive::zip`)
//!
//! File: cli/src/common/archive/zip.rs
//!
//! ## Overview
//!
//! Flattens an [`ArchiveTree`] into a single ZIP archive and writes it to
//! disk. This is the second phase after `common::archive::builder`.
//!
//! ## Architecture
//!
//! The module leverages the `zip` crate for the container format with
//! DEFLATE compression at level 9.
//!
//! - Entries are written in tree pre-order: each directory entry (zero
//!   length, name ending in `/`) comes right before its children.
//! - Entry names always use `/`, whatever the host separator is.
//! - Every entry carries the fixed DOS timestamp 1980-01-01 00:00, so the
//!   same tree always encodes to the same bytes for a given `zip` version.
//! - The whole archive is built in memory first. The destination is only
//!   touched once encoding succeeded.
//!
//! ## Usage
//!
//! ```rust
//! let tree = builder.build();
//! let written = zip::save(&tree, Path::new("./release"), "dist.zip").await?;
//! println!("Archive at {}", written.display());
//! ```
//!
use super::tree::{ArchiveTree, EntryRef};
use crate::common::fs::io;
use crate::core::error::Result;
use anyhow::Context;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// DEFLATE level used for file entries.
pub const COMPRESSION_LEVEL: i64 = 9;

fn file_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(COMPRESSION_LEVEL))
        .last_modified_time(DateTime::default())
}

fn directory_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .last_modified_time(DateTime::default())
}

/// # Encode Archive (`encode`)
///
/// Serializes the whole tree into an in-memory ZIP buffer without touching
/// the filesystem.
///
/// ## Errors
///
/// Returns an `Err` if the `zip` writer rejects an entry or fails to
/// finalize the central directory.
pub fn encode(tree: &ArchiveTree) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for (path, entry) in tree.entries() {
        match entry {
            EntryRef::Directory => {
                writer
                    .add_directory(path.as_str(), directory_options())
                    .with_context(|| format!("Failed to add directory entry '{}'", path))?;
            }
            EntryRef::File(content) => {
                writer
                    .start_file(path.as_str(), file_options())
                    .with_context(|| format!("Failed to start file entry '{}'", path))?;
                writer
                    .write_all(content)
                    .with_context(|| format!("Failed to compress file entry '{}'", path))?;
            }
        }
    }

    let cursor = writer
        .finish()
        .context("Failed to finalize zip archive structure")?;
    Ok(cursor.into_inner())
}

/// # Save Archive (`save`)
///
/// Writes `tree` as a ZIP file to `out_dir/out_file_name` and returns the
/// absolute path of the written file.
///
/// Steps:
/// 1. Create `out_dir` (and missing ancestors) if absent.
/// 2. Resolve the normalized absolute destination path, creating the
///    directory that holds it.
/// 3. Encode the tree.
/// 4. Delete any file already at the destination.
/// 5. Write the new archive.
///
/// The tree is only borrowed, so `save` can be called again for another (or
/// the same) destination.
///
/// ## Errors
///
/// Returns an `Err` if `out_file_name` is empty, `out_dir` exists but is not
/// a directory, encoding fails, or any filesystem operation fails. The
/// underlying `std::io::Error` is kept in the error chain.
pub async fn save(tree: &ArchiveTree, out_dir: &Path, out_file_name: &str) -> Result<PathBuf> {
    if out_file_name.trim().is_empty() {
        anyhow::bail!("Output file name must not be empty");
    }

    io::ensure_dir_exists(out_dir).await?;
    let target = io::resolve_output_path(out_dir, out_file_name).await?;

    let bytes = encode(tree)?;
    debug!(
        "Encoded {} entries into {} bytes",
        tree.entries().len(),
        bytes.len()
    );

    if io::remove_file_if_exists(&target).await? {
        debug!("Replaced existing archive at {}", target.display());
    }
    tokio::fs::write(&target, &bytes)
        .await
        .with_context(|| format!("Failed to write archive to {}", target.display()))?;

    info!("Wrote archive {} ({} bytes)", target.display(), bytes.len());
    Ok(target)
}
