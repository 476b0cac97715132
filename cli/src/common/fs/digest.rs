//! # File Size & Digest Utilities (`common::fs::digest`)
//!
//! File: cli/src/common/fs/digest.rs
//!
//! ## Overview
//!
//! Helpers used to report on a finished archive: a human-readable size and
//! MD5 / SHA-256 digests. They only read the file; nothing here takes part in
//! producing the archive.
//!
use crate::core::error::Result;
use anyhow::Context;
use sha2::{Digest, Sha256};
use std::path::Path;

const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Lowercase hex digests of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigests {
    /// 128-bit MD5.
    pub md5: String,
    /// 256-bit SHA-256.
    pub sha256: String,
}

/// Formats a byte count with binary (1024) units and up to two decimals,
/// trailing zeros trimmed: `0 -> "0 Bytes"`, `1536 -> "1.5 KB"`.
pub fn format_file_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    let mut scaled = bytes as f64;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{:.2}", scaled);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

/// Reads the file at `path` once and computes both digests.
pub async fn file_digests(path: &Path) -> Result<FileDigests> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {} for hashing", path.display()))?;
    Ok(FileDigests {
        md5: format!("{:x}", md5::compute(&bytes)),
        sha256: hex::encode(Sha256::digest(&bytes)),
    })
}

/// Size of the file at `path` in bytes.
pub async fn file_size(path: &Path) -> Result<u64> {
    let metadata = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("Failed to read metadata of {}", path.display()))?;
    Ok(metadata.len())
}
