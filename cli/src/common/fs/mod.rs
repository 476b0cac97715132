//! # distpack Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers used around the packing engine:
//!
//! - **`io`**: ensuring directories exist, resolving output paths, removing a
//!   previous archive. Used by the serializer.
//! - **`digest`**: human-readable sizes and MD5 / SHA-256 digests of the
//!   finished archive. Used only for reporting.
//!
//! Import from the specific submodule, e.g.
//! `use crate::common::fs::io::ensure_dir_exists;`.
//!

/// Size formatting and file digests (`format_file_bytes`, `file_digests`).
pub mod digest;
/// Async directory and file helpers (`ensure_dir_exists`, `remove_file_if_exists`).
pub mod io;
