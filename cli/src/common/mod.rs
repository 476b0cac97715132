//! # distpack Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks used by the command layer:
//!
//! - **`archive`**: the packing engine (tree, builder, filters, ZIP serializer).
//! - **`fs`**: filesystem I/O helpers and archive digests.
//!

/// The directory-to-ZIP packing engine.
pub mod archive;
/// Utilities for filesystem operations and file digests.
pub mod fs;
