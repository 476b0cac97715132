//! # distpack Archive Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! The packing engine. It turns a directory on disk into a single ZIP file
//! in two phases that never overlap:
//!
//! - **`builder`**: walks the source directory and fills an in-memory tree,
//!   applying the path prefix and the entry filter.
//! - **`zip`**: serializes a finished tree to a DEFLATE-compressed ZIP file.
//!
//! Supporting submodules:
//!
//! - **`tree`**: the tree types (`ArchiveTree`, `Directory`, `Entry`).
//! - **`filter`**: the `FilterPolicy` strategy and its stock implementations.
//!
//! The engine prints nothing and calls no hooks; it returns values or errors.
//! Reporting belongs to `commands::pack`.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::{builder::{ArchiveBuilder, BuildOptions}, zip};
//!
//! let mut builder = ArchiveBuilder::new(BuildOptions::default().path_prefix("app"))?;
//! builder.add_directory(Path::new("./dist")).await?;
//! let tree = builder.build();
//! let written = zip::save(&tree, Path::new("./"), "dist.zip").await?;
//! ```
//!

pub mod builder;
pub mod filter;
pub mod tree;
pub mod zip;

#[cfg(test)]
pub(crate) mod fixtures;
