//! # distpack Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Top-level command groups of the distpack CLI. Each group defines its own
//! argument struct and handler, routed from `main.rs`.
//!
//! ## Command Groups
//!
//! - `pack`: archive a build output directory into a ZIP file
//!

/// Command for packing a directory into a ZIP archive.
pub mod pack;
