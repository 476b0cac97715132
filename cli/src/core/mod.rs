//! # distpack Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces used by every other module:
//! - `config`: loading and merging the TOML configuration files
//! - `error`: the `PackError` taxonomy and the crate-wide `Result` alias
//!
//! ```rust
//! use crate::core::config;
//! use crate::core::error::{PackError, Result};
//! ```
//!
pub mod config;
pub mod error;
