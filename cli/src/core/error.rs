//! # distpack Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types raised by the packing engine and the
//! command layer around it.
//!
//! ## Architecture
//!
//! The error system consists of two parts:
//! - `PackError`: a `thiserror` enum for the failures callers may want to
//!   tell apart (bad prefix, missing source, tree conflicts, unusable entry
//!   names, bad config).
//! - `Result<T>`: an alias for `anyhow::Result<T>` used across the crate.
//!
//! Filesystem errors are not wrapped into `PackError`. They travel through
//! `anyhow` with added context, and the original `std::io::Error` stays
//! reachable with `downcast_ref`.
//!
//! ## Examples
//!
//! ```rust
//! // Raise a typed error through anyhow
//! anyhow::bail!(PackError::SourceNotFound { path: source.to_path_buf() });
//!
//! // Match on it further up
//! match result {
//!     Err(e) if matches!(e.downcast_ref::<PackError>(), Some(PackError::InvalidPrefix { .. })) => {
//!         eprintln!("fix the prefix");
//!     }
//!     other => other?,
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for distpack.
#[derive(Error, Debug)]
pub enum PackError {
    /// The configured path prefix cannot be used as an in-archive directory chain.
    #[error("\"{prefix}\" pathPrefix must be a relative path{reason}")]
    InvalidPrefix { prefix: String, reason: String },

    /// The directory to walk does not exist, is not a directory, or cannot be listed.
    #[error("\"{}\" folder does not exist!", path.display())]
    SourceNotFound { path: PathBuf },

    /// A directory node could not be opened for child insertion because
    /// a file already holds its name.
    #[error("'{name}' couldn't get included as directory in the archive")]
    DirectoryRegistration { name: String },

    /// A file would replace an existing directory node of the same name.
    #[error("'{name}' is already a directory in the archive and cannot be replaced by a file")]
    EntryConflict { name: String },

    /// A source entry's name is not valid UTF-8, so it has no faithful
    /// in-archive name.
    #[error("\"{}\" has a name that is not valid UTF-8", path.display())]
    InvalidEntryName { path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),
}

impl PackError {
    /// Builds an `InvalidPrefix` error for an absolute prefix.
    pub fn absolute_prefix(prefix: &str) -> Self {
        Self::InvalidPrefix {
            prefix: prefix.to_string(),
            reason: String::new(),
        }
    }

    /// Builds an `InvalidPrefix` error for a relative prefix that leaves the archive root.
    pub fn escaping_prefix(prefix: &str) -> Self {
        Self::InvalidPrefix {
            prefix: prefix.to_string(),
            reason: " inside the archive ('..' segments are not allowed)".to_string(),
        }
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
