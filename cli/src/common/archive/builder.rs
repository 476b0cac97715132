//! # Archive Builder (`common::archive::builder`)
//!
//! File: cli/src/common/archive/builder.rs
//!
//! ## Overview
//!
//! Walks a source directory and fills an in-memory [`ArchiveTree`], nesting
//! everything under an optional path prefix and consulting a
//! [`FilterPolicy`] for every entry.
//!
//! ## Architecture
//!
//! Building is the first of two phases:
//! 1. `ArchiveBuilder::new` validates the prefix and pre-creates its directory
//!    chain. No filesystem access happens here.
//! 2. `add_directory` walks the source depth-first, one filesystem operation
//!    at a time, preserving sibling order.
//! 3. `build` consumes the builder and returns the immutable tree, which the
//!    serializer (`common::archive::zip`) reads.
//!
//! ## Usage
//!
//! ```rust
//! let mut builder = ArchiveBuilder::new(BuildOptions::default().path_prefix("app"))?;
//! builder.add_directory(Path::new("./dist")).await?;
//! let tree = builder.build();
//! ```
//!
use super::filter::{AcceptAll, FilterPolicy};
use super::tree::{ArchiveTree, Directory};
use crate::core::error::{PackError, Result};
use anyhow::Context;
use futures_util::future::{BoxFuture, FutureExt};
use std::ffi::OsString;
use std::fmt;
use std::path::{Component, Path};
use tracing::{debug, info, trace};

/// Options fixed for the lifetime of a builder.
pub struct BuildOptions {
    path_prefix: String,
    filter: Box<dyn FilterPolicy>,
    sort_entries: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            path_prefix: String::new(),
            filter: Box::new(AcceptAll),
            sort_entries: false,
        }
    }
}

impl fmt::Debug for BuildOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildOptions")
            .field("path_prefix", &self.path_prefix)
            .field("sort_entries", &self.sort_entries)
            .finish_non_exhaustive()
    }
}

impl BuildOptions {
    /// Relative directory chain every walked entry is nested under.
    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = prefix.into();
        self
    }

    pub fn filter(mut self, filter: impl FilterPolicy + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    /// Sort directory listings by name instead of keeping the filesystem's
    /// enumeration order.
    pub fn sort_entries(mut self, sort: bool) -> Self {
        self.sort_entries = sort;
        self
    }
}

/// Collects a source directory into an [`ArchiveTree`].
pub struct ArchiveBuilder {
    root: Directory,
    prefix: Vec<String>,
    filter: Box<dyn FilterPolicy>,
    sort_entries: bool,
}

impl fmt::Debug for ArchiveBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveBuilder")
            .field("prefix", &self.prefix)
            .field("sort_entries", &self.sort_entries)
            .finish_non_exhaustive()
    }
}

impl ArchiveBuilder {
    /// # Create Builder (`new`)
    ///
    /// Validates the path prefix and creates its directory chain.
    ///
    /// ## Errors
    ///
    /// `PackError::InvalidPrefix` if the prefix is absolute or contains a
    /// `..` segment.
    pub fn new(options: BuildOptions) -> Result<Self> {
        let prefix = split_prefix(&options.path_prefix)?;
        let mut root = Directory::new();
        let mut current = &mut root;
        for segment in &prefix {
            current = current.ensure_directory(segment)?;
        }
        debug!("Archive builder created with prefix {:?}", prefix);
        Ok(Self {
            root,
            prefix,
            filter: options.filter,
            sort_entries: options.sort_entries,
        })
    }

    /// # Add Directory (`add_directory`)
    ///
    /// Recursively adds the contents of `source` below the prefix directory.
    /// `source` itself does not become an entry, only its children do.
    ///
    /// ## Errors
    ///
    /// - `PackError::SourceNotFound` if `source` cannot be listed. The tree
    ///   is left untouched.
    /// - `PackError::DirectoryRegistration` / `PackError::EntryConflict` on a
    ///   file/directory name clash with content added earlier.
    /// - `PackError::InvalidEntryName` for an entry whose name is not UTF-8.
    /// - Any I/O error met while listing, inspecting or reading entries.
    pub async fn add_directory(&mut self, source: &Path) -> Result<()> {
        let listing = match tokio::fs::read_dir(source).await {
            Ok(listing) => listing,
            Err(e) => {
                debug!("Cannot list {}: {}", source.display(), e);
                anyhow::bail!(PackError::SourceNotFound {
                    path: source.to_path_buf()
                });
            }
        };
        info!("Adding directory {} to archive", source.display());

        let mut insertion_root = &mut self.root;
        for segment in &self.prefix {
            insertion_root = insertion_root.directory_mut(segment).ok_or_else(|| {
                PackError::DirectoryRegistration {
                    name: segment.clone(),
                }
            })?;
        }

        let walker = Walker {
            filter: self.filter.as_ref(),
            sort_entries: self.sort_entries,
        };
        let names = walker.list(listing, source).await?;
        walker.add_entries(insertion_root, source, names).await
    }

    /// Finishes building and hands out the immutable tree.
    pub fn build(self) -> ArchiveTree {
        ArchiveTree::from_root(self.root)
    }
}

/// Splits and validates a path prefix into in-archive directory names.
fn split_prefix(prefix: &str) -> Result<Vec<String>> {
    if prefix.is_empty() {
        return Ok(Vec::new());
    }
    let as_path = Path::new(prefix);
    let rooted = as_path.has_root()
        || as_path.is_absolute()
        || prefix.starts_with('/')
        || prefix.starts_with('\\')
        || matches!(as_path.components().next(), Some(Component::Prefix(_)));
    if rooted {
        anyhow::bail!(PackError::absolute_prefix(prefix));
    }

    let mut segments = Vec::new();
    for segment in prefix.split(['/', '\\']) {
        match segment {
            "" | "." => continue,
            ".." => anyhow::bail!(PackError::escaping_prefix(prefix)),
            name => segments.push(name.to_string()),
        }
    }
    Ok(segments)
}

/// Per-walk state shared by every level of the recursion.
struct Walker<'f> {
    filter: &'f dyn FilterPolicy,
    sort_entries: bool,
}

impl<'f> Walker<'f> {
    async fn list(&self, mut listing: tokio::fs::ReadDir, dir: &Path) -> Result<Vec<OsString>> {
        let mut names = Vec::new();
        while let Some(entry) = listing
            .next_entry()
            .await
            .with_context(|| format!("Failed to list directory {}", dir.display()))?
        {
            names.push(entry.file_name());
        }
        if self.sort_entries {
            names.sort();
        }
        Ok(names)
    }

    fn add_entries<'a>(
        &'a self,
        target: &'a mut Directory,
        dir: &'a Path,
        names: Vec<OsString>,
    ) -> BoxFuture<'a, Result<()>> {
        async move {
            for os_name in names {
                let path = dir.join(&os_name);
                let Some(name) = os_name.to_str() else {
                    anyhow::bail!(PackError::InvalidEntryName { path });
                };
                let metadata = tokio::fs::metadata(&path)
                    .await
                    .with_context(|| format!("Failed to read metadata of {}", path.display()))?;
                let is_dir = metadata.is_dir();

                if !self.filter.include(name, &path, is_dir) {
                    trace!("Filtered out {}", path.display());
                    continue;
                }

                if is_dir {
                    debug!("Adding directory entry {}", path.display());
                    let child = target.ensure_directory(name)?;
                    let listing = tokio::fs::read_dir(&path)
                        .await
                        .with_context(|| format!("Failed to open directory {}", path.display()))?;
                    let child_names = self.list(listing, &path).await?;
                    self.add_entries(child, &path, child_names).await?;
                } else {
                    let content = tokio::fs::read(&path)
                        .await
                        .with_context(|| format!("Failed to read file {}", path.display()))?;
                    debug!("Adding file entry {} ({} bytes)", path.display(), content.len());
                    target.insert_file(name, content)?;
                }
            }
            Ok(())
        }
        .boxed()
    }
}
