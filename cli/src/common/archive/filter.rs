//! # Entry Filters (`common::archive::filter`)
//!
//! File: cli/src/common/archive/filter.rs
//!
//! ## Overview
//!
//! A `FilterPolicy` decides, per directory-walk entry, whether that entry goes
//! into the archive. Returning `false` for a directory prunes its whole
//! subtree; the walk never descends into it.
//!
//! Provided policies:
//! - `AcceptAll`: the default, keeps everything.
//! - `ExcludePatterns`: drops entries whose full path contains one of a set of
//!   substrings, and optionally hidden (dot-prefixed) entries.
//! - Any `Fn(&str, &Path, bool) -> bool` closure.
//!
use std::path::Path;

/// Inclusion test applied to every entry found while walking the source.
pub trait FilterPolicy: Send + Sync {
    /// `name` is the bare entry name, `path` the full source path (the walked
    /// root joined with the entry's relative path), `is_dir` whether the
    /// entry is a directory.
    fn include(&self, name: &str, path: &Path, is_dir: bool) -> bool;
}

impl<F> FilterPolicy for F
where
    F: Fn(&str, &Path, bool) -> bool + Send + Sync,
{
    fn include(&self, name: &str, path: &Path, is_dir: bool) -> bool {
        self(name, path, is_dir)
    }
}

/// Keeps every entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl FilterPolicy for AcceptAll {
    fn include(&self, _name: &str, _path: &Path, _is_dir: bool) -> bool {
        true
    }
}

/// Rejects entries by substring match on the `/`-normalized source path.
#[derive(Debug, Clone, Default)]
pub struct ExcludePatterns {
    patterns: Vec<String>,
    skip_hidden: bool,
}

impl ExcludePatterns {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
            skip_hidden: false,
        }
    }

    /// Also reject entries whose name starts with `.`.
    pub fn skip_hidden(mut self, skip: bool) -> Self {
        self.skip_hidden = skip;
        self
    }

    /// True when the policy accepts every entry.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty() && !self.skip_hidden
    }
}

impl FilterPolicy for ExcludePatterns {
    fn include(&self, name: &str, path: &Path, _is_dir: bool) -> bool {
        if self.skip_hidden && name.starts_with('.') {
            return false;
        }
        let normalized = path.to_string_lossy().replace('\\', "/");
        !self
            .patterns
            .iter()
            .any(|pattern| normalized.contains(pattern.as_str()))
    }
}
