//! # Archive Tree (`common::archive::tree`)
//!
//! File: cli/src/common/archive/tree.rs
//!
//! ## Overview
//!
//! In-memory representation of everything that will be written to the archive.
//! A tree is a root `Directory` whose children are `Entry` values, either a
//! nested `Directory` or a file holding its full byte content.
//!
//! Children keep their insertion order, and that order is the order in which
//! the serializer emits them. Names are unique among siblings.
//!
//! The tree is mutated only while an `ArchiveBuilder` owns it. Once
//! `ArchiveBuilder::build` hands out an `ArchiveTree`, it is read-only.
//!
use crate::core::error::{PackError, Result};
use std::collections::HashMap;

/// A single node of the archive tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Directory(Directory),
    File(Vec<u8>),
}

/// A directory node with ordered, uniquely named children.
///
/// `index` maps each child name to its slot in `children`, so lookups stay
/// constant-time however wide a directory gets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    children: Vec<(String, Entry)>,
    index: HashMap<String, usize>,
}

impl Directory {
    /// Creates an empty directory node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.children.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    fn push(&mut self, name: &str, entry: Entry) -> usize {
        let idx = self.children.len();
        self.children.push((name.to_string(), entry));
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// Returns the child directory `name`, creating it at the end of the
    /// child list when absent.
    ///
    /// ## Errors
    ///
    /// `PackError::DirectoryRegistration` if a file already holds `name`.
    pub fn ensure_directory(&mut self, name: &str) -> Result<&mut Directory> {
        let idx = match self.position(name) {
            Some(idx) => idx,
            None => self.push(name, Entry::Directory(Directory::new())),
        };
        match &mut self.children[idx].1 {
            Entry::Directory(dir) => Ok(dir),
            Entry::File(_) => Err(PackError::DirectoryRegistration {
                name: name.to_string(),
            }
            .into()),
        }
    }

    /// Stores `content` as file `name`. An existing file of the same name is
    /// replaced in place and keeps its position.
    ///
    /// ## Errors
    ///
    /// `PackError::EntryConflict` if a directory already holds `name`.
    pub fn insert_file(&mut self, name: &str, content: Vec<u8>) -> Result<()> {
        match self.position(name) {
            Some(idx) => match &mut self.children[idx].1 {
                Entry::File(existing) => *existing = content,
                Entry::Directory(_) => {
                    anyhow::bail!(PackError::EntryConflict {
                        name: name.to_string()
                    })
                }
            },
            None => {
                self.push(name, Entry::File(content));
            }
        }
        Ok(())
    }

    /// Opens the existing child directory `name` for insertion.
    pub(crate) fn directory_mut(&mut self, name: &str) -> Option<&mut Directory> {
        let idx = self.position(name)?;
        match &mut self.children[idx].1 {
            Entry::Directory(dir) => Some(dir),
            Entry::File(_) => None,
        }
    }
}

/// A flattened view of one tree node, as produced by [`ArchiveTree::entries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRef<'a> {
    Directory,
    File(&'a [u8]),
}

/// An immutable, fully built archive tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveTree {
    root: Directory,
}

impl ArchiveTree {
    pub(crate) fn from_root(root: Directory) -> Self {
        Self { root }
    }

    /// All entries in serialization order (pre-order, insertion order among
    /// siblings), paired with their `/`-separated in-archive path.
    /// Directory paths end with `/`.
    pub fn entries(&self) -> Vec<(String, EntryRef<'_>)> {
        let mut out = Vec::new();
        collect_entries(&self.root, "", &mut out);
        out
    }

    pub fn file_count(&self) -> usize {
        self.entries()
            .iter()
            .filter(|(_, e)| matches!(e, EntryRef::File(_)))
            .count()
    }

    /// Number of directory entries, prefix directories included.
    pub fn directory_count(&self) -> usize {
        self.entries()
            .iter()
            .filter(|(_, e)| matches!(e, EntryRef::Directory))
            .count()
    }

    /// Total uncompressed size of all file contents.
    pub fn content_len(&self) -> u64 {
        self.entries()
            .iter()
            .map(|(_, e)| match e {
                EntryRef::File(bytes) => bytes.len() as u64,
                EntryRef::Directory => 0,
            })
            .sum()
    }
}

fn collect_entries<'a>(dir: &'a Directory, base: &str, out: &mut Vec<(String, EntryRef<'a>)>) {
    for (name, entry) in dir.children() {
        match entry {
            Entry::Directory(sub) => {
                let path = format!("{base}{name}/");
                out.push((path.clone(), EntryRef::Directory));
                collect_entries(sub, &path, out);
            }
            Entry::File(content) => {
                out.push((format!("{base}{name}"), EntryRef::File(content)));
            }
        }
    }
}
