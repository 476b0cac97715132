//! # Pack Result Reporting
//!
//! File: cli/src/commands/pack/report.rs
//!
//! ## Overview
//!
//! What a finished pack run reports, and who gets told. `ArchiveReport`
//! gathers the output path, size, digests and entry counts once the archive
//! exists. A `CompletionObserver` receives either the report or the error;
//! `ConsoleObserver` prints them to the terminal.
//!
use crate::common::archive::tree::ArchiveTree;
use crate::common::fs::digest::{self, FileDigests};
use crate::core::error::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// Facts about a written archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReport {
    pub path: PathBuf,
    /// Size of the archive file in bytes.
    pub size: u64,
    /// `None` when digest reporting is disabled.
    pub digests: Option<FileDigests>,
    pub files: usize,
    pub directories: usize,
    /// Uncompressed size of all packed file contents.
    pub content_len: u64,
}

impl ArchiveReport {
    /// Inspects the archive at `path`, produced from `tree`.
    pub async fn collect(path: &Path, tree: &ArchiveTree, with_digests: bool) -> Result<Self> {
        let size = digest::file_size(path).await?;
        let digests = if with_digests {
            Some(digest::file_digests(path).await?)
        } else {
            None
        };
        Ok(Self {
            path: path.to_path_buf(),
            size,
            digests,
            files: tree.file_count(),
            directories: tree.directory_count(),
            content_len: tree.content_len(),
        })
    }
}

/// The "Zip info" block printed after a successful run.
impl fmt::Display for ArchiveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " Zip info ")?;
        writeln!(f, "  - Path: {}", self.path.display())?;
        writeln!(f, "  - Size: {}", digest::format_file_bytes(self.size))?;
        if let Some(digests) = &self.digests {
            writeln!(f, "  - Md5: {}", digests.md5)?;
            writeln!(f, "  - Sha256: {}", digests.sha256)?;
        }
        Ok(())
    }
}

/// Gets told how a pack run ended. Exactly one of `on_success` and
/// `on_failure` is called per run.
pub trait CompletionObserver {
    /// A pack phase is about to start.
    fn on_step(&self, _message: &str) {}
    fn on_success(&self, report: &ArchiveReport);
    fn on_failure(&self, error: &anyhow::Error);
}

/// Prints progress and results to stdout.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleObserver {
    /// Whether intermediate progress lines are printed.
    pub verbose: bool,
}

impl CompletionObserver for ConsoleObserver {
    fn on_step(&self, message: &str) {
        if self.verbose {
            println!("  - {}", message);
        }
    }

    fn on_success(&self, report: &ArchiveReport) {
        self.on_step("Done.");
        println!("  - Created zip archive.");
        print!("{}", report);
        info!(
            "Packed {} files and {} directories ({} -> {})",
            report.files,
            report.directories,
            digest::format_file_bytes(report.content_len),
            digest::format_file_bytes(report.size)
        );
    }

    fn on_failure(&self, error: &anyhow::Error) {
        println!("  - {}", error);
        println!("Something went wrong while building zip file!");
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::archive::tree::Directory;
    use std::fs;
    use tempfile::tempdir;

    fn small_tree() -> Result<ArchiveTree> {
        let mut root = Directory::new();
        root.ensure_directory("assets")?
            .insert_file("a.js", b"abc".to_vec())?;
        Ok(ArchiveTree::from_root(root))
    }

    #[tokio::test]
    async fn test_collect_with_digests() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("dist.zip");
        fs::write(&path, "abc")?;
        let report = ArchiveReport::collect(&path, &small_tree()?, true).await?;
        assert_eq!(report.size, 3);
        assert_eq!(report.files, 1);
        assert_eq!(report.directories, 1);
        assert_eq!(report.content_len, 3);
        let digests = report.digests.clone().expect("digests requested");
        assert_eq!(digests.md5, "900150983cd24fb0d6963f7d28e17f72");

        let rendered = report.to_string();
        assert!(rendered.contains(" Zip info "));
        assert!(rendered.contains("  - Size: 3 Bytes"));
        assert!(rendered.contains("  - Md5: 900150983cd24fb0d6963f7d28e17f72"));
        assert!(rendered.contains("  - Sha256: "));
        Ok(())
    }

    #[tokio::test]
    async fn test_collect_without_digests() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("dist.zip");
        fs::write(&path, vec![0u8; 2048])?;
        let report = ArchiveReport::collect(&path, &small_tree()?, false).await?;
        assert!(report.digests.is_none());
        let rendered = report.to_string();
        assert!(rendered.contains("  - Size: 2 KB"));
        assert!(!rendered.contains("Md5"));
        Ok(())
    }

    #[test]
    fn test_display_zip_info_block() {
        let report = ArchiveReport {
            path: PathBuf::from("/out/dist.zip"),
            size: 1536,
            digests: Some(FileDigests {
                md5: "m".into(),
                sha256: "s".into(),
            }),
            files: 1,
            directories: 0,
            content_len: 10,
        };
        assert_eq!(
            report.to_string(),
            " Zip info \n  - Path: /out/dist.zip\n  - Size: 1.5 KB\n  - Md5: m\n  - Sha256: s\n"
        );
    }

    #[tokio::test]
    async fn test_collect_missing_archive() -> Result<()> {
        let dir = tempdir()?;
        let result = ArchiveReport::collect(&dir.path().join("none.zip"), &small_tree()?, true).await;
        assert!(result.is_err());
        Ok(())
    }
}
