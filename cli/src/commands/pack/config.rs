//! # Pack Command Configuration
//!
//! File: cli/src/commands/pack/config.rs
//!
//! ## Overview
//!
//! This module defines the `distpack pack` arguments and merges them with the
//! file configuration from `core::config` into one `PackConfig`:
//! 1. Command-line arguments (highest priority)
//! 2. `[pack]` table from the configuration files
//! 3. Built-in defaults (lowest priority)
//!
//! Defaults: pack `./dist` into `./dist.zip`, no prefix, progress output and
//! digests enabled.
//!
use crate::common::archive::filter::ExcludePatterns;
use crate::core::config::{self, PackSection};
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_IN_DIR: &str = "./dist";
pub const DEFAULT_OUT_DIR: &str = "./";
pub const DEFAULT_OUT_FILE_NAME: &str = "dist.zip";

/// # Pack Command Arguments (`PackArgs`)
///
/// Every option is optional so that an unset flag can fall back to the
/// configuration file before the built-in default applies.
#[derive(Parser, Debug, Default, Clone)]
pub struct PackArgs {
    /// Directory to archive. Defaults to `./dist`.
    pub in_dir: Option<PathBuf>,

    /// Directory the archive is written to. Defaults to `./`.
    #[arg(long, short = 'o')]
    pub out_dir: Option<PathBuf>,

    /// Archive file name. Defaults to `dist.zip`.
    #[arg(long, short = 'n')]
    pub out_file_name: Option<String>,

    /// Relative directory chain all content is nested under inside the archive.
    #[arg(long, short = 'p')]
    pub path_prefix: Option<String>,

    /// Leave out entries whose source path contains PATTERN. Repeatable.
    #[arg(long = "exclude", short = 'e', value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Leave out hidden (dot-prefixed) files and directories.
    #[arg(long)]
    pub skip_hidden: bool,

    /// Sort directory listings by name for platform-independent entry order.
    #[arg(long)]
    pub sorted: bool,

    /// Only print the final result, not the progress steps.
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Do not compute MD5 / SHA-256 of the archive.
    #[arg(long)]
    pub no_hash: bool,

    /// Read configuration from FILE instead of discovering `.distpack.toml`.
    #[arg(long, short = 'c', value_name = "FILE", env = "DISTPACK_CONFIG")]
    pub config: Option<PathBuf>,
}

/// # Effective Pack Configuration (`PackConfig`)
///
/// Final settings for one pack run after merging all sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackConfig {
    pub in_dir: PathBuf,
    pub out_dir: PathBuf,
    pub out_file_name: String,
    pub path_prefix: String,
    pub exclude: Vec<String>,
    pub skip_hidden: bool,
    pub sorted: bool,
    pub enable_logging: bool,
    pub enable_file_hash: bool,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            in_dir: PathBuf::from(DEFAULT_IN_DIR),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            out_file_name: DEFAULT_OUT_FILE_NAME.to_string(),
            path_prefix: String::new(),
            exclude: Vec::new(),
            skip_hidden: false,
            sorted: false,
            enable_logging: true,
            enable_file_hash: true,
        }
    }
}

impl PackConfig {
    /// Merges arguments over a `[pack]` section over the defaults.
    pub fn merge(args: PackArgs, file: PackSection) -> Self {
        let defaults = Self::default();
        let exclude = if args.exclude.is_empty() {
            file.exclude.unwrap_or(defaults.exclude)
        } else {
            args.exclude
        };
        Self {
            in_dir: args
                .in_dir
                .or_else(|| file.in_dir.map(PathBuf::from))
                .unwrap_or(defaults.in_dir),
            out_dir: args
                .out_dir
                .or_else(|| file.out_dir.map(PathBuf::from))
                .unwrap_or(defaults.out_dir),
            out_file_name: args
                .out_file_name
                .or(file.out_file_name)
                .unwrap_or(defaults.out_file_name),
            path_prefix: args
                .path_prefix
                .or(file.path_prefix)
                .unwrap_or(defaults.path_prefix),
            exclude,
            // Flags can only switch a behaviour on; off comes from the file or default.
            skip_hidden: args.skip_hidden || file.skip_hidden.unwrap_or(defaults.skip_hidden),
            sorted: args.sorted || file.sorted.unwrap_or(defaults.sorted),
            enable_logging: !args.quiet
                && file.enable_logging.unwrap_or(defaults.enable_logging),
            enable_file_hash: !args.no_hash
                && file.enable_file_hash.unwrap_or(defaults.enable_file_hash),
        }
    }

    /// The filter policy described by `exclude` and `skip_hidden`.
    pub fn filter(&self) -> ExcludePatterns {
        ExcludePatterns::new(self.exclude.iter().cloned()).skip_hidden(self.skip_hidden)
    }
}

/// # Load and Merge Pack Configuration (`load_and_merge_config`)
///
/// Loads the file configuration (explicit `--config` file or discovered
/// files) and merges the command-line arguments over it.
pub fn load_and_merge_config(args: PackArgs) -> Result<PackConfig> {
    let file_config = config::load_config(args.config.as_deref())?;
    let merged = PackConfig::merge(args, file_config.pack);
    debug!("Effective pack config: {:?}", merged);
    Ok(merged)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::archive::filter::FilterPolicy;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let merged = PackConfig::merge(PackArgs::default(), PackSection::default());
        assert_eq!(merged, PackConfig::default());
        assert_eq!(merged.in_dir, PathBuf::from("./dist"));
        assert_eq!(merged.out_file_name, "dist.zip");
        assert!(merged.enable_logging);
        assert!(merged.enable_file_hash);
    }

    #[test]
    fn test_args_override_file() {
        let args = PackArgs {
            in_dir: Some(PathBuf::from("public")),
            path_prefix: Some("app".into()),
            exclude: vec!["img".into()],
            no_hash: true,
            ..Default::default()
        };
        let file = PackSection {
            in_dir: Some("build".into()),
            out_dir: Some("release".into()),
            exclude: Some(vec![".map".into()]),
            enable_file_hash: Some(true),
            enable_logging: Some(false),
            ..Default::default()
        };
        let merged = PackConfig::merge(args, file);
        assert_eq!(merged.in_dir, PathBuf::from("public"));
        assert_eq!(merged.out_dir, PathBuf::from("release"));
        assert_eq!(merged.path_prefix, "app");
        assert_eq!(merged.exclude, vec!["img".to_string()]);
        assert!(!merged.enable_file_hash);
        assert!(!merged.enable_logging);
    }

    #[test]
    fn test_flags_switch_on_over_file() {
        let args = PackArgs {
            sorted: true,
            ..Default::default()
        };
        let file = PackSection {
            sorted: Some(false),
            skip_hidden: Some(true),
            ..Default::default()
        };
        let merged = PackConfig::merge(args, file);
        assert!(merged.sorted);
        assert!(merged.skip_hidden);
    }

    #[test]
    fn test_filter_from_config() {
        let config = PackConfig {
            exclude: vec!["img".into()],
            skip_hidden: true,
            ..Default::default()
        };
        let filter = config.filter();
        assert!(!filter.include("img", Path::new("dist/img"), true));
        assert!(!filter.include(".env", Path::new("dist/.env"), false));
        assert!(filter.include("a.js", Path::new("dist/a.js"), false));
    }

    #[test]
    fn test_parse_args() {
        let args = PackArgs::parse_from([
            "pack", "build", "-o", "out", "-n", "site.zip", "-p", "a/b", "-e", "img", "-e",
            ".map", "--sorted", "-q",
        ]);
        assert_eq!(args.in_dir, Some(PathBuf::from("build")));
        assert_eq!(args.out_dir, Some(PathBuf::from("out")));
        assert_eq!(args.out_file_name.as_deref(), Some("site.zip"));
        assert_eq!(args.path_prefix.as_deref(), Some("a/b"));
        assert_eq!(args.exclude, vec!["img".to_string(), ".map".to_string()]);
        assert!(args.sorted);
        assert!(args.quiet);
        assert!(!args.no_hash);
    }

    #[test]
    fn test_load_and_merge_with_explicit_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("distpack.toml");
        fs::write(&path, "[pack]\nout_file_name = \"from-file.zip\"\nsorted = true\n")?;
        let args = PackArgs {
            config: Some(path),
            ..Default::default()
        };
        let merged = load_and_merge_config(args)?;
        assert_eq!(merged.out_file_name, "from-file.zip");
        assert!(merged.sorted);
        Ok(())
    }
}
