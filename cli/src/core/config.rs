//! # distpack Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads the file-based configuration for distpack. Command-line
//! flags are merged on top of it later by `commands::pack::config`.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.distpack.toml` in the current directory or the
//!    nearest ancestor (the search stops at a directory holding `.git`)
//! 2. User-specific `<config dir>/distpack/config.toml`
//! 3. Nothing: every key is optional and defaults live with the command
//!
//! An explicit file given with `--config` replaces discovery entirely.
//!
//! Every key is an `Option`, so merging is a plain "project wins when set".
//! Paths have `~` expanded after merging.
//!
//! ## Examples
//!
//! ```toml
//! [pack]
//! in_dir = "./dist"
//! out_dir = "./release"
//! out_file_name = "site.zip"
//! path_prefix = "site"
//! exclude = [".map", "/drafts"]
//! sorted = true
//! ```
//!
use crate::core::error::{PackError, Result};
use anyhow::Context;
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// File name of the project configuration.
pub const PROJECT_CONFIG_FILENAME: &str = ".distpack.toml";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub pack: PackSection,
}

/// The `[pack]` table. Unset keys fall through to the next source.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PackSection {
    /// Directory to archive (can use ~).
    pub in_dir: Option<String>,
    /// Directory the archive is written to (can use ~).
    pub out_dir: Option<String>,
    /// Archive file name.
    pub out_file_name: Option<String>,
    /// Relative directory chain inside the archive.
    pub path_prefix: Option<String>,
    /// Substrings; entries whose source path contains one are left out.
    pub exclude: Option<Vec<String>>,
    /// Leave out dot-prefixed entries.
    pub skip_hidden: Option<bool>,
    /// Sort directory listings by name.
    pub sorted: Option<bool>,
    /// Print progress lines.
    pub enable_logging: Option<bool>,
    /// Report MD5 and SHA-256 of the archive.
    pub enable_file_hash: Option<bool>,
}

/// Loads, merges and validates configuration.
///
/// With `explicit` set, only that file is read and it must exist. Otherwise
/// the user and project files are discovered and merged.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "distpack", "distpack") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file ({PROJECT_CONFIG_FILENAME}) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks from `start` towards the filesystem root looking for the project
/// configuration file. A directory containing `.git` ends the search.
pub fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path: &Path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let Some(project) = project else {
        return user;
    };
    let (user, project) = (user.pack, project.pack);
    Config {
        pack: PackSection {
            in_dir: project.in_dir.or(user.in_dir),
            out_dir: project.out_dir.or(user.out_dir),
            out_file_name: project.out_file_name.or(user.out_file_name),
            path_prefix: project.path_prefix.or(user.path_prefix),
            exclude: project.exclude.or(user.exclude),
            skip_hidden: project.skip_hidden.or(user.skip_hidden),
            sorted: project.sorted.or(user.sorted),
            enable_logging: project.enable_logging.or(user.enable_logging),
            enable_file_hash: project.enable_file_hash.or(user.enable_file_hash),
        },
    }
}

fn expand_config_paths(config: &mut Config) {
    for dir in [&mut config.pack.in_dir, &mut config.pack.out_dir]
        .into_iter()
        .flatten()
    {
        *dir = shellexpand::tilde(dir.as_str()).into_owned();
        debug!("Expanded configured path: {}", dir);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if let Some(name) = &config.pack.out_file_name {
        if name.trim().is_empty() {
            anyhow::bail!(PackError::Config(
                "out_file_name must not be empty".to_string()
            ));
        }
    }
    Ok(())
}
