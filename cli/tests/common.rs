//! # distpack CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each `.rs` file
//! there is compiled as its own test crate and runs the compiled `distpack`
//! binary.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::io;
use std::path::Path;

/// # Get distpack Command (`distpack_cmd`)
///
/// An `assert_cmd::Command` for the `distpack` binary built for this test run.
///
/// ## Panics
/// Panics if the `distpack` binary cannot be found via `Command::cargo_bin`.
pub fn distpack_cmd() -> Command {
    Command::cargo_bin("distpack").expect("Failed to find distpack binary for testing")
}

/// # Hermetic distpack Command (`distpack_cmd_in`)
///
/// A `distpack` command running in `dir`, pointed at an empty configuration
/// file so neither a user config nor a stray `.distpack.toml` leaks in.
pub fn distpack_cmd_in(dir: &Path) -> Command {
    let config = dir.join("empty-distpack.toml");
    fs::write(&config, "").expect("Failed to write empty config file");
    let mut cmd = distpack_cmd();
    cmd.current_dir(dir).env("DISTPACK_CONFIG", config);
    cmd
}

/// Writes a small build output tree under `root/dist`.
pub fn write_dist(root: &Path) -> io::Result<()> {
    let dist = root.join("dist");
    fs::create_dir_all(dist.join("assets"))?;
    fs::create_dir_all(dist.join("img"))?;
    fs::write(dist.join("index.html"), "<html></html>")?;
    fs::write(dist.join("assets/a.js"), "console.log('a')")?;
    fs::write(dist.join("assets/a.css"), "body{}")?;
    fs::write(dist.join("img/logo.png"), [0x89, 0x50, 0x4e, 0x47])?;
    Ok(())
}

/// Entry names of the ZIP file at `path`, in stored order.
pub fn zip_entry_names(path: &Path) -> Vec<String> {
    let file = fs::File::open(path).expect("Failed to open archive");
    let mut archive = zip::ZipArchive::new(file).expect("Failed to read archive");
    (0..archive.len())
        .map(|idx| {
            archive
                .by_index(idx)
                .expect("Failed to read archive entry")
                .name()
                .to_string()
        })
        .collect()
}
