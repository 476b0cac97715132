//! # distpack Pack Command
//!
//! File: cli/src/commands/pack/mod.rs
//!
//! ## Overview
//!
//! `distpack pack` archives a build output directory into one ZIP file. This
//! module is the orchestration layer around the packing engine in
//! `common::archive`: it merges configuration, drives the two packing phases,
//! collects the size/digest report and notifies a `CompletionObserver`.
//!
//! ## Architecture
//!
//! - `config.rs`: argument definitions and configuration merging
//! - `report.rs`: `ArchiveReport`, `CompletionObserver`, `ConsoleObserver`
//!
//! ## Examples
//!
//! ```bash
//! # Pack ./dist into ./dist.zip
//! distpack pack
//!
//! # Nest everything under app/ and leave out source maps
//! distpack pack ./build -o release -n site.zip -p app -e .map
//! ```
//!
//! Pack flow:
//! 1. Load and merge configuration
//! 2. Build the archive tree from the input directory
//! 3. Serialize it to the output path
//! 4. Report size and digests, notify the observer
//!
use crate::common::archive::builder::{ArchiveBuilder, BuildOptions};
use crate::common::archive::zip;
use crate::common::fs::io;
use crate::core::error::Result;
use tracing::{debug, info};

pub use config::PackArgs;

/// Argument definitions and configuration merging for `distpack pack`.
pub mod config;

/// Run reports and completion observers.
pub mod report;

use config::PackConfig;
use report::{ArchiveReport, CompletionObserver, ConsoleObserver};

/// # Handle Pack Command (`handle_pack`)
///
/// Entry point for `distpack pack`. Loads the configuration, runs the pack
/// and reports to the console.
///
/// ## Returns
///
/// * `Result<()>`: `Err` if configuration loading or any packing step
///   failed. The console observer has already printed the failure by then.
pub async fn handle_pack(args: PackArgs) -> Result<()> {
    info!("Handling pack command with args: {:?}", args);

    let config = match config::load_and_merge_config(args) {
        Ok(config) => config,
        Err(e) => {
            ConsoleObserver { verbose: true }.on_failure(&e);
            return Err(e);
        }
    };
    let observer = ConsoleObserver {
        verbose: config.enable_logging,
    };
    run_pack(&config, &observer).await.map(|_| ())
}

/// # Run Pack (`run_pack`)
///
/// Packs according to `config` and tells `observer` how it went: exactly one
/// of `on_success` / `on_failure` is called.
pub async fn run_pack<O>(config: &PackConfig, observer: &O) -> Result<ArchiveReport>
where
    O: CompletionObserver + ?Sized,
{
    match pack(config, observer).await {
        Ok(report) => {
            observer.on_success(&report);
            Ok(report)
        }
        Err(e) => {
            observer.on_failure(&e);
            Err(e)
        }
    }
}

async fn pack<O>(config: &PackConfig, observer: &O) -> Result<ArchiveReport>
where
    O: CompletionObserver + ?Sized,
{
    let in_dir = io::absolute_path(&config.in_dir)?;
    println!("Zip packing - \"{}\" folder :", in_dir.display());

    let mut options = BuildOptions::default()
        .path_prefix(config.path_prefix.as_str())
        .sort_entries(config.sorted);
    let filter = config.filter();
    if !filter.is_empty() {
        debug!("Filtering entries with {:?}", filter);
        options = options.filter(filter);
    }
    let mut builder = ArchiveBuilder::new(options)?;

    observer.on_step("Preparing files.");
    builder.add_directory(&config.in_dir).await?;
    let tree = builder.build();

    observer.on_step("Creating zip archive.");
    let written = zip::save(&tree, &config.out_dir, &config.out_file_name).await?;

    ArchiveReport::collect(&written, &tree, config.enable_file_hash).await
}
