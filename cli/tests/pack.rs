//! # distpack CLI Pack Integration Tests
//!
//! File: cli/tests/pack.rs
//!
//! ## Overview
//!
//! End-to-end runs of `distpack pack` against temporary build output
//! directories, checking the console output and the produced archive.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_pack_defaults() {
    let temp = tempdir().expect("Failed to create temp dir");
    write_dist(temp.path()).expect("Failed to write fixture");

    distpack_cmd_in(temp.path())
        .args(["pack", "--sorted"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Zip packing - ")
                .and(predicate::str::contains("  - Preparing files."))
                .and(predicate::str::contains("  - Creating zip archive."))
                .and(predicate::str::contains("  - Created zip archive."))
                .and(predicate::str::contains("  - Md5: "))
                .and(predicate::str::contains("  - Sha256: ")),
        );

    assert_eq!(
        zip_entry_names(&temp.path().join("dist.zip")),
        vec![
            "assets/",
            "assets/a.css",
            "assets/a.js",
            "img/",
            "img/logo.png",
            "index.html",
        ]
    );
}

#[test]
fn test_pack_with_prefix_and_exclude() {
    let temp = tempdir().expect("Failed to create temp dir");
    write_dist(temp.path()).expect("Failed to write fixture");

    distpack_cmd_in(temp.path())
        .args([
            "pack", "dist", "-o", "release", "-n", "site.zip", "-p", "a/b/c", "-e", "/img",
            "--sorted",
        ])
        .assert()
        .success();

    assert_eq!(
        zip_entry_names(&temp.path().join("release/site.zip")),
        vec![
            "a/",
            "a/b/",
            "a/b/c/",
            "a/b/c/assets/",
            "a/b/c/assets/a.css",
            "a/b/c/assets/a.js",
            "a/b/c/index.html",
        ]
    );
}

#[test]
fn test_pack_quiet_and_no_hash() {
    let temp = tempdir().expect("Failed to create temp dir");
    write_dist(temp.path()).expect("Failed to write fixture");

    distpack_cmd_in(temp.path())
        .args(["pack", "-q", "--no-hash"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("  - Created zip archive.")
                .and(predicate::str::contains("  - Preparing files.").not())
                .and(predicate::str::contains("Md5").not()),
        );
}

#[test]
fn test_pack_twice_overwrites() {
    let temp = tempdir().expect("Failed to create temp dir");
    write_dist(temp.path()).expect("Failed to write fixture");

    for _ in 0..2 {
        distpack_cmd_in(temp.path())
            .args(["pack", "--sorted", "-q"])
            .assert()
            .success();
    }
    assert_eq!(zip_entry_names(&temp.path().join("dist.zip")).len(), 6);
}

#[test]
fn test_pack_missing_input_dir() {
    let temp = tempdir().expect("Failed to create temp dir");

    distpack_cmd_in(temp.path())
        .args(["pack", "nowhere"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Something went wrong while building zip file!",
        ))
        .stderr(predicate::str::contains("\"nowhere\" folder does not exist!"));
    assert!(!temp.path().join("dist.zip").exists());
}

#[test]
fn test_pack_absolute_prefix_rejected() {
    let temp = tempdir().expect("Failed to create temp dir");
    write_dist(temp.path()).expect("Failed to write fixture");

    distpack_cmd_in(temp.path())
        .args(["pack", "-p", "/a/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "\"/a/\" pathPrefix must be a relative path",
        ));
}

#[test]
fn test_pack_reads_project_config() {
    let temp = tempdir().expect("Failed to create temp dir");
    write_dist(temp.path()).expect("Failed to write fixture");
    let config = temp.path().join("project.toml");
    fs::write(
        &config,
        "[pack]\nout_file_name = \"configured.zip\"\npath_prefix = \"app\"\nsorted = true\n",
    )
    .expect("Failed to write config");

    distpack_cmd()
        .current_dir(temp.path())
        .args(["pack", "--config"])
        .arg(&config)
        .assert()
        .success();

    let names = zip_entry_names(&temp.path().join("configured.zip"));
    assert_eq!(names.first().map(String::as_str), Some("app/"));
    assert!(names.iter().all(|n| n.starts_with("app/")));
}

#[test]
fn test_pack_invalid_config_file() {
    let temp = tempdir().expect("Failed to create temp dir");
    let config = temp.path().join("bad.toml");
    fs::write(&config, "[pack]\nunknown_key = 1\n").expect("Failed to write config");

    distpack_cmd()
        .current_dir(temp.path())
        .env("DISTPACK_CONFIG", &config)
        .arg("pack")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse TOML"));
}

#[test]
fn test_pack_config_prefix_rejected() {
    let temp = tempdir().expect("Failed to create temp dir");
    write_dist(temp.path()).expect("Failed to write fixture");
    let config = temp.path().join("rooted.toml");
    fs::write(&config, "[pack]\npath_prefix = \"/a/\"\n").expect("Failed to write config");

    distpack_cmd()
        .current_dir(temp.path())
        .env("DISTPACK_CONFIG", &config)
        .arg("pack")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "\"/a/\" pathPrefix must be a relative path",
        ));
    assert!(!temp.path().join("dist.zip").exists());
}
