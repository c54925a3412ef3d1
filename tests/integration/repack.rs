//! Tests for `modfeed repack`

use super::common::{modfeed_command, module_zip};
use predicates::prelude::*;
use std::fs::{self, File};
use tempfile::TempDir;
use zip::{CompressionMethod, ZipArchive};

#[test]
fn test_repack_local_archive() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("release.zip");
    let output = temp.path().join("mirror").join("module.zip");
    fs::write(&input, module_zip()).unwrap();

    modfeed_command()
        .arg("repack")
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 entries stored"))
        .stdout(predicate::str::contains("id=example"));

    let mut archive = ZipArchive::new(File::open(&output).unwrap()).unwrap();
    for index in 0..archive.len() {
        assert_eq!(
            archive.by_index(index).unwrap().compression(),
            CompressionMethod::Stored
        );
    }
}

#[test]
fn test_repack_reports_missing_required_entry() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("release.zip");
    fs::write(&input, module_zip()).unwrap();

    modfeed_command()
        .arg("repack")
        .arg(&input)
        .arg(&input)
        .args(["--required-entry", "META-INF/updater-script"])
        .assert()
        .success()
        .stdout(predicate::str::contains("META-INF/updater-script not found"));
}

#[test]
fn test_repack_rejects_non_zip() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("notes.txt");
    fs::write(&input, "not an archive").unwrap();

    modfeed_command()
        .arg("repack")
        .arg(&input)
        .arg(temp.path().join("out.zip"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid zip archive"));
}
