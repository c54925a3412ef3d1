//! Common utilities for integration tests

use assert_cmd::Command;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// The modfeed binary with any ambient GitHub token removed
pub fn modfeed_command() -> Command {
    let mut cmd = Command::cargo_bin("modfeed").unwrap();
    cmd.env_remove("GH_TOKEN").env_remove("GITHUB_TOKEN");
    cmd
}

pub const MODULE_PROP: &str = "id=example\nname=Example Module\nversion=v1.4.0\n";

/// A deflated module archive with module.prop and one script
pub fn module_zip() -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    writer.start_file("module.prop", options).unwrap();
    writer.write_all(MODULE_PROP.as_bytes()).unwrap();
    writer.start_file("service.sh", options).unwrap();
    writer.write_all(b"#!/system/bin/sh\nsleep 5\n").unwrap();

    writer.finish().unwrap().into_inner()
}
