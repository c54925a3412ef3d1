use crate::core::error::ModfeedResult;
use std::path::{Path, PathBuf};

/// Name of the manifest file polled by feed consumers
pub const MANIFEST_FILE: &str = "update.json";

/// Name of the changelog file published next to the manifest
pub const CHANGELOG_FILE: &str = "changelog.md";

/// Name of the mirrored archive written when a repository is repacked
pub const MODULE_ZIP_FILE: &str = "module.zip";

/// Get the per-repository directory inside the output tree (<output>/<repo>)
pub fn repo_dir(output_dir: &Path, repo: &str) -> PathBuf {
    output_dir.join(repo)
}

/// Get the manifest path (<output>/<repo>/update.json)
pub fn manifest_path(output_dir: &Path, repo: &str) -> PathBuf {
    repo_dir(output_dir, repo).join(MANIFEST_FILE)
}

/// Get the changelog path (<output>/<repo>/changelog.md)
pub fn changelog_path(output_dir: &Path, repo: &str) -> PathBuf {
    repo_dir(output_dir, repo).join(CHANGELOG_FILE)
}

/// Get the mirrored archive path (<output>/<repo>/module.zip)
pub fn module_zip_path(output_dir: &Path, repo: &str) -> PathBuf {
    repo_dir(output_dir, repo).join(MODULE_ZIP_FILE)
}

/// Build the public raw-file URL of a published file
///
/// Trailing slashes on `base` are ignored, so both
/// `https://host/feed/src` and `https://host/feed/src/` join the same way.
pub fn raw_url(base: &str, repo: &str, file: &str) -> String {
    format!("{}/{}/{}", base.trim_end_matches('/'), repo, file)
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> ModfeedResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Ensure the parent directory of a file exists
pub fn ensure_parent(file: &Path) -> ModfeedResult<()> {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}
