use crate::core::path::{
    changelog_path, ensure_parent, manifest_path, module_zip_path, raw_url, CHANGELOG_FILE,
    MODULE_ZIP_FILE,
};
use crate::core::ModfeedResult;
use crate::publish::manifest::UpdateManifest;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Text published when a release has no notes
pub const EMPTY_CHANGELOG: &str = "none";

/// Writes manifests, changelogs and mirrored archives into the output tree
pub struct FeedWriter {
    output_dir: PathBuf,
    raw_base_url: String,
}

impl FeedWriter {
    /// Create a new feed writer
    pub fn new(output_dir: &Path, raw_base_url: &str) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            raw_base_url: raw_base_url.to_string(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write `<repo>/changelog.md` and return its public URL
    ///
    /// A missing or empty body is published as `none`.
    pub fn write_changelog(&self, repo: &str, body: Option<&str>) -> ModfeedResult<String> {
        let path = changelog_path(&self.output_dir, repo);
        ensure_parent(&path)?;

        let text = body.filter(|b| !b.is_empty()).unwrap_or(EMPTY_CHANGELOG);
        fs::write(&path, text)?;
        debug!(path = %path.display(), "wrote changelog");

        Ok(self.changelog_url(repo))
    }

    /// Write `<repo>/update.json`
    pub fn write_manifest(&self, repo: &str, manifest: &UpdateManifest) -> ModfeedResult<PathBuf> {
        let path = manifest_path(&self.output_dir, repo);
        ensure_parent(&path)?;

        fs::write(&path, manifest.to_json()?)?;
        debug!(path = %path.display(), "wrote manifest");

        Ok(path)
    }

    /// Local path of the mirrored archive for a repository
    pub fn module_zip_path(&self, repo: &str) -> PathBuf {
        module_zip_path(&self.output_dir, repo)
    }

    pub fn changelog_url(&self, repo: &str) -> String {
        raw_url(&self.raw_base_url, repo, CHANGELOG_FILE)
    }

    pub fn module_zip_url(&self, repo: &str) -> String {
        raw_url(&self.raw_base_url, repo, MODULE_ZIP_FILE)
    }
}
