//! GitHub API type definitions

use serde::{Deserialize, Serialize};

/// GitHub release information
///
/// Only the fields the feed needs are required; everything else GitHub
/// returns is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRelease {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

/// GitHub release asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
    #[serde(default)]
    pub size: u64,
}

impl ReleaseAsset {
    /// Whether the asset is a zip archive (by file name)
    pub fn is_zip(&self) -> bool {
        self.name.ends_with(".zip")
    }
}

impl GitHubRelease {
    /// Release notes, or `None` when GitHub returned an empty body
    pub fn changelog(&self) -> Option<&str> {
        self.body.as_deref().filter(|b| !b.is_empty())
    }
}
