//! Mock implementations of service traits for testing

use super::traits::GitHubProvider;
use crate::core::{ModfeedError, ModfeedResult};
use crate::github::types::{GitHubRelease, ReleaseAsset};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock GitHub provider for testing
///
/// Releases are keyed by `owner/repo`, assets by download URL. Unregistered
/// releases answer `NotFound` like the API's 404, unregistered assets a
/// `Release` error.
///
/// # Example
///
/// ```
/// use modfeed::di::mocks::MockGitHubProvider;
///
/// let github = MockGitHubProvider::new();
/// github.add_release("owner", "module", MockGitHubProvider::release("v1.0", &["module.zip"]));
/// ```
#[derive(Clone, Default)]
pub struct MockGitHubProvider {
    releases: Arc<Mutex<HashMap<String, GitHubRelease>>>,
    assets: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    downloads: Arc<Mutex<Vec<String>>>,
}

impl MockGitHubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a release whose assets point at `https://example.com/<name>`
    pub fn release(tag: &str, asset_names: &[&str]) -> GitHubRelease {
        GitHubRelease {
            tag_name: tag.to_string(),
            name: None,
            assets: asset_names
                .iter()
                .map(|name| ReleaseAsset {
                    name: name.to_string(),
                    browser_download_url: format!("https://example.com/{}", name),
                    size: 0,
                })
                .collect(),
            body: None,
            published_at: None,
        }
    }

    pub fn add_release(&self, owner: &str, repo: &str, release: GitHubRelease) {
        self.releases
            .lock()
            .unwrap()
            .insert(format!("{}/{}", owner, repo), release);
    }

    pub fn add_asset(&self, url: &str, data: Vec<u8>) {
        self.assets.lock().unwrap().insert(url.to_string(), data);
    }

    /// URLs downloaded so far, in order
    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl GitHubProvider for MockGitHubProvider {
    async fn get_latest_release(&self, owner: &str, repo: &str) -> ModfeedResult<GitHubRelease> {
        self.releases
            .lock()
            .unwrap()
            .get(&format!("{}/{}", owner, repo))
            .cloned()
            .ok_or_else(|| {
                ModfeedError::NotFound(format!("/repos/{}/{}/releases/latest (HTTP 404)", owner, repo))
            })
    }

    async fn download_asset(&self, url: &str) -> ModfeedResult<Vec<u8>> {
        self.downloads.lock().unwrap().push(url.to_string());
        self.assets
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| ModfeedError::Release(format!("Failed to download {}: HTTP 404", url)))
    }
}
