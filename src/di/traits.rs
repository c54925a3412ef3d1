//! Trait definitions for dependency injection

use crate::core::ModfeedResult;
use crate::github::types::GitHubRelease;
use async_trait::async_trait;

/// Trait for GitHub release operations
///
/// Provides async methods for looking up the latest release of a repository
/// and downloading its assets.
#[async_trait]
pub trait GitHubProvider: Send + Sync {
    /// Get the latest release for a repository
    async fn get_latest_release(&self, owner: &str, repo: &str) -> ModfeedResult<GitHubRelease>;

    /// Download a release asset into memory
    async fn download_asset(&self, url: &str) -> ModfeedResult<Vec<u8>>;
}
