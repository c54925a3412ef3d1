//! GitHub integration for the feed
//!
//! This module provides functionality for interacting with GitHub to:
//! - Fetch the latest release of a repository
//! - Download release assets

pub mod client;
pub mod types;

pub use client::GitHubClient;
pub use types::{GitHubRelease, ReleaseAsset};
