//! Dependency injection infrastructure for modfeed
//!
//! The updater talks to GitHub through the [`GitHubProvider`] trait so the
//! whole pipeline can run against [`mocks::MockGitHubProvider`] in tests.
//!
//! # Example (Testing)
//! ```
//! use modfeed::di::{mocks::MockGitHubProvider, GitHubProvider};
//! use std::sync::Arc;
//!
//! let github: Arc<dyn GitHubProvider> = Arc::new(MockGitHubProvider::new());
//! ```

pub mod mocks;
pub mod traits;

pub use traits::GitHubProvider;
