//! modfeed: mirror upstream GitHub releases into a module update feed
//!
//! This crate provides the library behind the `modfeed` binary, re-exporting
//! core functionality from `modfeed-core` and organizing the pipeline that
//! turns a list of repositories into published `update.json` manifests.

pub use modfeed_core::{ModfeedError, ModfeedResult};

/// Core module re-exported from modfeed-core.
pub mod core {
    pub use modfeed_core::core::*;
    pub use modfeed_core::*;
}

/// Feed configuration.
pub mod config;

/// Dependency injection infrastructure.
pub mod di;

/// GitHub release lookup.
pub mod github;

/// Archive repacking.
pub mod package;

/// Manifest and changelog publishing.
pub mod publish;

/// Asset selection and version codes.
pub mod release;

/// The per-repository update pipeline.
pub mod updater;
