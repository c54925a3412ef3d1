//! Publishing update manifests and changelogs into the feed tree

pub mod feed_writer;
pub mod manifest;

pub use feed_writer::{FeedWriter, EMPTY_CHANGELOG};
pub use manifest::UpdateManifest;
