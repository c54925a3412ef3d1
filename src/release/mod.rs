//! Picking the published archive out of a release

pub mod selector;

pub use modfeed_core::core::version::{version_code, FALLBACK_VERSION_CODE};
pub use selector::select_asset;
