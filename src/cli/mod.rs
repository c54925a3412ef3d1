pub mod repack;
pub mod update;
pub mod version_code;
