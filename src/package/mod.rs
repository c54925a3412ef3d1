pub mod repacker;

pub use repacker::{repack_archive, repack_file, RepackReport, SkippedEntry};
