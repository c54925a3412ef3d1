//! CLI integration tests for the `modfeed` binary

mod common;
mod repack;
mod update;
