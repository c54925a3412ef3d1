//! Core utilities shared by the modfeed binary and library.
//!
//! Holds the error type, output-tree path helpers and version code
//! derivation. Nothing in here talks to the network.

pub mod core;

pub use core::error::{ModfeedError, ModfeedResult};
