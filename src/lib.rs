//! # reposync - Manifest-Driven Subtree Synchronization
//!
//! Copies a curated subset of files from a source directory tree into a
//! destination directory tree, optionally pruning the destination first, and
//! optionally automating the resulting branch/commit/push through a git
//! remote. Everything outside the synchronized set is left untouched.

// Module declarations
pub mod commands;
pub mod config;
pub mod manifest;
pub mod sync;
pub mod types;
pub mod vcs;

// Re-export commonly used types
pub use config::Config;
pub use manifest::{Manifest, Matcher, Rule};
pub use sync::{synchronize, SyncOptions};
pub use types::{CleanupMode, SyncError, SyncFailure, SyncReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
