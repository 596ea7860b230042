//! Version-control driver capability
//!
//! The synchronization core never touches git; the orchestration layer drives
//! it through this trait so tests never require an actual remote.

mod git;

pub use git::GitDriver;

use crate::types::SyncError;

/// Operations the orchestration layer needs from a version-control backend
pub trait VersionControlDriver {
    /// Check out an existing branch
    fn checkout(&self, branch: &str) -> Result<(), SyncError>;

    /// Create a new branch from the current HEAD and check it out
    fn checkout_new(&self, branch: &str) -> Result<(), SyncError>;

    /// Stage every change in the working tree
    fn add_all(&self) -> Result<(), SyncError>;

    /// Commit staged changes; prefixes the message with `[skip ci]` when asked
    fn commit(&self, message: &str, skip_ci: bool) -> Result<(), SyncError>;

    /// Compact summary of the files differing between two branches; empty
    /// when the branches are identical
    fn diff_summary(&self, base: &str, head: &str) -> Result<String, SyncError>;

    /// Force-push a branch to `origin`
    fn push(&self, branch: &str) -> Result<(), SyncError>;
}

/// Derive a collision-free branch name by appending a random suffix
pub fn random_branch_name(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}
