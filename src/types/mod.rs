//! Core type definitions for reposync

mod error;
mod mode;
mod report;

pub use error::SyncError;
pub use mode::CleanupMode;
pub use report::{SyncFailure, SyncReport};
