//! Error types for reposync

use std::path::PathBuf;
use thiserror::Error;

/// Error types for reposync operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed glob pattern in a manifest rule
    #[error("Invalid manifest pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: globset::Error,
    },

    /// Source tree root does not exist
    #[error("Source directory not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Manifest file could not be read or parsed
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A git operation failed
    #[error("Git error: {0}")]
    Vcs(String),
}

impl SyncError {
    /// Check if this error aborts the run before any mutation
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SyncError::Pattern { .. }
                | SyncError::SourceNotFound { .. }
                | SyncError::Manifest(_)
                | SyncError::Config(_)
        )
    }

    /// Check if this error is a pattern translation error
    pub fn is_pattern_error(&self) -> bool {
        matches!(self, SyncError::Pattern { .. })
    }

    /// Check if this error came from the version-control driver
    pub fn is_vcs_error(&self) -> bool {
        matches!(self, SyncError::Vcs(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_io_error_automatic_conversion() {
        let io_error = IoError::new(ErrorKind::NotFound, "file not found");
        let sync_error: SyncError = io_error.into();

        assert!(matches!(sync_error, SyncError::Io(_)));
        assert!(sync_error.to_string().contains("IO error"));
    }

    #[test]
    fn test_pattern_error() {
        let glob_err = globset::Glob::new("a[").unwrap_err();
        let error = SyncError::Pattern {
            pattern: "a[".to_string(),
            source: glob_err,
        };
        assert!(error.to_string().contains("Invalid manifest pattern 'a['"));
        assert!(error.is_pattern_error());
        assert!(error.is_fatal());
    }

    #[test]
    fn test_source_not_found() {
        let error = SyncError::SourceNotFound {
            path: PathBuf::from("/missing/src"),
        };
        assert!(error.to_string().contains("/missing/src"));
        assert!(error.is_fatal());
    }

    #[test]
    fn test_manifest_error() {
        let error = SyncError::Manifest("unreadable".to_string());
        assert!(error.to_string().contains("Manifest error"));
        assert!(error.is_fatal());
    }

    #[test]
    fn test_vcs_error_is_not_fatal_pre_mutation() {
        let error = SyncError::Vcs("push rejected".to_string());
        assert!(error.is_vcs_error());
        assert!(!error.is_fatal());
    }

    #[test]
    fn test_result_propagation() {
        fn inner_function() -> Result<(), SyncError> {
            Err(SyncError::Config("test error".to_string()))
        }

        fn outer_function() -> Result<(), SyncError> {
            inner_function()?;
            Ok(())
        }

        let result = outer_function();
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), SyncError::Config(_)));
    }
}
