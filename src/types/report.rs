//! Outcome report for a synchronization run

use std::io::ErrorKind;
use std::path::PathBuf;

/// A single per-path failure recorded during a best-effort run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    /// Path relative to the tree it belongs to (source for copies,
    /// destination for deletions)
    pub path: PathBuf,

    /// Kind of IO error that was hit
    pub kind: ErrorKind,
}

impl SyncFailure {
    pub fn new(path: impl Into<PathBuf>, kind: ErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// What a synchronization run touched (or, in dry-run mode, would touch)
///
/// Paths are relative: `copied` to the source root, `deleted` to the
/// destination root. Both lists are sorted for deterministic output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Files copied from source to destination
    pub copied: Vec<PathBuf>,

    /// Top-level destination entries removed by the cleanup phase
    pub deleted: Vec<PathBuf>,

    /// Per-path failures; the run continued past each of these
    pub failures: Vec<SyncFailure>,
}

impl SyncReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when at least one per-path operation failed
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }

    /// True when nothing was (or would be) copied or deleted
    pub fn is_empty(&self) -> bool {
        self.copied.is_empty() && self.deleted.is_empty()
    }

    /// Sort the path lists; called once before the report is handed back
    pub(crate) fn finish(mut self) -> Self {
        self.copied.sort();
        self.deleted.sort();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let report = SyncReport::new();
        assert!(report.is_empty());
        assert!(!report.is_partial());
    }

    #[test]
    fn test_partial_report() {
        let mut report = SyncReport::new();
        report
            .failures
            .push(SyncFailure::new("a/b.txt", ErrorKind::PermissionDenied));
        assert!(report.is_partial());
    }

    #[test]
    fn test_finish_sorts_paths() {
        let mut report = SyncReport::new();
        report.copied.push(PathBuf::from("b.md"));
        report.copied.push(PathBuf::from("a.md"));
        report.deleted.push(PathBuf::from("z"));
        report.deleted.push(PathBuf::from("y"));

        let report = report.finish();
        assert_eq!(report.copied, vec![PathBuf::from("a.md"), PathBuf::from("b.md")]);
        assert_eq!(report.deleted, vec![PathBuf::from("y"), PathBuf::from("z")]);
    }
}
