//! Tree synchronizer - selective cleanup and selective copy

mod cleanup;
mod copy;

pub use copy::copy_file_atomic;

use crate::manifest::Manifest;
use crate::types::{CleanupMode, SyncError, SyncReport};
use std::fs;
use std::path::Path;

/// Options threaded through a synchronization run
///
/// Explicit values rather than ambient flags, so the matching engine and the
/// orchestration layer stay decoupled.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// How to prune the destination root before copying
    pub cleanup: CleanupMode,

    /// Compute the full plan but perform zero filesystem mutation
    pub dry_run: bool,
}

/// Synchronize the manifest-selected subset of `source` into `destination`
///
/// Two phases, both driven by the same compiled manifest predicate:
///
/// 1. Cleanup (optional): prune top-level destination entries, either all of
///    them (`FullWipe`) or only the ones the predicate excludes
///    (`PreserveMatched`).
/// 2. Copy: depth-first walk of `source`; at each directory level the
///    predicate decides which entry names to skip. Files are copied whole,
///    overwriting same-path destination files; everything outside the
///    selected set survives untouched.
///
/// A missing `source` is fatal. Per-path IO failures during copy or delete
/// are collected into the report's `failures` and do not abort the walk.
/// With `dry_run` set the returned report lists what a live run would have
/// touched, and the destination is left completely unchanged.
pub fn synchronize(
    source: &Path,
    destination: &Path,
    manifest: &Manifest,
    options: &SyncOptions,
) -> Result<SyncReport, SyncError> {
    if !source.is_dir() {
        return Err(SyncError::SourceNotFound {
            path: source.to_path_buf(),
        });
    }

    // Pattern errors abort here, before any mutation.
    let matcher = manifest.matcher()?;

    let mut report = SyncReport::new();

    cleanup::clean_destination(destination, &matcher, options, &mut report)?;

    if !options.dry_run {
        fs::create_dir_all(destination)?;
    }
    copy::copy_tree(source, destination, &matcher, options, &mut report)?;

    Ok(report.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_missing_source_is_fatal() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let source = temp_dir.path().join("does-not-exist");
        let destination = temp_dir.path().join("dest");

        let result = synchronize(
            &source,
            &destination,
            &Manifest::new(),
            &SyncOptions::default(),
        );
        assert!(matches!(
            result,
            Err(SyncError::SourceNotFound { path }) if path == source
        ));
        assert!(!destination.exists(), "no partial work on fatal error");
    }

    #[test]
    fn test_pattern_error_aborts_before_mutation() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let source = temp_dir.path().join("src");
        let destination = temp_dir.path().join("dest");
        std::fs::create_dir(&source).unwrap();
        std::fs::create_dir(&destination).unwrap();
        std::fs::write(destination.join("keep.txt"), "keep").unwrap();

        let manifest = Manifest::from_patterns(["bad["]);
        let options = SyncOptions {
            cleanup: CleanupMode::FullWipe,
            ..Default::default()
        };
        let result = synchronize(&source, &destination, &manifest, &options);

        assert!(matches!(result, Err(SyncError::Pattern { .. })));
        assert!(
            destination.join("keep.txt").exists(),
            "cleanup must not run when translation fails"
        );
    }

    #[test]
    fn test_empty_manifest_copies_everything() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let source = temp_dir.path().join("src");
        let destination = temp_dir.path().join("dest");
        std::fs::create_dir_all(source.join("nested")).unwrap();
        std::fs::write(source.join("a.md"), "a").unwrap();
        std::fs::write(source.join("nested/b.txt"), "b").unwrap();

        let report = synchronize(
            &source,
            &destination,
            &Manifest::new(),
            &SyncOptions::default(),
        )
        .expect("synchronize should succeed");

        assert_eq!(
            report.copied,
            vec![PathBuf::from("a.md"), PathBuf::from("nested/b.txt")]
        );
        assert!(destination.join("nested/b.txt").exists());
    }
}
