//! Selective destination cleanup

use super::SyncOptions;
use crate::manifest::Matcher;
use crate::types::{CleanupMode, SyncError, SyncFailure, SyncReport};
use std::fs;
use std::path::{Path, PathBuf};

/// Prune top-level destination entries according to the cleanup mode
///
/// Only entries directly inside the destination root are evaluated; deleting
/// a directory removes its whole subtree. A missing destination is a no-op.
/// Per-entry deletion failures are recorded and do not stop the pass.
pub(super) fn clean_destination(
    destination: &Path,
    matcher: &Matcher,
    options: &SyncOptions,
    report: &mut SyncReport,
) -> Result<(), SyncError> {
    if options.cleanup == CleanupMode::None || !destination.is_dir() {
        return Ok(());
    }

    for entry in fs::read_dir(destination)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();

        let delete = match options.cleanup {
            CleanupMode::None => false,
            CleanupMode::FullWipe => true,
            CleanupMode::PreserveMatched => !matcher.is_match(&name),
        };
        if !delete {
            continue;
        }

        let rel_path = PathBuf::from(&name);
        if options.dry_run {
            report.deleted.push(rel_path);
            continue;
        }

        match remove_entry(&entry.path()) {
            Ok(()) => report.deleted.push(rel_path),
            Err(e) => report.failures.push(SyncFailure::new(rel_path, e.kind())),
        }
    }

    Ok(())
}

/// Remove any filesystem entry; directories recursively, symlinks as files
fn remove_entry(path: &Path) -> std::io::Result<()> {
    let metadata = fs::symlink_metadata(path)?;
    if metadata.file_type().is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}
