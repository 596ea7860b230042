//! Selective recursive tree copy

use super::SyncOptions;
use crate::manifest::Matcher;
use crate::types::{SyncFailure, SyncReport};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Copy the manifest-selected subset of `source` into `destination`
///
/// Depth-first and strictly sequential: a directory is created before its
/// children are written. The predicate is re-applied to the entry names at
/// every directory level; excluded names are neither copied nor descended
/// into. Per-entry IO failures are recorded and the walk continues.
pub(super) fn copy_tree(
    source: &Path,
    destination: &Path,
    matcher: &Matcher,
    options: &SyncOptions,
    report: &mut SyncReport,
) -> std::io::Result<()> {
    copy_dir_level(source, destination, Path::new(""), matcher, options, report)
}

fn copy_dir_level(
    src_dir: &Path,
    dest_dir: &Path,
    rel_dir: &Path,
    matcher: &Matcher,
    options: &SyncOptions,
    report: &mut SyncReport,
) -> std::io::Result<()> {
    let mut entries: Vec<(String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(src_dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push((name, entry.path()));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let excluded = matcher.excluded(entries.iter().map(|(name, _)| name.as_str()));

    for (name, src_path) in entries {
        if excluded.contains(&name) {
            continue;
        }

        let rel_path = rel_dir.join(&name);
        let dest_path = dest_dir.join(&name);

        let metadata = match fs::symlink_metadata(&src_path) {
            Ok(m) => m,
            Err(e) => {
                report.failures.push(SyncFailure::new(rel_path, e.kind()));
                continue;
            }
        };
        let file_type = metadata.file_type();

        if file_type.is_dir() {
            if !options.dry_run {
                if let Err(e) = fs::create_dir_all(&dest_path) {
                    // Cannot establish the parent; skip the whole subtree.
                    report.failures.push(SyncFailure::new(rel_path, e.kind()));
                    continue;
                }
            }
            if let Err(e) =
                copy_dir_level(&src_path, &dest_path, &rel_path, matcher, options, report)
            {
                report.failures.push(SyncFailure::new(rel_path, e.kind()));
            }
        } else if file_type.is_symlink() {
            if options.dry_run {
                report.copied.push(rel_path);
            } else {
                match copy_symlink(&src_path, &dest_path) {
                    Ok(()) => report.copied.push(rel_path),
                    Err(e) => report.failures.push(SyncFailure::new(rel_path, e.kind())),
                }
            }
        } else {
            if options.dry_run {
                report.copied.push(rel_path);
            } else {
                match copy_file_atomic(&src_path, &dest_path) {
                    Ok(_) => report.copied.push(rel_path),
                    Err(e) => report.failures.push(SyncFailure::new(rel_path, e.kind())),
                }
            }
        }
    }

    Ok(())
}

/// Copy a file using the write-then-rename strategy
///
/// 1. Stream to a temporary `<name>.part` file
/// 2. Flush and sync to disk
/// 3. Preserve metadata (permissions, mtime)
/// 4. Atomic rename over the final destination
///
/// The temp name keeps the full destination name (`x.txt` -> `x.txt.part`);
/// swapping the extension would collide with a sibling source file named
/// `x.part`. Overwrites any existing destination file of the same path.
/// Returns the number of bytes copied.
pub fn copy_file_atomic(src: &Path, dest: &Path) -> std::io::Result<u64> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut part_name = dest.as_os_str().to_os_string();
    part_name.push(".part");
    let part_path = PathBuf::from(part_name);

    let mut src_file = File::open(src)?;
    let mut part_file = File::create(&part_path)?;

    let mut buffer = vec![0u8; 128 * 1024];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = src_file.read(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        part_file.write_all(&buffer[0..bytes_read])?;
        total_bytes += bytes_read as u64;
    }

    part_file.sync_all()?;

    // Drop the handle before rename (required on Windows)
    drop(part_file);

    let src_metadata = fs::metadata(src)?;
    fs::set_permissions(&part_path, src_metadata.permissions())?;

    let mtime = src_metadata.modified()?;
    filetime::set_file_mtime(&part_path, filetime::FileTime::from_system_time(mtime))?;

    // Atomic on POSIX systems (single syscall)
    fs::rename(&part_path, dest)?;

    Ok(total_bytes)
}

/// Recreate a symlink at `dest` pointing at `src`'s target
///
/// The target is preserved literally, never followed. Any existing
/// destination entry is removed first.
fn copy_symlink(src: &Path, dest: &Path) -> std::io::Result<()> {
    let target = fs::read_link(src)?;

    if let Ok(metadata) = fs::symlink_metadata(dest) {
        if metadata.file_type().is_dir() {
            fs::remove_dir_all(dest)?;
        } else {
            fs::remove_file(dest)?;
        }
    }

    create_symlink(&target, dest)
}

#[cfg(unix)]
fn create_symlink(target: &Path, link_path: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link_path)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link_path: &Path) -> std::io::Result<()> {
    use std::os::windows::fs::{symlink_dir, symlink_file};

    match symlink_file(target, link_path) {
        Ok(()) => Ok(()),
        Err(file_err) => symlink_dir(target, link_path).map_err(|_| file_err),
    }
}
