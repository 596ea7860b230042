//! Git backend driving the `git` binary

use super::VersionControlDriver;
use crate::types::SyncError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Version-control driver backed by the system `git` binary
pub struct GitDriver {
    /// Working tree root (where .git lives)
    workdir: PathBuf,
}

impl GitDriver {
    /// Open an existing clone at `workdir`
    pub fn open(workdir: impl Into<PathBuf>) -> Result<Self, SyncError> {
        let workdir = workdir.into();
        if !workdir.join(".git").exists() {
            return Err(SyncError::Vcs(format!(
                "not a git repository: .git not found at {}",
                workdir.display()
            )));
        }
        Ok(Self { workdir })
    }

    /// Clone `url` into `workdir` and open the resulting repository
    pub fn clone_from(url: &str, workdir: impl Into<PathBuf>) -> Result<Self, SyncError> {
        let workdir = workdir.into();
        let output = Command::new("git")
            .args(["clone", "--", url])
            .arg(&workdir)
            .output()
            .map_err(SyncError::Io)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SyncError::Vcs(format!(
                "git clone failed: {}",
                stderr.trim()
            )));
        }
        Self::open(workdir)
    }

    /// Get the root directory of the working tree
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run a git command in the working tree and return its stdout
    fn git_command(&self, args: &[&str]) -> Result<String, SyncError> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(SyncError::Io)?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(SyncError::Vcs(format!(
                "git command failed: {}",
                stderr.trim()
            )))
        }
    }
}

impl VersionControlDriver for GitDriver {
    fn checkout(&self, branch: &str) -> Result<(), SyncError> {
        self.git_command(&["checkout", branch])?;
        Ok(())
    }

    fn checkout_new(&self, branch: &str) -> Result<(), SyncError> {
        self.git_command(&["checkout", "-b", branch])?;
        Ok(())
    }

    fn add_all(&self) -> Result<(), SyncError> {
        self.git_command(&["add", "--all"])?;
        Ok(())
    }

    fn commit(&self, message: &str, skip_ci: bool) -> Result<(), SyncError> {
        let message = if skip_ci {
            format!("[skip ci] {}", message)
        } else {
            message.to_string()
        };
        // A no-change sync stages nothing; the commit must still succeed so
        // the caller can detect the empty diff and report "nothing to push".
        self.git_command(&["commit", "--allow-empty", "-m", &message])?;
        Ok(())
    }

    fn diff_summary(&self, base: &str, head: &str) -> Result<String, SyncError> {
        self.git_command(&["diff", "--compact-summary", base, head])
    }

    fn push(&self, branch: &str) -> Result<(), SyncError> {
        self.git_command(&["push", "--force", "origin", branch])?;
        Ok(())
    }
}
