//! Configuration management

use crate::types::{CleanupMode, SyncError};
use clap::Parser;
use std::path::PathBuf;

/// Copy a curated subset of a local directory into another repository
#[derive(Debug, Parser)]
#[command(name = "reposync", version, about)]
pub struct Cli {
    /// Name of the owner or organization
    #[arg(short, long)]
    pub owner: String,

    /// Name of the repository
    #[arg(short, long)]
    pub repository: String,

    /// Personal access token
    #[arg(short, long)]
    pub token: String,

    /// Path to the folder containing the files to copy
    #[arg(long)]
    pub from_dir: PathBuf,

    /// Folder that will receive the files (relative to the repository root)
    #[arg(long)]
    pub to_dir: PathBuf,

    /// Manifest of include rules (TOML `[[rules]]` or one pattern per line)
    #[arg(short = 'm', long)]
    pub include_manifest: PathBuf,

    /// Branch to check out before creating the sync branch
    #[arg(short, long, default_value = "main")]
    pub branch: String,

    /// Clean the folder defined in --to-dir before synchronizing
    #[arg(long)]
    pub clean_to_dir: bool,

    /// With --clean-to-dir, delete only entries outside the manifest's scope
    #[arg(long)]
    pub clean_based_on_manifest: bool,

    /// Simulate the synchronization without pushing anything
    #[arg(short, long)]
    pub dry_run: bool,

    /// Add a `[skip ci]` prefix to the commit message
    #[arg(long)]
    pub skip_ci: bool,

    /// Append a random suffix to the sync branch name
    #[arg(long)]
    pub random_branch_name: bool,

    /// Name of the branch to create for the synchronization
    #[arg(long, default_value = "sync/file-sync")]
    pub target_branch_name: String,

    /// Commit message for the synchronization commit
    #[arg(long, default_value = "sync: add changes from local folder")]
    pub commit_message: String,
}

/// Validated configuration for one synchronization run
#[derive(Debug, Clone)]
pub struct Config {
    /// Repository owner (user or organization)
    pub owner: String,

    /// Repository name
    pub repository: String,

    /// Access token used in the authenticated clone URL
    pub token: String,

    /// Local directory the files are synced from
    pub from_dir: PathBuf,

    /// Directory inside the repository the files are synced to
    pub to_dir: PathBuf,

    /// Manifest file path
    pub manifest_path: PathBuf,

    /// Base branch the sync branch is created from
    pub base_branch: String,

    /// Destination cleanup behavior
    pub cleanup: CleanupMode,

    /// Simulate without pushing
    pub dry_run: bool,

    /// Prefix the commit message with `[skip ci]`
    pub skip_ci: bool,

    /// Randomize the sync branch name
    pub random_branch_name: bool,

    /// Sync branch name (prefix when randomized)
    pub target_branch_name: String,

    /// Commit message
    pub commit_message: String,
}

impl TryFrom<Cli> for Config {
    type Error = SyncError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        // --clean-based-on-manifest has no effect without --clean-to-dir,
        // mirroring the historical CLI contract.
        let cleanup = match (cli.clean_to_dir, cli.clean_based_on_manifest) {
            (true, true) => CleanupMode::PreserveMatched,
            (true, false) => CleanupMode::FullWipe,
            (false, _) => CleanupMode::None,
        };

        let config = Self {
            owner: cli.owner,
            repository: cli.repository,
            token: cli.token,
            from_dir: cli.from_dir,
            to_dir: cli.to_dir,
            manifest_path: cli.include_manifest,
            base_branch: cli.branch,
            cleanup,
            dry_run: cli.dry_run,
            skip_ci: cli.skip_ci,
            random_branch_name: cli.random_branch_name,
            target_branch_name: cli.target_branch_name,
            commit_message: cli.commit_message,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Config {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), SyncError> {
        if !self.from_dir.is_dir() {
            return Err(SyncError::Config(format!(
                "Source path does not exist: {}",
                self.from_dir.display()
            )));
        }

        if !self.manifest_path.is_file() {
            return Err(SyncError::Config(format!(
                "Manifest file does not exist: {}",
                self.manifest_path.display()
            )));
        }

        if self.to_dir.is_absolute() {
            return Err(SyncError::Config(
                "--to-dir must be relative to the repository root".to_string(),
            ));
        }

        Ok(())
    }

    /// Token-authenticated clone URL for the target repository
    pub fn clone_url(&self) -> String {
        format!(
            "https://{}@github.com/{}/{}.git",
            self.token, self.owner, self.repository
        )
    }
}
