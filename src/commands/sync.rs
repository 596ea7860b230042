//! Main sync command
//!
//! Orchestration around the synchronization core: clone the target
//! repository into a scratch directory, run the manifest-driven copy against
//! the requested subtree, then branch, commit and push the result. With
//! `--dry-run` everything up to the push happens against the scratch clone
//! only, so nothing leaves the machine.

use crate::manifest::Manifest;
use crate::sync::{synchronize, SyncOptions};
use crate::types::{SyncError, SyncReport};
use crate::vcs::{random_branch_name, GitDriver, VersionControlDriver};
use crate::Config;
use console::style;

/// Run the synchronization workflow
///
/// Returns the name of the pushed branch, or `None` when nothing changed or
/// the run was a dry run.
pub fn run(config: &Config) -> Result<Option<String>, SyncError> {
    let manifest = Manifest::load(&config.manifest_path)?;

    let target_branch = if config.random_branch_name {
        random_branch_name(&config.target_branch_name)
    } else {
        config.target_branch_name.clone()
    };

    // The clone lives in a tempdir that cleans itself up on drop.
    let temp_dir = tempfile::Builder::new()
        .prefix("repo_clone_")
        .tempdir()
        .map_err(SyncError::Io)?;
    let repo_path = temp_dir.path().join(&config.repository);

    println!(
        "{} Cloning repository '{}/{}'...",
        style(">>>").cyan().bold(),
        config.owner,
        config.repository
    );
    let driver = GitDriver::clone_from(&config.clone_url(), &repo_path)?;

    println!(
        "{} Checking out new branch '{}' from '{}'...",
        style(">>>").cyan().bold(),
        target_branch,
        config.base_branch
    );
    driver.checkout(&config.base_branch)?;
    driver.checkout_new(&target_branch)?;

    let destination = repo_path.join(&config.to_dir);
    println!(
        "{} Syncing files from {} to {} ...",
        style(">>>").cyan().bold(),
        config.from_dir.display(),
        destination.display()
    );
    let options = SyncOptions {
        cleanup: config.cleanup,
        // The clone is scratch space; dry-run is decided at push time.
        dry_run: false,
    };
    let report = synchronize(&config.from_dir, &destination, &manifest, &options)?;
    print_report(&report);

    if report.is_partial() {
        println!(
            "{} {} path(s) failed; continuing with the rest.",
            style("!!!").yellow().bold(),
            report.failures.len()
        );
    }

    println!(
        "{} Committing changes to branch '{}'...",
        style(">>>").cyan().bold(),
        target_branch
    );
    driver.add_all()?;
    driver.commit(&config.commit_message, config.skip_ci)?;

    let summary = driver.diff_summary(&config.base_branch, &target_branch)?;
    if summary.is_empty() {
        println!(
            "{} No files to sync... Nothing to push.",
            style(">>>").cyan().bold()
        );
        return Ok(None);
    }
    println!("{} Summary of modified files...", style(">>>").cyan().bold());
    println!("{}", summary);

    if config.dry_run {
        println!("{} Dry run successful.", style(">>>").cyan().bold());
        return Ok(None);
    }

    println!(
        "{} Force-pushing branch '{}' remotely...",
        style(">>>").cyan().bold(),
        target_branch
    );
    driver.push(&target_branch)?;

    Ok(Some(target_branch))
}

fn print_report(report: &SyncReport) {
    for path in &report.deleted {
        println!("  {} {}", style("deleted").red(), path.display());
    }
    for path in &report.copied {
        println!("  {} {}", style("copied").green(), path.display());
    }
    for failure in &report.failures {
        println!(
            "  {} {} ({:?})",
            style("failed").yellow(),
            failure.path.display(),
            failure.kind
        );
    }
}
