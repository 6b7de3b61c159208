//! Batch orchestration
//!
//! Drives the whole run: validate the workspace, capture the original branch,
//! fetch the configured remote, attempt every candidate strictly in input
//! order, and run final teardown exactly once. Candidates share one working
//! directory and one active branch, so trials never interleave; outcomes come
//! back in input order.

use crate::config::Options;
use crate::error::{Error, Result};
use crate::git::GitWorkspace;
use crate::patch::create_patch_source;
use crate::trial::run_trial;
use crate::types::{Candidate, TrialOutcome};
use std::path::Path;
use tracing::{debug, warn};

/// Per-trial progress notifications for the reporting layer
pub trait Progress: Send + Sync {
    /// Called after each candidate's outcome is classified
    fn on_trial(&self, outcome: &TrialOutcome);
}

/// Progress sink that reports nothing
pub struct NoProgress;

impl Progress for NoProgress {
    fn on_trial(&self, _outcome: &TrialOutcome) {}
}

/// Attempt every candidate and return their outcomes in input order
///
/// Fatal setup errors (not a repository, dirty tree, fetch impossible) abort
/// the batch before any trial runs; final teardown still executes. Per-trial
/// failures never abort the batch.
pub async fn run_batch(
    ws: &GitWorkspace,
    opts: &Options,
    candidates: &[Candidate],
    progress: &dyn Progress,
) -> Result<Vec<TrialOutcome>> {
    let temp_dir = opts
        .temp_dir
        .clone()
        .unwrap_or_else(|| ws.root().join(".willitmerge-tmp"));

    let original_branch = match setup(ws, opts).await {
        Ok(branch) => branch,
        Err(e) => {
            teardown(ws, opts, None, &temp_dir).await;
            return Err(e);
        }
    };
    debug!(branch = %original_branch, count = candidates.len(), "batch starting");

    let source = create_patch_source(opts.strategy, &temp_dir);
    let mut outcomes = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let outcome = run_trial(ws, opts, source.as_ref(), &original_branch, candidate).await;
        progress.on_trial(&outcome);
        outcomes.push(outcome);
    }

    teardown(ws, opts, Some(&original_branch), &temp_dir).await;
    Ok(outcomes)
}

/// Validate the workspace and capture the branch to restore at the end
async fn setup(ws: &GitWorkspace, opts: &Options) -> Result<String> {
    if !ws.is_repository().await? {
        return Err(Error::NotARepository);
    }
    // Trial branches switch the working tree around; refuse to touch
    // uncommitted changes.
    if ws.is_dirty().await? {
        return Err(Error::DirtyWorkspace);
    }
    let branch = ws.current_branch().await?;
    ws.fetch(&opts.remote_name).await?;
    Ok(branch)
}

/// Final teardown: restore the original branch, delete every prefixed branch
/// and remote, remove the temp dir
///
/// Runs exactly once per batch. Every step is independent and best-effort;
/// failures are logged, never escalated, and never short-circuit the
/// remaining steps.
async fn teardown(
    ws: &GitWorkspace,
    opts: &Options,
    original_branch: Option<&str>,
    temp_dir: &Path,
) {
    if let Some(branch) = original_branch {
        match ws.checkout(branch).await {
            Ok(out) if out.failed => {
                warn!(branch, stderr = %out.stderr.trim(), "teardown: could not restore branch");
            }
            Err(e) => warn!(branch, error = %e, "teardown: could not restore branch"),
            Ok(_) => {}
        }
    }

    match ws.branches_with_prefix(&opts.branch_prefix).await {
        Ok(branches) => {
            for branch in branches {
                match ws.delete_branch(&branch).await {
                    Ok(out) if out.failed => {
                        warn!(%branch, stderr = %out.stderr.trim(), "teardown: branch not deleted");
                    }
                    Err(e) => warn!(%branch, error = %e, "teardown: branch not deleted"),
                    Ok(_) => debug!(%branch, "teardown: deleted stale trial branch"),
                }
            }
        }
        Err(e) => warn!(error = %e, "teardown: could not list trial branches"),
    }

    match ws.remotes_with_prefix(&opts.branch_prefix).await {
        Ok(remotes) => {
            for remote in remotes {
                match ws.remove_remote(&remote).await {
                    Ok(out) if out.failed => {
                        warn!(%remote, stderr = %out.stderr.trim(), "teardown: remote not removed");
                    }
                    Err(e) => warn!(%remote, error = %e, "teardown: remote not removed"),
                    Ok(_) => debug!(%remote, "teardown: removed stale trial remote"),
                }
            }
        }
        Err(e) => warn!(error = %e, "teardown: could not list trial remotes"),
    }

    remove_temp_dir(temp_dir).await;
}

async fn remove_temp_dir(temp_dir: &Path) {
    match tokio::fs::remove_dir_all(temp_dir).await {
        Ok(()) => debug!(path = %temp_dir.display(), "teardown: removed temp dir"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %temp_dir.display(), error = %e, "teardown: temp dir not removed"),
    }
}
