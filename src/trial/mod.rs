//! Per-candidate trial sequencing
//!
//! The workspace controller for one candidate: create the trial branch, stage
//! the patch, classify, and clean up. Cleanup runs on every exit path, so
//! after [`run_trial`] returns the workspace sits on the branch it started on
//! and no trial branch or remote remains. Cleanup failures are logged and
//! swallowed; one candidate's teardown must not block the next.

mod classify;

pub use classify::{classify, parse_impact};

use crate::config::Options;
use crate::git::GitWorkspace;
use crate::patch::PatchSource;
use crate::types::{Candidate, TrialOutcome};
use tracing::{debug, warn};

/// Attempt one candidate and report its outcome
///
/// Ignore-listed candidates short-circuit before any workspace mutation.
/// Engine-level errors (git unusable, patch download failed) are recorded as
/// a failed outcome for this candidate only; the caller continues the batch.
pub async fn run_trial(
    ws: &GitWorkspace,
    opts: &Options,
    source: &dyn PatchSource,
    original_branch: &str,
    candidate: &Candidate,
) -> TrialOutcome {
    if opts.ignore.contains(&candidate.number) {
        debug!(number = candidate.number, "candidate ignored");
        return TrialOutcome::skipped(candidate.number);
    }

    let trial_branch = opts.trial_branch(candidate.number);
    let base = format!("{}/{}", opts.remote_name, candidate.base_ref);

    let outcome = attempt(ws, source, candidate, &trial_branch, &base).await;
    cleanup(ws, original_branch, &trial_branch).await;
    outcome
}

/// Branch creation through classification; cleanup is the caller's job
async fn attempt(
    ws: &GitWorkspace,
    source: &dyn PatchSource,
    candidate: &Candidate,
    trial_branch: &str,
    base: &str,
) -> TrialOutcome {
    debug!(number = candidate.number, trial_branch, base, "starting trial");

    let created = match ws.create_branch_at(trial_branch, base).await {
        Ok(out) => out,
        Err(e) => {
            warn!(number = candidate.number, error = %e, "could not run branch creation");
            return TrialOutcome::failed(candidate.number, e.to_string());
        }
    };
    if created.failed {
        // Name collision or bad base ref: abort this trial, attempt no
        // further steps for this candidate.
        debug!(number = candidate.number, "branch creation failed");
        return TrialOutcome::failed(candidate.number, created.combined());
    }

    match source.stage(ws, candidate, trial_branch).await {
        Ok(staged) => classify(candidate.number, &staged),
        Err(e) => {
            warn!(number = candidate.number, error = %e, "patch staging failed");
            TrialOutcome::failed(candidate.number, e.to_string())
        }
    }
}

/// Restore the pre-trial branch and remove trial-scoped branch and remote
///
/// Every step is independent and best-effort: a failed checkout must not
/// stop the branch delete, and vice versa.
async fn cleanup(ws: &GitWorkspace, original_branch: &str, trial_branch: &str) {
    match ws.checkout(original_branch).await {
        Ok(out) if out.failed => {
            warn!(original_branch, stderr = %out.stderr.trim(), "failed to restore branch");
        }
        Err(e) => warn!(original_branch, error = %e, "failed to restore branch"),
        Ok(_) => {}
    }

    match ws.delete_branch(trial_branch).await {
        Ok(out) if out.failed => {
            debug!(trial_branch, stderr = %out.stderr.trim(), "trial branch not deleted");
        }
        Err(e) => warn!(trial_branch, error = %e, "trial branch not deleted"),
        Ok(_) => {}
    }

    // The remote-ref strategy names its remote after the trial branch; the
    // patch strategy never adds one, so a failure here is routine.
    match ws.remove_remote(trial_branch).await {
        Ok(out) if out.failed => {
            debug!(trial_branch, "no trial remote to remove");
        }
        Err(e) => warn!(trial_branch, error = %e, "trial remote not removed"),
        Ok(_) => {}
    }
}
