//! Patch staging strategies
//!
//! Two interchangeable ways to bring a candidate's proposed change into the
//! trial branch: pulling the head ref from the fork (merge or rebase), or
//! downloading the patch document and dry-run validating it. Network failures
//! are [`Error::PatchDownload`], never conflated with a merge conflict.

use crate::error::{Error, Result};
use crate::git::GitWorkspace;
use crate::types::{Candidate, IntegrationStrategy};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Raw result of staging one candidate's change
#[derive(Debug, Clone)]
pub struct StagedPatch {
    /// True when the change did not integrate cleanly
    pub conflict: bool,
    /// Command output: conflict evidence or change statistics
    pub diagnostic: String,
}

/// Obtains a candidate's change and stages it on the current trial branch
#[async_trait]
pub trait PatchSource: Send + Sync {
    /// Stage the candidate's change; the workspace must already sit on the
    /// trial branch. Implementations roll back any partial integration before
    /// returning so the trial branch can always be checked out away from.
    async fn stage(
        &self,
        ws: &GitWorkspace,
        candidate: &Candidate,
        trial_branch: &str,
    ) -> Result<StagedPatch>;
}

/// Pulls the candidate's head ref from a short-lived remote
///
/// The remote is named after the trial branch so the trial cleanup pass can
/// find and remove it by prefix.
pub struct RemoteRefSource {
    rebase: bool,
}

impl RemoteRefSource {
    /// Create a source that merges (or, with `rebase`, rebases) the head ref
    pub const fn new(rebase: bool) -> Self {
        Self { rebase }
    }
}

#[async_trait]
impl PatchSource for RemoteRefSource {
    async fn stage(
        &self,
        ws: &GitWorkspace,
        candidate: &Candidate,
        trial_branch: &str,
    ) -> Result<StagedPatch> {
        debug!(number = candidate.number, rebase = self.rebase, "pulling head ref");
        ws.add_remote(trial_branch, &candidate.head.git_url).await?;

        let pull = if self.rebase {
            ws.run(&["pull", "--rebase", trial_branch, &candidate.head.ref_name])
                .await?
        } else {
            ws.run(&[
                "pull",
                "--no-rebase",
                "--no-edit",
                trial_branch,
                &candidate.head.ref_name,
            ])
            .await?
        };

        let diagnostic = pull.combined();
        let conflict = diagnostic.contains("CONFLICT") || pull.failed;

        // Roll back any half-applied integration so the trial branch can be
        // left. Both are no-ops when the pull succeeded or never started.
        if self.rebase {
            let _ = ws.run(&["rebase", "--abort"]).await;
        } else {
            let _ = ws.run(&["reset", "--merge"]).await;
        }

        Ok(StagedPatch { conflict, diagnostic })
    }
}

/// Downloads the candidate's patch document and apply-checks it
///
/// Never mutates history: `git apply --check` only validates the patch
/// against the current tree. This path emits no diffstat summary, so
/// successful trials score impact 0.
pub struct PatchDocumentSource {
    client: reqwest::Client,
    temp_dir: PathBuf,
}

impl PatchDocumentSource {
    /// Create a source writing downloads into `temp_dir`
    pub fn new(temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            client: reqwest::Client::new(),
            temp_dir: temp_dir.into(),
        }
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<()> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::PatchDownload(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Error::PatchDownload(format!(
                "{url} returned {}",
                response.status()
            )));
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::PatchDownload(e.to_string()))?;
        tokio::fs::create_dir_all(&self.temp_dir).await?;
        tokio::fs::write(dest, &body).await?;
        Ok(())
    }
}

#[async_trait]
impl PatchSource for PatchDocumentSource {
    async fn stage(
        &self,
        ws: &GitWorkspace,
        candidate: &Candidate,
        _trial_branch: &str,
    ) -> Result<StagedPatch> {
        let dest = self.temp_dir.join(format!("{}.patch", candidate.number));
        debug!(number = candidate.number, dest = %dest.display(), "downloading patch");
        self.download(&candidate.patch_url, &dest).await?;

        let dest_arg = dest.to_string_lossy().into_owned();
        let check = ws.run(&["apply", "--check", &dest_arg]).await?;
        Ok(StagedPatch {
            conflict: check.failed,
            diagnostic: check.combined(),
        })
    }
}

/// Select the staging strategy for a run
pub fn create_patch_source(
    strategy: IntegrationStrategy,
    temp_dir: &Path,
) -> Box<dyn PatchSource> {
    match strategy {
        IntegrationStrategy::Merge => Box::new(RemoteRefSource::new(false)),
        IntegrationStrategy::Rebase => Box::new(RemoteRefSource::new(true)),
        IntegrationStrategy::Patch => Box::new(PatchDocumentSource::new(temp_dir)),
    }
}
