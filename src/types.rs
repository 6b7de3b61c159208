//! Core types for willitmerge

use serde::{Deserialize, Serialize};

/// Where a candidate's proposed change lives
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceRef {
    /// Human-readable label (e.g. "fork-owner:feature")
    pub label: String,
    /// Ref name in the source repository (e.g. "feature")
    pub ref_name: String,
    /// Fetchable URL of the source repository
    pub git_url: String,
}

/// One open pull request, as consumed by the merge-trial engine
///
/// Immutable once fetched. Produced by the discovery collaborator; records
/// without a number never reach the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// PR number, unique within the repository
    pub number: u64,
    /// Proposed change source (fork + ref)
    pub head: SourceRef,
    /// Target branch name in the base repository
    pub base_ref: String,
    /// URL of the downloadable patch document
    pub patch_url: String,
    /// PR title (display only)
    pub title: String,
    /// Web URL (display only)
    pub html_url: String,
}

/// Verdict for one trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Candidate was in the ignore set; no workspace mutation performed
    Skipped,
    /// The change integrated cleanly
    Success,
    /// The change conflicted, or the trial hit an engine-level error
    Failed,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skipped => write!(f, "skipped"),
            Self::Success => write!(f, "success"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Result of attempting one candidate
///
/// Created exactly once per candidate by the classifier, immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialOutcome {
    /// Candidate PR number
    pub number: u64,
    /// Trial verdict
    pub verdict: Verdict,
    /// Raw command output: conflict evidence or change statistics
    pub diagnostic: String,
    /// Inserted plus deleted line count; 0 for skipped and failed trials
    pub impact: u64,
}

impl TrialOutcome {
    /// Outcome for an ignore-listed candidate
    pub fn skipped(number: u64) -> Self {
        Self {
            number,
            verdict: Verdict::Skipped,
            diagnostic: String::new(),
            impact: 0,
        }
    }

    /// Outcome for a trial that conflicted or hit an engine error
    pub fn failed(number: u64, diagnostic: String) -> Self {
        Self {
            number,
            verdict: Verdict::Failed,
            diagnostic,
            impact: 0,
        }
    }
}

/// How a candidate's change is integrated into the trial branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum IntegrationStrategy {
    /// Pull the head ref and merge it. The default: only this path reliably
    /// emits the diffstat summary the impact score is parsed from.
    #[default]
    Merge,
    /// Pull the head ref and rebase it onto the trial branch
    Rebase,
    /// Download the patch document and dry-run validate it against the tree
    Patch,
}

impl std::fmt::Display for IntegrationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Merge => write!(f, "merge"),
            Self::Rebase => write!(f, "rebase"),
            Self::Patch => write!(f, "patch"),
        }
    }
}

/// Repository identity derived from a locally configured remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoInfo {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Name of the remote the identity was derived from
    pub remote_name: String,
}
