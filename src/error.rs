//! Error taxonomy
//!
//! Fatal errors abort the whole run; everything that can be attributed to a
//! single candidate is recorded in its [`crate::types::TrialOutcome`] instead
//! of surfacing here.

use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal, run-aborting failures
#[derive(Debug, Error)]
pub enum Error {
    /// The workspace is not a git repository, or HEAD is detached
    #[error("could not determine the current branch. Is this a git repo?")]
    NotARepository,

    /// The working tree has uncommitted changes
    #[error("the working tree has uncommitted changes; commit or stash them first")]
    DirtyWorkspace,

    /// No probed remote pointed at a recognized host
    #[error("a valid remote source could not be found (tried: {0})")]
    RemoteNotFound(String),

    /// Fetching the configured remote failed
    #[error("could not fetch the remote: {0}")]
    Fetch(String),

    /// git itself could not be started
    #[error("could not run git: {0}")]
    CommandSpawn(String),

    /// A patch document could not be retrieved
    #[error("failed to download patch: {0}")]
    PatchDownload(String),

    /// The GitHub API rejected or failed a request
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Filesystem failure outside of git
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<octocrab::Error> for Error {
    fn from(e: octocrab::Error) -> Self {
        Self::GitHubApi(e.to_string())
    }
}
