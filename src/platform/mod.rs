//! Discovery collaborators
//!
//! The engine consumes candidates through [`PullRequestSource`]; the GitHub
//! implementation and the remote-identification helpers live here. The
//! engine itself never talks to the hosting service.

mod detection;
mod github;

pub use detection::{identify_remote, parse_github_url};
pub use github::GitHubPullRequests;

use crate::error::Result;
use crate::types::Candidate;
use async_trait::async_trait;

/// Produces the candidate list for a batch
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    /// Fetch one page of the repository's open pull requests
    ///
    /// Implementations must not return records without a PR number; the raw
    /// API boundary drops them before they reach the engine.
    async fn list_open(&self, page: u32, per_page: u8) -> Result<Vec<Candidate>>;

    /// Human-readable location of the repository (for the report banner)
    fn location(&self) -> String;
}
