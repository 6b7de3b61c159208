//! GitHub pull-request discovery via octocrab

use crate::error::{Error, Result};
use crate::types::{Candidate, SourceRef};
use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::debug;

use super::PullRequestSource;

/// Lists a repository's open pull requests through the GitHub API
pub struct GitHubPullRequests {
    client: Octocrab,
    owner: String,
    repo: String,
}

impl GitHubPullRequests {
    /// Create a discovery source; a token is optional for public repositories
    pub fn new(token: Option<&str>, owner: String, repo: String) -> Result<Self> {
        let mut builder = Octocrab::builder();
        if let Some(token) = token {
            builder = builder.personal_token(token.to_string());
        }
        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self {
            client,
            owner,
            repo,
        })
    }
}

/// Convert an octocrab PR into the engine's [`Candidate`] shape
///
/// Only the fields the engine consumes are carried over. A PR whose fork was
/// deleted has no head repository; its trial will fail at the pull step,
/// which is the honest answer to "will it merge".
fn candidate_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> Candidate {
    let ref_name = pr.head.ref_field.clone();
    Candidate {
        number: pr.number,
        head: SourceRef {
            label: pr.head.label.clone().unwrap_or_else(|| ref_name.clone()),
            ref_name,
            git_url: pr
                .head
                .repo
                .as_ref()
                .and_then(|r| r.git_url.as_ref())
                .map(ToString::to_string)
                .unwrap_or_default(),
        },
        base_ref: pr.base.ref_field.clone(),
        patch_url: pr
            .patch_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        title: pr.title.as_deref().unwrap_or_default().to_string(),
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
    }
}

#[async_trait]
impl PullRequestSource for GitHubPullRequests {
    async fn list_open(&self, page: u32, per_page: u8) -> Result<Vec<Candidate>> {
        debug!(owner = %self.owner, repo = %self.repo, page, per_page, "listing open PRs");

        let prs = self
            .client
            .pulls(&self.owner, &self.repo)
            .list()
            .state(octocrab::params::State::Open)
            .page(page)
            .per_page(per_page)
            .send()
            .await?;

        let candidates: Vec<Candidate> = prs.items.iter().map(candidate_from_octocrab).collect();
        debug!(count = candidates.len(), "listed open PRs");
        Ok(candidates)
    }

    fn location(&self) -> String {
        format!("github.com/{}/{}", self.owner, self.repo)
    }
}
