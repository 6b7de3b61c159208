//! Remote identification
//!
//! Derives `{owner, repo, remote}` from the locally configured remotes,
//! preferring `upstream` over `origin` unless the user named one explicitly.

use crate::error::{Error, Result};
use crate::git::GitWorkspace;
use crate::types::RepoInfo;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

/// Remotes probed when the user did not name one, in preference order
const DEFAULT_REMOTES: [&str; 2] = ["upstream", "origin"];

/// scp-style remotes (`git@github.com:owner/repo.git`) are not URLs, so the
/// Url parser cannot handle them
static SCP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)github\.com[:/]([^/\s]+)/([^/\s]+?)(?:\.git)?/?$")
        .unwrap_or_else(|e| unreachable!("scp regex is valid: {e}"))
});

/// Extract `(owner, repo)` from a GitHub remote URL
///
/// Accepts https, ssh, and scp-style forms; returns `None` for anything not
/// hosted on github.com.
pub fn parse_github_url(remote_url: &str) -> Option<(String, String)> {
    if let Ok(parsed) = Url::parse(remote_url) {
        let host = parsed.host_str()?;
        if host != "github.com" && !host.ends_with(".github.com") {
            return None;
        }
        let mut segments = parsed.path_segments()?.filter(|s| !s.is_empty());
        let owner = segments.next()?.to_string();
        let repo = segments.next()?.trim_end_matches(".git").to_string();
        if owner.is_empty() || repo.is_empty() {
            return None;
        }
        return Some((owner, repo));
    }

    SCP_RE
        .captures(remote_url)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
}

/// Find the remote the base repository lives behind
///
/// Probes the user-specified remote, or `upstream` then `origin`, and parses
/// the first GitHub URL found. No match is a fatal, run-aborting error.
pub async fn identify_remote(ws: &GitWorkspace, preferred: Option<&str>) -> Result<RepoInfo> {
    let names: Vec<&str> = preferred.map_or_else(|| DEFAULT_REMOTES.to_vec(), |name| vec![name]);

    for name in &names {
        let Some(remote_url) = ws.remote_url(name).await? else {
            continue;
        };
        if let Some((owner, repo)) = parse_github_url(&remote_url) {
            debug!(remote = *name, owner = %owner, repo = %repo, "identified remote");
            return Ok(RepoInfo {
                owner,
                repo,
                remote_name: (*name).to_string(),
            });
        }
    }

    Err(Error::RemoteNotFound(names.join(", ")))
}
