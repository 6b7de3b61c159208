//! GitHub authentication
//!
//! Tries the gh CLI first, then environment variables. A missing token is
//! not an error; unauthenticated requests work for public repositories at a
//! lower rate limit.

use tokio::process::Command;
use tracing::debug;

/// Source of the authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from the gh CLI
    Cli,
    /// Token from `GITHUB_TOKEN` or `GH_TOKEN`
    EnvVar,
}

/// Resolve a GitHub token, if one is available
pub async fn github_token() -> Option<(String, AuthSource)> {
    if let Some(token) = gh_cli_token().await {
        debug!("using token from gh CLI");
        return Some((token, AuthSource::Cli));
    }

    for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
        if let Ok(token) = std::env::var(var) {
            if !token.trim().is_empty() {
                debug!(var, "using token from environment");
                return Some((token.trim().to_string(), AuthSource::EnvVar));
            }
        }
    }

    debug!("no GitHub token found, proceeding unauthenticated");
    None
}

async fn gh_cli_token() -> Option<String> {
    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
