//! Git workspace operations
//!
//! [`GitWorkspace`] owns the path of the single shared working directory and
//! runs git against it. A non-zero exit from git is an expected, meaningful
//! outcome (a conflict is data, not an engine failure) and is reported through
//! [`CommandOutput::failed`]; only a failure to start git at all becomes
//! [`Error::CommandSpawn`].

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

/// Exit status and captured streams of one git invocation
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// True when git exited non-zero
    pub failed: bool,
    /// Captured stdout
    pub stdout: String,
    /// Captured stderr
    pub stderr: String,
}

impl CommandOutput {
    /// Both streams joined, for classifiers that search either
    pub fn combined(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

/// Handle on the working directory all trials share
#[derive(Debug, Clone)]
pub struct GitWorkspace {
    root: PathBuf,
}

impl GitWorkspace {
    /// Create a workspace handle for the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root path of the workspace
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run one git command against the workspace
    pub async fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        debug!(?args, "running git");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .await
            .map_err(|e| Error::CommandSpawn(e.to_string()))?;

        let result = CommandOutput {
            failed: !output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(failed = result.failed, "git finished");
        Ok(result)
    }

    /// Whether the root directory is inside a git repository
    pub async fn is_repository(&self) -> Result<bool> {
        let out = self.run(&["rev-parse", "--git-dir"]).await?;
        Ok(!out.failed)
    }

    /// Name of the currently checked-out branch
    ///
    /// Detached HEAD is treated the same as "not a repository": the engine
    /// has no branch to restore to, so the run cannot proceed.
    pub async fn current_branch(&self) -> Result<String> {
        let out = self.run(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
        let name = out.stdout.trim();
        if out.failed || name.is_empty() || name == "HEAD" {
            return Err(Error::NotARepository);
        }
        Ok(name.to_string())
    }

    /// Whether the working tree has uncommitted changes
    pub async fn is_dirty(&self) -> Result<bool> {
        let out = self.run(&["status", "--porcelain"]).await?;
        Ok(!out.stdout.trim().is_empty())
    }

    /// Fetch a remote; failure here is fatal for the batch
    pub async fn fetch(&self, remote: &str) -> Result<()> {
        let out = self.run(&["fetch", remote]).await?;
        if out.failed {
            return Err(Error::Fetch(out.stderr.trim().to_string()));
        }
        Ok(())
    }

    /// Create a branch at the given base ref and switch onto it
    pub async fn create_branch_at(&self, branch: &str, base: &str) -> Result<CommandOutput> {
        self.run(&["checkout", "-b", branch, base]).await
    }

    /// Switch onto an existing branch
    pub async fn checkout(&self, branch: &str) -> Result<CommandOutput> {
        self.run(&["checkout", branch]).await
    }

    /// Force-delete a local branch
    pub async fn delete_branch(&self, branch: &str) -> Result<CommandOutput> {
        self.run(&["branch", "-D", branch]).await
    }

    /// Add a remote
    pub async fn add_remote(&self, name: &str, url: &str) -> Result<CommandOutput> {
        self.run(&["remote", "add", name, url]).await
    }

    /// Remove a remote
    pub async fn remove_remote(&self, name: &str) -> Result<CommandOutput> {
        self.run(&["remote", "rm", name]).await
    }

    /// URL of a configured remote, if it exists
    pub async fn remote_url(&self, name: &str) -> Result<Option<String>> {
        let out = self.run(&["remote", "get-url", name]).await?;
        if out.failed {
            return Ok(None);
        }
        let url = out.stdout.trim().to_string();
        Ok(if url.is_empty() { None } else { Some(url) })
    }

    /// Local branches whose names start with the given prefix
    pub async fn branches_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        let pattern = format!("refs/heads/{prefix}*");
        let out = self
            .run(&["for-each-ref", "--format=%(refname:short)", &pattern])
            .await?;
        Ok(out
            .stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }

    /// Configured remotes whose names start with the given prefix
    pub async fn remotes_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        let out = self.run(&["remote"]).await?;
        Ok(out
            .stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && l.starts_with(prefix))
            .map(String::from)
            .collect())
    }
}
