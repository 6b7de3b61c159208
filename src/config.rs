//! Engine configuration
//!
//! The options the merge-trial engine consumes. Discovery-only settings
//! (owner/repo, paging) live here too since the CLI resolves everything into
//! one struct before the batch starts.

use crate::types::IntegrationStrategy;
use std::collections::HashSet;
use std::path::PathBuf;

/// Default prefix for trial branch and remote names
pub const DEFAULT_BRANCH_PREFIX: &str = "willitmerge-";

/// Resolved options for one run
#[derive(Debug, Clone)]
pub struct Options {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// PR numbers to skip without touching the workspace
    pub ignore: HashSet<u64>,
    /// Name of the remote holding the base repository
    pub remote_name: String,
    /// Prefix for trial branch and remote names
    pub branch_prefix: String,
    /// Page of open PRs to fetch
    pub page: u32,
    /// Number of PRs per page
    pub per_page: u8,
    /// Override for the temp dir holding downloaded patches.
    /// Defaults to `.willitmerge-tmp` inside the workspace so teardown never
    /// removes a path outside the run's control.
    pub temp_dir: Option<PathBuf>,
    /// How a candidate's change is integrated into the trial branch
    pub strategy: IntegrationStrategy,
    /// Include diagnostics in the report
    pub verbose: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repo: String::new(),
            ignore: HashSet::new(),
            remote_name: String::new(),
            branch_prefix: DEFAULT_BRANCH_PREFIX.to_string(),
            page: 1,
            per_page: 30,
            temp_dir: None,
            strategy: IntegrationStrategy::default(),
            verbose: false,
        }
    }
}

impl Options {
    /// Trial branch name for a candidate: `<prefix><number>`
    pub fn trial_branch(&self, number: u64) -> String {
        format!("{}{number}", self.branch_prefix)
    }
}
