//! Test fixtures: real temporary git repositories
//!
//! These are test utilities - not every helper is used by every test file.

#![allow(dead_code)]

pub mod mock_source;

use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;
use willitmerge::config::Options;
use willitmerge::types::{Candidate, SourceRef};

/// A throwaway git repository on disk
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Initialize a fresh repository with one commit
    pub fn init() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let repo = Self { dir };
        repo.git(&["init"]);
        repo.configure_identity();
        repo.write("README.md", "alpha\nbravo\ncharlie\ndelta\n");
        repo.git(&["add", "."]);
        repo.git(&["commit", "-m", "initial commit"]);
        repo
    }

    /// Clone an existing repository; the source becomes remote `origin`
    pub fn clone_from(source: &Self) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let dest = dir.path().join("repo");
        let status = Command::new("git")
            .args([
                "clone",
                &source.path().to_string_lossy(),
                &dest.to_string_lossy(),
            ])
            .output()
            .expect("run git clone");
        assert!(
            status.status.success(),
            "git clone failed: {}",
            String::from_utf8_lossy(&status.stderr)
        );
        let repo = Self { dir };
        repo.configure_identity();
        repo
    }

    /// Path of the working directory
    pub fn path(&self) -> PathBuf {
        let nested = self.dir.path().join("repo");
        if nested.exists() {
            nested
        } else {
            self.dir.path().to_path_buf()
        }
    }

    /// Run git in this repository, asserting success, returning stdout
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .output()
            .expect("run git");
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Run git without asserting, returning (success, stdout)
    pub fn git_allow_failure(&self, args: &[&str]) -> (bool, String) {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .output()
            .expect("run git");
        (
            output.status.success(),
            String::from_utf8_lossy(&output.stdout).into_owned(),
        )
    }

    fn configure_identity(&self) {
        self.git(&["config", "user.name", "Test User"]);
        self.git(&["config", "user.email", "test@example.com"]);
        self.git(&["config", "commit.gpgsign", "false"]);
    }

    /// Write a file relative to the repository root
    pub fn write(&self, rel: &str, content: &str) {
        std::fs::write(self.path().join(rel), content).expect("write file");
    }

    /// Stage everything and commit
    pub fn commit_all(&self, message: &str) {
        self.git(&["add", "."]);
        self.git(&["commit", "-m", message]);
    }

    /// Name of the currently checked-out branch
    pub fn current_branch(&self) -> String {
        self.git(&["rev-parse", "--abbrev-ref", "HEAD"])
            .trim()
            .to_string()
    }

    /// All local branch names
    pub fn branch_names(&self) -> Vec<String> {
        self.git(&["for-each-ref", "--format=%(refname:short)", "refs/heads/"])
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect()
    }

    /// All configured remote names
    pub fn remote_names(&self) -> Vec<String> {
        self.git(&["remote"])
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Upstream repo, a workspace clone, and a fork clone: the standard trial setup
pub struct TrialFixture {
    /// The canonical repository
    pub upstream: TestRepo,
    /// Clone the engine runs in; its `origin` is the upstream
    pub workspace: TestRepo,
    /// Clone holding the candidate's `feature` branch
    pub fork: TestRepo,
    /// Default branch name of the upstream repository
    pub base_branch: String,
}

impl TrialFixture {
    /// Upstream with a fork holding a cleanly-merging `feature` branch:
    /// 4 inserted lines, 1 deleted line
    pub fn clean_feature() -> Self {
        let upstream = TestRepo::init();
        let base_branch = upstream.current_branch();

        let fork = TestRepo::clone_from(&upstream);
        fork.git(&["checkout", "-b", "feature"]);
        fork.write("README.md", "alpha\ncharlie\ndelta\necho\nfoxtrot\ngolf\nhotel\n");
        fork.commit_all("expand the readme");

        let workspace = TestRepo::clone_from(&upstream);
        Self {
            upstream,
            workspace,
            fork,
            base_branch,
        }
    }

    /// Upstream and fork that both rewrote the same line: guaranteed conflict
    pub fn conflicting_feature() -> Self {
        let upstream = TestRepo::init();
        let base_branch = upstream.current_branch();

        let fork = TestRepo::clone_from(&upstream);
        fork.git(&["checkout", "-b", "feature"]);
        fork.write("README.md", "alpha\nbravo\ncharlie-fork\ndelta\n");
        fork.commit_all("fork edit");

        // Upstream moves on after the fork diverged.
        upstream.write("README.md", "alpha\nbravo\ncharlie-upstream\ndelta\n");
        upstream.commit_all("upstream edit");

        let workspace = TestRepo::clone_from(&upstream);
        Self {
            upstream,
            workspace,
            fork,
            base_branch,
        }
    }

    /// A candidate for the fork's `feature` branch
    pub fn candidate(&self, number: u64) -> Candidate {
        Candidate {
            number,
            head: SourceRef {
                label: format!("fork:feature-{number}"),
                ref_name: "feature".to_string(),
                git_url: self.fork.path().to_string_lossy().into_owned(),
            },
            base_ref: self.base_branch.clone(),
            patch_url: String::new(),
            title: format!("Candidate #{number}"),
            html_url: format!("https://github.com/test/repo/pull/{number}"),
        }
    }

    /// Engine options targeting the workspace clone's `origin` remote
    pub fn options(&self) -> Options {
        Options {
            owner: "test".to_string(),
            repo: "repo".to_string(),
            remote_name: "origin".to_string(),
            ..Options::default()
        }
    }
}

/// Patch document for the fork's feature branch relative to the base branch
pub fn feature_patch(fixture: &TrialFixture) -> String {
    fixture.fork.git(&[
        "format-patch",
        "--stdout",
        &format!("{}..feature", fixture.base_branch),
    ])
}

/// Free-standing candidate builder for tests that do not need a fixture
pub fn make_candidate(number: u64) -> Candidate {
    Candidate {
        number,
        head: SourceRef {
            label: format!("someone:branch-{number}"),
            ref_name: format!("branch-{number}"),
            git_url: String::new(),
        },
        base_ref: "main".to_string(),
        patch_url: String::new(),
        title: format!("Candidate #{number}"),
        html_url: format!("https://github.com/test/repo/pull/{number}"),
    }
}
