//! CLI surface and command wiring

use anstream::{print, println};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::io::Write as _;
use std::path::PathBuf;
use std::time::Duration;
use willitmerge::auth;
use willitmerge::batch::{run_batch, Progress};
use willitmerge::config::{Options, DEFAULT_BRANCH_PREFIX};
use willitmerge::error::Result;
use willitmerge::git::GitWorkspace;
use willitmerge::platform::{identify_remote, GitHubPullRequests, PullRequestSource};
use willitmerge::report::render_report;
use willitmerge::types::{IntegrationStrategy, TrialOutcome, Verdict};

/// Find out which open pull requests will merge cleanly
#[derive(Debug, Parser)]
#[command(name = "willitmerge", version, about)]
pub struct Cli {
    /// Repository owner (derived from the remote URL when omitted)
    #[arg(long)]
    pub owner: Option<String>,

    /// Repository name (derived from the remote URL when omitted)
    #[arg(long)]
    pub repo: Option<String>,

    /// Remote to probe (defaults to upstream, then origin)
    #[arg(long)]
    pub remote: Option<String>,

    /// PR numbers to skip, comma separated
    #[arg(long, value_delimiter = ',')]
    pub ignore: Vec<u64>,

    /// Prefix for trial branch names
    #[arg(long, default_value = DEFAULT_BRANCH_PREFIX)]
    pub prefix: String,

    /// Page of open PRs to fetch
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Number of PRs per page
    #[arg(long, default_value_t = 30)]
    pub per_page: u8,

    /// Directory for downloaded patches (defaults to inside the workspace)
    #[arg(long)]
    pub tmp_dir: Option<PathBuf>,

    /// How to integrate each candidate into its trial branch
    #[arg(long, value_enum, default_value_t)]
    pub strategy: IntegrationStrategy,

    /// Workspace directory
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Include head/base labels and diagnostics in the report
    #[arg(short, long)]
    pub verbose: bool,
}

/// Prints one colored tick per classified candidate, like a test runner
struct TickProgress;

impl Progress for TickProgress {
    fn on_trial(&self, outcome: &TrialOutcome) {
        match outcome.verdict {
            Verdict::Skipped => print!("{}", ".".cyan()),
            Verdict::Success => print!("{}", ".".green()),
            Verdict::Failed => print!("{}", ".".red()),
        }
        let _ = anstream::stdout().flush();
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Run the whole command: discover, trial-merge, report
pub async fn run(cli: Cli) -> Result<()> {
    let ws = GitWorkspace::new(&cli.path);

    // Remote identification fills in whatever the user did not specify.
    let info = identify_remote(&ws, cli.remote.as_deref()).await?;
    let owner = cli.owner.clone().unwrap_or(info.owner);
    let repo = cli.repo.clone().unwrap_or(info.repo);

    let opts = Options {
        owner: owner.clone(),
        repo: repo.clone(),
        ignore: cli.ignore.iter().copied().collect(),
        remote_name: info.remote_name,
        branch_prefix: cli.prefix.clone(),
        page: cli.page,
        per_page: cli.per_page,
        temp_dir: cli.tmp_dir.clone(),
        strategy: cli.strategy,
        verbose: cli.verbose,
    };

    let token = auth::github_token().await.map(|(token, _)| token);
    let source = GitHubPullRequests::new(token.as_deref(), owner, repo)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!("Fetching open pull requests from {}...", source.location()));
    spinner.enable_steady_tick(Duration::from_millis(80));
    let candidates = source.list_open(opts.page, opts.per_page).await?;
    spinner.finish_and_clear();

    if candidates.is_empty() {
        println!("Found 0 open pull requests on {}.", source.location());
        return Ok(());
    }

    println!(
        "Found {} open pull requests on {}.",
        candidates.len(),
        source.location()
    );
    print!("Checking");
    let _ = anstream::stdout().flush();

    let outcomes = run_batch(&ws, &opts, &candidates, &TickProgress).await?;

    println!("{}", "DONE".cyan());
    println!();
    print!("{}", render_report(&outcomes, &candidates, opts.verbose));
    Ok(())
}
