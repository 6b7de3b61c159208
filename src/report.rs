//! Report rendering
//!
//! One line per outcome, sorted ascending by impact so the cheapest merges
//! come first. Verbose mode appends the head/base labels and the raw
//! diagnostic text.

use crate::types::{Candidate, TrialOutcome, Verdict};
use owo_colors::OwoColorize;
use std::collections::HashMap;
use std::fmt::Write as _;

/// Outcomes ordered ascending by impact score
///
/// Stable: equal scores keep their input (candidate-list) order.
pub fn sorted_by_impact(outcomes: &[TrialOutcome]) -> Vec<&TrialOutcome> {
    let mut sorted: Vec<&TrialOutcome> = outcomes.iter().collect();
    sorted.sort_by_key(|o| o.impact);
    sorted
}

/// Render the final report
///
/// `candidates` supplies display metadata (URL, head/base labels) the
/// outcomes themselves do not carry.
pub fn render_report(outcomes: &[TrialOutcome], candidates: &[Candidate], verbose: bool) -> String {
    let by_number: HashMap<u64, &Candidate> =
        candidates.iter().map(|c| (c.number, c)).collect();

    let mut out = String::new();
    for outcome in sorted_by_impact(outcomes) {
        let candidate = by_number.get(&outcome.number);
        let url = candidate.map_or("", |c| c.html_url.as_str());

        match outcome.verdict {
            Verdict::Skipped => {
                let _ = writeln!(
                    out,
                    "Issue #{}, {url}, has been... {}",
                    outcome.number,
                    "SKIPPED".cyan()
                );
            }
            Verdict::Success => {
                let _ = writeln!(
                    out,
                    "Issue #{}, {url}, will it merge? {}",
                    outcome.number,
                    "YES!".green()
                );
                if verbose {
                    append_refs(&mut out, candidate);
                    let _ = writeln!(out, "{}", outcome.diagnostic.trim_end());
                }
            }
            Verdict::Failed => {
                let _ = writeln!(
                    out,
                    "Issue #{}, {url}, will it merge? {}",
                    outcome.number,
                    "NO!".red()
                );
                if verbose {
                    append_refs(&mut out, candidate);
                    let _ = writeln!(out, "{}", outcome.diagnostic.trim_end().red());
                }
            }
        }
    }
    out
}

fn append_refs(out: &mut String, candidate: Option<&&Candidate>) {
    if let Some(c) = candidate {
        let _ = writeln!(out, "{} -> {}", c.head.label, c.base_ref);
    }
}
