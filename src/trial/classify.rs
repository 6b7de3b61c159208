//! Trial classification - pure functions
//!
//! No I/O happens here: the classifier turns a staged-patch result into a
//! [`TrialOutcome`], and the impact parser extracts the change magnitude from
//! git's human-readable diffstat summary.

use crate::patch::StagedPatch;
use crate::types::{TrialOutcome, Verdict};
use regex::Regex;
use std::sync::LazyLock;

/// Matches git's diffstat summary line, e.g. `12 insertions(+), 3 deletions(-)`.
/// Singular forms are accepted: git prints `1 insertion(+)`.
static IMPACT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+) insertions?\(\+\), (\d+) deletions?\(-\)")
        .unwrap_or_else(|e| unreachable!("impact regex is valid: {e}"))
});

/// Sum of inserted and deleted lines reported in the diagnostic text
///
/// Total over all inputs: text without a summary line scores 0.
pub fn parse_impact(text: &str) -> u64 {
    IMPACT_RE.captures(text).map_or(0, |caps| {
        let insertions: u64 = caps[1].parse().unwrap_or(0);
        let deletions: u64 = caps[2].parse().unwrap_or(0);
        insertions + deletions
    })
}

/// Turn a staged-patch result into the verdict for one candidate
pub fn classify(number: u64, staged: &StagedPatch) -> TrialOutcome {
    if staged.conflict {
        return TrialOutcome::failed(number, staged.diagnostic.clone());
    }
    TrialOutcome {
        number,
        verdict: Verdict::Success,
        impact: parse_impact(&staged.diagnostic),
        diagnostic: staged.diagnostic.clone(),
    }
}
