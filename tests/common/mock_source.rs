//! Mock pull-request source for testing
//!
//! Mirrors the discovery boundary: raw records come in as JSON shapes, and
//! anything that does not deserialize into a full `Candidate` (most
//! importantly, records without a number) is dropped before batching.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;
use willitmerge::error::{Error, Result};
use willitmerge::platform::PullRequestSource;
use willitmerge::types::Candidate;

/// Scriptable [`PullRequestSource`] backed by raw JSON records
pub struct MockPullRequestSource {
    records: Mutex<Vec<serde_json::Value>>,
    list_calls: Mutex<Vec<(u32, u8)>>,
    error_on_list: Mutex<Option<String>>,
}

impl MockPullRequestSource {
    /// Create a mock that returns the given raw records
    pub fn with_records(records: Vec<serde_json::Value>) -> Self {
        Self {
            records: Mutex::new(records),
            list_calls: Mutex::new(Vec::new()),
            error_on_list: Mutex::new(None),
        }
    }

    /// Make `list_open` return an error
    pub fn fail_list(&self, msg: &str) {
        *self.error_on_list.lock().unwrap() = Some(msg.to_string());
    }

    /// Get all `(page, per_page)` pairs `list_open` was called with
    pub fn get_list_calls(&self) -> Vec<(u32, u8)> {
        self.list_calls.lock().unwrap().clone()
    }
}

/// A fully-shaped raw record for a PR number
pub fn raw_record(number: u64) -> serde_json::Value {
    serde_json::json!({
        "number": number,
        "head": {
            "label": format!("someone:branch-{number}"),
            "ref_name": format!("branch-{number}"),
            "git_url": ""
        },
        "base_ref": "main",
        "patch_url": "",
        "title": format!("Candidate #{number}"),
        "html_url": format!("https://github.com/test/repo/pull/{number}")
    })
}

/// A bogus record with no identifier
pub fn raw_record_without_number() -> serde_json::Value {
    serde_json::json!({
        "title": "no number here",
        "html_url": "https://github.com/test/repo/pull/unknown"
    })
}

#[async_trait]
impl PullRequestSource for MockPullRequestSource {
    async fn list_open(&self, page: u32, per_page: u8) -> Result<Vec<Candidate>> {
        self.list_calls.lock().unwrap().push((page, per_page));

        if let Some(msg) = self.error_on_list.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter_map(|record| serde_json::from_value::<Candidate>(record.clone()).ok())
            .collect())
    }

    fn location(&self) -> String {
        "github.com/test/repo".to_string()
    }
}
