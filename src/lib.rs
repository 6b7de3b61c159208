//! willitmerge - find out which open pull requests will merge cleanly
//!
//! Discovers a repository's open pull requests, trial-merges each one on a
//! disposable branch of the target, classifies the outcome, and reports all
//! results sorted by how much code each change touches. The workspace is
//! restored to its original branch after every trial and again at the end of
//! the batch, whatever failed along the way.

pub mod auth;
pub mod batch;
pub mod config;
pub mod error;
pub mod git;
pub mod patch;
pub mod platform;
pub mod report;
pub mod trial;
pub mod types;
