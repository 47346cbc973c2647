//! Issue dependency graph: discovery and assembly.
//!
//! [`GraphFetcher`] walks `Depend` links breadth-first against an
//! [`IssueStore`](crate::client::IssueStore) and collects an [`IssueGraph`].
//! [`ResponseAssembler`] turns that graph into [`EnrichedIssue`] trees.
//!
//! [`EnrichedIssue`]: crate::models::EnrichedIssue

pub mod assembler;
pub mod fetcher;

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{TrackerError, TrackerResult};
use crate::models::RawIssue;

pub use assembler::{assemble, ResponseAssembler};
pub use fetcher::{fetch_graph, GraphFetcher};

lazy_static! {
    static ref ISSUE_ID_PATTERN: Regex =
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.\-]*$").expect("issue id pattern is valid");
}

/// Check that `id` can be used as an issue identifier.
pub fn validate_issue_id(id: &str) -> TrackerResult<&str> {
    if id.trim().is_empty() {
        return Err(TrackerError::InvalidArgument(
            "Issue identifier must not be empty".to_string(),
        ));
    }
    if !ISSUE_ID_PATTERN.is_match(id) {
        return Err(TrackerError::InvalidArgument(format!(
            "Malformed issue identifier '{}'",
            id
        )));
    }
    Ok(id)
}

/// Issues discovered by one traversal, keyed by identifier.
///
/// Iteration follows discovery order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueGraph {
    order: Vec<String>,
    issues: HashMap<String, RawIssue>,
}

impl IssueGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `issue` under `id`. Returns false if `id` was already present.
    pub fn insert(&mut self, id: impl Into<String>, issue: RawIssue) -> bool {
        let id = id.into();
        if self.issues.contains_key(&id) {
            return false;
        }
        self.order.push(id.clone());
        self.issues.insert(id, issue);
        true
    }

    pub fn get(&self, id: &str) -> Option<&RawIssue> {
        self.issues.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.issues.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawIssue)> {
        self.order
            .iter()
            .filter_map(|id| self.issues.get(id).map(|issue| (id.as_str(), issue)))
    }
}

impl FromIterator<RawIssue> for IssueGraph {
    fn from_iter<I: IntoIterator<Item = RawIssue>>(iter: I) -> Self {
        let mut graph = IssueGraph::new();
        for issue in iter {
            let id = issue.id_readable.clone();
            graph.insert(id, issue);
        }
        graph
    }
}
