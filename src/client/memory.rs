//! In-memory [`IssueStore`] for tests and offline runs.
//!
//! Issues and projects are seeded up front. Every `fetch_issue` call is
//! recorded so callers can assert on traversal order, and individual
//! identifiers can be configured to fail with `Unauthorized`.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use super::IssueStore;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{ProjectSummary, RawIssue};

#[derive(Default)]
pub struct InMemoryIssueStore {
    issues: HashMap<String, RawIssue>,
    projects: Vec<ProjectSummary>,
    unauthorized: HashSet<String>,
    fetch_log: Mutex<Vec<String>>,
}

impl InMemoryIssueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issues(issues: impl IntoIterator<Item = RawIssue>) -> Self {
        let mut store = Self::new();
        for issue in issues {
            store.insert(issue);
        }
        store
    }

    pub fn insert(&mut self, issue: RawIssue) {
        self.issues.insert(issue.id_readable.clone(), issue);
    }

    pub fn add_project(&mut self, project: ProjectSummary) {
        self.projects.push(project);
    }

    /// Make fetches of `id` fail as if the credentials were rejected.
    pub fn deny(&mut self, id: impl Into<String>) {
        self.unauthorized.insert(id.into());
    }

    /// Identifiers passed to `fetch_issue`, in call order.
    pub fn fetch_log(&self) -> Vec<String> {
        self.fetch_log
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl IssueStore for InMemoryIssueStore {
    async fn fetch_issue(&self, id: &str) -> TrackerResult<Option<RawIssue>> {
        if let Ok(mut log) = self.fetch_log.lock() {
            log.push(id.to_string());
        }

        if self.unauthorized.contains(id) {
            return Err(TrackerError::Unauthorized(format!("access to {} denied", id)));
        }

        Ok(self.issues.get(id).cloned())
    }

    async fn fetch_project_issues(&self, project_name: &str) -> TrackerResult<Vec<RawIssue>> {
        let mut issues: Vec<RawIssue> = self
            .issues
            .values()
            .filter(|issue| issue.project_name() == Some(project_name))
            .cloned()
            .collect();
        issues.sort_by(|a, b| a.id_readable.cmp(&b.id_readable));
        Ok(issues)
    }

    async fn fetch_all_projects(&self) -> TrackerResult<Vec<ProjectSummary>> {
        Ok(self.projects.clone())
    }
}
