pub mod memory;
pub mod youtrack_client;

use async_trait::async_trait;

use crate::error::TrackerResult;
use crate::models::{ProjectSummary, RawIssue};

pub use memory::InMemoryIssueStore;
pub use youtrack_client::YouTrackClient;

/// Read-only view of a remote issue tracker.
///
/// Authentication or permission failures must surface as
/// [`TrackerError::Unauthorized`](crate::error::TrackerError::Unauthorized).
#[async_trait]
pub trait IssueStore: Send + Sync {
    /// Fetch one issue. `Ok(None)` means the store does not know the issue
    /// or the caller cannot see it.
    async fn fetch_issue(&self, id: &str) -> TrackerResult<Option<RawIssue>>;

    async fn fetch_project_issues(&self, project_name: &str) -> TrackerResult<Vec<RawIssue>>;

    async fn fetch_all_projects(&self) -> TrackerResult<Vec<ProjectSummary>>;
}
