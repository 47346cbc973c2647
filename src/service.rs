use std::sync::Arc;

use tracing::info;

use crate::client::IssueStore;
use crate::error::{TrackerError, TrackerResult};
use crate::graph::{assemble, GraphFetcher};
use crate::models::{EnrichedIssue, ProjectSummary};

/// Read-only operations over an issue store. Nothing is cached between calls.
pub struct IssueGraphService<S: IssueStore + ?Sized> {
    store: Arc<S>,
}

impl<S: IssueStore + ?Sized> IssueGraphService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every issue reachable from `start_id` over `Depend` links, with links
    /// expanded. Empty when the start issue itself cannot be found.
    pub async fn get_issue_dependency_graph(
        &self,
        start_id: &str,
    ) -> TrackerResult<Vec<Arc<EnrichedIssue>>> {
        let graph = GraphFetcher::new(self.store.as_ref()).fetch(start_id).await?;
        Ok(assemble(&graph))
    }

    /// Issues of one project without link expansion; link targets carry only
    /// their identifier.
    pub async fn get_issues_for_project(&self, project_name: &str) -> TrackerResult<Vec<EnrichedIssue>> {
        if project_name.trim().is_empty() {
            return Err(TrackerError::InvalidArgument(
                "Project name must not be empty".to_string(),
            ));
        }

        let issues = self.store.fetch_project_issues(project_name.trim()).await?;
        info!(project = project_name, issues = issues.len(), "project issues fetched");
        Ok(issues.iter().map(EnrichedIssue::flat).collect())
    }

    pub async fn get_all_projects(&self) -> TrackerResult<Vec<ProjectSummary>> {
        self.store.fetch_all_projects().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::InMemoryIssueStore;
    use crate::models::{IssueLink, IssueStub, LinkType, ProjectRef, RawIssue};

    fn project_issue(id: &str, project: &str, targets: &[&str]) -> RawIssue {
        let mut issue = RawIssue::new(id);
        issue.project = Some(ProjectRef { name: Some(project.to_string()) });
        issue.links = Some(vec![IssueLink {
            direction: "OUTWARD".to_string(),
            link_type: LinkType { name: "Depend".to_string() },
            issues: targets
                .iter()
                .map(|t| IssueStub { id_readable: t.to_string() })
                .collect(),
        }]);
        issue
    }

    #[tokio::test]
    async fn test_project_issues_are_flat() {
        let store = InMemoryIssueStore::with_issues([
            project_issue("ADM-1", "Admin", &["ADM-2", "OTHER-9"]),
            project_issue("ADM-2", "Admin", &[]),
            project_issue("WEB-1", "Web", &[]),
        ]);
        let service = IssueGraphService::new(Arc::new(store));

        let issues = service.get_issues_for_project("Admin").await.unwrap();

        assert_eq!(issues.len(), 2);
        let first = &issues[0];
        assert_eq!(first.id_readable, "ADM-1");
        assert_eq!(first.linked_ids(), vec!["ADM-2", "OTHER-9"]);
        let target = &first.links.as_ref().unwrap()[0].issues[0];
        assert!(target.summary.is_none());
        assert!(target.links.is_none());
    }

    #[tokio::test]
    async fn test_blank_project_name_is_rejected() {
        let service = IssueGraphService::new(Arc::new(InMemoryIssueStore::new()));
        let result = service.get_issues_for_project("  ").await;
        assert!(matches!(result, Err(TrackerError::InvalidArgument(_))));
    }

    fn project(id: &str, name: &str, short_name: &str) -> ProjectSummary {
        ProjectSummary {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            short_name: Some(short_name.to_string()),
            description: None,
            archived: Some(false),
        }
    }

    #[tokio::test]
    async fn test_all_projects_pass_through() {
        let mut store = InMemoryIssueStore::new();
        let projects = vec![project("0-0", "Admin", "ADM"), project("0-1", "Web Shop", "WEB")];
        for p in &projects {
            store.add_project(p.clone());
        }
        let service = IssueGraphService::new(Arc::new(store));

        assert_eq!(service.get_all_projects().await.unwrap(), projects);
    }

    #[tokio::test]
    async fn test_service_works_with_trait_objects() {
        let mut store = InMemoryIssueStore::with_issues([project_issue("A-1", "A", &[])]);
        store.add_project(project("0-2", "A", "A"));
        let store: Arc<dyn IssueStore> = Arc::new(store);
        let service = IssueGraphService::new(store);

        let graph = service.get_issue_dependency_graph("A-1").await.unwrap();
        assert_eq!(graph.len(), 1);
        assert_eq!(service.get_all_projects().await.unwrap(), vec![project("0-2", "A", "A")]);
    }
}
