use std::collections::{HashSet, VecDeque};

use tracing::{debug, info};

use super::{validate_issue_id, IssueGraph};
use crate::client::IssueStore;
use crate::error::TrackerResult;

/// Breadth-first discovery of every issue reachable over `Depend` links.
pub struct GraphFetcher<'a, S: IssueStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: IssueStore + ?Sized> GraphFetcher<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Fetch `start_id` and its transitive dependencies.
    ///
    /// Issues the store does not know are left out of the result. Any store
    /// error ends the traversal and nothing collected so far is returned.
    pub async fn fetch(&self, start_id: &str) -> TrackerResult<IssueGraph> {
        let start_id = validate_issue_id(start_id)?;

        let mut queue: VecDeque<String> = VecDeque::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut graph = IssueGraph::new();

        queue.push_back(start_id.to_string());
        visited.insert(start_id.to_string());

        while let Some(current) = queue.pop_front() {
            let Some(issue) = self.store.fetch_issue(&current).await? else {
                debug!(issue = %current, "skipping issue the store could not find");
                continue;
            };

            // The store may resolve aliases (database ids, other casing); the
            // returned identifier is the key.
            let canonical = if issue.id_readable.is_empty() {
                current.clone()
            } else {
                issue.id_readable.clone()
            };
            visited.insert(canonical.clone());
            if graph.contains(&canonical) {
                debug!(requested = %current, issue = %canonical, "alias of an issue already fetched");
                continue;
            }

            for dependency in issue.dependency_ids() {
                if dependency.is_empty() {
                    continue;
                }
                if visited.insert(dependency.to_string()) {
                    queue.push_back(dependency.to_string());
                }
            }

            graph.insert(canonical, issue);
        }

        info!(start = start_id, issues = graph.len(), "dependency graph fetched");
        Ok(graph)
    }
}

pub async fn fetch_graph<S: IssueStore + ?Sized>(store: &S, start_id: &str) -> TrackerResult<IssueGraph> {
    GraphFetcher::new(store).fetch(start_id).await
}
