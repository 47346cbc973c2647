use std::collections::HashSet;
use std::sync::Arc;

use youtrack_graph::{
    fetch_graph, EnrichedIssue, InMemoryIssueStore, IssueGraphService, IssueLink, IssueStub, LinkType, RawIssue,
    TrackerError,
};

fn link(kind: &str, targets: &[&str]) -> IssueLink {
    IssueLink {
        direction: "OUTWARD".to_string(),
        link_type: LinkType { name: kind.to_string() },
        issues: targets
            .iter()
            .map(|id| IssueStub { id_readable: id.to_string() })
            .collect(),
    }
}

fn issue(id: &str, depends_on: &[&str]) -> RawIssue {
    let mut issue = RawIssue::new(id);
    issue.summary = Some(format!("{} summary", id));
    issue.links = Some(vec![link("Depend", depends_on)]);
    issue
}

fn service(issues: Vec<RawIssue>) -> (Arc<InMemoryIssueStore>, IssueGraphService<InMemoryIssueStore>) {
    let store = Arc::new(InMemoryIssueStore::with_issues(issues));
    (store.clone(), IssueGraphService::new(store))
}

fn ids(issues: &[Arc<EnrichedIssue>]) -> HashSet<String> {
    issues.iter().map(|i| i.id_readable.clone()).collect()
}

fn find<'a>(issues: &'a [Arc<EnrichedIssue>], id: &str) -> &'a Arc<EnrichedIssue> {
    issues.iter().find(|i| i.id_readable == id).unwrap()
}

fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_diamond_dependencies() {
    let (store, service) = service(vec![issue("A", &["B", "C"]), issue("B", &["C"]), issue("C", &[])]);

    let graph = fetch_graph(store.as_ref(), "A").await.unwrap();
    assert_eq!(graph.ids().map(str::to_string).collect::<HashSet<_>>(), set(&["A", "B", "C"]));

    let output = service.get_issue_dependency_graph("A").await.unwrap();
    assert_eq!(ids(&output), set(&["A", "B", "C"]));

    let a = find(&output, "A");
    let b = find(&output, "B");
    let c = find(&output, "C");

    let a_targets = &a.links.as_ref().unwrap()[0].issues;
    assert_eq!(a_targets.len(), 2);
    assert!(Arc::ptr_eq(&a_targets[0], b));
    assert!(Arc::ptr_eq(&a_targets[1], c));
    assert!(c.linked_ids().is_empty());

    let b_targets = &b.links.as_ref().unwrap()[0].issues;
    assert!(Arc::ptr_eq(&b_targets[0], &a_targets[1]));
}

#[tokio::test]
async fn test_cycle_terminates() {
    let (store, service) = service(vec![issue("X", &["Y"]), issue("Y", &["X"])]);

    let output = service.get_issue_dependency_graph("X").await.unwrap();

    assert_eq!(output.len(), 2);
    assert_eq!(ids(&output), set(&["X", "Y"]));
    assert_eq!(store.fetch_log(), vec!["X", "Y"]);

    let x = find(&output, "X");
    let y = find(&output, "Y");
    assert_eq!(x.linked_ids(), vec!["Y"]);
    assert_eq!(y.linked_ids(), vec!["X"]);

    // The back edge ends at a node without expanded links.
    let x_from_y = &y.links.as_ref().unwrap()[0].issues[0];
    assert!(x_from_y.links.is_none());

    // Serializing the whole response is finite.
    let json = serde_json::to_string(&output).unwrap();
    assert!(json.contains("\"idReadable\":\"X\""));
}

#[tokio::test]
async fn test_missing_dependency_is_dropped() {
    let (_, service) = service(vec![issue("Z", &["GONE"])]);

    let output = service.get_issue_dependency_graph("Z").await.unwrap();

    assert_eq!(output.len(), 1);
    let z = &output[0];
    assert_eq!(z.id_readable, "Z");
    assert!(z.linked_ids().is_empty());
}

#[tokio::test]
async fn test_unauthorized_mid_traversal_fails_whole_call() {
    let mut store = InMemoryIssueStore::with_issues([issue("A", &["B"]), issue("B", &["C"]), issue("C", &[])]);
    store.deny("B");
    let service = IssueGraphService::new(Arc::new(store));

    let result = service.get_issue_dependency_graph("A").await;

    assert!(matches!(result, Err(TrackerError::Unauthorized(_))));
}

#[tokio::test]
async fn test_invalid_start_identifier() {
    let (store, service) = service(vec![]);

    for bad in ["", "ADM 1", "../etc"] {
        let result = service.get_issue_dependency_graph(bad).await;
        assert!(matches!(result, Err(TrackerError::InvalidArgument(_))), "{:?}", bad);
    }
    assert!(store.fetch_log().is_empty());
}

#[tokio::test]
async fn test_other_link_types_are_kept_but_not_followed() {
    let mut root = issue("A", &["B"]);
    root.links.as_mut().unwrap().push(link("Relates", &["R"]));
    root.links.as_mut().unwrap().push(link("Subtask", &["B"]));
    let (store, service) = service(vec![root.clone(), issue("B", &[]), issue("R", &[])]);

    let graph = fetch_graph(store.as_ref(), "A").await.unwrap();
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.get("A").unwrap().links, root.links);

    let output = service.get_issue_dependency_graph("A").await.unwrap();
    let a = find(&output, "A");
    let links = a.links.as_ref().unwrap();
    assert_eq!(links.len(), 3);
    assert!(links[1].issues.is_empty());
    assert_eq!(links[2].issues[0].id_readable, "B");
}

#[tokio::test]
async fn test_each_request_refetches() {
    let (store, service) = service(vec![issue("A", &["B"]), issue("B", &[])]);

    let first = service.get_issue_dependency_graph("A").await.unwrap();
    let second = service.get_issue_dependency_graph("A").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(store.fetch_log(), vec!["A", "B", "A", "B"]);
}
