use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::IssueGraph;
use crate::models::{EnrichedIssue, EnrichedLink, RawIssue};

/// Expands a fetched [`IssueGraph`] into enriched issue trees.
///
/// Each issue is built once and shared through `Arc`. Before an issue's
/// links are expanded a stub (scalars only, `links: None`) is cached under
/// its identifier; once the links are done the cache entry is replaced by
/// the resolved node. A link that leads back to an issue still being
/// expanded therefore points at that issue's stub, while links to issues
/// whose expansion already finished point at the resolved node. Top-level
/// results are always resolved.
pub struct ResponseAssembler<'g> {
    graph: &'g IssueGraph,
    cache: HashMap<String, Arc<EnrichedIssue>>,
}

impl<'g> ResponseAssembler<'g> {
    pub fn new(graph: &'g IssueGraph) -> Self {
        Self {
            graph,
            cache: HashMap::with_capacity(graph.len()),
        }
    }

    /// One enriched issue per graph entry, in discovery order.
    pub fn assemble(mut self) -> Vec<Arc<EnrichedIssue>> {
        let graph = self.graph;
        let assembled: Vec<_> = graph.iter().map(|(id, raw)| self.expand(id, raw)).collect();
        debug!(issues = assembled.len(), "response assembled");
        assembled
    }

    fn expand(&mut self, id: &str, raw: &'g RawIssue) -> Arc<EnrichedIssue> {
        if let Some(node) = self.cache.get(id) {
            return Arc::clone(node);
        }

        let stub = Arc::new(EnrichedIssue::stub(raw));
        self.cache.insert(id.to_string(), Arc::clone(&stub));

        let graph = self.graph;
        let links = raw.links.as_ref().map(|links| {
            let mut enriched = Vec::with_capacity(links.len());
            for link in links {
                let mut issues = Vec::with_capacity(link.issues.len());
                for target in &link.issues {
                    // Targets outside the fetched graph are dropped.
                    if let Some(target_raw) = graph.get(&target.id_readable) {
                        issues.push(self.expand(&target.id_readable, target_raw));
                    }
                }
                enriched.push(EnrichedLink {
                    direction: link.direction.clone(),
                    link_type: link.link_type.clone(),
                    issues,
                });
            }
            enriched
        });

        let resolved = Arc::new(EnrichedIssue::clone(&stub).with_links(links));
        self.cache.insert(id.to_string(), Arc::clone(&resolved));
        resolved
    }
}

pub fn assemble(graph: &IssueGraph) -> Vec<Arc<EnrichedIssue>> {
    ResponseAssembler::new(graph).assemble()
}
