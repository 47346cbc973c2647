use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::issue::{LinkType, ProjectRef, RawIssue};

/// Issue as presented to callers, with links expanded into issue nodes.
///
/// `links` is `None` both for issues without links and for nodes still in
/// the stub phase of assembly (scalars known, links unresolved).
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedIssue {
    pub id_readable: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<EnrichedLink>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedLink {
    pub direction: String,
    pub link_type: LinkType,
    pub issues: Vec<Arc<EnrichedIssue>>,
}

impl EnrichedIssue {
    /// Scalar fields of `raw` with links left unresolved.
    pub fn stub(raw: &RawIssue) -> Self {
        Self {
            id_readable: raw.id_readable.clone(),
            summary: raw.summary.clone(),
            project: raw.project.clone(),
            created: raw.created,
            updated: raw.updated,
            url: raw.url.clone(),
            links: None,
            state: raw.state_name(),
        }
    }

    /// Node carrying nothing but an identifier.
    pub fn reference(id_readable: &str) -> Self {
        Self {
            id_readable: id_readable.to_string(),
            summary: None,
            project: None,
            created: None,
            updated: None,
            url: None,
            links: None,
            state: None,
        }
    }

    /// Issue with every link target rendered as a bare reference, no expansion.
    pub fn flat(raw: &RawIssue) -> Self {
        let links = raw.links.as_ref().map(|links| {
            links
                .iter()
                .map(|link| EnrichedLink {
                    direction: link.direction.clone(),
                    link_type: link.link_type.clone(),
                    issues: link
                        .issues
                        .iter()
                        .map(|stub| Arc::new(EnrichedIssue::reference(&stub.id_readable)))
                        .collect(),
                })
                .collect()
        });

        Self {
            links,
            ..Self::stub(raw)
        }
    }

    pub fn with_links(self, links: Option<Vec<EnrichedLink>>) -> Self {
        Self { links, ..self }
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project.as_ref().and_then(|p| p.name.as_deref())
    }

    /// Identifiers of every linked issue, across all links.
    pub fn linked_ids(&self) -> Vec<&str> {
        self.links
            .iter()
            .flatten()
            .flat_map(|link| link.issues.iter().map(|issue| issue.id_readable.as_str()))
            .collect()
    }
}
