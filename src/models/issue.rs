use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{DEPEND_LINK_TYPE, STATE_FIELD};

/// Issue record as returned by the remote store.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawIssue {
    pub id_readable: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub project: Option<ProjectRef>,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub updated: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub links: Option<Vec<IssueLink>>,
    #[serde(default)]
    pub custom_fields: Option<Vec<CustomField>>,
}

impl RawIssue {
    pub fn new(id_readable: impl Into<String>) -> Self {
        Self {
            id_readable: id_readable.into(),
            summary: None,
            project: None,
            created: None,
            updated: None,
            url: None,
            links: None,
            custom_fields: None,
        }
    }

    /// Identifiers reached through `Depend` links, in link order.
    pub fn dependency_ids(&self) -> impl Iterator<Item = &str> {
        self.links
            .iter()
            .flatten()
            .filter(|link| link.is_dependency())
            .flat_map(|link| link.issues.iter().map(|stub| stub.id_readable.as_str()))
    }

    /// Display name of the `State` custom field, if it has a recognizable shape.
    pub fn state_name(&self) -> Option<String> {
        self.custom_fields
            .iter()
            .flatten()
            .find(|field| field.name == STATE_FIELD)
            .and_then(|field| field.display_name())
            .map(str::to_string)
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project.as_ref().and_then(|p| p.name.as_deref())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IssueLink {
    pub direction: String,
    pub link_type: LinkType,
    #[serde(default)]
    pub issues: Vec<IssueStub>,
}

impl IssueLink {
    pub fn is_dependency(&self) -> bool {
        self.link_type.name == DEPEND_LINK_TYPE
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LinkType {
    pub name: String,
}

/// Reference to a linked issue; only the identifier is populated.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IssueStub {
    pub id_readable: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CustomField {
    pub name: String,
    #[serde(default)]
    pub value: Option<Value>,
}

impl CustomField {
    pub fn display_name(&self) -> Option<&str> {
        self.value
            .as_ref()
            .and_then(|value| CustomFieldValue::classify(value).display_name())
    }
}

/// Shapes a custom field value can take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CustomFieldValue<'a> {
    Single(&'a Map<String, Value>),
    List(&'a [Value]),
    Other(&'a Value),
}

impl<'a> CustomFieldValue<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Object(object) => CustomFieldValue::Single(object),
            Value::Array(items) => CustomFieldValue::List(items),
            other => CustomFieldValue::Other(other),
        }
    }

    /// `name` of a single object, or of the first element of a list.
    pub fn display_name(&self) -> Option<&'a str> {
        match self {
            CustomFieldValue::Single(object) => object.get("name").and_then(Value::as_str),
            CustomFieldValue::List(items) => items
                .first()
                .and_then(Value::as_object)
                .and_then(|object| object.get("name"))
                .and_then(Value::as_str),
            CustomFieldValue::Other(_) => None,
        }
    }
}
