use std::fmt;

/// Builder for the YouTrack `fields` query parameter.
///
/// Renders as a comma separated list where nested selections use the
/// `name(a,b)` form, e.g. `idReadable,project(name)`. Fields keep insertion
/// order and duplicates are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelection {
    fields: Vec<String>,
}

impl FieldSelection {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a simple field
    pub fn field(mut self, name: &str) -> Self {
        self.push(name.to_string());
        self
    }

    /// Add multiple simple fields
    pub fn fields(mut self, names: &[&str]) -> Self {
        for name in names {
            self.push(name.to_string());
        }
        self
    }

    /// Add a nested field with its own selection
    pub fn nested(mut self, name: &str, selection: FieldSelection) -> Self {
        self.push(format!("{}({})", name, selection));
        self
    }

    fn push(&mut self, field: String) {
        if !self.fields.contains(&field) {
            self.fields.push(field);
        }
    }
}

impl fmt::Display for FieldSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fields.join(","))
    }
}

impl Default for FieldSelection {
    fn default() -> Self {
        Self::new()
    }
}

/// Predefined field selections for the entities this crate reads
pub mod selections {
    use super::FieldSelection;

    fn named() -> FieldSelection {
        FieldSelection::new().field("name")
    }

    pub fn link_fields() -> FieldSelection {
        FieldSelection::new()
            .field("direction")
            .nested("linkType", named())
            .nested("issues", FieldSelection::new().field("idReadable"))
    }

    pub fn custom_field_fields() -> FieldSelection {
        FieldSelection::new()
            .field("name")
            .nested("value", named())
    }

    pub fn issue_fields() -> FieldSelection {
        FieldSelection::new()
            .fields(&["idReadable", "summary"])
            .nested("project", named())
            .fields(&["created", "updated"])
            .nested("links", link_fields())
            .nested("customFields", custom_field_fields())
    }

    pub fn project_fields() -> FieldSelection {
        FieldSelection::new().fields(&["id", "name", "shortName", "description", "archived"])
    }

    pub fn user_fields() -> FieldSelection {
        FieldSelection::new().fields(&["login", "name", "email"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_selection_syntax() {
        let selection = FieldSelection::new()
            .field("idReadable")
            .nested("project", FieldSelection::new().field("name"));
        assert_eq!(selection.to_string(), "idReadable,project(name)");
    }

    #[test]
    fn test_duplicates_are_ignored() {
        let selection = FieldSelection::new()
            .fields(&["a", "b"])
            .fields(&["b", "c"])
            .field("a");
        assert_eq!(selection.to_string(), "a,b,c");
    }

    #[test]
    fn test_issue_fields_cover_links_and_state() {
        let rendered = selections::issue_fields().to_string();
        assert_eq!(
            rendered,
            "idReadable,summary,project(name),created,updated,\
             links(direction,linkType(name),issues(idReadable)),\
             customFields(name,value(name))"
        );
    }
}
