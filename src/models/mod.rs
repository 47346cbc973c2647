pub mod issue;
pub mod project;
pub mod response;
pub mod user;

// Re-export commonly used types
pub use issue::{CustomField, CustomFieldValue, IssueLink, IssueStub, LinkType, ProjectRef, RawIssue};
pub use project::ProjectSummary;
pub use response::{EnrichedIssue, EnrichedLink};
pub use user::CurrentUser;
