use serde::{Deserialize, Serialize};

/// Owner of the API token, as reported by `/api/users/me`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CurrentUser {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}
