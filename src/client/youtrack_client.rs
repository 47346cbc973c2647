use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::IssueStore;
use crate::config::TrackerSettings;
use crate::constants::PAGE_SIZE;
use crate::error::{TrackerError, TrackerResult};
use crate::fields::selections;
use crate::models::{CurrentUser, ProjectSummary, RawIssue};

/// REST client for a YouTrack instance.
pub struct YouTrackClient {
    client: reqwest::Client,
    base_url: Url,
}

impl YouTrackClient {
    pub fn new(settings: &TrackerSettings) -> TrackerResult<Self> {
        if settings.base_url.trim().is_empty() || settings.api_token.trim().is_empty() {
            return Err(TrackerError::InvalidArgument(
                "YouTrack base URL and API token must be configured".to_string(),
            ));
        }

        let base_url = Url::parse(settings.base_url.trim()).map_err(|e| {
            TrackerError::InvalidArgument(format!("Invalid base URL '{}': {}", settings.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(TrackerError::InvalidArgument(format!(
                "Base URL '{}' cannot carry a path",
                settings.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {}", settings.api_token.trim()))
            .map_err(|_| TrackerError::InvalidArgument("Invalid API token format".to_string()))?;
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Verify the token by asking who owns it.
    pub async fn fetch_current_user(&self) -> TrackerResult<CurrentUser> {
        let url = self.endpoint(&["api", "users", "me"])?;
        self.get_json(url, &[("fields", selections::user_fields().to_string())])
            .await
    }

    fn endpoint(&self, segments: &[&str]) -> TrackerResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TrackerError::InvalidArgument("Base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn with_web_url(&self, mut issue: RawIssue) -> RawIssue {
        if !issue.id_readable.is_empty() {
            issue.url = Some(issue_web_url(self.base_url.as_str(), &issue.id_readable));
        }
        issue
    }

    async fn get_json<T>(&self, url: Url, query: &[(&str, String)]) -> TrackerResult<T>
    where
        T: DeserializeOwned,
    {
        debug!(url = %url, "GET");
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, &body));
        }

        Ok(response.json::<T>().await?)
    }

    async fn get_paged<T>(&self, url: Url, params: &[(&str, String)]) -> TrackerResult<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        let mut results = Vec::new();
        let mut skip = 0usize;

        loop {
            let mut query = params.to_vec();
            query.push(("$skip", skip.to_string()));
            query.push(("$top", PAGE_SIZE.to_string()));

            let page: Vec<T> = self.get_json(url.clone(), &query).await?;
            let count = page.len();
            results.extend(page);

            if count < PAGE_SIZE {
                break;
            }
            skip += count;
        }

        Ok(results)
    }
}

#[async_trait]
impl IssueStore for YouTrackClient {
    async fn fetch_issue(&self, id: &str) -> TrackerResult<Option<RawIssue>> {
        let url = self.endpoint(&["api", "issues", id])?;
        let fields = selections::issue_fields().to_string();

        let issue = found_or_none(self.get_json::<RawIssue>(url, &[("fields", fields)]).await)?;
        if issue.is_none() {
            debug!(issue = id, "issue not found");
        }
        Ok(issue.map(|issue| self.with_web_url(issue)))
    }

    async fn fetch_project_issues(&self, project_name: &str) -> TrackerResult<Vec<RawIssue>> {
        let url = self.endpoint(&["api", "issues"])?;
        let params = [
            ("query", project_query(project_name)?),
            ("fields", selections::issue_fields().to_string()),
        ];

        let issues: Vec<RawIssue> = self.get_paged(url, &params).await?;
        if issues.is_empty() {
            warn!(project = project_name, "project query returned no issues");
        }
        Ok(issues.into_iter().map(|issue| self.with_web_url(issue)).collect())
    }

    async fn fetch_all_projects(&self) -> TrackerResult<Vec<ProjectSummary>> {
        let url = self.endpoint(&["api", "admin", "projects"])?;
        self.get_paged(url, &[("fields", selections::project_fields().to_string())])
            .await
    }
}

/// Browser URL of an issue.
pub fn issue_web_url(base_url: &str, id: &str) -> String {
    format!("{}/issue/{}", base_url.trim_end_matches('/'), id)
}

/// Search query selecting every issue of a project. Braces allow spaces in names.
///
/// The query language has no escape for braces inside a braced value, so
/// names containing them are rejected.
pub fn project_query(project_name: &str) -> TrackerResult<String> {
    let name = project_name.trim();
    if name.contains(['{', '}']) {
        return Err(TrackerError::InvalidArgument(format!(
            "Project name '{}' cannot contain braces",
            name
        )));
    }
    Ok(format!("project: {{{}}}", name))
}

/// Treat a 404 as an absent resource; every other error passes through.
pub(crate) fn found_or_none<T>(result: TrackerResult<T>) -> TrackerResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(TrackerError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

pub(crate) fn error_for_status(status: StatusCode, body: &str) -> TrackerError {
    match status {
        StatusCode::UNAUTHORIZED => {
            TrackerError::Unauthorized("Unauthorized to YouTrack. Check your API token.".to_string())
        }
        StatusCode::FORBIDDEN => TrackerError::Unauthorized(
            "Forbidden by YouTrack. Your token may lack the required permissions.".to_string(),
        ),
        StatusCode::NOT_FOUND => TrackerError::NotFound(if body.trim().is_empty() {
            "resource not found".to_string()
        } else {
            body.trim().to_string()
        }),
        _ => TrackerError::ApiError(format!("HTTP {}: {}", status, body.trim())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn settings(base_url: &str, token: &str) -> TrackerSettings {
        TrackerSettings {
            base_url: base_url.to_string(),
            api_token: token.to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_unconfigured_endpoint_is_invalid_argument() {
        for (base, token) in [("", "perm:abc"), ("https://yt.example.com", " "), ("", "")] {
            match YouTrackClient::new(&settings(base, token)) {
                Err(TrackerError::InvalidArgument(_)) => {}
                other => panic!("Expected InvalidArgument, got {:?}", other.err()),
            }
        }
    }

    #[test]
    fn test_malformed_base_url_is_invalid_argument() {
        assert!(matches!(
            YouTrackClient::new(&settings("not a url", "perm:abc")),
            Err(TrackerError::InvalidArgument(_))
        ));
        assert!(matches!(
            YouTrackClient::new(&settings("mailto:ops@example.com", "perm:abc")),
            Err(TrackerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = YouTrackClient::new(&settings("https://host.example.com/youtrack/", "t")).unwrap();
        let url = client.endpoint(&["api", "issues", "ADM-1"]).unwrap();
        assert_eq!(url.as_str(), "https://host.example.com/youtrack/api/issues/ADM-1");

        let client = YouTrackClient::new(&settings("https://yt.example.com", "t")).unwrap();
        let url = client.endpoint(&["api", "admin", "projects"]).unwrap();
        assert_eq!(url.as_str(), "https://yt.example.com/api/admin/projects");
    }

    #[test]
    fn test_endpoint_escapes_segments() {
        let client = YouTrackClient::new(&settings("https://yt.example.com", "t")).unwrap();
        let url = client.endpoint(&["api", "issues", "A/B"]).unwrap();
        assert_eq!(url.as_str(), "https://yt.example.com/api/issues/A%2FB");
    }

    #[test]
    fn test_web_url_is_attached() {
        let client = YouTrackClient::new(&settings("https://yt.example.com/", "t")).unwrap();
        let issue = client.with_web_url(RawIssue::new("ADM-7"));
        assert_eq!(issue.url.as_deref(), Some("https://yt.example.com/issue/ADM-7"));
    }

    #[test]
    fn test_issue_web_url_trims_slash() {
        assert_eq!(issue_web_url("https://a.b/", "X-1"), "https://a.b/issue/X-1");
        assert_eq!(issue_web_url("https://a.b", "X-1"), "https://a.b/issue/X-1");
    }

    #[test]
    fn test_project_query_wraps_name() {
        assert_eq!(project_query(" Mobile App ").unwrap(), "project: {Mobile App}");
    }

    #[test]
    fn test_project_query_rejects_braces() {
        for name in ["Ops}", "{Ops", "a } or project: {b"] {
            assert!(matches!(project_query(name), Err(TrackerError::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_not_found_becomes_none() {
        let missing: TrackerResult<RawIssue> = Err(error_for_status(StatusCode::NOT_FOUND, ""));
        assert!(matches!(found_or_none(missing), Ok(None)));

        let found = found_or_none(Ok(RawIssue::new("ADM-1"))).unwrap();
        assert_eq!(found.map(|issue| issue.id_readable).as_deref(), Some("ADM-1"));

        let denied: TrackerResult<RawIssue> = Err(error_for_status(StatusCode::FORBIDDEN, ""));
        assert!(matches!(found_or_none(denied), Err(TrackerError::Unauthorized(_))));

        let broken: TrackerResult<RawIssue> = Err(error_for_status(StatusCode::INTERNAL_SERVER_ERROR, "boom"));
        assert!(matches!(found_or_none(broken), Err(TrackerError::ApiError(_))));
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            error_for_status(StatusCode::UNAUTHORIZED, ""),
            TrackerError::Unauthorized(_)
        ));
        assert!(matches!(
            error_for_status(StatusCode::FORBIDDEN, ""),
            TrackerError::Unauthorized(_)
        ));
        assert!(matches!(
            error_for_status(StatusCode::NOT_FOUND, "{\"error\":\"Not Found\"}"),
            TrackerError::NotFound(_)
        ));
        match error_for_status(StatusCode::BAD_GATEWAY, " upstream down ") {
            TrackerError::ApiError(msg) => {
                assert!(msg.contains("502"));
                assert!(msg.ends_with("upstream down"));
            }
            other => panic!("Expected ApiError, got {:?}", other),
        }
    }
}
