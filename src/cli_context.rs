use std::sync::Arc;

use crate::client::YouTrackClient;
use crate::config::TrackerSettings;
use crate::error::TrackerResult;
use crate::service::IssueGraphService;

/// Central context for CLI operations, managing settings and the client instance
pub struct CliContext {
    settings: Option<TrackerSettings>,
    client: Option<Arc<YouTrackClient>>,
}

impl CliContext {
    pub fn new() -> Self {
        Self {
            settings: None,
            client: None,
        }
    }

    /// Load context from the environment and saved configuration.
    ///
    /// Missing settings are not an error here; they surface when a client is requested.
    pub fn load() -> Self {
        Self {
            settings: TrackerSettings::from_env().ok(),
            client: None,
        }
    }

    pub fn settings(&mut self) -> TrackerResult<&TrackerSettings> {
        if self.settings.is_none() {
            self.settings = Some(TrackerSettings::from_env()?);
        }
        self.settings
            .as_ref()
            .ok_or_else(|| crate::tracker_error!(ConfigError, "settings unavailable"))
    }

    /// Get or create the client. Fails with `InvalidArgument` when unconfigured.
    pub fn verified_client(&mut self) -> TrackerResult<Arc<YouTrackClient>> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }

        let client = Arc::new(YouTrackClient::new(self.settings()?)?);
        self.client = Some(client.clone());
        Ok(client)
    }

    pub fn service(&mut self) -> TrackerResult<IssueGraphService<YouTrackClient>> {
        Ok(IssueGraphService::new(self.verified_client()?))
    }

    pub fn has_settings(&self) -> bool {
        self.settings.is_some()
    }
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for contexts with explicit settings
pub struct CliContextBuilder {
    settings: Option<TrackerSettings>,
}

impl CliContextBuilder {
    pub fn new() -> Self {
        Self { settings: None }
    }

    pub fn with_settings(mut self, settings: TrackerSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn build(self) -> CliContext {
        match self.settings {
            Some(settings) => CliContext {
                settings: Some(settings),
                client: None,
            },
            None => CliContext::load(),
        }
    }
}

impl Default for CliContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
