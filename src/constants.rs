pub const CONFIG_FILE: &str = ".youtrack-graph-config.json";

pub const BASE_URL_ENV: &str = "YOUTRACK_BASE_URL";
pub const API_TOKEN_ENV: &str = "YOUTRACK_API_TOKEN";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Page size for list endpoints ($top)
pub const PAGE_SIZE: usize = 100;

/// Link type whose edges the dependency traversal follows.
pub const DEPEND_LINK_TYPE: &str = "Depend";

/// Custom field holding the workflow state.
pub const STATE_FIELD: &str = "State";

pub const LOG_FILTER_DEFAULT: &str = "youtrack_graph=info";

// Log files kept in the log directory, the current run included
pub const LOG_RETENTION: usize = 10;
