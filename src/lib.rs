// Module declarations
pub mod cli_context;
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod fields;
pub mod formatting;
pub mod graph;
pub mod logging;
pub mod models;
pub mod service;


// Re-export commonly used items
pub use client::{InMemoryIssueStore, IssueStore, YouTrackClient};
pub use config::{load_config, save_config_to, Config, TrackerSettings};
pub use error::{TrackerError, TrackerResult};
pub use graph::{assemble, fetch_graph, GraphFetcher, IssueGraph, ResponseAssembler};
pub use models::*;
pub use service::IssueGraphService;
