pub mod auth;
pub mod graph;
pub mod issues;
pub mod projects;

pub use auth::handle_auth;
pub use graph::handle_graph;
pub use issues::handle_project_issues;
pub use projects::handle_projects;

use clap::ArgMatches;

pub(crate) fn output_format(matches: &ArgMatches, default: &'static str) -> String {
    matches
        .get_one::<String>("format")
        .cloned()
        .unwrap_or_else(|| default.to_string())
}
