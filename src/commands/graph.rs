use clap::ArgMatches;
use colored::*;

use super::output_format;
use crate::cli_context::CliContext;
use crate::error::{TrackerError, TrackerResult};
use crate::formatting::print_issue_graph;

pub async fn handle_graph(matches: &ArgMatches) -> TrackerResult<()> {
    let issue_id = matches
        .get_one::<String>("issue")
        .ok_or_else(|| TrackerError::InvalidArgument("Issue identifier is required".to_string()))?;
    let format = output_format(matches, "tree");

    let mut context = CliContext::load();
    let service = context.service()?;

    let issues = service.get_issue_dependency_graph(issue_id).await?;

    if format != "json" && !issues.is_empty() {
        println!("{} issues in the dependency graph of {}:", issues.len(), issue_id.blue());
    }
    print_issue_graph(&issues, &format)
}
