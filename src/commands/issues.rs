use clap::ArgMatches;

use super::output_format;
use crate::cli_context::CliContext;
use crate::error::{TrackerError, TrackerResult};
use crate::formatting::print_issues;

pub async fn handle_project_issues(matches: &ArgMatches) -> TrackerResult<()> {
    let project = matches
        .get_one::<String>("project")
        .ok_or_else(|| TrackerError::InvalidArgument("Project name is required".to_string()))?;
    let format = output_format(matches, "table");

    let mut context = CliContext::load();
    let service = context.service()?;

    let issues = service.get_issues_for_project(project).await?;

    if format != "json" && !issues.is_empty() {
        println!("Found {} issues in {}:", issues.len(), project);
    }
    print_issues(&issues, &format)
}
