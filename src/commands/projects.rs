use clap::ArgMatches;

use super::output_format;
use crate::cli_context::CliContext;
use crate::error::TrackerResult;
use crate::formatting::print_projects;

pub async fn handle_projects(matches: &ArgMatches) -> TrackerResult<()> {
    let format = output_format(matches, "table");

    let mut context = CliContext::load();
    let service = context.service()?;

    let projects = service.get_all_projects().await?;

    if projects.is_empty() {
        println!("No projects found.");
    } else {
        if format != "json" {
            println!("Found {} projects:", projects.len());
        }
        print_projects(&projects, &format)?;
    }

    Ok(())
}
