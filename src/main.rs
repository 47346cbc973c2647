use std::process;

use clap::{value_parser, Arg, ArgAction, Command};
use colored::*;

use youtrack_graph::commands::{handle_auth, handle_graph, handle_project_issues, handle_projects};
use youtrack_graph::logging::{get_log_file_path, init_logging, install_panic_hook};

fn format_arg(default: &'static str, values: [&'static str; 2]) -> Arg {
    Arg::new("format")
        .short('f')
        .long("format")
        .help("Output format")
        .value_parser(values)
        .default_value(default)
}

fn cli() -> Command {
    Command::new("ytgraph")
        .about("Dependency graphs and project views over the YouTrack REST API")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("auth")
                .about("Configure and verify the YouTrack connection")
                .arg(
                    Arg::new("base-url")
                        .long("base-url")
                        .help("YouTrack base URL, e.g. https://example.youtrack.cloud"),
                )
                .arg(
                    Arg::new("token")
                        .long("token")
                        .help("Permanent API token"),
                )
                .arg(
                    Arg::new("timeout")
                        .long("timeout")
                        .help("Request timeout in seconds")
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new("show")
                        .long("show")
                        .help("Show the saved configuration")
                        .action(ArgAction::SetTrue)
                        .conflicts_with_all(["base-url", "token", "timeout"]),
                ),
        )
        .subcommand(
            Command::new("graph")
                .about("Show every issue reachable over 'Depend' links")
                .arg(
                    Arg::new("issue")
                        .help("Starting issue identifier, e.g. ADM-42")
                        .required(true),
                )
                .arg(format_arg("tree", ["tree", "json"])),
        )
        .subcommand(
            Command::new("issues")
                .about("List the issues of a project")
                .arg(
                    Arg::new("project")
                        .help("Project name")
                        .required(true),
                )
                .arg(format_arg("table", ["table", "json"])),
        )
        .subcommand(
            Command::new("projects")
                .about("List all projects")
                .arg(format_arg("table", ["table", "json"])),
        )
}

#[tokio::main]
async fn main() {
    if let Err(e) = init_logging() {
        eprintln!("{} logging disabled: {}", "warning:".yellow(), e);
    }
    install_panic_hook();

    let matches = cli().get_matches();

    let result = match matches.subcommand() {
        Some(("auth", sub_matches)) => handle_auth(sub_matches).await,
        Some(("graph", sub_matches)) => handle_graph(sub_matches).await,
        Some(("issues", sub_matches)) => handle_project_issues(sub_matches).await,
        Some(("projects", sub_matches)) => handle_projects(sub_matches).await,
        _ => unreachable!("subcommand_required is set"),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(path) = get_log_file_path() {
            eprintln!("{}", format!("Details were logged to {}", path.display()).dimmed());
        }
        process::exit(e.exit_code());
    }
}
