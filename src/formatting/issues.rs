use std::collections::HashSet;
use std::fmt::Write as _;
use std::sync::Arc;

use colored::*;

use super::utils::*;
use crate::error::TrackerResult;
use crate::models::{EnrichedIssue, ProjectSummary};

pub fn format_state_color(state: Option<&str>) -> ColoredString {
    let Some(state) = state else {
        return "no state".dimmed();
    };
    match state.to_ascii_lowercase().as_str() {
        "in progress" | "in review" | "to verify" => state.yellow(),
        "fixed" | "done" | "verified" | "resolved" => state.green(),
        "won't fix" | "duplicate" | "obsolete" | "can't reproduce" => state.red().dimmed(),
        "open" | "submitted" | "reopened" => state.normal(),
        _ => state.cyan(),
    }
}

pub fn get_state_icon(state: Option<&str>) -> &'static str {
    match state.map(str::to_ascii_lowercase).as_deref() {
        Some("in progress") | Some("in review") | Some("to verify") => "◐",
        Some("fixed") | Some("done") | Some("verified") | Some("resolved") => "✓",
        Some("won't fix") | Some("duplicate") | Some("obsolete") | Some("can't reproduce") => "✗",
        Some("open") | Some("submitted") | Some("reopened") => "○",
        _ => "•",
    }
}

pub fn print_issue_graph(issues: &[Arc<EnrichedIssue>], format: &str) -> TrackerResult<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(issues)?),
        _ => {
            if issues.is_empty() {
                println!("{}", "No issues found.".dimmed());
            } else {
                print!("{}", render_tree(issues));
            }
        }
    }
    Ok(())
}

/// Render the graph as an indented tree rooted at the first issue.
///
/// Each issue's links are expanded at most once; later occurrences are
/// printed as back references. Issues not reachable from the root follow
/// as separate trees.
pub fn render_tree(issues: &[Arc<EnrichedIssue>]) -> String {
    let mut renderer = TreeRenderer::default();
    for issue in issues {
        if !renderer.printed.contains(issue.id_readable.as_str()) {
            renderer.node(issue, 0);
        }
    }
    renderer.out
}

#[derive(Default)]
struct TreeRenderer<'a> {
    expanded: HashSet<&'a str>,
    printed: HashSet<&'a str>,
    out: String,
}

impl<'a> TreeRenderer<'a> {
    fn node(&mut self, issue: &'a EnrichedIssue, depth: usize) {
        let indent = "  ".repeat(depth);
        let id = issue.id_readable.as_str();
        self.printed.insert(id);

        if self.expanded.contains(id) {
            let _ = writeln!(self.out, "{}↺ {} {}", indent, id.blue(), "(shown above)".dimmed());
            return;
        }
        // Stubs carry no links; leave the id free for the resolved node.
        if issue.links.is_some() {
            self.expanded.insert(id);
        }

        let state = issue.state.as_deref();
        let summary = issue.summary.as_deref().map(|s| truncate(s, 60)).unwrap_or_default();
        let _ = writeln!(
            self.out,
            "{}{} {} {} [{}]",
            indent,
            get_state_icon(state),
            id.blue().bold(),
            summary,
            format_state_color(state)
        );

        for link in issue.links.iter().flatten() {
            if link.issues.is_empty() {
                continue;
            }
            let _ = writeln!(
                self.out,
                "{}  {} {}",
                indent,
                link.link_type.name.magenta(),
                format!("({})", link.direction.to_lowercase()).as_str().dimmed()
            );
            for target in &link.issues {
                self.node(target, depth + 2);
            }
        }
    }
}

pub fn print_issues(issues: &[EnrichedIssue], format: &str) -> TrackerResult<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(issues)?);
        return Ok(());
    }

    if issues.is_empty() {
        println!("{}", "No issues found.".dimmed());
        return Ok(());
    }

    println!("{}", "─".repeat(110).dimmed());
    println!(
        "{:<14} {:<50} {:<16} {:<18} {:<10}",
        "ID".bold(),
        "Summary".bold(),
        "State".bold(),
        "Updated".bold(),
        "Links".bold()
    );
    println!("{}", "─".repeat(110).dimmed());

    for issue in issues {
        println!(
            "{:<14} {:<50} {:<16} {:<18} {:<10}",
            issue.id_readable.blue(),
            truncate(issue.summary.as_deref().unwrap_or(""), 50),
            format_state_color(issue.state.as_deref()),
            format_timestamp(issue.updated),
            issue.linked_ids().len()
        );
    }
    println!("{}", "─".repeat(110).dimmed());
    Ok(())
}

pub fn print_projects(projects: &[ProjectSummary], format: &str) -> TrackerResult<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(projects)?);
        return Ok(());
    }

    for project in projects {
        let name = project.name.as_deref().unwrap_or("(unnamed)");
        let short = project.short_name.as_deref().unwrap_or("-");
        let archived = if project.archived == Some(true) {
            " (archived)".dimmed()
        } else {
            "".normal()
        };
        println!("{:<10} {}{}", short.cyan(), name.bold(), archived);
        if let Some(desc) = project.description.as_deref().filter(|d| !d.trim().is_empty()) {
            println!("           {}", truncate(desc.trim(), 80).as_str().dimmed());
        }
    }
    Ok(())
}
