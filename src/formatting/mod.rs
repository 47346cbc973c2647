pub mod issues;
pub mod utils;

pub use issues::{format_state_color, get_state_icon, print_issue_graph, print_issues, print_projects, render_tree};
pub use utils::{format_timestamp, mask_secret, truncate};
