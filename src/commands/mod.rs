//! Command handlers for the `cockpit` binary.

mod ls;
mod offline;
mod search;
mod show;

pub use ls::cmd_ls;
pub use offline::{cmd_offline_set, cmd_offline_status, cmd_offline_toggle};
pub use search::cmd_search;
pub use show::cmd_show;

use owo_colors::OwoColorize;

use crate::incident::Ticket;

/// One-line ticket summary with the status label colored by class.
pub fn format_ticket_line(ticket: &Ticket) -> String {
    let status = match ticket.status.as_str() {
        "New" => ticket.status.blue().to_string(),
        "In Progress" => ticket.status.yellow().to_string(),
        "On Hold" => ticket.status.magenta().to_string(),
        "Resolved" => ticket.status.green().to_string(),
        "Closed" | "Canceled" => ticket.status.dimmed().to_string(),
        _ => ticket.status.clone(),
    };
    format!(
        "{} [{}] {} ({}, {})",
        ticket.incident_number.bold(),
        status,
        ticket.title,
        ticket.priority,
        ticket.time_ago
    )
}
