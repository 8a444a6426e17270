use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::error::Result;
use crate::incident::{IncidentService, Ticket};

#[derive(Tabled)]
struct TicketRow {
    #[tabled(rename = "Number")]
    number: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl From<&Ticket> for TicketRow {
    fn from(ticket: &Ticket) -> Self {
        TicketRow {
            number: ticket.incident_number.clone(),
            status: ticket.status.clone(),
            priority: ticket.priority.clone(),
            title: ticket.title.clone(),
            device: ticket.device.clone(),
            updated: ticket.time_ago.clone(),
        }
    }
}

/// List the technician's incidents as a table or JSON.
pub async fn cmd_ls(service: &IncidentService, output_json: bool) -> Result<()> {
    let tickets = service.get_my_incidents().await;

    if output_json {
        println!("{}", serde_json::to_string_pretty(&tickets)?);
        return Ok(());
    }

    if tickets.is_empty() {
        println!("No incidents assigned.");
        return Ok(());
    }

    let rows: Vec<TicketRow> = tickets.iter().map(TicketRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{table}");

    Ok(())
}
