use crate::commands::format_ticket_line;
use crate::error::Result;
use crate::incident::IncidentService;

/// Search incidents by number, title, or device.
pub async fn cmd_search(service: &IncidentService, query: &str, output_json: bool) -> Result<()> {
    let matches = service.search_incidents(query).await;

    if output_json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("No incidents match '{query}'.");
        return Ok(());
    }

    for ticket in &matches {
        println!("{}", format_ticket_line(ticket));
    }

    Ok(())
}
