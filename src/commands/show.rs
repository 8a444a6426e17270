use owo_colors::OwoColorize;

use crate::error::{AccessError, Result};
use crate::incident::IncidentService;

/// Display a single incident looked up by sys_id.
pub async fn cmd_show(service: &IncidentService, id: &str, output_json: bool) -> Result<()> {
    let Some(ticket) = service.get_incident_by_id(id).await else {
        return Err(AccessError::http(
            404,
            Some("NOT_FOUND".to_string()),
            Some(format!("incident '{id}' not found")),
            None,
        ));
    };

    if output_json {
        println!("{}", serde_json::to_string_pretty(&ticket)?);
        return Ok(());
    }

    println!("{} {}", ticket.incident_number.bold(), ticket.title);
    println!("  {:<12} {}", "Status:".dimmed(), ticket.status);
    println!("  {:<12} {}", "Priority:".dimmed(), ticket.priority);
    println!("  {:<12} {}", "Device:".dimmed(), ticket.device);
    println!("  {:<12} {}", "Assigned:".dimmed(), ticket.assigned_to);
    println!("  {:<12} {}", "Caller:".dimmed(), ticket.caller_id);
    println!("  {:<12} {}", "Opened:".dimmed(), ticket.opened_at);
    println!(
        "  {:<12} {} ({})",
        "Updated:".dimmed(),
        ticket.last_updated_at,
        ticket.time_ago
    );

    Ok(())
}
