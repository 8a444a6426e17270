//! Pure mapping from raw incidents to canonical tickets.
//!
//! Total by construction: unknown priority/status strings pass through
//! verbatim with a default color token, and unparseable timestamps land in
//! the smallest age bucket.

use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;

use super::{Incident, Ticket};

pub const PRIORITY_CRITICAL_COLOR: &str = "bg-[#ffe2e2] text-[#c10007] border-[#ffc9c9]";
pub const PRIORITY_MEDIUM_COLOR: &str = "bg-[#fef9c2] text-[#a65f00] border-[#feef85]";
pub const PRIORITY_LOW_COLOR: &str = "bg-[#e0f2fe] text-[#0369a1] border-[#bae6fd]";
pub const PRIORITY_PLANNING_COLOR: &str = "bg-[#f3f4f6] text-[#4b5563] border-[#d1d5db]";
pub const PRIORITY_DEFAULT_COLOR: &str = "bg-gray-100 text-gray-600 border-gray-300";

pub const STATUS_NEW_COLOR: &str = "bg-[#dbeafe] text-[#1e40af] border-transparent";
pub const STATUS_IN_PROGRESS_COLOR: &str = "bg-[#ffedd4] text-[#c93400] border-transparent";
pub const STATUS_ON_HOLD_COLOR: &str = "bg-[#fef9c2] text-[#a65f00] border-transparent";
pub const STATUS_RESOLVED_COLOR: &str = "bg-[#d1fae5] text-[#065f46] border-transparent";
pub const STATUS_CLOSED_COLOR: &str = "bg-[#f3f4f6] text-[#4b5563] border-transparent";
pub const STATUS_CANCELED_COLOR: &str = "bg-[#fee2e2] text-[#991b1b] border-transparent";

/// Classify a free-text priority like "1 - Critical" into a canonical
/// label and color token. Unmatched strings pass through verbatim.
pub fn map_priority(priority: &str) -> (String, String) {
    let lower = priority.to_lowercase();

    if lower.contains("critical") {
        ("Critical".to_string(), PRIORITY_CRITICAL_COLOR.to_string())
    } else if lower.contains("high") {
        ("High".to_string(), PRIORITY_CRITICAL_COLOR.to_string())
    } else if lower.contains("medium") || lower.contains("moderate") {
        ("Medium".to_string(), PRIORITY_MEDIUM_COLOR.to_string())
    } else if lower.contains("low") {
        ("Low".to_string(), PRIORITY_LOW_COLOR.to_string())
    } else if lower.contains("planning") {
        ("Planning".to_string(), PRIORITY_PLANNING_COLOR.to_string())
    } else {
        (priority.to_string(), PRIORITY_DEFAULT_COLOR.to_string())
    }
}

/// Classify a free-text status into a canonical label and color token.
///
/// Unmatched strings keep the In-Progress color token; the UI has always
/// rendered unknown states that way.
pub fn map_status(status: &str) -> (String, String) {
    let lower = status.to_lowercase();

    if lower.contains("new") {
        ("New".to_string(), STATUS_NEW_COLOR.to_string())
    } else if lower.contains("in progress") || lower.contains("work in progress") {
        (
            "In Progress".to_string(),
            STATUS_IN_PROGRESS_COLOR.to_string(),
        )
    } else if lower.contains("on hold") || lower.contains("pending") {
        ("On Hold".to_string(), STATUS_ON_HOLD_COLOR.to_string())
    } else if lower.contains("resolved") {
        ("Resolved".to_string(), STATUS_RESOLVED_COLOR.to_string())
    } else if lower.contains("closed") {
        ("Closed".to_string(), STATUS_CLOSED_COLOR.to_string())
    } else if lower.contains("cancel") {
        ("Canceled".to_string(), STATUS_CANCELED_COLOR.to_string())
    } else {
        (status.to_string(), STATUS_IN_PROGRESS_COLOR.to_string())
    }
}

/// Human relative age of `timestamp` as seen from `now`.
pub fn time_ago(timestamp: &str, now: Timestamp) -> String {
    let Some(past) = parse_timestamp(timestamp) else {
        return "Just now".to_string();
    };

    let diff_secs = (now.as_second() - past.as_second()).max(0);
    let diff_mins = diff_secs / 60;
    let diff_hours = diff_mins / 60;
    let diff_days = diff_hours / 24;

    if diff_mins < 1 {
        "Just now".to_string()
    } else if diff_mins < 60 {
        format!("{} minute{} ago", diff_mins, plural(diff_mins))
    } else if diff_hours < 24 {
        format!("{} hour{} ago", diff_hours, plural(diff_hours))
    } else if diff_days < 30 {
        format!("{} day{} ago", diff_days, plural(diff_days))
    } else {
        let diff_months = diff_days / 30;
        format!("{} month{} ago", diff_months, plural(diff_months))
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Parse an upstream "YYYY-MM-DD HH:MM:SS" timestamp as UTC.
fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let parsed = DateTime::strptime("%Y-%m-%d %H:%M:%S", raw).ok()?;
    Some(parsed.to_zoned(TimeZone::UTC).ok()?.timestamp())
}

/// Map a raw incident into the canonical UI ticket shape.
pub fn to_ticket(incident: &Incident, now: Timestamp) -> Ticket {
    let (priority, priority_color) = map_priority(&incident.priority);
    let (status, status_color) = map_status(&incident.status);

    let device = if !incident.device_name.is_empty() {
        incident.device_name.clone()
    } else if !incident.caller_id.is_empty() {
        incident.caller_id.clone()
    } else {
        "N/A".to_string()
    };

    Ticket {
        id: incident.sys_id.clone(),
        incident_number: incident.incident_number.clone(),
        status,
        status_color,
        title: incident.short_description.clone(),
        device,
        priority,
        priority_color,
        time_ago: time_ago(&incident.last_updated_at, now),
        opened_at: incident.opened_at.clone(),
        last_updated_at: incident.last_updated_at.clone(),
        assigned_to: incident.assigned_to.clone(),
        created_by: incident.created_by.clone(),
        caller_id: incident.caller_id.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> Timestamp {
        parse_timestamp("2025-12-01 12:00:00").unwrap()
    }

    fn incident_with(priority: &str, status: &str, device: &str, caller: &str) -> Incident {
        Incident {
            sys_id: "abc123".to_string(),
            incident_number: "INC0000001".to_string(),
            short_description: "Printer is down".to_string(),
            priority: priority.to_string(),
            impact: 1,
            status: status.to_string(),
            active: true,
            assigned_to: "Tech".to_string(),
            device_name: device.to_string(),
            created_by: "admin".to_string(),
            caller_id: caller.to_string(),
            opened_at: "2025-11-01 08:00:00".to_string(),
            last_updated_at: "2025-12-01 11:59:30".to_string(),
        }
    }

    #[test]
    fn test_priority_critical_any_case_any_surroundings() {
        for raw in ["1 - Critical", "CRITICAL", "critical!", "p1 cRiTiCaL now"] {
            let (label, color) = map_priority(raw);
            assert_eq!(label, "Critical", "input: {raw}");
            assert_eq!(color, PRIORITY_CRITICAL_COLOR);
        }
    }

    #[test]
    fn test_priority_precedence_and_aliases() {
        assert_eq!(map_priority("2 - High").0, "High");
        assert_eq!(map_priority("3 - Moderate").0, "Medium");
        assert_eq!(map_priority("3 - Medium").0, "Medium");
        assert_eq!(map_priority("4 - Low").0, "Low");
        assert_eq!(map_priority("5 - Planning").0, "Planning");
    }

    #[test]
    fn test_priority_unmatched_passes_through_verbatim() {
        let (label, color) = map_priority("P6 - Weird");
        assert_eq!(label, "P6 - Weird");
        assert_eq!(color, PRIORITY_DEFAULT_COLOR);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(map_status("New").0, "New");
        assert_eq!(map_status("Work In Progress").0, "In Progress");
        assert_eq!(map_status("Pending review").0, "On Hold");
        assert_eq!(map_status("On Hold").0, "On Hold");
        assert_eq!(map_status("Resolved").0, "Resolved");
        assert_eq!(map_status("Closed").0, "Closed");
        assert_eq!(map_status("Cancelled by user").0, "Canceled");
    }

    #[test]
    fn test_status_unmatched_keeps_in_progress_color() {
        let (label, color) = map_status("Awaiting Vendor");
        assert_eq!(label, "Awaiting Vendor");
        assert_eq!(color, STATUS_IN_PROGRESS_COLOR);
    }

    #[test]
    fn test_time_ago_buckets() {
        let now = fixed_now();
        assert_eq!(time_ago("2025-12-01 11:59:30", now), "Just now");
        assert_eq!(time_ago("2025-12-01 11:59:00", now), "1 minute ago");
        assert_eq!(time_ago("2025-12-01 11:15:00", now), "45 minutes ago");
        assert_eq!(time_ago("2025-12-01 11:00:00", now), "1 hour ago");
        assert_eq!(time_ago("2025-11-30 18:00:00", now), "18 hours ago");
        assert_eq!(time_ago("2025-11-30 11:00:00", now), "1 day ago");
        assert_eq!(time_ago("2025-11-02 12:00:00", now), "29 days ago");
        assert_eq!(time_ago("2025-10-30 12:00:00", now), "1 month ago");
        assert_eq!(time_ago("2025-05-01 12:00:00", now), "7 months ago");
    }

    #[test]
    fn test_time_ago_bucket_monotonicity() {
        // Older timestamps never land in a smaller unit than newer ones.
        let now = fixed_now();
        let ordered = [
            "2025-12-01 11:59:50",
            "2025-12-01 11:30:00",
            "2025-12-01 01:00:00",
            "2025-11-20 12:00:00",
            "2025-01-01 12:00:00",
        ];
        let unit_rank = |s: &str| {
            if s == "Just now" {
                0
            } else if s.contains("minute") {
                1
            } else if s.contains("hour") {
                2
            } else if s.contains("day") {
                3
            } else {
                4
            }
        };
        let ranks: Vec<_> = ordered.iter().map(|t| unit_rank(&time_ago(t, now))).collect();
        for pair in ranks.windows(2) {
            assert!(pair[0] <= pair[1], "ranks not monotonic: {ranks:?}");
        }
    }

    #[test]
    fn test_time_ago_unparseable_is_just_now() {
        assert_eq!(time_ago("not a timestamp", fixed_now()), "Just now");
        assert_eq!(time_ago("", fixed_now()), "Just now");
    }

    #[test]
    fn test_time_ago_future_clamps_to_just_now() {
        assert_eq!(time_ago("2025-12-01 12:30:00", fixed_now()), "Just now");
    }

    #[test]
    fn test_device_fallback_chain() {
        let now = fixed_now();

        let with_device = to_ticket(&incident_with("1 - Critical", "New", "LAPTOP-1", "Carol"), now);
        assert_eq!(with_device.device, "LAPTOP-1");

        let with_caller = to_ticket(&incident_with("1 - Critical", "New", "", "Carol"), now);
        assert_eq!(with_caller.device, "Carol");

        let with_neither = to_ticket(&incident_with("1 - Critical", "New", "", ""), now);
        assert_eq!(with_neither.device, "N/A");
    }

    #[test]
    fn test_to_ticket_carries_originals() {
        let incident = incident_with("2 - High", "In Progress", "LAPTOP-1", "Carol");
        let ticket = to_ticket(&incident, fixed_now());
        assert_eq!(ticket.id, incident.sys_id);
        assert_eq!(ticket.incident_number, incident.incident_number);
        assert_eq!(ticket.title, incident.short_description);
        assert_eq!(ticket.opened_at, incident.opened_at);
        assert_eq!(ticket.last_updated_at, incident.last_updated_at);
        assert_eq!(ticket.assigned_to, incident.assigned_to);
        assert_eq!(ticket.created_by, incident.created_by);
        assert_eq!(ticket.caller_id, incident.caller_id);
        assert_eq!(ticket.priority, "High");
        assert_eq!(ticket.status, "In Progress");
    }
}
