//! Fixed sample dataset served in offline mode.
//!
//! Values mirror what the backend returns for a demo technician account so
//! the rest of the pipeline (mapping, search, display) behaves identically
//! with and without a live connection.

use std::time::Duration;

use once_cell::sync::Lazy;

use crate::incident::Incident;

/// Artificial latency applied to offline reads to emulate a live call.
pub const SAMPLE_LATENCY: Duration = Duration::from_millis(500);

static SAMPLE: Lazy<Vec<Incident>> = Lazy::new(|| {
    vec![
        incident(
            "2c472869935e06507ec2f6aa7bba1045",
            "INC0010148",
            "Printer Issue at Fountains Hills Safeway Branch",
            "1 - Critical",
            1,
            "In Progress",
            false,
            "",
            "koreapitest",
            "",
            "2024-05-21 01:01:21",
            "2025-12-01 11:08:13",
        ),
        incident(
            "34c68289f0252300964feeefe80ff026",
            "INC0002012",
            "Cannot access SAP Sales app",
            "1 - Critical",
            1,
            "In Progress",
            false,
            "SAP Sales and Distribution",
            "admin",
            "Carol Coughlin",
            "2018-11-02 02:03:03",
            "2025-12-01 11:08:13",
        ),
        incident(
            "88c1dc5a9301a6d01f88b3ad1dba10b8",
            "INC0024934",
            "Error installing software update",
            "1 - Critical",
            1,
            "In Progress",
            false,
            "",
            "Nisarga",
            "Jitin",
            "2025-04-23 20:26:40",
            "2025-12-01 11:08:13",
        ),
        incident(
            "90e058d69301a6d01f88b3ad1dba102d",
            "INC0024933",
            "Unable to print documents",
            "1 - Critical",
            1,
            "In Progress",
            false,
            "",
            "Nisarga",
            "Jitin",
            "2025-04-23 20:22:51",
            "2025-12-01 11:08:13",
        ),
        incident(
            "967c3f06934d66d01f88b3ad1dba1026",
            "INC0024910",
            "Can't able to connect to VPN",
            "1 - Critical",
            1,
            "In Progress",
            false,
            "",
            "Nisarga",
            "Jitin",
            "2025-04-23 18:53:42",
            "2025-12-01 11:08:13",
        ),
        incident(
            "9f1bb342934d66d01f88b3ad1dba107c",
            "INC0024908",
            "Unable to connect to VPN",
            "1 - Critical",
            1,
            "In Progress",
            false,
            "",
            "Nisarga",
            "Jitin",
            "2025-04-23 18:47:46",
            "2025-12-01 11:08:13",
        ),
        incident(
            "a39d8e3cf0212300964feeefe80ff0ed",
            "INC0002020",
            "SAP Sales app is not accessible. I cannot log in.",
            "1 - Critical",
            1,
            "In Progress",
            false,
            "SAP Sales and Distribution",
            "admin",
            "Carol Coughlin",
            "2018-11-01 07:54:31",
            "2025-12-01 11:08:13",
        ),
        incident(
            "b4c8e9d7f0312400975gffgfg91gg137",
            "INC0025001",
            "Outlook not responding on LAPTOP-5K8P3R",
            "2 - High",
            2,
            "New",
            true,
            "LAPTOP-5K8P3R",
            "john.doe",
            "John Doe",
            "2025-11-30 10:15:22",
            "2025-12-01 03:38:13",
        ),
        incident(
            "c5d9f0e8g1423511086hgghgh02hh248",
            "INC0025002",
            "Slow network connection in Building A",
            "3 - Medium",
            2,
            "On Hold",
            true,
            "DESKTOP-9M4N7P",
            "jane.smith",
            "Jane Smith",
            "2025-11-29 14:30:45",
            "2025-12-01 03:38:13",
        ),
        incident(
            "d6e0g1f9h2534622197ihhhih13ii359",
            "INC0025003",
            "Cannot access shared drive",
            "4 - Low",
            3,
            "Resolved",
            false,
            "LAPTOP-1P6Q8S",
            "mike.johnson",
            "Mike Johnson",
            "2025-11-28 09:45:12",
            "2025-11-30 16:20:33",
        ),
    ]
});

/// The fixed local result set used when the backend is unreachable.
pub fn sample_incidents() -> Vec<Incident> {
    SAMPLE.clone()
}

#[allow(clippy::too_many_arguments)]
fn incident(
    sys_id: &str,
    number: &str,
    description: &str,
    priority: &str,
    impact: u8,
    status: &str,
    active: bool,
    device_name: &str,
    created_by: &str,
    caller_id: &str,
    opened_at: &str,
    last_updated_at: &str,
) -> Incident {
    Incident {
        sys_id: sys_id.to_string(),
        incident_number: number.to_string(),
        short_description: description.to_string(),
        priority: priority.to_string(),
        impact,
        status: status.to_string(),
        active,
        assigned_to: "FS Cockpit Integration".to_string(),
        device_name: device_name.to_string(),
        created_by: created_by.to_string(),
        caller_id: caller_id.to_string(),
        opened_at: opened_at.to_string(),
        last_updated_at: last_updated_at.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_dataset_is_stable() {
        let incidents = sample_incidents();
        assert_eq!(incidents.len(), 10);
        assert_eq!(incidents[0].incident_number, "INC0010148");
        assert!(incidents.iter().all(|i| !i.sys_id.is_empty()));
    }
}
