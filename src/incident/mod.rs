//! Incident retrieval and the ticket domain model.
//!
//! `IncidentService` is the one place the rest of the program fetches
//! tickets from. Reads are fail-open: when the backend cannot be reached
//! the service degrades to the bundled sample dataset and flips the
//! persisted offline flag so later calls skip the doomed network attempt.

pub mod mapper;

use std::sync::Arc;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::api::{ApiService, RequestOptions};
use crate::notify::{Notification, Notifier};
use crate::sample::{SAMPLE_LATENCY, sample_incidents};
use crate::store::StateStore;

pub use mapper::{map_priority, map_status, time_ago, to_ticket};

/// Technician-scoped base path on the backend.
pub const INCIDENTS_BASE_PATH: &str = "/servicenow/technician/FS_Cockpit_Integration";

/// Raw incident record as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub sys_id: String,
    pub incident_number: String,
    pub short_description: String,
    pub priority: String,
    pub impact: u8,
    pub status: String,
    pub active: bool,
    pub assigned_to: String,
    #[serde(default)]
    pub device_name: String,
    pub created_by: String,
    #[serde(default)]
    pub caller_id: String,
    pub opened_at: String,
    pub last_updated_at: String,
}

/// Payload shape of the technician incident listing.
#[derive(Debug, Clone, Deserialize)]
pub struct IncidentsResponse {
    pub incidents: Vec<Incident>,
}

/// Canonical display-ready ticket.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub incident_number: String,
    pub status: String,
    pub status_color: String,
    pub title: String,
    pub device: String,
    pub priority: String,
    pub priority_color: String,
    pub time_ago: String,
    pub opened_at: String,
    pub last_updated_at: String,
    pub assigned_to: String,
    pub created_by: String,
    pub caller_id: String,
}

/// Fail-open incident reads over the access facade.
pub struct IncidentService {
    api: Arc<ApiService>,
    store: Arc<dyn StateStore>,
    notifier: Arc<dyn Notifier>,
}

impl IncidentService {
    pub fn new(
        api: Arc<ApiService>,
        store: Arc<dyn StateStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        IncidentService {
            api,
            store,
            notifier,
        }
    }

    /// Fetch the technician's incidents, mapped to tickets.
    ///
    /// Never fails: offline mode serves the sample dataset directly, and a
    /// live fetch that errors degrades to the same dataset while flipping
    /// the offline flag for subsequent calls.
    pub async fn get_my_incidents(&self) -> Vec<Ticket> {
        if self.store.offline() {
            self.notifier.notify(Notification::info(
                "Sample Data Mode",
                "Using sample data. API is not connected.",
            ));
            tokio::time::sleep(SAMPLE_LATENCY).await;
            return self.map_all(&sample_incidents());
        }

        let path = format!("{INCIDENTS_BASE_PATH}/incidents");
        let options = RequestOptions {
            show_error_toast: false,
            ..Default::default()
        };
        match self.api.get::<IncidentsResponse>(&path, options).await {
            Ok(response) => self.map_all(&response.incidents),
            Err(error) => {
                tracing::warn!("incident fetch failed, degrading to sample data: {error}");
                self.notifier.notify(Notification::warning(
                    "API Connection Failed",
                    "Using sample data. Please check your API connection.",
                ));
                self.store.set_offline(true);
                self.map_all(&sample_incidents())
            }
        }
    }

    /// A single ticket looked up by its backend id.
    pub async fn get_incident_by_id(&self, id: &str) -> Option<Ticket> {
        self.get_my_incidents()
            .await
            .into_iter()
            .find(|ticket| ticket.id == id)
    }

    /// Case-insensitive substring search over number, title, and device.
    pub async fn search_incidents(&self, query: &str) -> Vec<Ticket> {
        let needle = query.to_lowercase();
        self.get_my_incidents()
            .await
            .into_iter()
            .filter(|ticket| {
                ticket.incident_number.to_lowercase().contains(&needle)
                    || ticket.title.to_lowercase().contains(&needle)
                    || ticket.device.to_lowercase().contains(&needle)
            })
            .collect()
    }

    fn map_all(&self, incidents: &[Incident]) -> Vec<Ticket> {
        let now = Timestamp::now();
        incidents
            .iter()
            .map(|incident| to_ticket(incident, now))
            .collect()
    }
}
