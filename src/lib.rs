pub mod api;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod incident;
pub mod logger;
pub mod notify;
pub mod sample;
pub mod store;
pub mod transport;

pub use api::{ApiService, Envelope, RequestOptions};
pub use auth::{Account, EnvIdentity, IdentityProvider, NoIdentity, NullSessionObserver, SessionObserver};
pub use config::ApiConfig;
pub use error::{AccessError, Result};
pub use incident::{Incident, IncidentService, IncidentsResponse, Ticket};
pub use logger::RequestLog;
pub use notify::{Notification, Notifier, NotifyVariant, SilentNotifier, TerminalNotifier};
pub use store::{FileStateStore, MemoryStateStore, StateStore};
pub use transport::{HttpTransport, Method, RawResponse, RequestSpec, Transport};
