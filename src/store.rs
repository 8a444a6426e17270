//! Persisted client state: the offline-mode flag and the legacy bearer
//! token.
//!
//! The flag is read synchronously before every ticket-fetch operation, so
//! implementations must never fail: reads fall back to defaults and writes
//! are best-effort.

use std::fs;
use std::path::PathBuf;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Key-value state shared by the transport (legacy token) and the incident
/// service (offline flag).
pub trait StateStore: Send + Sync {
    fn offline(&self) -> bool;
    fn set_offline(&self, offline: bool);
    fn auth_token(&self) -> Option<String>;
    fn set_auth_token(&self, token: &str);
    /// Drop all client-held session state (called on 401 responses).
    fn clear_session(&self);
}

/// Flip the offline flag, returning the new state.
pub fn toggle_offline(store: &dyn StateStore) -> bool {
    let next = !store.offline();
    store.set_offline(next);
    next
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PersistedState {
    #[serde(default)]
    use_sample_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,
}

/// In-memory store for tests and embedded use.
#[derive(Default)]
pub struct MemoryStateStore {
    state: Mutex<PersistedState>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn offline(&self) -> bool {
        self.state.lock().use_sample_data
    }

    fn set_offline(&self, offline: bool) {
        self.state.lock().use_sample_data = offline;
    }

    fn auth_token(&self) -> Option<String> {
        self.state.lock().auth_token.clone()
    }

    fn set_auth_token(&self, token: &str) {
        self.state.lock().auth_token = Some(token.to_string());
    }

    fn clear_session(&self) {
        self.state.lock().auth_token = None;
    }
}

/// File-backed store persisted as YAML in the platform data directory.
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: PathBuf) -> Self {
        FileStateStore { path }
    }

    /// Default state file location for the current platform.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "cockpit")
            .map(|dirs| dirs.data_dir().join("state.yaml"))
    }

    fn load(&self) -> PersistedState {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_yaml_ng::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("corrupt state file {}: {e}", self.path.display());
                PersistedState::default()
            }),
            Err(_) => PersistedState::default(),
        }
    }

    fn save(&self, state: &PersistedState) {
        if let Some(parent) = self.path.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            tracing::warn!("cannot create state dir {}: {e}", parent.display());
            return;
        }
        match serde_yaml_ng::to_string(state) {
            Ok(content) => {
                if let Err(e) = fs::write(&self.path, content) {
                    tracing::warn!("cannot write state file {}: {e}", self.path.display());
                }
            }
            Err(e) => tracing::warn!("cannot serialize state: {e}"),
        }
    }
}

impl StateStore for FileStateStore {
    fn offline(&self) -> bool {
        self.load().use_sample_data
    }

    fn set_offline(&self, offline: bool) {
        let mut state = self.load();
        state.use_sample_data = offline;
        self.save(&state);
    }

    fn auth_token(&self) -> Option<String> {
        self.load().auth_token
    }

    fn set_auth_token(&self, token: &str) {
        let mut state = self.load();
        state.auth_token = Some(token.to_string());
        self.save(&state);
    }

    fn clear_session(&self) {
        let mut state = self.load();
        state.auth_token = None;
        self.save(&state);
    }
}
