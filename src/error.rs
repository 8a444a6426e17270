//! Typed error taxonomy for the data-access layer.
//!
//! Every failure that can reach a caller is classified into exactly one
//! `AccessError`: the server responded with an error status (`Http`), the
//! request was sent but no response arrived (`Network`), or the request
//! could not be constructed or dispatched at all (`RequestSetup`).

use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AccessError>;

pub const NETWORK_ERROR_CODE: &str = "NETWORK_ERROR";
pub const REQUEST_SETUP_ERROR_CODE: &str = "REQUEST_SETUP_ERROR";

/// Placeholder message used when the upstream payload carries none.
const GENERIC_MESSAGE: &str = "An error occurred";

#[derive(Debug, Error)]
pub enum AccessError {
    /// The request was sent but no response was received.
    #[error("{message}")]
    Network {
        code: String,
        message: String,
        details: Option<Value>,
        operational: bool,
    },

    /// The server responded with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        code: String,
        message: String,
        details: Option<Value>,
        operational: bool,
    },

    /// The request failed before it could be dispatched.
    #[error("{message}")]
    RequestSetup {
        code: String,
        message: String,
        details: Option<Value>,
        operational: bool,
    },
}

impl AccessError {
    pub fn network(message: impl Into<String>, details: Option<Value>) -> Self {
        AccessError::Network {
            code: NETWORK_ERROR_CODE.to_string(),
            message: message.into(),
            details,
            operational: true,
        }
    }

    pub fn request_setup(message: impl Into<String>, details: Option<Value>) -> Self {
        AccessError::RequestSetup {
            code: REQUEST_SETUP_ERROR_CODE.to_string(),
            message: message.into(),
            details,
            operational: true,
        }
    }

    /// Build an HTTP error from a response status and the upstream error
    /// payload, falling back to `HTTP_<status>` / a generic message when
    /// the payload carries neither.
    pub fn http(
        status: u16,
        code: Option<String>,
        message: Option<String>,
        details: Option<Value>,
    ) -> Self {
        AccessError::Http {
            status,
            code: code.unwrap_or_else(|| format!("HTTP_{status}")),
            message: message.unwrap_or_else(|| GENERIC_MESSAGE.to_string()),
            details,
            operational: true,
        }
    }

    /// Classify a transport-level `reqwest` failure.
    ///
    /// Timeouts and connection failures mean the request went out with no
    /// response; builder failures mean it never left. Anything else is
    /// treated as a no-response failure.
    pub fn from_transport(error: reqwest::Error) -> Self {
        let details = Some(Value::String(error.to_string()));
        if error.is_timeout() || error.is_connect() {
            return AccessError::network(
                "No response from server. Please check your internet connection.",
                details,
            );
        }
        if error.is_builder() {
            return AccessError::request_setup(format!("Failed to make request: {error}"), details);
        }
        AccessError::network(error.to_string(), details)
    }

    /// Response status, or 0 when no response was received.
    pub fn status_code(&self) -> u16 {
        match self {
            AccessError::Http { status, .. } => *status,
            AccessError::Network { .. } | AccessError::RequestSetup { .. } => 0,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &str {
        match self {
            AccessError::Network { code, .. }
            | AccessError::Http { code, .. }
            | AccessError::RequestSetup { code, .. } => code,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AccessError::Network { message, .. }
            | AccessError::Http { message, .. }
            | AccessError::RequestSetup { message, .. } => message,
        }
    }

    /// Structured upstream error payload, when one was supplied.
    pub fn details(&self) -> Option<&Value> {
        match self {
            AccessError::Network { details, .. }
            | AccessError::Http { details, .. }
            | AccessError::RequestSetup { details, .. } => details.as_ref(),
        }
    }

    pub fn is_operational(&self) -> bool {
        match self {
            AccessError::Network { operational, .. }
            | AccessError::Http { operational, .. }
            | AccessError::RequestSetup { operational, .. } => *operational,
        }
    }

    pub fn is_network_error(&self) -> bool {
        self.code() == NETWORK_ERROR_CODE || self.status_code() == 0
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(self.status_code(), 401 | 403)
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(self.status_code(), 400 | 422)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code())
    }

    /// User-facing message: the carried message when it is specific, else a
    /// status-code lookup. Total over all status codes.
    pub fn user_message(&self) -> String {
        let message = self.message();
        if !message.is_empty() && message != GENERIC_MESSAGE {
            return message.to_string();
        }

        match self.status_code() {
            0 => "Cannot connect to the server. Please ensure the API server is running.",
            400 => "Invalid request. Please check your input and try again.",
            401 => "You are not authorized. Please log in again.",
            403 => "You don't have permission to perform this action.",
            404 => "The requested resource was not found.",
            408 => "Request timeout. Please try again.",
            409 => "A conflict occurred. The resource may already exist.",
            422 => "Validation failed. Please check your input.",
            429 => "Too many requests. Please slow down and try again later.",
            500 => "Server error. Please try again later.",
            502 => "Bad gateway. The server is temporarily unavailable.",
            503 => "Service unavailable. Please try again later.",
            504 => "Gateway timeout. The server took too long to respond.",
            _ => "An unexpected error occurred. Please try again.",
        }
        .to_string()
    }
}

impl From<serde_json::Error> for AccessError {
    fn from(error: serde_json::Error) -> Self {
        AccessError::request_setup(format!("JSON error: {error}"), None)
    }
}
