//! Best-effort request/response logging.
//!
//! Side channel only: nothing here returns a `Result` or touches the data
//! on the wire. Sensitive header values are redacted and body previews are
//! capped before anything reaches the log output. When disabled, every call
//! is a no-op.

use std::time::Instant;

use crate::config::ApiConfig;
use crate::error::AccessError;
use crate::transport::{Payload, RequestSpec};

/// Character budget for request/response body previews.
pub const MAX_BODY_PREVIEW: usize = 1000;

const REDACTED: &str = "***REDACTED***";
const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "x-api-key"];

#[derive(Debug, Clone)]
pub struct RequestLog {
    enabled: bool,
}

impl RequestLog {
    pub fn new(enabled: bool) -> Self {
        RequestLog { enabled }
    }

    pub fn disabled() -> Self {
        RequestLog { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record an outbound request.
    pub fn request(&self, spec: &RequestSpec, config: &ApiConfig) {
        if !self.enabled {
            return;
        }
        tracing::debug!(
            method = %spec.method,
            path = %spec.path,
            base_url = %config.base_url,
            timeout_ms = config.timeout.as_millis() as u64,
            headers = ?sanitize_headers(&spec.headers),
            body = %payload_preview(&spec.payload),
            "-> request"
        );
    }

    /// Record an inbound response. Duration is measured from the `Instant`
    /// stamped when the request was dispatched.
    pub fn response(&self, spec: &RequestSpec, status: u16, started: Instant, body: &str) {
        if !self.enabled {
            return;
        }
        tracing::debug!(
            method = %spec.method,
            path = %spec.path,
            status,
            duration_ms = started.elapsed().as_millis() as u64,
            body = %truncate_preview(body),
            "<- response"
        );
    }

    /// Record a failure with its classified fields.
    pub fn failure(&self, context: &str, error: &AccessError) {
        if !self.enabled {
            return;
        }
        tracing::error!(
            error = %error,
            status = error.status_code(),
            code = error.code(),
            details = ?error.details(),
            "{context}"
        );
    }
}

/// Replace sensitive header values with a redaction marker.
pub fn sanitize_headers(headers: &[(String, String)]) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let sensitive = SENSITIVE_HEADERS
                .iter()
                .any(|key| name.eq_ignore_ascii_case(key));
            if sensitive {
                (name.clone(), REDACTED.to_string())
            } else {
                (name.clone(), value.clone())
            }
        })
        .collect()
}

/// Cap a body preview at `MAX_BODY_PREVIEW` characters.
pub fn truncate_preview(body: &str) -> String {
    if body.chars().count() <= MAX_BODY_PREVIEW {
        return body.to_string();
    }
    let head: String = body.chars().take(MAX_BODY_PREVIEW).collect();
    format!("{head}... (truncated)")
}

fn payload_preview(payload: &Payload) -> String {
    match payload {
        Payload::Empty => String::new(),
        Payload::Json(body) => truncate_preview(&body.to_string()),
        Payload::Multipart {
            field,
            file_name,
            content,
        } => format!(
            "<multipart field '{field}', file '{file_name}', {} bytes>",
            content.len()
        ),
    }
}
