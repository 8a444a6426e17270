//! Authenticated HTTP transport.
//!
//! Wraps a `reqwest` client: attaches a bearer token, stamps dispatch time
//! for duration tracking, routes traffic through the request logger,
//! retries no-response failures with linear backoff, and classifies every
//! outcome into an `AccessError`. A raw `reqwest::Error` never escapes.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::auth::{IdentityProvider, SessionObserver};
use crate::config::ApiConfig;
use crate::error::{AccessError, Result};
use crate::logger::RequestLog;
use crate::store::StateStore;

/// Multipart field name used by the upload verb.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        };
        write!(f, "{name}")
    }
}

/// Request body shapes the transport knows how to encode.
#[derive(Debug, Clone)]
pub enum Payload {
    Empty,
    Json(Value),
    Multipart {
        field: &'static str,
        file_name: String,
        content: Vec<u8>,
    },
}

/// A single outbound request.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub payload: Payload,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        RequestSpec {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            payload: Payload::Empty,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.payload = Payload::Json(body);
        self
    }

    pub fn with_upload(mut self, file_name: impl Into<String>, content: Vec<u8>) -> Self {
        self.payload = Payload::Multipart {
            field: UPLOAD_FIELD,
            file_name: file_name.into(),
            content,
        };
        self
    }
}

/// A decoded upstream response with a 2xx status.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Value,
}

/// Seam between the access facade and the wire.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, spec: RequestSpec) -> Result<RawResponse>;
}

/// Production transport over `reqwest`.
pub struct HttpTransport {
    client: Client,
    config: ApiConfig,
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn StateStore>,
    session: Arc<dyn SessionObserver>,
    logger: RequestLog,
}

impl HttpTransport {
    pub fn new(
        config: ApiConfig,
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn StateStore>,
        session: Arc<dyn SessionObserver>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(AccessError::from_transport)?;
        let logger = RequestLog::new(config.log_http);
        Ok(HttpTransport {
            client,
            config,
            identity,
            store,
            session,
            logger,
        })
    }

    /// Resolve the bearer token: silent acquisition against the first
    /// signed-in account, else the stored legacy token, else none.
    async fn bearer_token(&self) -> Option<SecretString> {
        let accounts = self.identity.accounts().await;
        if let Some(account) = accounts.first()
            && let Some(token) = self.identity.acquire_token_silent(account).await
        {
            return Some(token);
        }
        self.store.auth_token().map(SecretString::from)
    }

    fn build_request(
        &self,
        spec: &RequestSpec,
        token: Option<&SecretString>,
    ) -> reqwest::RequestBuilder {
        let url = join_url(&self.config.base_url, &spec.path);
        let mut request = self.client.request(spec.method.as_reqwest(), url);

        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }
        for (name, value) in &spec.headers {
            request = request.header(name, value);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token.expose_secret());
        }

        match &spec.payload {
            Payload::Empty => request,
            Payload::Json(body) => request.json(body),
            Payload::Multipart {
                field,
                file_name,
                content,
            } => {
                let part =
                    reqwest::multipart::Part::bytes(content.clone()).file_name(file_name.clone());
                request.multipart(reqwest::multipart::Form::new().part(*field, part))
            }
        }
    }

    async fn classify_response(
        &self,
        spec: &RequestSpec,
        response: reqwest::Response,
        started: Instant,
    ) -> Result<RawResponse> {
        let status = response.status().as_u16();
        let text = response.text().await.map_err(AccessError::from_transport)?;
        let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
        self.logger.response(spec, status, started, &text);
        self.classify_body(status, body)
    }

    /// Classify a decoded status/body pair.
    fn classify_body(&self, status: u16, body: Value) -> Result<RawResponse> {
        if (200..300).contains(&status) {
            return Ok(RawResponse { status, body });
        }

        if status == 401 {
            // The session is no longer valid: drop client-held credentials
            // and let the embedding environment handle navigation.
            self.store.clear_session();
            self.session.session_invalidated();
        }

        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        let code = body.get("code").and_then(Value::as_str).map(str::to_string);
        let details = match body.get("details") {
            Some(details) if !details.is_null() => Some(details.clone()),
            _ if body.is_null() => None,
            _ => Some(body.clone()),
        };
        Err(AccessError::http(status, code, message, details))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, spec: RequestSpec) -> Result<RawResponse> {
        let token = self.bearer_token().await;

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let started = Instant::now();
            self.logger.request(&spec, &self.config);

            match self.build_request(&spec, token.as_ref()).send().await {
                Ok(response) => {
                    return match self.classify_response(&spec, response, started).await {
                        Ok(raw) => Ok(raw),
                        Err(error) => {
                            self.logger.failure("response error", &error);
                            Err(error)
                        }
                    };
                }
                Err(error) => {
                    let error = AccessError::from_transport(error);
                    self.logger.failure("request error", &error);
                    if matches!(error, AccessError::Network { .. })
                        && attempt <= self.config.retry_attempts
                    {
                        tokio::time::sleep(self.config.retry_delay * attempt).await;
                        continue;
                    }
                    return Err(error);
                }
            }
        }
    }
}

/// Join the fixed base address with a request path.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{NoIdentity, NullSessionObserver, StaticIdentity};
    use crate::store::MemoryStateStore;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn transport_with(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<MemoryStateStore>,
    ) -> HttpTransport {
        HttpTransport::new(
            ApiConfig::default(),
            identity,
            store,
            Arc::new(NullSessionObserver),
        )
        .unwrap()
    }

    #[derive(Default)]
    struct RecordingSession {
        invalidations: AtomicUsize,
    }

    impl SessionObserver for RecordingSession {
        fn session_invalidated(&self) {
            self.invalidations.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Local server that counts connections and either drops them or
    /// answers with a fixed HTTP error.
    fn counting_server(respond_500: bool) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let connections = Arc::new(AtomicUsize::new(0));
        let counter = connections.clone();
        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                counter.fetch_add(1, Ordering::SeqCst);
                if respond_500 {
                    let mut buf = [0u8; 4096];
                    let _ = stream.read(&mut buf);
                    let _ = stream.write_all(
                        b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                    );
                }
                // Dropping the stream closes the connection.
            }
        });
        (format!("http://{addr}"), connections)
    }

    fn fast_retry_transport(base_url: String) -> HttpTransport {
        let mut config = ApiConfig::default().with_base_url(base_url);
        config.retry_attempts = 2;
        config.retry_delay = Duration::from_millis(1);
        config.log_http = false;
        HttpTransport::new(
            config,
            Arc::new(NoIdentity),
            Arc::new(MemoryStateStore::new()),
            Arc::new(NullSessionObserver),
        )
        .unwrap()
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://127.0.0.1:8003/api/v1", "/tickets/my"),
            "http://127.0.0.1:8003/api/v1/tickets/my"
        );
        assert_eq!(
            join_url("http://127.0.0.1:8003/api/v1/", "tickets/my"),
            "http://127.0.0.1:8003/api/v1/tickets/my"
        );
    }

    #[test]
    fn test_spec_builders() {
        let spec = RequestSpec::new(Method::Post, "/tickets")
            .with_header("Accept", "application/json")
            .with_json(serde_json::json!({"title": "t"}));
        assert_eq!(spec.method, Method::Post);
        assert_eq!(spec.headers.len(), 1);
        assert!(matches!(spec.payload, Payload::Json(_)));

        let upload = RequestSpec::new(Method::Post, "/files").with_upload("report.txt", vec![1, 2]);
        match upload.payload {
            Payload::Multipart { field, .. } => assert_eq!(field, UPLOAD_FIELD),
            _ => panic!("expected multipart payload"),
        }
    }

    #[tokio::test]
    async fn test_bearer_prefers_identity_provider() {
        let store = Arc::new(MemoryStateStore::new());
        store.set_auth_token("legacy");
        let transport = transport_with(Arc::new(StaticIdentity::new("tech", "fresh")), store);
        let token = transport.bearer_token().await.unwrap();
        assert_eq!(token.expose_secret(), "fresh");
    }

    #[tokio::test]
    async fn test_bearer_falls_back_to_stored_token() {
        let store = Arc::new(MemoryStateStore::new());
        store.set_auth_token("legacy");
        let transport = transport_with(Arc::new(NoIdentity), store);
        let token = transport.bearer_token().await.unwrap();
        assert_eq!(token.expose_secret(), "legacy");
    }

    #[tokio::test]
    async fn test_bearer_absent_means_unauthenticated() {
        let store = Arc::new(MemoryStateStore::new());
        let transport = transport_with(Arc::new(NoIdentity), store);
        assert!(transport.bearer_token().await.is_none());
    }

    #[test]
    fn test_unauthorized_clears_session_and_signals_observer() {
        let store = Arc::new(MemoryStateStore::new());
        store.set_auth_token("legacy");
        let session = Arc::new(RecordingSession::default());
        let transport = HttpTransport::new(
            ApiConfig::default(),
            Arc::new(NoIdentity),
            store.clone(),
            session.clone(),
        )
        .unwrap();

        let error = transport
            .classify_body(401, serde_json::json!({"message": "token expired"}))
            .unwrap_err();

        assert!(error.is_auth_error());
        assert_eq!(error.message(), "token expired");
        assert!(store.auth_token().is_none());
        assert_eq!(session.invalidations.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_other_statuses_leave_session_alone() {
        let store = Arc::new(MemoryStateStore::new());
        store.set_auth_token("legacy");
        let session = Arc::new(RecordingSession::default());
        let transport = HttpTransport::new(
            ApiConfig::default(),
            Arc::new(NoIdentity),
            store.clone(),
            session.clone(),
        )
        .unwrap();

        let error = transport.classify_body(403, Value::Null).unwrap_err();
        assert!(error.is_auth_error());
        assert_eq!(store.auth_token().as_deref(), Some("legacy"));
        assert_eq!(session.invalidations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_dropped_connections_retried_then_surface_network_error() {
        let (base_url, connections) = counting_server(false);
        let transport = fast_retry_transport(base_url);

        let error = transport
            .execute(RequestSpec::new(Method::Get, "/tickets"))
            .await
            .unwrap_err();

        assert!(error.is_network_error());
        // Initial attempt plus the full retry budget.
        assert_eq!(connections.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_http_error_status_is_not_retried() {
        let (base_url, connections) = counting_server(true);
        let transport = fast_retry_transport(base_url);

        let error = transport
            .execute(RequestSpec::new(Method::Get, "/tickets"))
            .await
            .unwrap_err();

        assert_eq!(error.status_code(), 500);
        assert!(error.is_server_error());
        assert_eq!(connections.load(Ordering::SeqCst), 1);
    }
}
