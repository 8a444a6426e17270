//! Resilient access facade.
//!
//! Single entry point for all backend calls: unwraps the response envelope,
//! applies the per-call notification policy, and always surfaces a typed
//! `AccessError` to the caller.

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AccessError, Result};
use crate::logger::RequestLog;
use crate::notify::{Notification, Notifier};
use crate::transport::{Method, RequestSpec, Transport};

/// Generic response wrapper returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub success: bool,
}

/// Per-call notification policy and request parameters.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub show_success_toast: bool,
    pub show_error_toast: bool,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
    /// Suppresses all notifications regardless of the toast flags.
    pub silent: bool,
    pub query: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        RequestOptions {
            show_success_toast: false,
            show_error_toast: true,
            success_message: None,
            error_message: None,
            silent: false,
            query: Vec::new(),
        }
    }
}

impl RequestOptions {
    /// Options with error toasts suppressed, for callers that handle
    /// failures themselves.
    pub fn quiet() -> Self {
        RequestOptions {
            show_error_toast: false,
            ..Default::default()
        }
    }
}

/// Centralized API service used by all higher-level calls.
pub struct ApiService {
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
    logger: RequestLog,
}

impl ApiService {
    pub fn new(transport: Arc<dyn Transport>, notifier: Arc<dyn Notifier>, logger: RequestLog) -> Self {
        ApiService {
            transport,
            notifier,
            logger,
        }
    }

    /// Generic request: execute, unwrap the envelope, notify per options,
    /// and re-raise the typed error on any failure.
    pub async fn request<T: DeserializeOwned>(
        &self,
        spec: RequestSpec,
        options: RequestOptions,
    ) -> Result<T> {
        match self.dispatch::<T>(spec).await {
            Ok(envelope) => {
                if options.show_success_toast && !options.silent {
                    let description = options
                        .success_message
                        .clone()
                        .or(envelope.message)
                        .unwrap_or_else(|| "Operation completed successfully".to_string());
                    self.notifier
                        .notify(Notification::success("Success", description));
                }
                Ok(envelope.data)
            }
            Err(error) => {
                if options.show_error_toast && !options.silent {
                    self.notify_error(&error, options.error_message.as_deref());
                }
                Err(error)
            }
        }
    }

    async fn dispatch<T: DeserializeOwned>(&self, spec: RequestSpec) -> Result<Envelope<T>> {
        let response = self.transport.execute(spec).await?;
        serde_json::from_value(response.body)
            .map_err(|e| AccessError::request_setup(format!("malformed response envelope: {e}"), None))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        let spec = RequestSpec::new(Method::Get, path).with_query(options.query.clone());
        self.request(spec, options).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> Result<T> {
        let mut spec = RequestSpec::new(Method::Post, path);
        if let Some(body) = body {
            spec = spec.with_json(body);
        }
        self.request(spec, options).await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> Result<T> {
        let mut spec = RequestSpec::new(Method::Put, path);
        if let Some(body) = body {
            spec = spec.with_json(body);
        }
        self.request(spec, options).await
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> Result<T> {
        let mut spec = RequestSpec::new(Method::Patch, path);
        if let Some(body) = body {
            spec = spec.with_json(body);
        }
        self.request(spec, options).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        self.request(RequestSpec::new(Method::Delete, path), options)
            .await
    }

    /// Upload a file as a multipart body with a fixed field name.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        file_name: &str,
        content: Vec<u8>,
        options: RequestOptions,
    ) -> Result<T> {
        let spec = RequestSpec::new(Method::Post, path).with_upload(file_name, content);
        self.request(spec, options).await
    }

    /// Pick toast copy from the error class.
    fn notify_error(&self, error: &AccessError, custom_message: Option<&str>) {
        let mut title = "Error";
        let mut description = custom_message
            .map(str::to_string)
            .unwrap_or_else(|| error.user_message());

        if error.is_network_error() {
            title = "Network Error";
            description =
                "Unable to connect to the server. Please check your internet connection."
                    .to_string();
        } else if error.is_auth_error() {
            title = "Authentication Error";
            description = "Your session has expired. Please log in again.".to_string();
        } else if error.is_validation_error() {
            title = "Validation Error";
        } else if error.is_server_error() {
            title = "Server Error";
            description = "Something went wrong on our end. Please try again later.".to_string();
        }

        self.notifier
            .notify(Notification::error(title, description));
        self.logger.failure(&format!("API Error: {title}"), error);
    }
}
