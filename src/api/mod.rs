//! HTTP request helper for the registry JSON API. Every auth call goes through
//! `ApiClient::request`, which attaches the stored bearer token, issues exactly
//! one request and folds every outcome into a `NormalizedResponse` or an
//! `ApiError`. There are no retries and no timeouts. The helper reads the
//! token from the credential store but never writes to it.

mod response;

pub use reqwest::Method;
pub use response::{NormalizedResponse, ResponseStatus};

use crate::{
    config::ClientConfig,
    errors::{ApiError, AppError},
    storage::CredentialStore,
};
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info_span, Instrument};

/// Maximum number of backend message characters surfaced to callers.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// Builds a client for the configured API base URL.
    /// # Errors
    /// Returns `AppError::Config` if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, store: Arc<dyn CredentialStore>) -> Result<Self, AppError> {
        config.validate()?;
        let http = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            store,
        })
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Issues a single JSON request against `endpoint`.
    /// # Errors
    /// Returns `ApiError` with the backend status and message for non-2xx replies,
    /// or with status `0` when the server cannot be reached or the body is not a
    /// JSON envelope.
    pub async fn request(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<NormalizedResponse, ApiError> {
        let url = build_url_with_base(&self.base_url, endpoint);
        let span = info_span!("api.request", http.method = %method, endpoint = %endpoint);

        let mut builder = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = self.store.token().map(SecretString::from) {
            builder = builder.bearer_auth(token.expose_secret());
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        async move {
            let response = builder.send().await.map_err(|err| {
                debug!("request failed before a response arrived: {err}");
                ApiError::network()
            })?;
            let status = response.status();
            let raw = response.text().await.map_err(|err| {
                debug!("failed to read response body: {err}");
                ApiError::network()
            })?;

            handle_json_response(status, &raw)
        }
        .instrument(span)
        .await
    }
}

/// Maps a status code and raw body into the normalized envelope.
fn handle_json_response(status: StatusCode, raw: &str) -> Result<NormalizedResponse, ApiError> {
    let payload: Value = serde_json::from_str(raw).map_err(|err| {
        debug!(status = status.as_u16(), "response body is not JSON: {err}");
        ApiError::network()
    })?;

    if !status.is_success() {
        let message = payload
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| fallback_message(status), sanitize_message);
        let errors = payload.get("errors").and_then(Value::as_array).cloned();
        debug!(status = status.as_u16(), "request rejected: {message}");
        return Err(ApiError::new(status.as_u16(), message, errors));
    }

    serde_json::from_value(payload).map_err(|err| {
        debug!("response does not match the envelope shape: {err}");
        ApiError::network()
    })
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

fn fallback_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| "Request failed.".to_string(), str::to_string)
}

/// Trims and truncates backend messages before they reach the UI.
fn sanitize_message(message: &str) -> String {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
