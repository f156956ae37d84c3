//! Backend client implementation using reqwest.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    config::ClientConfig,
    domain::{
        error::DomainError,
        models::transport::TransportFailure,
        services::{
            api_service::ApiClient,
            response_normalizer::{
                PARSE_FAILURE_SIGNATURE, envelope_from_value, extract_payload,
                translate_transport_error,
            },
        },
    },
    infrastructure::request_tracker::RequestTracker,
};

/// Tracing target for backend client operations.
pub const TRACING_TARGET: &str = "couple_planner::api";

struct ApiClientInner {
    http: Client,
    config: ClientConfig,
    tracker: RequestTracker,
}

impl std::fmt::Debug for ApiClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClientInner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// HTTP client for the planner backend.
///
/// Every response body is expected to be a response envelope. Non-2xx
/// statuses and connection problems are reported as
/// [`DomainError::Transport`], envelopes with `success=false` as
/// [`DomainError::BackendLogic`].
#[derive(Clone, Debug)]
pub struct ReqwestApiClient {
    inner: Arc<ApiClientInner>,
}

impl ReqwestApiClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, DomainError> {
        Self::with_tracker(config, RequestTracker::new())
    }

    /// Same as [`ReqwestApiClient::new`], reporting requests to an existing tracker.
    pub fn with_tracker(config: ClientConfig, tracker: RequestTracker) -> Result<Self, DomainError> {
        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %config.base_url,
            timeout_ms = config.effective_timeout().as_millis(),
            "Creating API client"
        );

        config.validate()?;

        let http = Client::builder()
            .timeout(config.effective_timeout())
            .user_agent(config.effective_user_agent())
            .build()
            .map_err(|e| DomainError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        let inner = ApiClientInner {
            http,
            config,
            tracker,
        };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn tracker(&self) -> &RequestTracker {
        &self.inner.tracker
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.inner.config.endpoint(path);
        let request = self.inner.http.request(method, url);
        match &self.inner.config.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute<T>(&self, method: Method, path: &str, request: RequestBuilder) -> Result<T, DomainError>
    where
        T: DeserializeOwned,
    {
        let _guard = self.inner.tracker.begin(format!("{method} {path}"));
        let started_at = Instant::now();

        tracing::debug!(target: TRACING_TARGET, %method, path, "Sending request");

        let response = request
            .send()
            .await
            .map_err(|err| translate_transport_error(Some(&transport_failure(&err))))?;

        let status = response.status();
        let url = response.url().to_string();

        if !status.is_success() {
            tracing::debug!(
                target: TRACING_TARGET,
                %method,
                path,
                status = status.as_u16(),
                elapsed_ms = started_at.elapsed().as_millis(),
                "Request rejected"
            );
            let failure = TransportFailure::with_status(
                status.as_u16(),
                format!("Http failure response for {url}: {status}"),
            );
            return Err(translate_transport_error(Some(&failure)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| translate_transport_error(Some(&transport_failure(&err))))?;

        let document: Value = serde_json::from_slice(&body).map_err(|err| {
            let failure = TransportFailure::with_status(
                status.as_u16(),
                format!("{PARSE_FAILURE_SIGNATURE} for {url}: {err}"),
            );
            translate_transport_error(Some(&failure))
        })?;

        let payload = extract_payload(Some(envelope_from_value(document)?))?;

        tracing::debug!(
            target: TRACING_TARGET,
            %method,
            path,
            status = status.as_u16(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Request completed"
        );

        serde_json::from_value(payload).map_err(|err| {
            tracing::debug!(target: TRACING_TARGET, path, error = %err, "Unexpected payload shape");
            DomainError::MalformedResponse
        })
    }
}

/// Describe a reqwest failure the way the normalizer expects it.
fn transport_failure(err: &reqwest::Error) -> TransportFailure {
    if err.is_connect() || err.is_timeout() {
        return TransportFailure::unreachable(err.to_string());
    }
    if err.is_decode() {
        return TransportFailure::with_message(format!("{PARSE_FAILURE_SIGNATURE}: {err}"));
    }
    match err.status() {
        Some(status) => TransportFailure::with_status(status.as_u16(), err.to_string()),
        None => TransportFailure::with_message(err.to_string()),
    }
}

#[async_trait]
impl ApiClient for ReqwestApiClient {
    async fn get<T>(&self, path: &str) -> Result<T, DomainError>
    where
        T: DeserializeOwned + Send,
    {
        let request = self.request(Method::GET, path);
        self.execute(Method::GET, path, request).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, DomainError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let request = self.request(Method::POST, path).json(body);
        self.execute(Method::POST, path, request).await
    }

    async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, DomainError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let request = self.request(Method::PUT, path).json(body);
        self.execute(Method::PUT, path, request).await
    }

    async fn delete<T>(&self, path: &str) -> Result<T, DomainError>
    where
        T: DeserializeOwned + Send,
    {
        let request = self.request(Method::DELETE, path);
        self.execute(Method::DELETE, path, request).await
    }
}
