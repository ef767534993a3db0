//! HTTP transport link.
//!
//! Issues one `POST` per call to a single fixed endpoint. Never retries on
//! its own; failures are classified and handed to the wrapping link.

use crate::error::{LinkError, LinkResult, TransportErrorKind};
use crate::link::Link;
use crate::operation::{GraphQlResponse, Operation};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpLinkConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl HttpLinkConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport link backed by `reqwest`.
///
/// The client keeps no cookie store and sends no authorization headers, so
/// requests never carry credentials.
#[derive(Debug, Clone)]
pub struct HttpLink {
    config: HttpLinkConfig,
    client: Client,
}

impl HttpLink {
    /// Creates a transport for the configured endpoint.
    pub fn new(config: HttpLinkConfig) -> LinkResult<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(LinkError::Config("GraphQL endpoint is empty".to_string()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LinkError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.config.timeout
    }
}

#[async_trait]
impl Link for HttpLink {
    async fn execute(&self, operation: &Operation) -> LinkResult<GraphQlResponse> {
        debug!(
            "POST {} ({} / {})",
            self.config.endpoint,
            operation.name(),
            operation.id()
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&operation.body())
            .send()
            .await
            .map_err(|e| LinkError::transport(operation.name(), classify(&e), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let code = status.as_u16();
            let kind = if status.is_server_error() {
                TransportErrorKind::HttpServer(code)
            } else {
                TransportErrorKind::HttpClient(code)
            };
            return Err(LinkError::transport(
                operation.name(),
                kind,
                format!("HTTP error! status: {status}"),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LinkError::transport(operation.name(), classify(&e), e.to_string()))?;

        serde_json::from_slice::<GraphQlResponse>(&body).map_err(|e| {
            LinkError::transport(
                operation.name(),
                TransportErrorKind::MalformedResponse,
                format!("failed to parse GraphQL response: {e}"),
            )
        })
    }
}

fn classify(error: &reqwest::Error) -> TransportErrorKind {
    if error.is_timeout() {
        TransportErrorKind::Timeout
    } else if error.is_connect() {
        TransportErrorKind::ConnectionRefused
    } else if let Some(status) = error.status() {
        if status.is_server_error() {
            TransportErrorKind::HttpServer(status.as_u16())
        } else {
            TransportErrorKind::HttpClient(status.as_u16())
        }
    } else {
        TransportErrorKind::Network
    }
}
