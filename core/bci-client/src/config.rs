//! Client configuration.
//!
//! The endpoint is the only setting most deployments touch. It comes from
//! `BCI_GRAPHQL_ENDPOINT`, falling back to the production API when unset or
//! empty. `BCI_GRAPHQL_TIMEOUT_MS` overrides the per-request timeout; `0`
//! disables it.

use crate::error::{ClientError, ClientResult};
use bci_cache::{CacheConfig, FieldMerge, TypePolicy, ROOT_QUERY};
use bci_link::{HttpLinkConfig, RetryPolicy, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the GraphQL endpoint URL.
pub const ENDPOINT_ENV: &str = "BCI_GRAPHQL_ENDPOINT";

/// Environment variable holding the request timeout in milliseconds.
pub const TIMEOUT_ENV: &str = "BCI_GRAPHQL_TIMEOUT_MS";

/// Production endpoint used when no override is configured.
pub const DEFAULT_ENDPOINT: &str = "https://neurodopa.fr/bci/api/graphql";

/// Everything needed to build a [`crate::BciClient`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Backoff and attempt limits for transient failures.
    pub retry: RetryPolicy,
    /// Entity identity and merge rules for the normalized cache.
    pub cache: CacheConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            retry: RetryPolicy::default(),
            cache: dashboard_cache_config(),
        }
    }
}

impl ClientConfig {
    /// Default settings against the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Reads overrides from the process environment.
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENDPOINT_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
        {
            config.endpoint = endpoint;
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                ClientError::Config(format!(
                    "{TIMEOUT_ENV} must be a number of milliseconds, got {raw:?}"
                ))
            })?;
            config.timeout = (millis > 0).then(|| Duration::from_millis(millis));
        }

        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Transport settings derived from this configuration.
    pub fn http(&self) -> HttpLinkConfig {
        HttpLinkConfig {
            endpoint: self.endpoint.clone(),
            timeout: self.timeout,
        }
    }
}

/// Cache policies for the dashboard schema.
///
/// Graph nodes, memories and tasks are normalized by `id`. Node listings and
/// system status are replaced wholesale on every fetch.
pub fn dashboard_cache_config() -> CacheConfig {
    CacheConfig::new()
        .with_type(
            ROOT_QUERY,
            TypePolicy::unkeyed()
                .with_field("databaseNodes", FieldMerge::Replace)
                .with_field("systemStatus", FieldMerge::Replace),
        )
        .with_type("DatabaseNode", TypePolicy::keyed(&["id"]))
        .with_type("Memory", TypePolicy::keyed(&["id"]))
        .with_type("Task", TypePolicy::keyed(&["id"]))
}
