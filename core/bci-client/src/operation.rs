//! Typed operation definitions.
//!
//! Every read is a zero-sized type implementing [`Query`]; every write
//! implements [`Mutation`]. The associated `Data` type is the one result type
//! for the operation: live responses decode into it and the mock fallback
//! constructs it, so both paths are checked by the compiler.

use crate::error::{ClientError, ClientResult};
use bci_cache::FetchPolicy;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// A named GraphQL read with a deterministic fallback value.
pub trait Query: Send + Sync + 'static {
    /// GraphQL operation name, also used in logs and network-error events.
    const NAME: &'static str;
    /// The single root field the document selects.
    const ROOT_FIELD: &'static str;
    const DOCUMENT: &'static str;
    /// Caching policy used unless the caller overrides it.
    const FETCH_POLICY: FetchPolicy;
    /// Refresh interval for watchers. `None` means refetch only on request.
    const POLL_INTERVAL: Option<Duration> = None;

    type Variables: Serialize + Clone + Send + Sync + 'static;
    type Data: DeserializeOwned + Serialize + Clone + Send + Sync + 'static;

    /// Placeholder served when the live call fails and nothing is cached.
    fn mock(variables: &Self::Variables) -> Self::Data;

    /// Whether the read should not run at all for these variables.
    fn skip(_variables: &Self::Variables) -> bool {
        false
    }
}

/// A named GraphQL write. Writes have no fallback.
pub trait Mutation: Send + Sync + 'static {
    const NAME: &'static str;
    const ROOT_FIELD: &'static str;
    const DOCUMENT: &'static str;

    type Variables: Serialize + Send + Sync + 'static;
    type Data: DeserializeOwned + Clone + Send + Sync + 'static;
}

/// Variables of an operation that takes none. Serializes to `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoVariables {}

/// Variables of an operation taking a single `input` argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputVariables<T> {
    pub input: T,
}

impl<T> InputVariables<T> {
    pub fn new(input: T) -> Self {
        Self { input }
    }
}

impl<T> From<T> for InputVariables<T> {
    fn from(input: T) -> Self {
        Self::new(input)
    }
}

/// Per-call overrides for a read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub fetch_policy: Option<FetchPolicy>,
    pub poll_interval: Option<Duration>,
    pub skip: bool,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetch_policy(mut self, policy: FetchPolicy) -> Self {
        self.fetch_policy = Some(policy);
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    pub fn skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }
}

/// Encodes operation variables as the JSON object sent on the wire.
pub(crate) fn encode_variables<V: Serialize>(
    operation: &str,
    variables: &V,
) -> ClientResult<Value> {
    serde_json::to_value(variables).map_err(|e| ClientError::Variables {
        operation: operation.to_string(),
        message: e.to_string(),
    })
}
