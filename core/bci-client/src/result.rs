//! Result states delivered to callers.

use crate::error::ClientError;
use serde::Serialize;

/// Where the data of a [`QueryResult`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Nothing has been delivered yet.
    Pending,
    /// The read was skipped for its variables.
    Skipped,
    Cache,
    Network,
    /// The registered fallback, served because the live call failed.
    Mock,
}

/// State of one read: `{data, loading, error}`.
///
/// A settled read always carries data unless it was skipped. Failures with
/// nothing cached resolve to mock data with `error` unset.
#[derive(Debug, Clone)]
pub struct QueryResult<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<ClientError>,
    pub source: DataSource,
}

impl<T> QueryResult<T> {
    /// Before the first request has started.
    pub fn idle() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            source: DataSource::Pending,
        }
    }

    /// A request is in flight, optionally showing what the cache holds.
    pub fn loading(cached: Option<T>) -> Self {
        let source = if cached.is_some() {
            DataSource::Cache
        } else {
            DataSource::Pending
        };
        Self {
            data: cached,
            loading: true,
            error: None,
            source,
        }
    }

    /// A follow-up request is in flight. The data and source of `self` stay
    /// visible until the new result settles.
    pub fn reloading(&self) -> Self
    where
        T: Clone,
    {
        match &self.data {
            Some(data) => Self {
                data: Some(data.clone()),
                loading: true,
                error: None,
                source: self.source,
            },
            None => Self::loading(None),
        }
    }

    /// Served from cache. `refreshing` is set while a network refresh runs.
    pub fn from_cache(data: T, refreshing: bool) -> Self {
        Self {
            data: Some(data),
            loading: refreshing,
            error: None,
            source: DataSource::Cache,
        }
    }

    /// Cached data kept after a failed refresh, with the failure reported.
    pub fn stale(data: T, error: ClientError) -> Self {
        Self {
            data: Some(data),
            loading: false,
            error: Some(error),
            source: DataSource::Cache,
        }
    }

    /// A live result. `partial` carries GraphQL errors returned alongside data.
    pub fn network(data: T, partial: Option<ClientError>) -> Self {
        Self {
            data: Some(data),
            loading: false,
            error: partial,
            source: DataSource::Network,
        }
    }

    pub fn mock(data: T) -> Self {
        Self {
            data: Some(data),
            loading: false,
            error: None,
            source: DataSource::Mock,
        }
    }

    pub fn skipped() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            source: DataSource::Skipped,
        }
    }

    pub fn is_mock(&self) -> bool {
        self.source == DataSource::Mock
    }

    /// True once the read has resolved (or was skipped).
    pub fn is_settled(&self) -> bool {
        !self.loading && self.source != DataSource::Pending
    }

    /// Transforms the data, keeping the flags.
    pub fn map<U, F>(self, f: F) -> QueryResult<U>
    where
        F: FnOnce(T) -> U,
    {
        QueryResult {
            data: self.data.map(f),
            loading: self.loading,
            error: self.error,
            source: self.source,
        }
    }
}

/// State of a mutation handle: `{data, loading, error, called}`.
#[derive(Debug, Clone)]
pub struct MutationState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<ClientError>,
    /// Whether `mutate` has been invoked since creation or the last reset.
    pub called: bool,
}

impl<T> Default for MutationState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            called: false,
        }
    }
}
