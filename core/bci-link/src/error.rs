//! Error types for the link stack.

use crate::operation::GraphQlError;
use std::fmt;
use thiserror::Error;

/// Result type for link operations.
pub type LinkResult<T> = Result<T, LinkError>;

/// Structured classification of a transport failure.
///
/// Produced by the HTTP link itself so that retry decisions never depend on
/// error message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// The request did not complete within the configured timeout.
    Timeout,
    /// The connection could not be established.
    ConnectionRefused,
    /// Any other network-level failure (reset, DNS, TLS, body read).
    Network,
    /// The endpoint answered with a 5xx status.
    HttpServer(u16),
    /// The endpoint answered with a non-2xx status below 500.
    HttpClient(u16),
    /// The endpoint answered 2xx but the body was not a GraphQL response.
    MalformedResponse,
}

impl TransportErrorKind {
    /// Whether a failure of this kind may succeed if the request is repeated.
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            TransportErrorKind::Timeout
                | TransportErrorKind::ConnectionRefused
                | TransportErrorKind::Network
                | TransportErrorKind::HttpServer(_)
        )
    }

    /// The HTTP status behind this failure, if any.
    pub fn status(self) -> Option<u16> {
        match self {
            TransportErrorKind::HttpServer(code) | TransportErrorKind::HttpClient(code) => {
                Some(code)
            }
            _ => None,
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportErrorKind::Timeout => write!(f, "timeout"),
            TransportErrorKind::ConnectionRefused => write!(f, "connection refused"),
            TransportErrorKind::Network => write!(f, "network error"),
            TransportErrorKind::HttpServer(code) => write!(f, "server error (HTTP {code})"),
            TransportErrorKind::HttpClient(code) => write!(f, "client error (HTTP {code})"),
            TransportErrorKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

/// Errors that can occur while executing an operation through the links.
#[derive(Debug, Clone, Error)]
pub enum LinkError {
    /// The request failed before a GraphQL response was obtained.
    #[error("{kind} in {operation}: {message}")]
    Transport {
        operation: String,
        kind: TransportErrorKind,
        message: String,
    },

    /// The backend answered with a GraphQL `errors` array and no usable data.
    #[error("GraphQL error in {operation}: {}", summarize(.errors))]
    GraphQl {
        operation: String,
        errors: Vec<GraphQlError>,
    },

    /// The link could not be constructed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl LinkError {
    pub fn transport(
        operation: impl Into<String>,
        kind: TransportErrorKind,
        message: impl Into<String>,
    ) -> Self {
        LinkError::Transport {
            operation: operation.into(),
            kind,
            message: message.into(),
        }
    }

    /// Returns true if the retry link should repeat the request.
    pub fn is_retryable(&self) -> bool {
        match self {
            LinkError::Transport { kind, .. } => kind.is_transient(),
            LinkError::GraphQl { .. } | LinkError::Config(_) => false,
        }
    }

    /// Returns the transport classification, if this is a transport failure.
    pub fn transport_kind(&self) -> Option<TransportErrorKind> {
        match self {
            LinkError::Transport { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Returns the HTTP status behind a transport failure, if any.
    pub fn status(&self) -> Option<u16> {
        self.transport_kind().and_then(TransportErrorKind::status)
    }
}

fn summarize(errors: &[GraphQlError]) -> String {
    match errors {
        [] => "unknown error".to_string(),
        [only] => only.message.clone(),
        [first, rest @ ..] => format!("{} (and {} more)", first.message, rest.len()),
    }
}
