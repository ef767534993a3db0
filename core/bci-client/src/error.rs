//! Client error types.

use bci_link::{LinkError, TransportErrorKind};
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by the client.
///
/// Read operations never return these directly once a mock fallback applies;
/// write operations always do.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error(transparent)]
    Link(#[from] LinkError),

    #[error("no data returned for {0}")]
    MissingData(String),

    #[error("failed to decode {operation} result: {message}")]
    Decode { operation: String, message: String },

    #[error("failed to encode variables for {operation}: {message}")]
    Variables { operation: String, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Returns true if the failure happened at the transport level.
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Link(LinkError::Transport { .. }))
    }

    /// Returns true if the backend answered with GraphQL errors.
    pub fn is_graphql(&self) -> bool {
        matches!(self, ClientError::Link(LinkError::GraphQl { .. }))
    }

    pub fn transport_kind(&self) -> Option<TransportErrorKind> {
        match self {
            ClientError::Link(err) => err.transport_kind(),
            _ => None,
        }
    }

    /// HTTP status behind a transport failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Link(err) => err.status(),
            _ => None,
        }
    }
}
