//! Request pipeline for the BCI dashboard GraphQL client.
//!
//! Operations flow through three composable links, outermost first:
//!
//! - **Error observer** ([`ErrorLink`]): logs application and transport
//!   errors and announces transport failures as [`NetworkErrorEvent`]s
//! - **Retry policy** ([`RetryLink`]): repeats transient transport failures
//!   with exponential backoff and jitter, bounded by an attempt cap
//! - **Transport** ([`HttpLink`]): one `POST {query, variables}` per attempt
//!
//! Each link implements [`Link`], so tests can swap any stage for a
//! [`link::mock::ScriptedLink`].
//!
//! # Example
//!
//! ```no_run
//! use bci_link::{standard_link, HttpLinkConfig, Link, NetworkErrorNotifier, Operation, RetryPolicy};
//! use std::sync::Arc;
//!
//! # async fn run() -> bci_link::LinkResult<()> {
//! let notifier = Arc::new(NetworkErrorNotifier::new());
//! let link = standard_link(
//!     HttpLinkConfig::new("http://localhost:9598/graphql"),
//!     RetryPolicy::default(),
//!     notifier,
//! )?;
//!
//! let op = Operation::new("GetMetrics", "query GetMetrics { metrics { totalRequests } }", serde_json::json!({}));
//! let response = link.execute(&op).await?;
//! println!("{:?}", response.data);
//! # Ok(())
//! # }
//! ```

mod error;
mod http;
pub mod link;
mod observer;
mod operation;
mod retry;

use std::sync::Arc;

pub use error::{LinkError, LinkResult, TransportErrorKind};
pub use http::{HttpLink, HttpLinkConfig, DEFAULT_TIMEOUT};
pub use link::Link;
pub use observer::{
    ErrorLink, NetworkErrorEvent, NetworkErrorNotifier, NetworkErrorObserver, SubscriptionId,
};
pub use operation::{GraphQlError, GraphQlResponse, Operation, RequestBody, SourceLocation};
pub use retry::{RetryLink, RetryPolicy};

/// The production pipeline: error observer → retry → HTTP.
pub type StandardLink = ErrorLink<RetryLink<HttpLink>>;

/// Builds the production pipeline for one endpoint.
pub fn standard_link(
    http: HttpLinkConfig,
    retry: RetryPolicy,
    notifier: Arc<NetworkErrorNotifier>,
) -> LinkResult<StandardLink> {
    let transport = HttpLink::new(http)?;
    Ok(ErrorLink::new(RetryLink::new(transport, retry), notifier))
}
