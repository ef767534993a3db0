//! Resilient GraphQL client for the BCI dashboard.
//!
//! Reads and writes behave differently on failure:
//!
//! - **Reads** ([`Query`]) resolve to live data, cached data, or the
//!   operation's deterministic mock. A read never ends in an error state;
//!   when nothing live or cached is available the mock is served with
//!   `error` unset and [`BciClient::is_demo_mode`] turns on.
//! - **Writes** ([`Mutation`]) have no fallback. Failures reach the caller
//!   through the returned `Result` and the `on_error` callback.
//!
//! Transport failures are retried and broadcast to
//! [`bci_link::NetworkErrorObserver`]s by the link pipeline, whatever the
//! read path later does with them.
//!
//! # Example
//!
//! ```no_run
//! use bci_client::{BciClient, ClientConfig, MutationOptions, InputVariables};
//! use bci_types::CreateTaskInput;
//!
//! # async fn run() -> bci_client::ClientResult<()> {
//! let client = BciClient::new(ClientConfig::from_env()?)?;
//!
//! let stats = client.memory_stats().await;
//! println!("{} vectors (mock: {})", stats.data.map(|s| s.qdrant_vectors).unwrap_or(0), client.is_demo_mode());
//!
//! let create = client.create_task(MutationOptions::new().on_error(|err| eprintln!("could not save: {err}")));
//! create.mutate(&InputVariables::new(CreateTaskInput::titled("Review PR"))).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod facade;
pub mod mocks;
mod mutation;
pub mod mutations;
mod operation;
pub mod queries;
mod result;
mod watch;

pub use bci_cache::FetchPolicy;
pub use bci_link::{NetworkErrorEvent, NetworkErrorObserver, RetryPolicy};
pub use client::BciClient;
pub use config::{
    dashboard_cache_config, ClientConfig, DEFAULT_ENDPOINT, ENDPOINT_ENV, TIMEOUT_ENV,
};
pub use error::{ClientError, ClientResult};
pub use mutation::{MutationHandle, MutationOptions};
pub use operation::{InputVariables, Mutation, NoVariables, Query, QueryOptions};
pub use queries::{
    DatabaseNodesVariables, SearchMemoriesVariables, SystemLogsVariables, TasksVariables,
};
pub use result::{DataSource, MutationState, QueryResult};
pub use watch::QueryWatcher;
