//! The cache-client object every operation runs through.
//!
//! [`BciClient`] owns the link pipeline, the normalized cache and the
//! network-error notifier. It is constructed once and cloned into every call
//! site; clones share all state.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::mutation::{MutationHandle, MutationOptions};
use crate::operation::{encode_variables, Mutation, Query, QueryOptions};
use crate::result::QueryResult;
use crate::watch::QueryWatcher;
use bci_cache::{CacheConfig, FetchPolicy, NormalizedCache};
use bci_link::{
    standard_link, GraphQlResponse, Link, LinkError, NetworkErrorNotifier, NetworkErrorObserver,
    Operation, SubscriptionId,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

struct ClientInner {
    link: Box<dyn Link>,
    cache: NormalizedCache,
    notifier: Arc<NetworkErrorNotifier>,
    demo_mode: AtomicBool,
}

/// Entry point for every read and write against the dashboard API.
#[derive(Clone)]
pub struct BciClient {
    inner: Arc<ClientInner>,
}

/// A decoded live result plus any GraphQL errors that accompanied it.
type Fetched<T> = (T, Option<ClientError>);

impl BciClient {
    /// Builds the production pipeline (error observer → retry → HTTP).
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let notifier = Arc::new(NetworkErrorNotifier::new());
        let link = standard_link(config.http(), config.retry, Arc::clone(&notifier))?;
        debug!(
            "BCI client for {} (timeout {:?}, {} attempts)",
            config.endpoint, config.timeout, config.retry.max_attempts
        );
        Ok(Self::with_link(link, config.cache, notifier))
    }

    /// Builds a client from `BCI_GRAPHQL_*` environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Builds a client over an arbitrary link.
    ///
    /// `notifier` should be the one the link's error observer broadcasts to,
    /// so that [`BciClient::subscribe_network_errors`] reaches it.
    pub fn with_link(
        link: impl Link + 'static,
        cache: CacheConfig,
        notifier: Arc<NetworkErrorNotifier>,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                link: Box::new(link),
                cache: NormalizedCache::new(cache),
                notifier,
                demo_mode: AtomicBool::new(false),
            }),
        }
    }

    pub fn cache(&self) -> &NormalizedCache {
        &self.inner.cache
    }

    pub fn notifier(&self) -> &Arc<NetworkErrorNotifier> {
        &self.inner.notifier
    }

    /// Registers an observer for transport failures.
    pub fn subscribe_network_errors(
        &self,
        observer: Arc<dyn NetworkErrorObserver>,
    ) -> SubscriptionId {
        self.inner.notifier.subscribe(observer)
    }

    /// Whether the most recently settled read was served from mock data.
    pub fn is_demo_mode(&self) -> bool {
        self.inner.demo_mode.load(Ordering::Relaxed)
    }

    // ── Reads ────────────────────────────────────────────────────

    /// Runs a read with its declared policy.
    pub async fn query<Q: Query>(&self, variables: &Q::Variables) -> QueryResult<Q::Data> {
        self.query_with::<Q>(variables, QueryOptions::default()).await
    }

    /// Runs a read once.
    ///
    /// Under `cache-and-network` a cache hit is returned immediately with
    /// `loading` set while a background fetch refreshes the cache. A failed
    /// fetch with nothing cached resolves to the operation's mock.
    pub async fn query_with<Q: Query>(
        &self,
        variables: &Q::Variables,
        options: QueryOptions,
    ) -> QueryResult<Q::Data> {
        if options.skip || Q::skip(variables) {
            return QueryResult::skipped();
        }
        let policy = options.fetch_policy.unwrap_or(Q::FETCH_POLICY);
        let args = match encode_variables(Q::NAME, variables) {
            Ok(args) => args,
            Err(err) => return self.settle::<Q>(variables, Err(err), None),
        };

        match (policy, self.read_cached::<Q>(policy, &args)) {
            (FetchPolicy::CacheFirst, Some(data)) => QueryResult::from_cache(data, false),
            (FetchPolicy::CacheAndNetwork, Some(data)) => {
                let client = self.clone();
                tokio::spawn(async move {
                    match client.fetch::<Q>(&args).await {
                        Ok(_) => client.inner.demo_mode.store(false, Ordering::Relaxed),
                        Err(err) => debug!("background refresh of {} failed: {}", Q::NAME, err),
                    }
                });
                QueryResult::from_cache(data, true)
            }
            (_, cached) => {
                let outcome = self.fetch::<Q>(&args).await;
                self.settle::<Q>(variables, outcome, cached)
            }
        }
    }

    /// Starts a watcher with the read's declared policy and poll interval.
    pub fn watch<Q: Query>(&self, variables: Q::Variables) -> QueryWatcher<Q::Data> {
        self.watch_with::<Q>(variables, QueryOptions::default())
    }

    /// Starts a background task that keeps a read's state current.
    ///
    /// Each cycle publishes a loading state, then the settled result. The
    /// loading state shows cached data when the policy allows, and otherwise
    /// keeps the previous result's data visible. Cycles repeat on
    /// [`QueryWatcher::refetch`] and on the poll interval. The task ends when
    /// the watcher is dropped.
    pub fn watch_with<Q: Query>(
        &self,
        variables: Q::Variables,
        options: QueryOptions,
    ) -> QueryWatcher<Q::Data> {
        let (tx, rx) = watch::channel(QueryResult::idle());
        let (refetch_tx, mut refetch_rx) = mpsc::unbounded_channel::<()>();
        let poll = options.poll_interval.or(Q::POLL_INTERVAL);
        let client = self.clone();

        let task = tokio::spawn(async move {
            let mut first = true;
            loop {
                client.run_cycle::<Q>(&variables, options, first, &tx).await;
                first = false;

                tokio::select! {
                    _ = tx.closed() => break,
                    request = refetch_rx.recv() => {
                        if request.is_none() {
                            break;
                        }
                    }
                    _ = wait_for_poll(poll) => {}
                }
            }
            debug!("watcher for {} stopped", Q::NAME);
        });

        QueryWatcher::new(rx, refetch_tx, task)
    }

    async fn run_cycle<Q: Query>(
        &self,
        variables: &Q::Variables,
        options: QueryOptions,
        first: bool,
        tx: &watch::Sender<QueryResult<Q::Data>>,
    ) {
        if options.skip || Q::skip(variables) {
            tx.send_replace(QueryResult::skipped());
            return;
        }
        let policy = options.fetch_policy.unwrap_or(Q::FETCH_POLICY);
        let args = match encode_variables(Q::NAME, variables) {
            Ok(args) => args,
            Err(err) => {
                tx.send_replace(self.settle::<Q>(variables, Err(err), None));
                return;
            }
        };
        let cached = self.read_cached::<Q>(policy, &args);

        if let (true, FetchPolicy::CacheFirst, Some(data)) = (first, policy, &cached) {
            tx.send_replace(QueryResult::from_cache(data.clone(), false));
            return;
        }

        let loading = match &cached {
            Some(data) => QueryResult::loading(Some(data.clone())),
            None => tx.borrow().reloading(),
        };
        tx.send_replace(loading);
        let outcome = self.fetch::<Q>(&args).await;
        tx.send_replace(self.settle::<Q>(variables, outcome, cached));
    }

    /// Cached data for a read, if the policy consults the cache and the
    /// stored value still decodes. Never fails.
    fn read_cached<Q: Query>(&self, policy: FetchPolicy, args: &Value) -> Option<Q::Data> {
        if !policy.reads_cache() {
            return None;
        }
        let raw = self.inner.cache.read_query(Q::ROOT_FIELD, args)?;
        serde_json::from_value(raw).ok()
    }

    async fn fetch<Q: Query>(&self, args: &Value) -> ClientResult<Fetched<Q::Data>> {
        let operation = Operation::new(Q::NAME, Q::DOCUMENT, args.clone());
        let response = self.inner.link.execute(&operation).await?;
        let raw = root_value(Q::NAME, Q::ROOT_FIELD, &response)?;
        let data: Q::Data = decode(Q::NAME, raw, &response)?;

        self.inner.cache.write_query(Q::ROOT_FIELD, args, raw);
        let partial = response
            .has_errors()
            .then(|| graphql_error(Q::NAME, &response));
        Ok((data, partial))
    }

    /// Turns a fetch outcome into the state delivered to the caller.
    fn settle<Q: Query>(
        &self,
        variables: &Q::Variables,
        outcome: ClientResult<Fetched<Q::Data>>,
        cached: Option<Q::Data>,
    ) -> QueryResult<Q::Data> {
        match outcome {
            Ok((data, partial)) => {
                self.inner.demo_mode.store(false, Ordering::Relaxed);
                QueryResult::network(data, partial)
            }
            Err(err) => match cached {
                Some(data) => {
                    warn!("{} failed, keeping cached data: {}", Q::NAME, err);
                    QueryResult::stale(data, err)
                }
                None => {
                    warn!("{} failed, serving mock data: {}", Q::NAME, err);
                    self.inner.demo_mode.store(true, Ordering::Relaxed);
                    QueryResult::mock(Q::mock(variables))
                }
            },
        }
    }

    // ── Writes ───────────────────────────────────────────────────

    /// Runs a write once. Failures are returned as they are; there is no
    /// fallback. Entities in a successful payload are merged into the cache.
    pub async fn mutate<M: Mutation>(&self, variables: &M::Variables) -> ClientResult<M::Data> {
        let args = encode_variables(M::NAME, variables)?;
        let operation = Operation::new(M::NAME, M::DOCUMENT, args);
        let response = self.inner.link.execute(&operation).await?;

        if response.has_errors() {
            return Err(graphql_error(M::NAME, &response));
        }
        let raw = root_value(M::NAME, M::ROOT_FIELD, &response)?;
        let data: M::Data = decode(M::NAME, raw, &response)?;

        self.inner.cache.write_entities(raw);
        Ok(data)
    }

    /// A reusable handle for one write, with completion callbacks and state.
    pub fn mutation<M: Mutation>(&self, options: MutationOptions<M::Data>) -> MutationHandle<M> {
        MutationHandle::new(self.clone(), options)
    }
}

async fn wait_for_poll(interval: Option<Duration>) {
    match interval {
        Some(interval) => tokio::time::sleep(interval).await,
        None => std::future::pending::<()>().await,
    }
}

fn graphql_error(operation: &str, response: &GraphQlResponse) -> ClientError {
    ClientError::Link(LinkError::GraphQl {
        operation: operation.to_string(),
        errors: response.errors.clone(),
    })
}

/// The non-null value of the operation's root field.
fn root_value<'a>(
    operation: &str,
    field: &str,
    response: &'a GraphQlResponse,
) -> ClientResult<&'a Value> {
    match response.usable_data().and_then(|data| data.get(field)) {
        Some(value) if !value.is_null() => Ok(value),
        _ if response.has_errors() => Err(graphql_error(operation, response)),
        _ => Err(ClientError::MissingData(operation.to_string())),
    }
}

fn decode<T: DeserializeOwned>(
    operation: &str,
    raw: &Value,
    response: &GraphQlResponse,
) -> ClientResult<T> {
    serde_json::from_value(raw.clone()).map_err(|e| {
        if response.has_errors() {
            graphql_error(operation, response)
        } else {
            ClientError::Decode {
                operation: operation.to_string(),
                message: e.to_string(),
            }
        }
    })
}
