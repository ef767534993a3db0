//! Shared test helpers for client tests.

#![allow(dead_code)]

use async_trait::async_trait;
use bci_client::{dashboard_cache_config, BciClient, ClientConfig};
use bci_link::link::mock::ScriptedLink;
use bci_link::{
    GraphQlResponse, Link, LinkError, LinkResult, NetworkErrorEvent, NetworkErrorNotifier,
    NetworkErrorObserver, Operation, RetryPolicy, TransportErrorKind,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::MockServer;

/// Retry policy with millisecond delays, for tests against a live mock server.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(5),
        max_attempts: 3,
        jitter: false,
    }
}

/// Full production pipeline against a wiremock server.
pub fn client_for(server: &MockServer) -> BciClient {
    let config = ClientConfig::new(format!("{}/graphql", server.uri())).with_retry(fast_retry());
    BciClient::new(config).unwrap()
}

/// Client over a scripted link, bypassing HTTP and retries.
pub fn scripted_client(script: &Arc<ScriptedLink>) -> BciClient {
    BciClient::with_link(
        Arc::clone(script),
        dashboard_cache_config(),
        Arc::new(NetworkErrorNotifier::new()),
    )
}

/// Client over a link that sleeps before each delegated call.
pub fn slow_client(script: &Arc<ScriptedLink>, delay: Duration) -> BciClient {
    BciClient::with_link(
        SlowLink {
            inner: Arc::clone(script),
            delay,
        },
        dashboard_cache_config(),
        Arc::new(NetworkErrorNotifier::new()),
    )
}

pub fn ok(data: Value) -> LinkResult<GraphQlResponse> {
    Ok(GraphQlResponse::from_data(data))
}

pub fn unavailable() -> LinkResult<GraphQlResponse> {
    Err(LinkError::transport(
        "scripted",
        TransportErrorKind::HttpServer(503),
        "HTTP error! status: 503 Service Unavailable",
    ))
}

pub fn live_memory_stats() -> Value {
    json!({
        "success": true,
        "qdrantVectors": 10,
        "neo4jNodes": 20,
        "relations": 30,
        "cache": {"hits": 4, "misses": 1, "size": 5, "hitRate": 0.8},
        "status": "healthy"
    })
}

pub fn live_health() -> Value {
    let service = json!({
        "status": "healthy",
        "message": null,
        "responseTimeMs": 3.5,
        "lastChecked": "2024-05-01T10:00:00Z"
    });
    json!({
        "overallStatus": "healthy",
        "neo4j": service,
        "qdrant": service,
        "postgres": service,
        "redis": service
    })
}

pub fn task(id: &str, status: &str, tags: &[&str]) -> Value {
    json!({
        "__typename": "Task",
        "id": id,
        "title": format!("Task {id}"),
        "description": null,
        "type": "feature",
        "priority": "medium",
        "status": status,
        "assignedTo": null,
        "createdAt": "2024-05-01T10:00:00Z",
        "updatedAt": null,
        "dueDate": null,
        "completedAt": null,
        "tags": tags
    })
}

/// Collects network-error events.
#[derive(Default)]
pub struct Recorder {
    events: Mutex<Vec<NetworkErrorEvent>>,
}

impl NetworkErrorObserver for Recorder {
    fn on_network_error(&self, event: &NetworkErrorEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

impl Recorder {
    pub fn events(&self) -> Vec<NetworkErrorEvent> {
        self.events.lock().unwrap().clone()
    }
}

struct SlowLink {
    inner: Arc<ScriptedLink>,
    delay: Duration,
}

#[async_trait]
impl Link for SlowLink {
    async fn execute(&self, operation: &Operation) -> LinkResult<GraphQlResponse> {
        tokio::time::sleep(self.delay).await;
        self.inner.execute(operation).await
    }
}
