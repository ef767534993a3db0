mod common;

use bci_client::queries::GetMemoryStats;
use bci_client::{
    mocks, DataSource, DatabaseNodesVariables, FetchPolicy, QueryOptions, SearchMemoriesVariables,
    SystemLogsVariables, TasksVariables,
};
use common::{client_for, live_health, live_memory_stats, task, Recorder};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn failing_server(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

// ── Mock fallback ───────────────────────────────────────────────

#[tokio::test]
async fn memory_stats_falls_back_to_mock_after_three_503s() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.memory_stats().await;

    assert!(!result.loading);
    assert!(result.error.is_none());
    assert_eq!(result.source, DataSource::Mock);

    let stats = result.data.unwrap();
    assert_eq!(stats.qdrant_vectors, 1247);
    assert_eq!(stats.neo4j_nodes, 523);
    assert_eq!(stats.relations, 834);
    assert_eq!(stats.cache.hits, 1245);
    assert_eq!(stats.cache.misses, 89);
    assert_eq!(stats.cache.size, 1334);
    assert_eq!(stats.cache.hit_rate, 0.933);
    assert_eq!(stats.status, "healthy");
    assert_eq!(stats, mocks::memory_stats());
}

#[tokio::test]
async fn every_read_resolves_to_its_mock_when_transport_fails() {
    let server = failing_server(500).await;
    let client = client_for(&server);

    let schema = client.database_schema().await;
    assert_eq!(schema.data, Some(mocks::database_schema()));
    assert!(schema.error.is_none() && !schema.loading);

    let nodes = client
        .database_nodes(&DatabaseNodesVariables::label("Memory"))
        .await;
    assert_eq!(nodes.data, Some(mocks::database_nodes("Memory")));

    let health = client.health_check().await;
    assert_eq!(health.data, Some(mocks::health_check()));
    assert!(health.error.is_none());

    let memories = client
        .search_memories(&SearchMemoriesVariables::new("graphql"))
        .await;
    assert_eq!(memories.data, Some(Vec::new()));

    let tasks = client.tasks(&TasksVariables::default()).await;
    assert_eq!(tasks.data, Some(Vec::new()));

    let stats = client.task_stats().await;
    assert_eq!(stats.data, Some(mocks::task_stats()));

    let logs = client.system_logs(&SystemLogsVariables::default()).await;
    let logs = logs.data.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].level, "INFO");
    assert_eq!(logs[0].message, "Mock data - Backend offline");
    assert_eq!(logs[0].service.as_deref(), Some("system"));

    let metrics = client.metrics().await;
    assert_eq!(metrics.data, Some(mocks::metrics()));
    assert!(metrics.error.is_none());
}

#[tokio::test]
async fn health_mock_reports_every_service_unknown() {
    let server = failing_server(502).await;
    let health = client_for(&server).health_check().await.data.unwrap();

    assert_eq!(health.overall_status, "unknown");
    for (name, service) in health.services() {
        assert_eq!(service.status, "unknown", "{name}");
        assert_eq!(service.message.as_deref(), Some(mocks::BACKEND_UNREACHABLE));
        assert_eq!(service.response_time_ms, None);
    }
}

#[tokio::test]
async fn node_mock_depends_on_label() {
    let server = failing_server(500).await;
    let client = client_for(&server);

    let memory = client
        .parsed_database_nodes(&DatabaseNodesVariables::label("Memory"))
        .await
        .data
        .unwrap();
    assert_eq!(memory.len(), 2);
    assert_eq!(memory[0]["_id"], "mem_1");
    assert_eq!(memory[1]["type"], "solution");
    assert_eq!(memory[1]["_labels"], json!(["Memory"]));

    let tasks = client
        .database_nodes(&DatabaseNodesVariables::label("Task"))
        .await;
    assert_eq!(tasks.data, Some(Vec::new()));
    assert!(tasks.is_mock());
}

#[tokio::test]
async fn application_error_without_data_falls_back_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"memoryStats": null},
            "errors": [{"message": "Neo4j unavailable", "path": ["memoryStats"]}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).memory_stats().await;

    assert!(result.is_mock());
    assert!(result.error.is_none());
}

// ── Live results ────────────────────────────────────────────────

#[tokio::test]
async fn live_result_passes_through_unmodified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"variables": {}})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"memoryStats": live_memory_stats()}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.memory_stats().await;

    assert_eq!(result.source, DataSource::Network);
    assert!(!result.loading);
    assert!(result.error.is_none());
    let stats = result.data.unwrap();
    assert_eq!(stats.qdrant_vectors, 10);
    assert_eq!(stats.cache.hit_rate, 0.8);
    assert!(!client.is_demo_mode());
}

#[tokio::test]
async fn partial_data_is_delivered_with_the_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"tasks": [task("t1", "pending", &[])]},
            "errors": [{"message": "dueDate resolver failed", "path": ["tasks", 0, "dueDate"]}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).tasks(&TasksVariables::default()).await;

    assert_eq!(result.source, DataSource::Network);
    assert_eq!(result.data.unwrap()[0].id, "t1");
    let error = result.error.unwrap();
    assert!(error.is_graphql());
    assert!(error.to_string().contains("dueDate resolver failed"));
}

#[tokio::test]
async fn demo_mode_follows_the_latest_read() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(3)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"healthCheck": live_health()}})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(!client.is_demo_mode());

    assert!(client.health_check().await.is_mock());
    assert!(client.is_demo_mode());

    let live = client.health_check().await;
    assert_eq!(live.source, DataSource::Network);
    assert_eq!(live.data.unwrap().overall_status, "healthy");
    assert!(!client.is_demo_mode());
}

#[tokio::test]
async fn empty_label_skips_the_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .database_nodes(&DatabaseNodesVariables::label(""))
        .await;

    assert_eq!(result.source, DataSource::Skipped);
    assert!(result.data.is_none());
    assert!(!result.loading);
}

#[tokio::test]
async fn node_variables_are_sent_without_unset_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"variables": {"label": "Memory", "limit": 25}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"databaseNodes": [{"properties": "{\"_id\":\"n1\"}"}, {"properties": "not json"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let parsed = client_for(&server)
        .parsed_database_nodes(&DatabaseNodesVariables::label("Memory").with_limit(25))
        .await
        .data
        .unwrap();

    assert_eq!(parsed[0]["_id"], "n1");
    assert!(parsed[1].is_empty());

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body["variables"].get("offset").is_none());
}

// ── Fetch policies ──────────────────────────────────────────────

#[tokio::test]
async fn network_only_reads_ignore_the_cache() {
    let server = MockServer::start().await;
    let mut first = live_health();
    first["overallStatus"] = json!("degraded");
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"healthCheck": first}})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"healthCheck": live_health()}})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.health_check().await.data.unwrap().overall_status, "degraded");

    let second = client.health_check().await;
    assert_eq!(second.source, DataSource::Network);
    assert_eq!(second.data.unwrap().overall_status, "healthy");
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn cache_and_network_serves_cache_and_refreshes_in_background() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"memoryStats": live_memory_stats()}})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.memory_stats().await.source, DataSource::Network);

    let cached = client.memory_stats().await;
    assert_eq!(cached.source, DataSource::Cache);
    assert!(cached.loading);
    assert_eq!(cached.data.unwrap().qdrant_vectors, 10);

    for _ in 0..100 {
        if server.received_requests().await.unwrap().len() == 2 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("background refresh never reached the server");
}

#[tokio::test]
async fn cache_first_hit_does_not_touch_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"memoryStats": live_memory_stats()}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.memory_stats().await;

    let options = QueryOptions::new().fetch_policy(FetchPolicy::CacheFirst);
    let hit = client
        .query_with::<GetMemoryStats>(&Default::default(), options)
        .await;

    assert_eq!(hit.source, DataSource::Cache);
    assert!(!hit.loading);
}

// ── Network-error events ────────────────────────────────────────

#[tokio::test]
async fn failed_read_emits_one_event_even_though_caller_sees_mock() {
    let server = failing_server(503).await;
    let client = client_for(&server);
    let recorder = Arc::new(Recorder::default());
    client.subscribe_network_errors(recorder.clone());

    let result = client.metrics().await;

    assert!(result.is_mock());
    let events = recorder.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].operation, "GetMetrics");
    assert_eq!(events[0].status, Some(503));
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn refused_connection_falls_back_and_emits() {
    // Bind then drop a listener so the port refuses connections.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = bci_client::BciClient::new(
        bci_client::ClientConfig::new(format!("http://127.0.0.1:{port}/graphql"))
            .with_retry(common::fast_retry()),
    )
    .unwrap();
    let recorder = Arc::new(Recorder::default());
    client.subscribe_network_errors(recorder.clone());

    let result = client.task_stats().await;

    assert_eq!(result.data, Some(mocks::task_stats()));
    assert_eq!(recorder.events().len(), 1);
    assert_eq!(recorder.events()[0].operation, "GetTaskStats");
    assert_eq!(recorder.events()[0].status, None);
}
