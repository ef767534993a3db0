use bci_client::{BciClient, DataSource};
use bci_probe::{client_config, execute, Args, Command};
use clap::Parser;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> BciClient {
    let uri = server.uri();
    let args =
        Args::try_parse_from(["bci-probe", "--endpoint", &uri, "--no-retry", "health"]).unwrap();
    BciClient::new(client_config(&args).unwrap()).unwrap()
}

// ── Argument parsing ────────────────────────────────────────────

#[test]
fn parses_global_overrides() {
    let args = Args::try_parse_from([
        "bci-probe",
        "--endpoint",
        "http://localhost:9598/graphql",
        "--timeout-ms",
        "0",
        "--no-retry",
        "-v",
        "metrics",
    ])
    .unwrap();
    assert!(args.verbose);
    assert_eq!(args.command, Command::Metrics);

    let config = client_config(&args).unwrap();
    assert_eq!(config.endpoint, "http://localhost:9598/graphql");
    assert_eq!(config.timeout, None);
    assert_eq!(config.retry.max_attempts, 1);
}

#[test]
fn timeout_override_in_milliseconds() {
    let args = Args::try_parse_from(["bci-probe", "--timeout-ms", "1500", "health"]).unwrap();
    let config = client_config(&args).unwrap();
    assert_eq!(config.timeout, Some(Duration::from_millis(1500)));
}

#[test]
fn parses_write_subcommands() {
    let args = Args::try_parse_from([
        "bci-probe",
        "store-memory",
        "GraphQL with FastAPI",
        "--type",
        "solution",
        "--tags",
        "api,graphql",
    ])
    .unwrap();
    assert_eq!(
        args.command,
        Command::StoreMemory {
            text: "GraphQL with FastAPI".into(),
            memory_type: "solution".into(),
            tags: vec!["api".into(), "graphql".into()],
            project: None,
        }
    );

    let args = Args::try_parse_from(["bci-probe", "start-pomodoro", "t1"]).unwrap();
    assert_eq!(
        args.command,
        Command::StartPomodoro {
            task_id: "t1".into(),
            minutes: 25
        }
    );
}

#[test]
fn missing_subcommand_is_rejected() {
    assert!(Args::try_parse_from(["bci-probe"]).is_err());
}

// ── Reads ───────────────────────────────────────────────────────

#[tokio::test]
async fn live_read_is_reported_from_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"metrics": {
                "totalRequests": 10, "errorCount": 1, "errorRate": 0.1,
                "avgResponseTimeMs": 12.5, "lastError": null, "lastErrorTime": null,
                "uptimeSeconds": 60.0
            }}
        })))
        .mount(&server)
        .await;

    let report = execute(&client_for(&server), &Command::Metrics).await.unwrap();
    assert_eq!(report.operation, "GetMetrics");
    assert_eq!(report.source, Some(DataSource::Network));
    assert!(!report.demo_mode);
    assert_eq!(report.data["totalRequests"], 10);
}

#[tokio::test]
async fn failed_read_reports_mock_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let report = execute(&client_for(&server), &Command::MemoryStats)
        .await
        .unwrap();
    assert_eq!(report.source, Some(DataSource::Mock));
    assert!(report.demo_mode);
    assert!(report.error.is_none());
    assert_eq!(report.data["qdrantVectors"], 1247);
}

#[tokio::test]
async fn parsed_nodes_decode_properties() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"databaseNodes": [
                {"properties": "{\"_id\":\"mem_9\",\"content\":\"hello\"}"}
            ]}
        })))
        .mount(&server)
        .await;

    let command = Command::Nodes {
        label: "Memory".into(),
        limit: Some(10),
        offset: None,
        parsed: true,
    };
    let report = execute(&client_for(&server), &command).await.unwrap();
    assert_eq!(report.data, json!([{"_id": "mem_9", "content": "hello"}]));
}

// ── Writes ──────────────────────────────────────────────────────

#[tokio::test]
async fn successful_write_reports_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "variables": {"input": {"title": "Review PR", "priority": "high"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"createTask": {
                "success": true,
                "message": "created",
                "task": null
            }}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let command = Command::CreateTask {
        title: "Review PR".into(),
        description: None,
        priority: Some("high".into()),
        tags: vec![],
    };
    let report = execute(&client_for(&server), &command).await.unwrap();
    assert_eq!(report.operation, "CreateTask");
    assert_eq!(report.source, None);
    assert_eq!(report.data["success"], true);
}

#[tokio::test]
async fn failed_write_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let command = Command::DeleteNode {
        node_id: "n1".into(),
    };
    let err = execute(&client_for(&server), &command).await.unwrap_err();
    assert!(err.to_string().contains("deleteNode failed"));
}

#[tokio::test]
async fn malformed_json_argument_is_rejected_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let command = Command::UpdateNode {
        node_id: "n1".into(),
        properties: "{not json".into(),
    };
    let err = execute(&client_for(&server), &command).await.unwrap_err();
    assert!(err.to_string().contains("properties must be valid JSON"));
}
