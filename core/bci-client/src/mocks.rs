//! Deterministic fallback values for every read.
//!
//! Served when a read fails and nothing is cached, so the dashboard shows
//! representative placeholders instead of an error. Timestamps are fixed.

use bci_types::{
    CacheStats, DatabaseNode, DatabaseSchema, HealthCheck, LabelCount, Memory, MemoryStats,
    Metrics, RelationshipType, ServiceHealth, SystemLog, Task, TaskStats,
};
use serde_json::json;

/// Timestamp stamped on synthetic health and log entries.
pub const MOCK_TIMESTAMP: &str = "2024-01-01T00:00:00Z";

/// Message attached to every service in the fallback health report.
pub const BACKEND_UNREACHABLE: &str = "Unable to connect to backend";

pub fn database_schema() -> DatabaseSchema {
    DatabaseSchema {
        success: true,
        labels: vec![
            LabelCount::new("Memory", 270),
            LabelCount::new("Task", 42),
            LabelCount::new("User", 5),
            LabelCount::new("Project", 8),
        ],
        relationship_types: ["RELATES_TO", "DEPENDS_ON", "USES"]
            .into_iter()
            .map(|name| RelationshipType {
                name: name.to_string(),
            })
            .collect(),
    }
}

/// Two sample memory nodes for the `Memory` label, nothing for any other.
pub fn database_nodes(label: &str) -> Vec<DatabaseNode> {
    if label != "Memory" {
        return Vec::new();
    }
    [
        json!({
            "_id": "mem_1",
            "content": "Architecture microservices du système BCI",
            "type": "context",
            "status": "active",
            "project": "BCI",
            "created_at": "2023-12-31T00:00:00Z",
            "_labels": ["Memory"],
        }),
        json!({
            "_id": "mem_2",
            "content": "Intégration GraphQL avec FastAPI",
            "type": "solution",
            "status": "active",
            "project": "BCI",
            "created_at": "2023-12-30T00:00:00Z",
            "_labels": ["Memory"],
        }),
    ]
    .iter()
    .map(DatabaseNode::from_properties)
    .collect()
}

pub fn health_check() -> HealthCheck {
    let unknown = || ServiceHealth::unknown(BACKEND_UNREACHABLE, MOCK_TIMESTAMP);
    HealthCheck {
        overall_status: "unknown".to_string(),
        neo4j: unknown(),
        qdrant: unknown(),
        postgres: unknown(),
        redis: unknown(),
    }
}

pub fn memory_stats() -> MemoryStats {
    MemoryStats {
        success: true,
        qdrant_vectors: 1247,
        neo4j_nodes: 523,
        relations: 834,
        cache: CacheStats {
            hits: 1245,
            misses: 89,
            size: 1334,
            hit_rate: 0.933,
        },
        status: "healthy".to_string(),
    }
}

pub fn memories() -> Vec<Memory> {
    Vec::new()
}

pub fn tasks() -> Vec<Task> {
    Vec::new()
}

pub fn task_stats() -> TaskStats {
    TaskStats::empty()
}

pub fn system_logs() -> Vec<SystemLog> {
    vec![SystemLog {
        timestamp: MOCK_TIMESTAMP.to_string(),
        level: "INFO".to_string(),
        message: "Mock data - Backend offline".to_string(),
        service: Some("system".to_string()),
        details: None,
    }]
}

pub fn metrics() -> Metrics {
    Metrics {
        total_requests: 0,
        error_count: 0,
        error_rate: 0.0,
        avg_response_time_ms: 0.0,
        last_error: None,
        last_error_time: None,
        uptime_seconds: 0.0,
    }
}
