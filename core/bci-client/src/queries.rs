//! Read operations of the dashboard API.

use crate::mocks;
use crate::operation::{NoVariables, Query};
use bci_cache::FetchPolicy;
use bci_types::{
    DatabaseNode, DatabaseSchema, HealthCheck, Memory, MemoryStats, Metrics, SystemLog, Task,
    TaskStats,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How often a watched health check refreshes.
pub const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(30);

// ── Graph database ──────────────────────────────────────────────

pub struct GetDatabaseSchema;

impl Query for GetDatabaseSchema {
    const NAME: &'static str = "GetDatabaseSchema";
    const ROOT_FIELD: &'static str = "databaseSchema";
    const DOCUMENT: &'static str = r#"query GetDatabaseSchema {
  databaseSchema {
    success
    labels {
      name
      count
    }
    relationshipTypes {
      name
    }
  }
}"#;
    const FETCH_POLICY: FetchPolicy = FetchPolicy::CacheAndNetwork;

    type Variables = NoVariables;
    type Data = DatabaseSchema;

    fn mock(_: &NoVariables) -> DatabaseSchema {
        mocks::database_schema()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseNodesVariables {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

impl DatabaseNodesVariables {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Raw nodes of one label. Skipped while the label is empty.
pub struct GetDatabaseNodes;

impl Query for GetDatabaseNodes {
    const NAME: &'static str = "GetDatabaseNodes";
    const ROOT_FIELD: &'static str = "databaseNodes";
    const DOCUMENT: &'static str = r#"query GetDatabaseNodes($label: String!, $limit: Int, $offset: Int) {
  databaseNodes(label: $label, limit: $limit, offset: $offset) {
    properties
  }
}"#;
    const FETCH_POLICY: FetchPolicy = FetchPolicy::CacheAndNetwork;

    type Variables = DatabaseNodesVariables;
    type Data = Vec<DatabaseNode>;

    fn mock(variables: &DatabaseNodesVariables) -> Vec<DatabaseNode> {
        mocks::database_nodes(&variables.label)
    }

    fn skip(variables: &DatabaseNodesVariables) -> bool {
        variables.label.is_empty()
    }
}

// ── Health ──────────────────────────────────────────────────────

pub struct GetHealthCheck;

impl Query for GetHealthCheck {
    const NAME: &'static str = "GetHealthCheck";
    const ROOT_FIELD: &'static str = "healthCheck";
    const DOCUMENT: &'static str = r#"query GetHealthCheck {
  healthCheck {
    overallStatus
    neo4j {
      status
      message
      responseTimeMs
      lastChecked
    }
    qdrant {
      status
      message
      responseTimeMs
      lastChecked
    }
    postgres {
      status
      message
      responseTimeMs
      lastChecked
    }
    redis {
      status
      message
      responseTimeMs
      lastChecked
    }
  }
}"#;
    const FETCH_POLICY: FetchPolicy = FetchPolicy::NetworkOnly;
    const POLL_INTERVAL: Option<Duration> = Some(HEALTH_POLL_INTERVAL);

    type Variables = NoVariables;
    type Data = HealthCheck;

    fn mock(_: &NoVariables) -> HealthCheck {
        mocks::health_check()
    }
}

// ── Memories ────────────────────────────────────────────────────

pub struct GetMemoryStats;

impl Query for GetMemoryStats {
    const NAME: &'static str = "GetMemoryStats";
    const ROOT_FIELD: &'static str = "memoryStats";
    const DOCUMENT: &'static str = r#"query GetMemoryStats {
  memoryStats {
    success
    qdrantVectors
    neo4jNodes
    relations
    cache {
      hits
      misses
      size
      hitRate
    }
    status
  }
}"#;
    const FETCH_POLICY: FetchPolicy = FetchPolicy::CacheAndNetwork;

    type Variables = NoVariables;
    type Data = MemoryStats;

    fn mock(_: &NoVariables) -> MemoryStats {
        mocks::memory_stats()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMemoriesVariables {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub memory_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_relations: Option<bool>,
}

impl SearchMemoriesVariables {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

/// Semantic search over stored memories.
pub struct SearchMemories;

impl Query for SearchMemories {
    const NAME: &'static str = "SearchMemories";
    const ROOT_FIELD: &'static str = "memories";
    const DOCUMENT: &'static str = r#"query SearchMemories($query: String!, $limit: Int, $type: String, $project: String, $includeRelations: Boolean) {
  memories(query: $query, limit: $limit, type: $type, project: $project, includeRelations: $includeRelations) {
    __typename
    id
    text
    type
    tags
    project
    score
    timestamp
    status
    relations {
      relationType
      text
      type
    }
  }
}"#;
    const FETCH_POLICY: FetchPolicy = FetchPolicy::CacheAndNetwork;

    type Variables = SearchMemoriesVariables;
    type Data = Vec<Memory>;

    fn mock(_: &SearchMemoriesVariables) -> Vec<Memory> {
        mocks::memories()
    }
}

// ── Tasks ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksVariables {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

pub struct GetTasks;

impl Query for GetTasks {
    const NAME: &'static str = "GetTasks";
    const ROOT_FIELD: &'static str = "tasks";
    const DOCUMENT: &'static str = r#"query GetTasks($status: String, $priority: String, $assignedTo: String, $limit: Int) {
  tasks(status: $status, priority: $priority, assignedTo: $assignedTo, limit: $limit) {
    __typename
    id
    title
    description
    type
    priority
    status
    assignedTo
    createdAt
    updatedAt
    dueDate
    completedAt
    tags
  }
}"#;
    const FETCH_POLICY: FetchPolicy = FetchPolicy::CacheAndNetwork;

    type Variables = TasksVariables;
    type Data = Vec<Task>;

    fn mock(_: &TasksVariables) -> Vec<Task> {
        mocks::tasks()
    }
}

pub struct GetTaskStats;

impl Query for GetTaskStats {
    const NAME: &'static str = "GetTaskStats";
    const ROOT_FIELD: &'static str = "taskStats";
    const DOCUMENT: &'static str = r#"query GetTaskStats {
  taskStats {
    success
    totalTasks
    pending
    inProgress
    completed
    cancelled
    completedToday
    totalPomodoros
  }
}"#;
    const FETCH_POLICY: FetchPolicy = FetchPolicy::CacheAndNetwork;

    type Variables = NoVariables;
    type Data = TaskStats;

    fn mock(_: &NoVariables) -> TaskStats {
        mocks::task_stats()
    }
}

// ── System ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemLogsVariables {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

pub struct GetSystemLogs;

impl Query for GetSystemLogs {
    const NAME: &'static str = "GetSystemLogs";
    const ROOT_FIELD: &'static str = "systemLogs";
    const DOCUMENT: &'static str = r#"query GetSystemLogs($limit: Int, $level: String, $service: String) {
  systemLogs(limit: $limit, level: $level, service: $service) {
    timestamp
    level
    message
    service
    details
  }
}"#;
    const FETCH_POLICY: FetchPolicy = FetchPolicy::NetworkOnly;

    type Variables = SystemLogsVariables;
    type Data = Vec<SystemLog>;

    fn mock(_: &SystemLogsVariables) -> Vec<SystemLog> {
        mocks::system_logs()
    }
}

pub struct GetMetrics;

impl Query for GetMetrics {
    const NAME: &'static str = "GetMetrics";
    const ROOT_FIELD: &'static str = "metrics";
    const DOCUMENT: &'static str = r#"query GetMetrics {
  metrics {
    totalRequests
    errorCount
    errorRate
    avgResponseTimeMs
    lastError
    lastErrorTime
    uptimeSeconds
  }
}"#;
    const FETCH_POLICY: FetchPolicy = FetchPolicy::CacheAndNetwork;

    type Variables = NoVariables;
    type Data = Metrics;

    fn mock(_: &NoVariables) -> Metrics {
        mocks::metrics()
    }
}
