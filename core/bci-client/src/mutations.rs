//! Write operations of the dashboard API.

use crate::operation::{InputVariables, Mutation};
use bci_types::{
    CreateNodeInput, CreateNodePayload, CreateRelationshipInput, CreateRelationshipPayload,
    CreateTaskInput, CypherPayload, DeleteNodePayload, MemoryInput, StartPomodoroInput,
    StartPomodoroPayload, StoreMemoryPayload, TaskMutationPayload, UpdateNodePayload,
    UpdateTaskInput,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Graph database ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNodeVariables {
    pub node_id: String,
    /// JSON-encoded property map.
    pub properties: String,
}

impl UpdateNodeVariables {
    pub fn new(node_id: impl Into<String>, properties: &Value) -> Self {
        Self {
            node_id: node_id.into(),
            properties: properties.to_string(),
        }
    }
}

pub struct UpdateNode;

impl Mutation for UpdateNode {
    const NAME: &'static str = "UpdateNode";
    const ROOT_FIELD: &'static str = "updateNode";
    const DOCUMENT: &'static str = r#"mutation UpdateNode($nodeId: String!, $properties: String!) {
  updateNode(nodeId: $nodeId, properties: $properties) {
    success
    data
    message
  }
}"#;

    type Variables = UpdateNodeVariables;
    type Data = UpdateNodePayload;
}

pub struct CreateNode;

impl Mutation for CreateNode {
    const NAME: &'static str = "CreateNode";
    const ROOT_FIELD: &'static str = "createNode";
    const DOCUMENT: &'static str = r#"mutation CreateNode($input: CreateNodeInput!) {
  createNode(input: $input) {
    success
    nodeId
    message
  }
}"#;

    type Variables = InputVariables<CreateNodeInput>;
    type Data = CreateNodePayload;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteNodeVariables {
    pub node_id: String,
}

pub struct DeleteNode;

impl Mutation for DeleteNode {
    const NAME: &'static str = "DeleteNode";
    const ROOT_FIELD: &'static str = "deleteNode";
    const DOCUMENT: &'static str = r#"mutation DeleteNode($nodeId: String!) {
  deleteNode(nodeId: $nodeId) {
    success
    count
    message
  }
}"#;

    type Variables = DeleteNodeVariables;
    type Data = DeleteNodePayload;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CypherVariables {
    pub cypher: String,
    /// JSON-encoded parameter map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<String>,
}

impl CypherVariables {
    pub fn new(cypher: impl Into<String>) -> Self {
        Self {
            cypher: cypher.into(),
            parameters: None,
        }
    }

    pub fn with_parameters(mut self, parameters: &Value) -> Self {
        self.parameters = Some(parameters.to_string());
        self
    }
}

/// Runs an ad-hoc Cypher statement through `databaseQuery`.
pub struct ExecuteCypher;

impl Mutation for ExecuteCypher {
    const NAME: &'static str = "ExecuteCypher";
    const ROOT_FIELD: &'static str = "databaseQuery";
    const DOCUMENT: &'static str = r#"mutation ExecuteCypher($cypher: String!, $parameters: String) {
  databaseQuery(cypher: $cypher, parameters: $parameters) {
    success
    data
    count
    message
  }
}"#;

    type Variables = CypherVariables;
    type Data = CypherPayload;
}

pub struct CreateRelationship;

impl Mutation for CreateRelationship {
    const NAME: &'static str = "CreateRelationship";
    const ROOT_FIELD: &'static str = "createRelationship";
    const DOCUMENT: &'static str = r#"mutation CreateRelationship($input: CreateRelationshipInput!) {
  createRelationship(input: $input) {
    success
    relationshipId
    message
  }
}"#;

    type Variables = InputVariables<CreateRelationshipInput>;
    type Data = CreateRelationshipPayload;
}

// ── Memories ────────────────────────────────────────────────────

pub struct StoreMemory;

impl Mutation for StoreMemory {
    const NAME: &'static str = "StoreMemory";
    const ROOT_FIELD: &'static str = "storeMemory";
    const DOCUMENT: &'static str = r#"mutation StoreMemory($input: MemoryInput!) {
  storeMemory(input: $input) {
    success
    memoryId
    message
    relationsCreated
    autoExtracted
  }
}"#;

    type Variables = InputVariables<MemoryInput>;
    type Data = StoreMemoryPayload;
}

// ── Tasks ───────────────────────────────────────────────────────

pub struct CreateTask;

impl Mutation for CreateTask {
    const NAME: &'static str = "CreateTask";
    const ROOT_FIELD: &'static str = "createTask";
    const DOCUMENT: &'static str = r#"mutation CreateTask($input: CreateTaskInput!) {
  createTask(input: $input) {
    success
    task {
      __typename
      id
      title
      description
      type
      priority
      status
      assignedTo
      createdAt
      tags
    }
    message
  }
}"#;

    type Variables = InputVariables<CreateTaskInput>;
    type Data = TaskMutationPayload;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskVariables {
    pub task_id: String,
    pub input: UpdateTaskInput,
}

impl UpdateTaskVariables {
    pub fn new(task_id: impl Into<String>, input: UpdateTaskInput) -> Self {
        Self {
            task_id: task_id.into(),
            input,
        }
    }
}

pub struct UpdateTask;

impl Mutation for UpdateTask {
    const NAME: &'static str = "UpdateTask";
    const ROOT_FIELD: &'static str = "updateTask";
    const DOCUMENT: &'static str = r#"mutation UpdateTask($taskId: String!, $input: UpdateTaskInput!) {
  updateTask(taskId: $taskId, input: $input) {
    success
    task {
      __typename
      id
      title
      description
      priority
      status
      updatedAt
    }
    message
  }
}"#;

    type Variables = UpdateTaskVariables;
    type Data = TaskMutationPayload;
}

/// Starts a focus-timer session on a task.
pub struct StartPomodoro;

impl Mutation for StartPomodoro {
    const NAME: &'static str = "StartPomodoro";
    const ROOT_FIELD: &'static str = "startPomodoro";
    const DOCUMENT: &'static str = r#"mutation StartPomodoro($input: StartPomodoroInput!) {
  startPomodoro(input: $input) {
    success
    session {
      id
      taskId
      durationMinutes
      startedAt
      status
    }
    message
  }
}"#;

    type Variables = InputVariables<StartPomodoroInput>;
    type Data = StartPomodoroPayload;
}
