//! Task tracker shapes: tasks, counters, and focus-timer sessions.

use serde::{Deserialize, Serialize};

/// A tracked task.
///
/// Mutation payloads select a subset of fields, so everything except the
/// identity and workflow fields is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub task_type: Option<String>,
    pub priority: String,
    pub status: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub success: bool,
    pub total_tasks: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub cancelled: i64,
    pub completed_today: i64,
    pub total_pomodoros: i64,
}

impl TaskStats {
    /// All counters at zero.
    pub fn empty() -> Self {
        Self {
            success: true,
            total_tasks: 0,
            pending: 0,
            in_progress: 0,
            completed: 0,
            cancelled: 0,
            completed_today: 0,
            total_pomodoros: 0,
        }
    }
}

/// A focus-timer (pomodoro) session attached to a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSession {
    pub id: String,
    pub task_id: String,
    pub duration_minutes: i64,
    pub started_at: String,
    pub status: String,
}

/// Input for `createTask`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskInput {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateTaskInput {
    /// A pending task with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            task_type: None,
            priority: None,
            status: Some("pending".to_string()),
            assigned_to: None,
            due_date: None,
            tags: Vec::new(),
        }
    }
}

/// Input for `updateTask`. Absent fields are left unchanged by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Input for `startPomodoro`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartPomodoroInput {
    pub task_id: String,
    pub duration_minutes: i64,
}

/// Payload shared by `createTask` and `updateTask`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskMutationPayload {
    pub success: bool,
    pub task: Option<Task>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartPomodoroPayload {
    pub success: bool,
    pub session: Option<PomodoroSession>,
    pub message: Option<String>,
}
