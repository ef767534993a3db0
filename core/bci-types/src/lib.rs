//! Typed shapes for the BCI dashboard GraphQL API.
//!
//! This crate defines the client-side view of the remote schema:
//! - Result types for every read operation (schema, nodes, health, stats, ...)
//! - Input and payload types for every write operation
//! - Request identifiers used to correlate retries and log lines
//!
//! Field names follow the wire format (camelCase) through serde renames, so
//! the same type decodes a live response and serializes a mock fallback.
//! The backend owns the authoritative records; nothing here is persisted.

mod database;
mod health;
mod ids;
mod memory;
mod system;
mod task;

pub use database::{
    parse_node_properties, CreateNodeInput, CreateNodePayload, CreateRelationshipInput,
    CreateRelationshipPayload, CypherPayload, DatabaseNode, DatabaseSchema, DeleteNodePayload,
    LabelCount, RelationshipType, UpdateNodePayload,
};
pub use health::{HealthCheck, ServiceHealth};
pub use ids::RequestId;
pub use memory::{CacheStats, Memory, MemoryInput, MemoryRelation, MemoryStats, StoreMemoryPayload};
pub use system::{Metrics, SystemLog};
pub use task::{
    CreateTaskInput, PomodoroSession, StartPomodoroInput, StartPomodoroPayload, Task,
    TaskMutationPayload, TaskStats, UpdateTaskInput,
};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
