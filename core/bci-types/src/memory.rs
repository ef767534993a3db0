//! Memory store shapes: statistics, semantic search hits, and writes.

use serde::{Deserialize, Serialize};

/// Counters for the vector store, graph store and the backend's read cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStats {
    pub success: bool,
    pub qdrant_vectors: i64,
    pub neo4j_nodes: i64,
    pub relations: i64,
    pub cache: CacheStats,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub hits: i64,
    pub misses: i64,
    pub size: i64,
    pub hit_rate: f64,
}

/// A memory returned by semantic search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub memory_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub project: Option<String>,
    pub score: Option<f64>,
    pub timestamp: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub relations: Vec<MemoryRelation>,
}

/// A memory linked to a search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryRelation {
    pub relation_type: String,
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub memory_type: Option<String>,
}

/// Input for `storeMemory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryInput {
    pub text: String,
    #[serde(rename = "type")]
    pub memory_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreMemoryPayload {
    pub success: bool,
    pub memory_id: Option<String>,
    pub message: Option<String>,
    pub relations_created: Option<i64>,
    pub auto_extracted: Option<bool>,
}
