//! Graph database shapes: schema summary, raw nodes, node/relationship writes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Summary of the labels and relationship types present in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseSchema {
    pub success: bool,
    pub labels: Vec<LabelCount>,
    pub relationship_types: Vec<RelationshipType>,
}

/// A node label and how many nodes carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub name: String,
    pub count: i64,
}

impl LabelCount {
    pub fn new(name: impl Into<String>, count: i64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// A relationship type name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipType {
    pub name: String,
}

/// A raw graph node as returned by `databaseNodes`.
///
/// The backend encodes every property map as a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseNode {
    pub properties: String,
}

impl DatabaseNode {
    /// Builds a node whose `properties` string encodes the given value.
    pub fn from_properties(properties: &Value) -> Self {
        Self {
            properties: properties.to_string(),
        }
    }

    /// Decodes the JSON-encoded property map.
    ///
    /// Malformed or non-object JSON yields an empty map.
    pub fn parse_properties(&self) -> Map<String, Value> {
        parse_node_properties(&self.properties)
    }
}

/// Decodes a JSON-encoded property map, returning an empty map on any
/// parse failure or when the JSON is not an object.
pub fn parse_node_properties(raw: &str) -> Map<String, Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Input for `createNode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateNodeInput {
    pub label: String,
    /// JSON-encoded property map.
    pub properties: String,
}

impl CreateNodeInput {
    pub fn new(label: impl Into<String>, properties: &Value) -> Self {
        Self {
            label: label.into(),
            properties: properties.to_string(),
        }
    }
}

/// Input for `createRelationship`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRelationshipInput {
    pub source_id: String,
    pub target_id: String,
    pub relationship_type: String,
    /// JSON-encoded property map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateNodePayload {
    pub success: bool,
    pub data: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNodePayload {
    pub success: bool,
    pub node_id: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteNodePayload {
    pub success: bool,
    pub count: Option<i64>,
    pub message: Option<String>,
}

/// Result of an ad-hoc Cypher statement (`databaseQuery`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CypherPayload {
    pub success: bool,
    /// JSON-encoded result rows.
    pub data: Option<String>,
    pub count: Option<i64>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRelationshipPayload {
    pub success: bool,
    pub relationship_id: Option<String>,
    pub message: Option<String>,
}
