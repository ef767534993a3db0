//! The operation envelope and GraphQL-over-HTTP wire types.

use bci_types::RequestId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One named GraphQL request with its bound variables.
///
/// An operation is created once per logical call; every retry of it reuses
/// the same instance, and therefore the same [`RequestId`].
#[derive(Debug, Clone)]
pub struct Operation {
    id: RequestId,
    name: String,
    document: String,
    variables: Value,
}

impl Operation {
    pub fn new(name: impl Into<String>, document: impl Into<String>, variables: Value) -> Self {
        Self {
            id: RequestId::new(),
            name: name.into(),
            document: document.into(),
            variables,
        }
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn variables(&self) -> &Value {
        &self.variables
    }

    /// The JSON body sent to the endpoint: `{query, variables}`.
    pub fn body(&self) -> RequestBody<'_> {
        RequestBody {
            query: &self.document,
            variables: &self.variables,
        }
    }
}

/// Serialized form of an operation on the wire.
#[derive(Debug, Serialize)]
pub struct RequestBody<'a> {
    pub query: &'a str,
    pub variables: &'a Value,
}

/// A GraphQL response: `{data?, errors?}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQlError>,
}

impl GraphQlResponse {
    /// A successful response carrying `data`.
    pub fn from_data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// A response carrying only application errors.
    pub fn from_errors(errors: Vec<GraphQlError>) -> Self {
        Self { data: None, errors }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the data unless it is absent or JSON `null`.
    pub fn usable_data(&self) -> Option<&Value> {
        self.data.as_ref().filter(|data| !data.is_null())
    }
}

/// One entry of a response's `errors` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<SourceLocation>>,
    /// Response path segments; field names are strings, list indices numbers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
}

impl GraphQlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: None,
            path: None,
        }
    }

    /// Renders the path as `a.b.0.c`, or an empty string if absent.
    pub fn path_display(&self) -> String {
        self.path
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|segment| match segment {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Renders the locations as `line:column` pairs.
    pub fn locations_display(&self) -> String {
        self.locations
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
