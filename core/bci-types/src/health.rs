//! Backend health report.

use serde::{Deserialize, Serialize};

/// Aggregate health of the backend and each of its data services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheck {
    pub overall_status: String,
    pub neo4j: ServiceHealth,
    pub qdrant: ServiceHealth,
    pub postgres: ServiceHealth,
    pub redis: ServiceHealth,
}

impl HealthCheck {
    /// Returns the services as `(name, health)` pairs in a fixed order.
    pub fn services(&self) -> [(&'static str, &ServiceHealth); 4] {
        [
            ("neo4j", &self.neo4j),
            ("qdrant", &self.qdrant),
            ("postgres", &self.postgres),
            ("redis", &self.redis),
        ]
    }
}

/// Health of a single backend service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    pub status: String,
    pub message: Option<String>,
    pub response_time_ms: Option<f64>,
    pub last_checked: Option<String>,
}

impl ServiceHealth {
    /// A service whose state could not be determined.
    pub fn unknown(message: impl Into<String>, last_checked: impl Into<String>) -> Self {
        Self {
            status: "unknown".to_string(),
            message: Some(message.into()),
            response_time_ms: None,
            last_checked: Some(last_checked.into()),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
