//! Backend log lines and request metrics.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemLog {
    pub timestamp: String,
    pub level: String,
    pub message: String,
    pub service: Option<String>,
    pub details: Option<String>,
}

/// Request counters reported by the backend since it started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub total_requests: i64,
    pub error_count: i64,
    pub error_rate: f64,
    pub avg_response_time_ms: f64,
    pub last_error: Option<String>,
    pub last_error_time: Option<String>,
    pub uptime_seconds: f64,
}
