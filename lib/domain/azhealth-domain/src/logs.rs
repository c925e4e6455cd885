use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A diagnostic (activity) log event attached to a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub resource_id: String,
    /// Severity tag as reported by the provider, e.g. `Error` or `Warning`.
    pub level: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}
