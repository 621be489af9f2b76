//! Monitor response types.

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Whether the server can reach its stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[derive(AsRefStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ServiceStatus {
    Healthy,
    Unhealthy,
}

/// System monitoring status response.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MonitorStatus {
    /// Timestamp when this status was generated.
    pub checked_at: Timestamp,
    /// Overall system health status.
    pub status: ServiceStatus,
    /// Application version.
    pub version: String,
    /// Number of recorded documents, when the metadata store answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<i64>,
}

impl MonitorStatus {
    /// Creates a status stamped with the current time.
    pub fn new(status: ServiceStatus, documents: Option<i64>) -> Self {
        Self {
            checked_at: Timestamp::now(),
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            documents,
        }
    }
}
