//! Weather Domain Models
//!
//! Data structures for the weather example widgets and the widget-state
//! persistence endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A weather report for a single city, rendered by the weather widget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherReport {
    /// City the report is for
    pub city: String,

    /// Temperature in degrees Celsius
    pub temperature: i64,

    /// One-word condition, e.g. "sunny"
    pub weather: String,
}

/// Input for the get_weather tool
#[derive(Debug, Deserialize)]
pub struct GetWeatherInput {
    /// City to report on
    pub city: String,
}

/// Input for the widget-state sync endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStateInput {
    /// Opaque widget state blob to persist
    pub state: Value,

    /// Optional session identifier
    pub session_id: Option<String>,
}

/// Input for the widget-state clear endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearStateInput {
    /// Optional session identifier
    pub session_id: Option<String>,
}

/// Response for widget-state operations
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSyncResponse {
    /// Status of the operation
    pub status: String,

    /// Session identifier the state is keyed under
    pub session_id: String,
}
