//! MCP Protocol Models and Constants
//!
//! Data structures and constants for the Model Context Protocol surface of
//! the weather widget server.

use serde::Deserialize;
use serde_json::Value;

// =============================================================================
// MCP Constants
// =============================================================================

/// Name of the weather report tool
pub const WEATHER_TOOL_NAME: &str = "get_weather";
/// Name of the dashboard tool
pub const DASHBOARD_TOOL_NAME: &str = "show_dashboard";
/// URI for the static weather widget (HTML served from assets/)
pub const WEATHER_WIDGET_URI: &str = "ui://widget/weather.html";
/// URI for the script-driven board widget (inline document + hosted JS)
pub const BOARD_WIDGET_URI: &str = "ui://widget/weather-board.html";
/// URI for the dashboard widget (external URL embed)
pub const DASHBOARD_WIDGET_URI: &str = "ui://widget/weather-dashboard.html";
/// External URL the dashboard widget embeds
pub const DASHBOARD_URL: &str = "https://weather-widgets.example.com/dashboard";
/// Hosted script the board widget loads
pub const BOARD_SCRIPT_URL: &str = "https://weather-widgets.example.com/board/widget.js";
/// MIME type for widget resources
pub const WIDGET_MIME_TYPE: &str = "text/html+skybridge";
/// Server identifier
pub const SERVER_NAME: &str = "widget-bridge-rust";
/// Protocol version for MCP
pub const PROTOCOL_VERSION: &str = "2024-11-05";

// =============================================================================
// MCP Protocol Models
// =============================================================================

/// Standard JSON-RPC 2.0 Request envelope
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version (should be "2.0")
    #[allow(dead_code)]
    pub jsonrpc: Option<String>,

    /// Method name to invoke
    pub method: String,

    /// Parameters for the method
    pub params: Option<Value>,

    /// Request identifier
    pub id: Option<Value>,
}
