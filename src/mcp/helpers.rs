//! MCP Protocol Helpers
//!
//! Helper functions for JSON-RPC envelopes, widget metadata, and the inline
//! widget documents.

use serde_json::{json, Value};

use super::models::{BOARD_SCRIPT_URL, DASHBOARD_URL};

/// Constructs the metadata required by the widget system for one template.
///
/// # Arguments
///
/// * `template_uri` - URI of the widget document the tool renders into.
/// * `session_id` - Optional identifier to link tool calls to a specific widget session.
pub fn widget_meta(template_uri: &str, session_id: Option<&str>) -> Value {
    let mut meta = json!({
        "openai/outputTemplate": template_uri,
        "openai/toolInvocation/invoking": "Checking the weather",
        "openai/toolInvocation/invoked": "Weather ready",
        "openai/widgetAccessible": true,
    });

    if let Some(id) = session_id {
        meta["openai/widgetSessionId"] = json!(id);
    }

    meta
}

/// Inline document for the board widget: a root element plus a module script
/// loaded from the hosted bundle (the DOM-script resource flavor).
pub fn board_widget_html() -> String {
    format!(
        "<div id=\"weather-board-root\"></div>\n\
         <script type=\"module\" src=\"{BOARD_SCRIPT_URL}\"></script>\n"
    )
}

/// Wrapper document for the dashboard widget: an iframe pointing at the
/// externally hosted page (the external-URL resource flavor).
pub fn dashboard_widget_html() -> String {
    format!(
        "<iframe id=\"weather-dashboard\" src=\"{DASHBOARD_URL}\" \
         style=\"width:100%;height:100%;border:0\"></iframe>\n"
    )
}

/// Builds a JSON-RPC 2.0 success response.
///
/// # Arguments
///
/// * `id` – The request identifier that must be echoed back.
/// * `result` – The payload representing the successful outcome.
///
/// # Returns
///
/// A `serde_json::Value` shaped as a JSON-RPC success envelope.
pub fn rpc_success(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result,
    })
}

/// Builds a JSON-RPC 2.0 error response.
///
/// # Arguments
///
/// * `id` – The request identifier (or `null` if unavailable).
/// * `code` – The JSON-RPC error code (e.g., -32601 for method not found).
/// * `message` – Human-readable description of the error.
///
/// # Returns
///
/// A `serde_json::Value` shaped as a JSON-RPC error envelope.
pub fn rpc_error(id: Value, code: i32, message: impl Into<String>) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": code,
            "message": message.into(),
        }
    })
}
