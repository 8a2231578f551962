//! MCP (Model Context Protocol) route handlers
//!
//! Implements the Model Context Protocol surface of the weather widget
//! server. `handle_tool_call` is exported publicly to make it accessible
//! for tests.

use super::{helpers::*, models::*};
use crate::weather::{helpers::*, models::*, state::*};
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::{json, Value};
use tracing::{info, warn};

/// Creates routes for MCP-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", post(handle_mcp).get(handle_mcp_sse))
        .route("/mcp", post(handle_mcp).get(handle_mcp_sse)) // Standard endpoint
        .route("/mcp/", post(handle_mcp).get(handle_mcp_sse)) // Trailing slash safety
}

/// Handle SSE (Server-Sent Events) handshake for GET requests
async fn handle_mcp_sse() -> impl IntoResponse {
    (
        [("content-type", "text/event-stream")],
        "event: endpoint\ndata: /mcp\n\n",
    )
}

/// Endpoint: POST /mcp
/// Handles the Model Context Protocol communication for POST requests.
async fn handle_mcp(
    State(state): State<SharedState>,
    body: Result<Json<JsonRpcRequest>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    // Parse JSON-RPC Request (POST)
    let req = match body {
        Ok(Json(r)) => r,
        Err(e) => {
            warn!(error = %e.body_text(), "JSON parse error");
            return (
                StatusCode::BAD_REQUEST,
                Json(rpc_error(Value::Null, -32700, "Parse error")),
            )
                .into_response();
        }
    };

    let id = req.id.unwrap_or(Value::Null);
    let method_name = req.method.as_str();
    let params = req.params.unwrap_or(Value::Null);

    info!(method = method_name, id = ?id, "MCP call");

    // Dispatch Method
    let response_body = match method_name {
        "initialize" => rpc_success(id, handle_initialize()),
        "notifications/initialized" => rpc_success(id, json!({})),
        "tools/list" => rpc_success(id, handle_tools_list()),
        "resources/list" => rpc_success(id, handle_resources_list()),
        "resources/read" => {
            let uri = params
                .get("uri")
                .and_then(|u| u.as_str())
                .unwrap_or(WEATHER_WIDGET_URI);
            match handle_resources_read(&state, uri).await {
                Ok(result) => rpc_success(id, result),
                Err(msg) => rpc_error(id, -32602, msg),
            }
        }
        "tools/call" => {
            let tool_name = params.get("name").and_then(|n| n.as_str()).unwrap_or("");
            let args = params.get("arguments").cloned().unwrap_or(Value::Null);

            match handle_tool_call(&state, tool_name, args) {
                Ok(result) => rpc_success(id, result),
                Err(msg) => rpc_error(id, -32602, msg), // Invalid params or internal error
            }
        }
        "ping" => rpc_success(id, json!({})), // Optional but good for health checks
        _ => {
            warn!(method = method_name, "unknown method");
            rpc_error(id, -32601, "Method not found")
        }
    };

    Json(response_body).into_response()
}

// =============================================================================
// MCP Method Handlers
// =============================================================================

/// Handles `initialize` request (Handshake).
fn handle_initialize() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": true },
            "resources": { "listChanged": true, "subscribe": true }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": "0.1.0"
        }
    })
}

/// Handles `tools/list` request.
fn handle_tools_list() -> Value {
    json!({
        "tools": [
            {
                "name": WEATHER_TOOL_NAME,
                "title": "Get weather",
                "description": "Returns the current weather report for a city, rendered in the weather widget.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "city": { "type": "string" }
                    },
                    "required": ["city"],
                    "additionalProperties": false
                },
                "_meta": widget_meta(WEATHER_WIDGET_URI, None)
            },
            {
                "name": DASHBOARD_TOOL_NAME,
                "title": "Show dashboard",
                "description": "Opens the hosted weather dashboard widget.",
                "inputSchema": {
                    "type": "object",
                    "properties": {},
                    "additionalProperties": false
                },
                "_meta": widget_meta(DASHBOARD_WIDGET_URI, None)
            }
        ]
    })
}

/// Handles `resources/list` request.
///
/// Three widget flavors: static HTML from assets, an inline DOM-script
/// document, and an external-URL embed.
fn handle_resources_list() -> Value {
    json!({
        "resources": [
            {
                "name": "Weather report",
                "uri": WEATHER_WIDGET_URI,
                "mimeType": WIDGET_MIME_TYPE,
                "_meta": widget_meta(WEATHER_WIDGET_URI, None)
            },
            {
                "name": "Weather board",
                "uri": BOARD_WIDGET_URI,
                "mimeType": WIDGET_MIME_TYPE,
                "_meta": widget_meta(BOARD_WIDGET_URI, None)
            },
            {
                "name": "Weather dashboard",
                "uri": DASHBOARD_WIDGET_URI,
                "mimeType": WIDGET_MIME_TYPE,
                "_meta": widget_meta(DASHBOARD_WIDGET_URI, None)
            }
        ]
    })
}

/// Handles `resources/read` request for one widget URI.
async fn handle_resources_read(state: &AppState, uri: &str) -> Result<Value, String> {
    let html = match uri {
        WEATHER_WIDGET_URI => state.load_widget_html().await.unwrap_or_default(),
        BOARD_WIDGET_URI => board_widget_html(),
        DASHBOARD_WIDGET_URI => dashboard_widget_html(),
        other => return Err(format!("Unknown resource: {}", other)),
    };

    Ok(json!({
        "contents": [{
            "uri": uri,
            "mimeType": WIDGET_MIME_TYPE,
            "text": html,
            "_meta": widget_meta(uri, None)
        }]
    }))
}

/// Handles `tools/call` request (Business Logic).
pub fn handle_tool_call(state: &AppState, name: &str, args: Value) -> Result<Value, String> {
    match name {
        WEATHER_TOOL_NAME => handle_get_weather_tool(state, args),
        DASHBOARD_TOOL_NAME => handle_show_dashboard_tool(args),
        _ => Err(format!("Unknown tool: {}", name)),
    }
}

/// Handles the get_weather tool functionality
fn handle_get_weather_tool(state: &AppState, args: Value) -> Result<Value, String> {
    let input: GetWeatherInput =
        serde_json::from_value(args).map_err(|e| format!("Invalid arguments: {}", e))?;

    if input.city.trim().is_empty() {
        return Err("Invalid arguments: city must not be empty".to_string());
    }

    let key = normalize_city(&input.city);

    // Reuse a cached report so repeat calls for the same city agree
    let report = state
        .reports
        .entry(key.clone())
        .or_insert_with(|| synthesize_report(&input.city))
        .clone();

    let message = format!("Weather for {}", format_report(&report));

    Ok(json!({
        "content": [{ "type": "text", "text": message }],
        "structuredContent": {
            "city": report.city,
            "temperature": report.temperature,
            "weather": report.weather
        },
        "_meta": widget_meta(WEATHER_WIDGET_URI, Some(&key))
    }))
}

/// Handles the show_dashboard tool functionality
fn handle_show_dashboard_tool(args: Value) -> Result<Value, String> {
    // No required arguments; reject anything that is not an object or null.
    if !(args.is_null() || args.is_object()) {
        return Err("Invalid arguments: expected an object".to_string());
    }

    Ok(json!({
        "content": [{ "type": "text", "text": "Opening the weather dashboard." }],
        "structuredContent": {
            "url": DASHBOARD_URL
        },
        "_meta": widget_meta(DASHBOARD_WIDGET_URI, None)
    }))
}
