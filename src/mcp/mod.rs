//! MCP Module
//!
//! Model Context Protocol surface for the weather widget server:
//! - Protocol constants and the JSON-RPC request envelope
//! - JSON-RPC envelope and widget metadata helpers
//! - Method dispatch and tool/resource handlers

pub mod handlers;
pub mod helpers;
pub mod models;

// Re-export the route constructor for the router module
pub use handlers::routes;
