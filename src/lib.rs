//! Widget Bridge Library
//!
//! This library provides the widget context bridge — a reactive view over
//! host-injected widget context plus an action surface back to the host —
//! together with an example MCP widget server that registers the widget UI
//! resources the bridge is consumed from.

// Core bridge
pub mod bridge;

// Example server
pub mod mcp;
pub mod weather;

// Infrastructure
pub mod router;
