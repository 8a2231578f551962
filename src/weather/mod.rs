//! Weather Example Domain Module
//!
//! Backend for the weather example widgets, including:
//! - Domain models (WeatherReport, inputs, responses)
//! - Deterministic report synthesis and session helpers
//! - Application state management
//! - REST API handlers for widget-state persistence

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod state;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use state::{AppState, SharedState};
