//! Widget Context Bridge
//!
//! The bridge gives widget UI code a reactive, read-only view of the context
//! the embedding host injects (tool input/output, theme, display mode,
//! locale, persisted widget state) plus a small action surface for talking
//! back to the host (tool invocation, follow-up messages, display-mode
//! requests, state persistence).
//!
//! The host is an injected [`WidgetHost`] handle, never a process global, so
//! the whole thing runs unchanged against a test double or with no host at
//! all (standalone mode: projections fall back to defaults and every action
//! fails with [`BridgeError::HostUnavailable`]).

pub mod context;
pub mod host;
pub mod subscriptions;

pub use context::WidgetContext;
pub use host::{DisplayMode, HostField, HostSnapshot, Theme, WidgetHost};
pub use subscriptions::Subscription;

use thiserror::Error;

/// Errors surfaced by bridge actions.
///
/// `HostUnavailable` is the only failure the bridge itself raises: the host
/// (or the specific capability) is missing at the moment an action is
/// invoked. Anything a host action fails with travels through the `Host`
/// variant untouched; the bridge never wraps or reinterprets it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// The host, or the capability the action needs, is not present.
    #[error("host is not available for this action")]
    HostUnavailable,

    /// A failure produced by the host's own action implementation.
    #[error("host action failed: {0}")]
    Host(String),
}

/// Result alias for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
