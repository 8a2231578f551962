//! The widget context handle
//!
//! One [`WidgetContext`] per widget instance. It projects the host's
//! injected context with documented fallbacks, forwards actions to the host,
//! fans host change broadcasts out to field subscribers, and keeps an
//! optimistic local mirror of the persisted widget state.

use std::sync::{Arc, Mutex};

use serde_json::{json, Map, Value};
use tracing::debug;

use super::host::{DisplayMode, HostField, HostSnapshot, Theme, WidgetHost};
use super::subscriptions::{Subscription, SubscriptionRegistry};
use super::{BridgeError, BridgeResult};

/// Locale used when the host does not provide one.
pub const FALLBACK_LOCALE: &str = "en";

/// Cohesive handle over the host context for one widget instance.
///
/// The host is the source of truth for every projected field; the only state
/// the context owns is the widget-state mirror, which may diverge from the
/// host transiently while a write is in flight.
pub struct WidgetContext {
    host: Option<Arc<dyn WidgetHost>>,
    subscriptions: Arc<SubscriptionRegistry>,
    state: Mutex<Value>,
}

impl WidgetContext {
    /// Binds a context to a host handle. The state mirror is seeded from the
    /// host's persisted widget state when present, `null` otherwise.
    pub fn bind(host: Option<Arc<dyn WidgetHost>>) -> Self {
        let state = host
            .as_ref()
            .and_then(|h| h.snapshot().widget_state)
            .unwrap_or(Value::Null);

        Self {
            host,
            subscriptions: SubscriptionRegistry::new(),
            state: Mutex::new(state),
        }
    }

    /// Standalone mode: no host, defaults everywhere, every action fails
    /// with [`BridgeError::HostUnavailable`].
    pub fn detached() -> Self {
        Self::bind(None)
    }

    /// `true` iff a host handle is bound. Consumers use this to suppress
    /// interactive affordances and show a standalone notice instead.
    pub fn is_host_available(&self) -> bool {
        self.host.is_some()
    }

    fn snapshot(&self) -> HostSnapshot {
        self.host
            .as_ref()
            .map(|h| h.snapshot())
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Projections
    // ------------------------------------------------------------------

    /// Current value of a named host field, `None` when the host omits it or
    /// no host is bound.
    pub fn field(&self, field: HostField) -> Option<Value> {
        self.snapshot().field(field)
    }

    /// Tool input if the host provides it, else the supplied default, else
    /// an empty object. Never merges the two.
    pub fn props(&self, default: Option<&Value>) -> Value {
        self.snapshot()
            .tool_input
            .or_else(|| default.cloned())
            .unwrap_or_else(|| json!({}))
    }

    pub fn theme(&self) -> Theme {
        self.snapshot().theme.unwrap_or_default()
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.snapshot().display_mode.unwrap_or_default()
    }

    pub fn locale(&self) -> String {
        self.snapshot()
            .locale
            .unwrap_or_else(|| FALLBACK_LOCALE.to_string())
    }

    // ------------------------------------------------------------------
    // Change notifications
    // ------------------------------------------------------------------

    /// Registers an invalidation callback for one field. The callback fires
    /// on every broadcast naming that field, whether or not the value
    /// changed; dropping the returned guard stops delivery.
    pub fn subscribe<F>(&self, field: HostField, callback: F) -> Subscription
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.subscriptions.subscribe(field, callback)
    }

    /// Applies a host change broadcast: a mapping of changed field names to
    /// their new values. Matching subscribers fire in the mapping's
    /// iteration order; unknown field names are skipped.
    pub fn notify_change(&self, changes: &Map<String, Value>) {
        for (name, value) in changes {
            match HostField::from_name(name) {
                Some(field) => self.subscriptions.notify(field, value),
                None => debug!(field = %name, "ignoring change for unknown host field"),
            }
        }
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    fn require_host(&self) -> BridgeResult<&Arc<dyn WidgetHost>> {
        self.host.as_ref().ok_or(BridgeError::HostUnavailable)
    }

    /// Invokes a host tool. The host's result (or failure) passes through
    /// unchanged.
    pub async fn invoke_tool(&self, name: &str, args: Value) -> BridgeResult<Value> {
        self.require_host()?.call_tool(name, args).await
    }

    /// Sends a follow-up message into the host conversation.
    pub async fn send_followup(&self, prompt: &str) -> BridgeResult<()> {
        self.require_host()?.send_followup(prompt).await
    }

    /// Opens an external link via the host. Synchronous delegation.
    pub fn open_external(&self, href: &str) -> BridgeResult<()> {
        self.require_host()?.open_external(href)
    }

    /// Requests a display mode change. Returns the mode the host granted,
    /// which may differ from the request; no validation or coercion here.
    pub async fn request_display_mode(&self, mode: DisplayMode) -> BridgeResult<DisplayMode> {
        self.require_host()?.request_display_mode(mode).await
    }

    // ------------------------------------------------------------------
    // Widget state mirror
    // ------------------------------------------------------------------

    /// Current mirrored widget state; `null` until first initialized.
    pub fn state(&self) -> Value {
        self.state.lock().unwrap().clone()
    }

    /// Replaces the widget state with a literal value.
    pub async fn set_state(&self, value: Value) -> BridgeResult<()> {
        self.commit_state(value).await
    }

    /// Replaces the widget state with a pure function of the previous
    /// mirrored value. The updater observes the up-to-date mirror, so
    /// consecutive updates compose.
    pub async fn update_state<F>(&self, updater: F) -> BridgeResult<()>
    where
        F: FnOnce(&Value) -> Value,
    {
        let next = {
            let current = self.state.lock().unwrap();
            updater(&current)
        };
        self.commit_state(next).await
    }

    /// Mount-time initialization: commits `default` only when the mirror has
    /// never been set.
    pub async fn init_state(&self, default: Value) -> BridgeResult<()> {
        let uninitialized = self.state.lock().unwrap().is_null();
        if uninitialized {
            self.commit_state(default).await
        } else {
            Ok(())
        }
    }

    /// Two-phase write: update the mirror first, then persist on the host
    /// when the capability exists. A host without the persistence capability
    /// completes the call successfully after the local update; a rejection
    /// from an exposed persistence action propagates unchanged, with no
    /// rollback of the mirror.
    async fn commit_state(&self, next: Value) -> BridgeResult<()> {
        *self.state.lock().unwrap() = next.clone();

        let Some(host) = self.host.as_ref() else {
            return Ok(());
        };
        match host.set_widget_state(next).await {
            Err(BridgeError::HostUnavailable) => Ok(()),
            other => other,
        }
    }
}
