//! Host handle contract
//!
//! The embedding host owns a context object with optional fields and
//! optional actions. This module models it as the [`WidgetHost`] trait: the
//! data side is a [`HostSnapshot`] the bridge reads on demand, and every
//! action defaults to `Err(HostUnavailable)` so a concrete host advertises a
//! capability simply by overriding the method.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{BridgeError, BridgeResult};

/// Color scheme selected by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// How the host is currently presenting the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Inline,
    Fullscreen,
    Pip,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Inline => "inline",
            DisplayMode::Fullscreen => "fullscreen",
            DisplayMode::Pip => "pip",
        }
    }
}

/// Named fields of the host context, as they appear in change broadcasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostField {
    Theme,
    DisplayMode,
    Locale,
    ToolInput,
    ToolOutput,
    WidgetState,
}

impl HostField {
    /// Wire name of the field, matching the host's broadcast payload keys.
    pub fn name(&self) -> &'static str {
        match self {
            HostField::Theme => "theme",
            HostField::DisplayMode => "displayMode",
            HostField::Locale => "locale",
            HostField::ToolInput => "toolInput",
            HostField::ToolOutput => "toolOutput",
            HostField::WidgetState => "widgetState",
        }
    }

    /// Parses a broadcast payload key back into a field.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "theme" => Some(HostField::Theme),
            "displayMode" => Some(HostField::DisplayMode),
            "locale" => Some(HostField::Locale),
            "toolInput" => Some(HostField::ToolInput),
            "toolOutput" => Some(HostField::ToolOutput),
            "widgetState" => Some(HostField::WidgetState),
            _ => None,
        }
    }
}

/// Point-in-time copy of the host's context fields.
///
/// Every field is optional; the host decides what it injects. The bridge
/// re-reads a snapshot on each projection, so host-side mutation between
/// reads is expected and tolerated.
#[derive(Debug, Clone, Default)]
pub struct HostSnapshot {
    pub theme: Option<Theme>,
    pub display_mode: Option<DisplayMode>,
    pub locale: Option<String>,
    pub tool_input: Option<Value>,
    pub tool_output: Option<Value>,
    pub widget_state: Option<Value>,
}

impl HostSnapshot {
    /// Returns the named field as a JSON value, `None` when the host omits it.
    pub fn field(&self, field: HostField) -> Option<Value> {
        match field {
            HostField::Theme => self.theme.map(|t| json!(t)),
            HostField::DisplayMode => self.display_mode.map(|m| json!(m)),
            HostField::Locale => self.locale.as_deref().map(|l| json!(l)),
            HostField::ToolInput => self.tool_input.clone(),
            HostField::ToolOutput => self.tool_output.clone(),
            HostField::WidgetState => self.widget_state.clone(),
        }
    }
}

/// The embedding host, as seen by the bridge.
///
/// Data access goes through [`snapshot`](WidgetHost::snapshot). Actions keep
/// their default `HostUnavailable` bodies unless the host actually supports
/// them, which is how the bridge distinguishes a missing capability from a
/// failing one.
#[async_trait]
pub trait WidgetHost: Send + Sync {
    /// Current values of the injected context fields.
    fn snapshot(&self) -> HostSnapshot;

    /// Invokes a named tool on the host. The result is passed through
    /// without interpretation.
    async fn call_tool(&self, _name: &str, _args: Value) -> BridgeResult<Value> {
        Err(BridgeError::HostUnavailable)
    }

    /// Sends a follow-up message into the host conversation.
    async fn send_followup(&self, _prompt: &str) -> BridgeResult<()> {
        Err(BridgeError::HostUnavailable)
    }

    /// Opens an external link in the host's browser context.
    fn open_external(&self, _href: &str) -> BridgeResult<()> {
        Err(BridgeError::HostUnavailable)
    }

    /// Asks the host to change the widget's display mode. The host may grant
    /// a different mode than requested; the granted mode is returned as-is.
    async fn request_display_mode(&self, _mode: DisplayMode) -> BridgeResult<DisplayMode> {
        Err(BridgeError::HostUnavailable)
    }

    /// Persists the widget state on the host side.
    async fn set_widget_state(&self, _state: Value) -> BridgeResult<()> {
        Err(BridgeError::HostUnavailable)
    }
}
