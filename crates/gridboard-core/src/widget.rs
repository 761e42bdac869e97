#![forbid(unsafe_code)]

//! Widget identities and display modes.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable widget identifier, unique within one dashboard.
///
/// Defaults to the widget's type name, so each type appears at most once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for WidgetId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WidgetId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for WidgetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&WidgetType> for WidgetId {
    fn from(value: &WidgetType) -> Self {
        Self(value.0.clone())
    }
}

/// Key into the host's widget catalog. Never interpreted by the layout engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetType(String);

impl WidgetType {
    #[must_use]
    pub fn new(ty: impl Into<String>) -> Self {
        Self(ty.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for WidgetType {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WidgetType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for WidgetType {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// How a widget presents its data. Opaque to layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Number,
    Chart,
}

impl ViewMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Number => Self::Chart,
            Self::Chart => Self::Number,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Chart => "chart",
        }
    }
}
