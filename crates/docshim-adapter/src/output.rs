//! Target framework primitives produced by rendering.

use std::fmt;

use docshim_icons::{ICON_CLASS, IconHandle};
use serde::Serialize;

use crate::node::{AttrValue, Attributes};

/// A node of the rendered tree: text, a framework primitive, or a host element.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "primitive", rename_all = "kebab-case")]
pub enum Output {
    /// Raw text.
    Text {
        /// Text content.
        value: String,
    },
    /// Generic block wrapper carrying class tokens.
    Block(Block),
    /// Card grid container.
    Cards(Cards),
    /// Single card.
    Card(Card),
    /// Ordered step list.
    Steps {
        /// Steps in order.
        children: Vec<Output>,
    },
    /// Single step.
    Step {
        /// Step content.
        children: Vec<Output>,
    },
    /// Callout block.
    Callout(Callout),
    /// Expandable disclosure item.
    Disclosure(Disclosure),
    /// Plain host element (`p`, `img`, `code`, ...).
    Element(HostElement),
}

impl Output {
    /// Create a text node.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    /// Text content if this is a text node.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { value } => Some(value),
            _ => None,
        }
    }
}

/// Generic block wrapper (`<div class="...">`).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Block {
    /// Opaque class tokens.
    pub class: String,
    /// Wrapped content.
    pub children: Vec<Output>,
}

/// Explicit column sizing for a card grid.
///
/// Holds the author's `cols` value verbatim, rendered as `repeat({cols}, 1fr)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColumnTemplate(String);

impl ColumnTemplate {
    /// Equal-width columns from an opaque `cols` value.
    #[must_use]
    pub fn repeat(cols: &AttrValue) -> Self {
        Self(format!("repeat({cols}, 1fr)"))
    }

    /// CSS `grid-template-columns` value.
    #[must_use]
    pub fn as_css(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Card grid container.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Cards {
    /// Column sizing override; `None` leaves the framework default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<ColumnTemplate>,
    /// Cards.
    pub children: Vec<Output>,
}

/// Rendered icon: a handle plus its sizing class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Icon {
    /// Asset in the shared icon set.
    pub handle: IconHandle,
    /// Class tokens applied to the icon element.
    pub class: &'static str,
}

impl From<IconHandle> for Icon {
    fn from(handle: IconHandle) -> Self {
        Self {
            handle,
            class: ICON_CLASS,
        }
    }
}

/// Single card.
///
/// At most one of `description` and `body` is populated.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Card {
    /// Card heading; always a string.
    pub title: String,
    /// Link target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Leading icon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    /// Plain-text description, wrapped by the framework in its own text block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Structured content.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub body: Vec<Output>,
}

/// Callout severity tiers of the target framework.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutType {
    #[default]
    Info,
    Warn,
    Error,
}

impl CalloutType {
    /// Name used by the framework (`info`, `warn`, `error`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Parse a framework callout type. Accepts `warning` as an alias of `warn`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for CalloutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callout block.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Callout {
    /// Severity tier.
    #[serde(rename = "type")]
    pub kind: CalloutType,
    /// Callout content.
    pub children: Vec<Output>,
}

/// Expandable disclosure item.
///
/// Starts collapsed. Expansion state belongs to this value alone.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Disclosure {
    /// Summary line.
    pub title: String,
    open: bool,
    /// Hidden content.
    pub children: Vec<Output>,
}

impl Disclosure {
    /// Create a collapsed disclosure item.
    #[must_use]
    pub fn collapsed(title: impl Into<String>, children: Vec<Output>) -> Self {
        Self {
            title: title.into(),
            open: false,
            children,
        }
    }

    /// Whether the item is expanded.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip expansion state.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }
}

/// Plain host element passed through to the framework.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HostElement {
    /// Element name.
    pub name: String,
    /// Attributes as authored.
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    /// Child content.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Output>,
}
