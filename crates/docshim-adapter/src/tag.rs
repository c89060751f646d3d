//! The fixed tag vocabulary of the source dialect.

use std::fmt;

use crate::node::Attributes;
use crate::output::{CalloutType, Output};

/// A tag of the source dialect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagKind {
    Frame,
    CardGroup,
    Card,
    Steps,
    Step,
    Tip,
    Note,
    Warning,
    Info,
    Danger,
    AccordionGroup,
    Accordion,
}

impl TagKind {
    /// Every tag, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Frame,
        Self::CardGroup,
        Self::Card,
        Self::Steps,
        Self::Step,
        Self::Tip,
        Self::Note,
        Self::Warning,
        Self::Info,
        Self::Danger,
        Self::AccordionGroup,
        Self::Accordion,
    ];

    /// Tag name as written in documents.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Frame => "Frame",
            Self::CardGroup => "CardGroup",
            Self::Card => "Card",
            Self::Steps => "Steps",
            Self::Step => "Step",
            Self::Tip => "Tip",
            Self::Note => "Note",
            Self::Warning => "Warning",
            Self::Info => "Info",
            Self::Danger => "Danger",
            Self::AccordionGroup => "AccordionGroup",
            Self::Accordion => "Accordion",
        }
    }

    /// Look up a tag by its exact (case-sensitive) name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Callout variant for the five callout tags.
    #[must_use]
    pub const fn callout_variant(self) -> Option<CalloutVariant> {
        match self {
            Self::Tip => Some(CalloutVariant::Tip),
            Self::Note => Some(CalloutVariant::Note),
            Self::Warning => Some(CalloutVariant::Warning),
            Self::Info => Some(CalloutVariant::Info),
            Self::Danger => Some(CalloutVariant::Danger),
            Self::Frame
            | Self::CardGroup
            | Self::Card
            | Self::Steps
            | Self::Step
            | Self::AccordionGroup
            | Self::Accordion => None,
        }
    }

    /// Attributes the tag cannot be rendered without.
    #[must_use]
    pub const fn required_attributes(self) -> &'static [&'static str] {
        match self {
            Self::Accordion => &["title"],
            _ => &[],
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Callout flavours of the source dialect.
///
/// The target framework has fewer tiers; see [`CalloutVariant::callout_type`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CalloutVariant {
    Tip,
    Note,
    Warning,
    Info,
    Danger,
}

impl CalloutVariant {
    /// Collapse onto the target callout type.
    ///
    /// Tip, Note and Info all become `info`.
    #[must_use]
    pub const fn callout_type(self) -> CalloutType {
        match self {
            Self::Tip | Self::Note | Self::Info => CalloutType::Info,
            Self::Warning => CalloutType::Warn,
            Self::Danger => CalloutType::Error,
        }
    }
}

/// A dialect tag ready for adaptation: its kind, attributes and rendered children.
#[derive(Debug)]
pub struct TagNode<'a> {
    /// Which tag this is.
    pub kind: TagKind,
    /// Attributes as authored.
    pub attributes: &'a Attributes,
    /// Child content, already rendered, in document order.
    pub children: Vec<Output>,
}

impl<'a> TagNode<'a> {
    /// Create a tag node.
    #[must_use]
    pub fn new(kind: TagKind, attributes: &'a Attributes, children: Vec<Output>) -> Self {
        Self {
            kind,
            attributes,
            children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_name_round_trip() {
        for kind in TagKind::ALL {
            assert_eq!(TagKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn test_from_name_is_case_sensitive() {
        assert_eq!(TagKind::from_name("card"), None);
        assert_eq!(TagKind::from_name("CARD"), None);
        assert_eq!(TagKind::from_name("Cards"), None);
    }

    #[test]
    fn test_callout_collapse() {
        let table = [
            (TagKind::Tip, CalloutType::Info),
            (TagKind::Note, CalloutType::Info),
            (TagKind::Info, CalloutType::Info),
            (TagKind::Warning, CalloutType::Warn),
            (TagKind::Danger, CalloutType::Error),
        ];
        for (kind, expected) in table {
            let variant = kind.callout_variant().unwrap();
            assert_eq!(variant.callout_type(), expected, "{kind}");
        }
    }

    #[test]
    fn test_non_callouts_have_no_variant() {
        let callouts = TagKind::ALL
            .into_iter()
            .filter(|kind| kind.callout_variant().is_some())
            .count();
        assert_eq!(callouts, 5);
        assert_eq!(TagKind::Card.callout_variant(), None);
    }

    #[test]
    fn test_required_attributes() {
        assert_eq!(TagKind::Accordion.required_attributes(), &["title"]);
        assert!(TagKind::Card.required_attributes().is_empty());
    }
}
