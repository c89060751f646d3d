//! One adapter per dialect tag.

use crate::output::{Block, Callout, Card, Cards, ColumnTemplate, Disclosure, Icon, Output};
use crate::tag::{CalloutVariant, TagKind, TagNode};

/// Spacing wrapper around framed content.
pub const FRAME_CLASS: &str = "my-6";

/// Spacing wrapper around a list of disclosure items.
pub const ACCORDION_GROUP_CLASS: &str = "my-6 space-y-2";

/// Adapt a dialect tag to its target primitive.
///
/// Missing optional attributes fall back to defaults. Required attributes are
/// assumed present (see [`Document::validate`](crate::Document::validate)).
#[must_use]
pub fn adapt(node: TagNode<'_>) -> Output {
    let TagNode {
        kind,
        attributes,
        children,
    } = node;
    tracing::debug!(tag = kind.name(), children = children.len(), "Adapting tag");

    match kind {
        TagKind::Frame => block(FRAME_CLASS, children),
        TagKind::CardGroup => Output::Cards(Cards {
            columns: attributes.get_truthy("cols").map(ColumnTemplate::repeat),
            children,
        }),
        TagKind::Card => Output::Card(card(
            attributes.get_truthy("title").map(|v| v.to_text().into_owned()),
            attributes.get_str("href"),
            attributes.get_str("icon"),
            children,
        )),
        TagKind::Steps => Output::Steps { children },
        TagKind::Step => Output::Step { children },
        TagKind::Tip => callout(CalloutVariant::Tip, children),
        TagKind::Note => callout(CalloutVariant::Note, children),
        TagKind::Warning => callout(CalloutVariant::Warning, children),
        TagKind::Info => callout(CalloutVariant::Info, children),
        TagKind::Danger => callout(CalloutVariant::Danger, children),
        TagKind::AccordionGroup => block(ACCORDION_GROUP_CLASS, children),
        TagKind::Accordion => {
            let title = attributes
                .get("title")
                .map(|v| v.to_text().into_owned())
                .unwrap_or_default();
            Output::Disclosure(Disclosure::collapsed(title, children))
        }
    }
}

fn block(class: &str, children: Vec<Output>) -> Output {
    Output::Block(Block {
        class: class.to_owned(),
        children,
    })
}

fn callout(variant: CalloutVariant, children: Vec<Output>) -> Output {
    Output::Callout(Callout {
        kind: variant.callout_type(),
        children,
    })
}

/// Build a card. A lone text child becomes the description, anything else the
/// body: the framework wraps descriptions in a text block, so structured
/// content there would nest blocks.
fn card(
    title: Option<String>,
    href: Option<&str>,
    icon: Option<&str>,
    mut children: Vec<Output>,
) -> Card {
    let description = match children.as_mut_slice() {
        [Output::Text { value }] => Some(std::mem::take(value)),
        _ => None,
    };
    let body = if description.is_some() {
        Vec::new()
    } else {
        children
    };

    Card {
        title: title.unwrap_or_default(),
        href: href.map(str::to_owned),
        icon: docshim_icons::resolve(icon).map(Icon::from),
        description,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{AttrValue, Attributes};
    use crate::output::{CalloutType, HostElement};
    use docshim_icons::IconHandle;
    use pretty_assertions::assert_eq;

    fn run(kind: TagKind, attributes: &Attributes, children: Vec<Output>) -> Output {
        adapt(TagNode::new(kind, attributes, children))
    }

    fn paragraph(text: &str) -> Output {
        Output::Element(HostElement {
            name: "p".to_owned(),
            attributes: Attributes::new(),
            children: vec![Output::text(text)],
        })
    }

    #[test]
    fn test_frame_wraps_children() {
        let children = vec![paragraph("caption")];
        let output = run(TagKind::Frame, &Attributes::new(), children.clone());
        assert_eq!(
            output,
            Output::Block(Block {
                class: "my-6".to_owned(),
                children,
            })
        );
    }

    #[test]
    fn test_card_group_with_cols() {
        let attrs: Attributes = [("cols", 3u64)].into_iter().collect();
        let Output::Cards(cards) = run(TagKind::CardGroup, &attrs, Vec::new()) else {
            panic!("expected cards");
        };
        assert_eq!(cards.columns.unwrap().as_css(), "repeat(3, 1fr)");
    }

    #[test]
    fn test_card_group_without_cols() {
        let Output::Cards(cards) = run(TagKind::CardGroup, &Attributes::new(), Vec::new()) else {
            panic!("expected cards");
        };
        assert_eq!(cards.columns, None);
    }

    #[test]
    fn test_card_group_zero_cols_is_unset() {
        let attrs: Attributes = [("cols", 0u64)].into_iter().collect();
        let Output::Cards(cards) = run(TagKind::CardGroup, &attrs, Vec::new()) else {
            panic!("expected cards");
        };
        assert_eq!(cards.columns, None);
    }

    #[test]
    fn test_card_group_string_cols() {
        let attrs: Attributes = [("cols", "2")].into_iter().collect();
        let Output::Cards(cards) = run(TagKind::CardGroup, &attrs, Vec::new()) else {
            panic!("expected cards");
        };
        assert_eq!(cards.columns.unwrap().as_css(), "repeat(2, 1fr)");
    }

    #[test]
    fn test_card_text_becomes_description() {
        let attrs: Attributes = [("title", "Intro"), ("icon", "Rocket")].into_iter().collect();
        let output = run(TagKind::Card, &attrs, vec![Output::text("Some text")]);
        assert_eq!(
            output,
            Output::Card(Card {
                title: "Intro".to_owned(),
                href: None,
                icon: Some(Icon::from(IconHandle::new("rocket"))),
                description: Some("Some text".to_owned()),
                body: Vec::new(),
            })
        );
    }

    #[test]
    fn test_card_structured_children_become_body() {
        let children = vec![paragraph("one"), paragraph("two")];
        let Output::Card(card) = run(TagKind::Card, &Attributes::new(), children.clone()) else {
            panic!("expected card");
        };
        assert_eq!(card.description, None);
        assert_eq!(card.body, children);
    }

    #[test]
    fn test_card_text_mixed_with_elements_is_body() {
        let children = vec![Output::text("lead "), paragraph("more")];
        let Output::Card(card) = run(TagKind::Card, &Attributes::new(), children.clone()) else {
            panic!("expected card");
        };
        assert_eq!(card.description, None);
        assert_eq!(card.body, children);
    }

    #[test]
    fn test_card_defaults() {
        let Output::Card(card) = run(TagKind::Card, &Attributes::new(), Vec::new()) else {
            panic!("expected card");
        };
        assert_eq!(card, Card::default());
        assert_eq!(card.title, "");
    }

    #[test]
    fn test_card_unknown_icon_renders_without_icon() {
        let attrs: Attributes = [("title", "X"), ("icon", "sparkles")].into_iter().collect();
        let Output::Card(card) = run(TagKind::Card, &attrs, Vec::new()) else {
            panic!("expected card");
        };
        assert_eq!(card.icon, None);
        assert_eq!(card.title, "X");
    }

    #[test]
    fn test_card_href_passthrough() {
        let attrs: Attributes = [("title", "API"), ("href", "/api")].into_iter().collect();
        let Output::Card(card) = run(TagKind::Card, &attrs, Vec::new()) else {
            panic!("expected card");
        };
        assert_eq!(card.href.as_deref(), Some("/api"));
    }

    #[test]
    fn test_card_numeric_title() {
        let mut attrs = Attributes::new();
        attrs.insert("title", AttrValue::from(2024u64));
        let Output::Card(card) = run(TagKind::Card, &attrs, Vec::new()) else {
            panic!("expected card");
        };
        assert_eq!(card.title, "2024");
    }

    #[test]
    fn test_steps_pass_through() {
        let step = run(TagKind::Step, &Attributes::new(), vec![paragraph("Run it")]);
        let steps = run(TagKind::Steps, &Attributes::new(), vec![step.clone()]);
        assert_eq!(
            steps,
            Output::Steps {
                children: vec![step]
            }
        );
    }

    #[test]
    fn test_callout_tags() {
        let table = [
            (TagKind::Tip, CalloutType::Info),
            (TagKind::Note, CalloutType::Info),
            (TagKind::Info, CalloutType::Info),
            (TagKind::Warning, CalloutType::Warn),
            (TagKind::Danger, CalloutType::Error),
        ];
        for (kind, expected) in table {
            let Output::Callout(callout) =
                run(kind, &Attributes::new(), vec![Output::text("body")])
            else {
                panic!("expected callout for {kind}");
            };
            assert_eq!(callout.kind, expected, "{kind}");
            assert_eq!(callout.children, vec![Output::text("body")]);
        }
    }

    #[test]
    fn test_callout_type_attribute_ignored() {
        let attrs: Attributes = [("type", "error")].into_iter().collect();
        let Output::Callout(callout) = run(TagKind::Tip, &attrs, Vec::new()) else {
            panic!("expected callout");
        };
        assert_eq!(callout.kind, CalloutType::Info);
    }

    #[test]
    fn test_accordion_group() {
        let Output::Block(block) = run(TagKind::AccordionGroup, &Attributes::new(), Vec::new())
        else {
            panic!("expected block");
        };
        assert_eq!(block.class, "my-6 space-y-2");
    }

    #[test]
    fn test_accordion_collapsed_by_default() {
        let attrs: Attributes = [("title", "Why?")].into_iter().collect();
        let children = vec![Output::text("Because")];
        let Output::Disclosure(item) = run(TagKind::Accordion, &attrs, children) else {
            panic!("expected disclosure");
        };
        assert_eq!(item.title, "Why?");
        assert!(!item.is_open());
    }

    #[test]
    fn test_accordions_do_not_share_state() {
        let attrs: Attributes = [("title", "Same")].into_iter().collect();
        let Output::Disclosure(mut first) = run(TagKind::Accordion, &attrs, Vec::new()) else {
            panic!("expected disclosure");
        };
        let Output::Disclosure(second) = run(TagKind::Accordion, &attrs, Vec::new()) else {
            panic!("expected disclosure");
        };
        first.toggle();
        assert!(first.is_open());
        assert!(!second.is_open());
    }
}
