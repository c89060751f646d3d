//! Component name to implementation mapping.
//!
//! The effective map is built from three layers, later layers winning on
//! name collision:
//!
//! 1. [`ComponentMap::framework_defaults`]: host elements and the target
//!    framework's own primitives,
//! 2. [`ComponentMap::compat`]: one adapter per [`TagKind`],
//! 3. an optional caller-supplied map.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::adapter::adapt;
use crate::node::Attributes;
use crate::output::{Callout, CalloutType, Card, Cards, HostElement, Output};
use crate::tag::{TagKind, TagNode};

/// Signature of caller-supplied components.
pub type ComponentFn = dyn Fn(&Attributes, Vec<Output>) -> Output + Send + Sync;

/// Host elements the framework renders without customization.
const HOST_ELEMENTS: &[&str] = &[
    "a",
    "blockquote",
    "br",
    "code",
    "del",
    "em",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hr",
    "img",
    "li",
    "ol",
    "p",
    "pre",
    "strong",
    "table",
    "tbody",
    "td",
    "th",
    "thead",
    "tr",
    "ul",
];

/// Primitives the framework exposes under their own names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NativeComponent {
    /// `<Cards>`
    Cards,
    /// `<Card title description href>`
    Card,
    /// `<Callout type>`
    Callout,
    /// `<Steps>`
    Steps,
    /// `<Step>`
    Step,
}

impl NativeComponent {
    const ALL: [(&'static str, Self); 5] = [
        ("Cards", Self::Cards),
        ("Card", Self::Card),
        ("Callout", Self::Callout),
        ("Steps", Self::Steps),
        ("Step", Self::Step),
    ];

    fn invoke(self, attributes: &Attributes, children: Vec<Output>) -> Output {
        let text = |name: &str| attributes.get(name).map(|v| v.to_text().into_owned());
        match self {
            Self::Cards => Output::Cards(Cards {
                columns: None,
                children,
            }),
            Self::Card => Output::Card(Card {
                title: text("title").unwrap_or_default(),
                href: text("href"),
                icon: None,
                description: text("description"),
                body: children,
            }),
            Self::Callout => Output::Callout(Callout {
                kind: attributes
                    .get_str("type")
                    .and_then(CalloutType::parse)
                    .unwrap_or_default(),
                children,
            }),
            Self::Steps => Output::Steps { children },
            Self::Step => Output::Step { children },
        }
    }
}

/// Implementation behind a component name.
#[derive(Clone)]
pub enum Component {
    /// Plain host element of the same name.
    Host,
    /// A framework primitive.
    Native(NativeComponent),
    /// Compat adapter for a dialect tag.
    Compat(TagKind),
    /// Caller-supplied implementation.
    Custom(Arc<ComponentFn>),
}

impl Component {
    /// Wrap a closure as a custom component.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Attributes, Vec<Output>) -> Output + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Custom component rendering a host element, optionally adding a class.
    ///
    /// The authored attributes are kept; `class` replaces any authored class.
    #[must_use]
    pub fn host_element(element: impl Into<String>, class: Option<String>) -> Self {
        let element = element.into();
        Self::custom(move |attributes, children| {
            let mut attributes = attributes.clone();
            if let Some(class) = &class {
                attributes.insert("class", class.as_str());
            }
            Output::Element(HostElement {
                name: element.clone(),
                attributes,
                children,
            })
        })
    }

    /// Invoke the component for an element named `name`.
    #[must_use]
    pub fn invoke(&self, name: &str, attributes: &Attributes, children: Vec<Output>) -> Output {
        match self {
            Self::Host => Output::Element(HostElement {
                name: name.to_owned(),
                attributes: attributes.clone(),
                children,
            }),
            Self::Native(native) => native.invoke(attributes, children),
            Self::Compat(kind) => adapt(TagNode::new(*kind, attributes, children)),
            Self::Custom(f) => f(attributes, children),
        }
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host => f.write_str("Host"),
            Self::Native(native) => f.debug_tuple("Native").field(native).finish(),
            Self::Compat(kind) => f.debug_tuple("Compat").field(kind).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Which layer supplied a component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    /// Target framework defaults.
    Framework,
    /// Compat adapters.
    Compat,
    /// Caller overrides.
    Caller,
}

impl Layer {
    /// Lowercase layer name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Framework => "framework",
            Self::Compat => "compat",
            Self::Caller => "caller",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Clone, Debug)]
struct Entry {
    component: Component,
    layer: Layer,
}

/// Mapping from component name to implementation.
#[derive(Clone, Debug, Default)]
pub struct ComponentMap {
    entries: BTreeMap<String, Entry>,
}

impl ComponentMap {
    /// Create an empty map. Entries added with [`with`](Self::with) belong to
    /// the caller layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The framework's default components.
    #[must_use]
    pub fn framework_defaults() -> Self {
        let mut map = Self::new();
        for name in HOST_ELEMENTS {
            map.insert(*name, Component::Host, Layer::Framework);
        }
        for (name, native) in NativeComponent::ALL {
            map.insert(name, Component::Native(native), Layer::Framework);
        }
        map
    }

    /// One compat adapter per dialect tag.
    #[must_use]
    pub fn compat() -> Self {
        let mut map = Self::new();
        for kind in TagKind::ALL {
            map.insert(kind.name(), Component::Compat(kind), Layer::Compat);
        }
        map
    }

    /// Builder: add a caller-layer component.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, component: Component) -> Self {
        self.insert(name, component, Layer::Caller);
        self
    }

    /// Add or replace a component.
    pub fn insert(&mut self, name: impl Into<String>, component: Component, layer: Layer) {
        self.entries.insert(name.into(), Entry { component, layer });
    }

    /// Layer `other` on top of this map; its entries win on collision.
    pub fn merge(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Component registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Component> {
        self.entries.get(name).map(|entry| &entry.component)
    }

    /// Layer that supplied the component under `name`.
    #[must_use]
    pub fn layer(&self, name: &str) -> Option<Layer> {
        self.entries.get(name).map(|entry| entry.layer)
    }

    /// Iterate `(name, component, layer)` in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Component, Layer)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), &entry.component, entry.layer))
    }

    /// Number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no names are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the effective component map: framework defaults, then compat
/// adapters, then `overrides`.
#[must_use]
pub fn component_map(overrides: Option<ComponentMap>) -> ComponentMap {
    let mut map = ComponentMap::framework_defaults();
    map.merge(ComponentMap::compat());
    if let Some(overrides) = overrides {
        map.merge(overrides);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_every_tag_registered() {
        let map = component_map(None);
        for kind in TagKind::ALL {
            assert!(
                matches!(map.get(kind.name()), Some(Component::Compat(k)) if *k == kind),
                "{kind}"
            );
        }
    }

    #[test]
    fn test_compat_overrides_framework_card() {
        let map = component_map(None);
        assert_eq!(map.layer("Card"), Some(Layer::Compat));
        assert_eq!(map.layer("Steps"), Some(Layer::Compat));
    }

    #[test]
    fn test_framework_defaults_survive() {
        let map = component_map(None);
        assert_eq!(map.layer("p"), Some(Layer::Framework));
        assert_eq!(map.layer("Callout"), Some(Layer::Framework));
        assert_eq!(map.layer("Cards"), Some(Layer::Framework));
        assert!(map.get("Frobnicate").is_none());
    }

    #[test]
    fn test_caller_overrides_win() {
        let overrides =
            ComponentMap::new().with("Note", Component::custom(|_, _| Output::text("custom")));
        let map = component_map(Some(overrides));
        assert_eq!(map.layer("Note"), Some(Layer::Caller));

        let output = map
            .get("Note")
            .unwrap()
            .invoke("Note", &Attributes::new(), Vec::new());
        assert_eq!(output, Output::text("custom"));
    }

    #[test]
    fn test_caller_can_add_new_names() {
        let overrides = ComponentMap::new().with("APIPage", Component::Host);
        let map = component_map(Some(overrides));
        assert_eq!(map.layer("APIPage"), Some(Layer::Caller));
        assert_eq!(map.len(), component_map(None).len() + 1);
    }

    #[test]
    fn test_host_invoke_keeps_name_and_attributes() {
        let attrs: Attributes = [("src", "/shot.png")].into_iter().collect();
        let output = Component::Host.invoke("img", &attrs, Vec::new());
        assert_eq!(
            output,
            Output::Element(HostElement {
                name: "img".to_owned(),
                attributes: attrs,
                children: Vec::new(),
            })
        );
    }

    #[test]
    fn test_host_element_override() {
        let component = Component::host_element("aside", Some("note".to_owned()));
        let attrs: Attributes = [("id", "n1")].into_iter().collect();
        let Output::Element(el) = component.invoke("Note", &attrs, vec![Output::text("x")]) else {
            panic!("expected element");
        };
        assert_eq!(el.name, "aside");
        assert_eq!(el.attributes.get_str("class"), Some("note"));
        assert_eq!(el.attributes.get_str("id"), Some("n1"));
    }

    #[test]
    fn test_native_callout_type() {
        let attrs: Attributes = [("type", "warning")].into_iter().collect();
        let callout = Component::Native(NativeComponent::Callout);
        let output = callout.invoke("Callout", &attrs, Vec::new());
        assert_eq!(
            output,
            Output::Callout(Callout {
                kind: CalloutType::Warn,
                children: Vec::new(),
            })
        );
    }

    #[test]
    fn test_native_callout_defaults_to_info() {
        let callout = Component::Native(NativeComponent::Callout);
        let output = callout.invoke("Callout", &Attributes::new(), Vec::new());
        assert!(matches!(output, Output::Callout(c) if c.kind == CalloutType::Info));
    }

    #[test]
    fn test_debug_custom() {
        let component = Component::custom(|_, children| Output::Steps { children });
        assert_eq!(format!("{component:?}"), "Custom(..)");
    }

    #[test]
    fn test_layer_display() {
        assert_eq!(Layer::Caller.to_string(), "caller");
    }
}
