//! Source document tree as handed over by the upstream parser.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tag::TagKind;

/// Attribute value on a source element.
///
/// Absent attributes are represented by a missing key, never by a variant.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// `open={true}`
    Bool(bool),
    /// `cols={3}`
    Number(serde_json::Number),
    /// `title="Install"`
    String(String),
}

impl AttrValue {
    /// String contents, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Bool(_) | Self::Number(_) => None,
        }
    }

    /// Whether the value counts as set: `false`, `0` and `""` do not.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
            Self::String(s) => !s.is_empty(),
        }
    }

    /// Textual form, borrowing when the value is already a string.
    #[must_use]
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Self::String(s) => Cow::Borrowed(s),
            Self::Bool(_) | Self::Number(_) => Cow::Owned(self.to_string()),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => fmt_number(n, f),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// Largest magnitude below which every integral `f64` is exact.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Integral floats print without a fractional part (`3.0` as `3`).
#[allow(clippy::cast_possible_truncation)]
fn fmt_number(n: &serde_json::Number, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_f64()
        && let Some(v) = n.as_f64()
        && v.fract() == 0.0
        && v.abs() < MAX_EXACT_INTEGER
    {
        return write!(f, "{}", v as i64);
    }
    write!(f, "{n}")
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<u64> for AttrValue {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

/// Named attributes of an element, ordered by name.
///
/// `null` values in the input are dropped on deserialization.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(
    from = "BTreeMap<String, Option<AttrValue>>",
    into = "BTreeMap<String, AttrValue>"
)]
pub struct Attributes(BTreeMap<String, AttrValue>);

impl Attributes {
    /// Create an empty attribute set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.0.get(name)
    }

    /// Get a string value by name. Non-string values yield `None`.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttrValue::as_str)
    }

    /// Get a value by name only if it is truthy.
    #[must_use]
    pub fn get_truthy(&self, name: &str) -> Option<&AttrValue> {
        self.get(name).filter(|value| value.is_truthy())
    }

    /// Whether an attribute is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Set an attribute, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Iterate attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, Option<AttrValue>>> for Attributes {
    fn from(raw: BTreeMap<String, Option<AttrValue>>) -> Self {
        Self(
            raw.into_iter()
                .filter_map(|(k, v)| v.map(|v| (k, v)))
                .collect(),
        )
    }
}

impl From<Attributes> for BTreeMap<String, AttrValue> {
    fn from(attrs: Attributes) -> Self {
        attrs.0
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A node of the source tree.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    /// Raw text.
    Text {
        /// Text content.
        value: String,
    },
    /// Named element: a dialect tag (`Card`) or a framework element (`p`).
    Element(Element),
}

impl Node {
    /// Create a text node.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// Named source element with attributes and ordered children.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Element {
    /// Component name as written by the author.
    pub name: String,
    /// Element attributes.
    #[serde(default)]
    pub attributes: Attributes,
    /// Child content in document order.
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes or children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// Builder: set an attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name, value);
        self
    }

    /// Builder: append a child.
    #[must_use]
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Builder: append a text child.
    #[must_use]
    pub fn text(self, value: impl Into<String>) -> Self {
        self.child(Node::text(value))
    }

    /// Dialect tag this element names, if any.
    #[must_use]
    pub fn tag_kind(&self) -> Option<TagKind> {
        TagKind::from_name(&self.name)
    }
}

/// Whether `name` can be emitted as an element or attribute name: an ASCII
/// letter followed by ASCII alphanumerics, `-`, `_`, `:` or `.`.
#[must_use]
pub fn is_markup_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

/// Error loading or validating a source document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Input is not a valid document tree.
    #[error("Invalid document: {0}")]
    Json(#[from] serde_json::Error),
    /// A dialect tag lacks an attribute it cannot render without.
    #[error("<{tag}> at {path} requires a `{attribute}` attribute")]
    MissingAttribute {
        /// Tag name.
        tag: &'static str,
        /// Missing attribute name.
        attribute: &'static str,
        /// Location in the tree (e.g. `children[0].children[2]`).
        path: String,
    },
    /// An element or attribute name that cannot be written as markup.
    #[error("Invalid {what} name {name:?} at {path}")]
    InvalidName {
        /// `"element"` or `"attribute"`.
        what: &'static str,
        /// Offending name.
        name: String,
        /// Location in the tree.
        path: String,
    },
}

/// A parsed source document.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Document {
    /// Top-level nodes.
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Document {
    /// Create a document from top-level nodes.
    #[must_use]
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// Parse a JSON document tree and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Json`] for malformed input, or the
    /// validation error from [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let document: Self = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    /// Check element and attribute names, and that every dialect tag carries
    /// its required attributes.
    ///
    /// This is the boundary where malformed authoring is rejected; adapters
    /// assume it has passed.
    ///
    /// # Errors
    ///
    /// Returns the first [`DocumentError::InvalidName`] or
    /// [`DocumentError::MissingAttribute`] in document order.
    pub fn validate(&self) -> Result<(), DocumentError> {
        validate_nodes(&self.children, "children")
    }
}

fn validate_nodes(nodes: &[Node], path: &str) -> Result<(), DocumentError> {
    for (index, node) in nodes.iter().enumerate() {
        let Node::Element(element) = node else {
            continue;
        };
        let path = format!("{path}[{index}]");
        if !is_markup_name(&element.name) {
            return Err(DocumentError::InvalidName {
                what: "element",
                name: element.name.clone(),
                path,
            });
        }
        if let Some((name, _)) = element
            .attributes
            .iter()
            .find(|(name, _)| !is_markup_name(name))
        {
            return Err(DocumentError::InvalidName {
                what: "attribute",
                name: name.to_owned(),
                path,
            });
        }
        if let Some(kind) = element.tag_kind()
            && let Some(attribute) = kind
                .required_attributes()
                .iter()
                .copied()
                .find(|attr| !element.attributes.contains(attr))
        {
            return Err(DocumentError::MissingAttribute {
                tag: kind.name(),
                attribute,
                path,
            });
        }
        validate_nodes(&element.children, &format!("{path}.children"))?;
    }
    Ok(())
}
