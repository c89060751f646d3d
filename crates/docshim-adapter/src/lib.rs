//! Compatibility adapters from a legacy documentation tag dialect to the
//! primitives of the target documentation framework.
//!
//! Documents arrive pre-parsed as a tree of [`Node`]s. Each element is looked
//! up by name in a [`ComponentMap`] which layers three sources:
//!
//! 1. the framework's default components (host elements and its own primitives),
//! 2. the compat adapters for every [`TagKind`],
//! 3. an optional caller layer.
//!
//! Later layers win on name collision. Compat adapters are plain functions
//! ([`adapt`]) with no state shared between nodes.
//!
//! # Example
//!
//! ```
//! use docshim_adapter::{Document, Renderer, component_map, to_html};
//!
//! let json = r#"{"children": [
//!     {"type": "element", "name": "Warning", "children": [
//!         {"type": "text", "value": "Back up first."}
//!     ]}
//! ]}"#;
//!
//! let document = Document::from_json(json).unwrap();
//! let renderer = Renderer::new(component_map(None));
//! let output = renderer.render(&document).unwrap();
//!
//! assert_eq!(
//!     to_html(&output),
//!     r#"<div class="fd-callout" data-type="warn">Back up first.</div>"#
//! );
//! ```

mod adapter;
mod html;
mod node;
mod output;
mod registry;
mod render;
mod tag;

pub use adapter::{ACCORDION_GROUP_CLASS, FRAME_CLASS, adapt};
pub use html::{escape_html, to_html, write_html};
pub use node::{AttrValue, Attributes, Document, DocumentError, Element, Node, is_markup_name};
pub use output::{
    Block, Callout, CalloutType, Card, Cards, ColumnTemplate, Disclosure, HostElement, Icon,
    Output,
};
pub use registry::{Component, ComponentFn, ComponentMap, Layer, NativeComponent, component_map};
pub use render::{RenderError, Renderer};
pub use tag::{CalloutVariant, TagKind, TagNode};
