//! Tree walker that renders a source document through a [`ComponentMap`].

use crate::node::{Document, Element, Node};
use crate::output::Output;
use crate::registry::{Component, ComponentMap};

/// Error rendering a document.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// An element names a component that is not registered.
    #[error("No component registered for <{name}> at {path}")]
    UnknownComponent {
        /// Element name.
        name: String,
        /// Location in the tree.
        path: String,
    },
}

/// Renders source trees into target primitives.
///
/// Children are rendered before their parent, so every component receives
/// rendered content. Rendering holds no state between nodes; one renderer can
/// be shared across threads.
#[derive(Debug)]
pub struct Renderer {
    components: ComponentMap,
}

impl Renderer {
    /// Create a renderer over an effective component map.
    #[must_use]
    pub fn new(components: ComponentMap) -> Self {
        Self { components }
    }

    /// The component map in use.
    #[must_use]
    pub fn components(&self) -> &ComponentMap {
        &self.components
    }

    /// Render every top-level node of a document.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownComponent`] for the first unregistered
    /// element name in document order.
    pub fn render(&self, document: &Document) -> Result<Vec<Output>, RenderError> {
        let output = self.render_nodes(&document.children, "children")?;
        tracing::debug!(nodes = output.len(), "Rendered document");
        Ok(output)
    }

    /// Render a single node.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownComponent`] if the node or a descendant
    /// names an unregistered component.
    pub fn render_node(&self, node: &Node) -> Result<Output, RenderError> {
        self.render_at(node, "node")
    }

    fn render_nodes(&self, nodes: &[Node], path: &str) -> Result<Vec<Output>, RenderError> {
        nodes
            .iter()
            .enumerate()
            .map(|(index, node)| self.render_at(node, &format!("{path}[{index}]")))
            .collect()
    }

    fn render_at(&self, node: &Node, path: &str) -> Result<Output, RenderError> {
        match node {
            Node::Text { value } => Ok(Output::text(value.clone())),
            Node::Element(element) => self.render_element(element, path),
        }
    }

    fn render_element(&self, element: &Element, path: &str) -> Result<Output, RenderError> {
        let component = self.lookup(&element.name, path)?;
        let children = self.render_nodes(&element.children, &format!("{path}.children"))?;
        Ok(component.invoke(&element.name, &element.attributes, children))
    }

    fn lookup(&self, name: &str, path: &str) -> Result<&Component, RenderError> {
        self.components
            .get(name)
            .ok_or_else(|| RenderError::UnknownComponent {
                name: name.to_owned(),
                path: path.to_owned(),
            })
    }
}
