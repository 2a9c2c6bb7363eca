//! Node types stored in the tree arena.

use std::collections::HashMap;
use std::fmt;

use domloom_protocols::{FrameKey, NodeIds};
use serde_json::{Map, Value};

use super::geometry::BoundingBox;

/// Index of a node inside its [`DomTree`](super::DomTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The only tree-wide unique key of an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementIdentity {
    pub frame_key: FrameKey,
    pub backend_node_id: i64,
}

impl ElementIdentity {
    pub fn new(frame_key: FrameKey, backend_node_id: i64) -> Self {
        Self {
            frame_key,
            backend_node_id,
        }
    }
}

impl fmt::Display for ElementIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.backend_node_id, self.frame_key)
    }
}

/// An element of the unified tree.
#[derive(Debug, Clone)]
pub struct ElementNode {
    /// Per-response id, kept for diagnostics and serialization.
    pub node_id: i64,
    pub backend_node_id: i64,
    pub frame_key: FrameKey,
    /// Lowercased tag name.
    pub tag: String,
    pub attributes: HashMap<String, String>,
    /// Space-joined trimmed text of the direct text children.
    pub text_content: String,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub computed_styles: HashMap<String, String>,
    /// Open-ended derived properties (`offsetRects`, ...).
    pub computed_properties: Map<String, Value>,
    pub bounding_box: Option<BoundingBox>,
    /// Higher values are drawn later, on top.
    pub paint_order: Option<i64>,
    pub is_visible: Option<bool>,
    pub is_interactive: Option<bool>,
    /// Set once a snapshot record was applied to this element.
    pub(crate) enriched: bool,
}

impl ElementNode {
    pub fn new(
        ids: NodeIds,
        frame_key: FrameKey,
        tag: impl Into<String>,
        attributes: HashMap<String, String>,
    ) -> Self {
        Self {
            node_id: ids.node_id,
            backend_node_id: ids.backend_node_id,
            frame_key,
            tag: tag.into(),
            attributes,
            text_content: String::new(),
            children: Vec::new(),
            parent: None,
            computed_styles: HashMap::new(),
            computed_properties: Map::new(),
            bounding_box: None,
            paint_order: None,
            is_visible: None,
            is_interactive: None,
            enriched: false,
        }
    }

    pub fn identity(&self) -> ElementIdentity {
        ElementIdentity::new(self.frame_key.clone(), self.backend_node_id)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn style(&self, name: &str) -> Option<&str> {
        self.computed_styles.get(name).map(String::as_str)
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_enriched(&self) -> bool {
        self.enriched
    }

    /// `aria-label` when present and different from the trimmed text.
    pub fn distinct_aria_label(&self) -> Option<&str> {
        self.attribute("aria-label")
            .filter(|label| !label.is_empty() && *label != self.text_content.trim())
    }
}

/// A non-empty, trimmed text leaf.
#[derive(Debug, Clone)]
pub struct TextNode {
    pub node_id: i64,
    pub backend_node_id: i64,
    pub frame_key: FrameKey,
    pub text: String,
    pub(crate) parent: Option<NodeId>,
}

impl TextNode {
    pub fn new(ids: NodeIds, frame_key: FrameKey, text: impl Into<String>) -> Self {
        Self {
            node_id: ids.node_id,
            backend_node_id: ids.backend_node_id,
            frame_key,
            text: text.into(),
            parent: None,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// A tree node.
#[derive(Debug, Clone)]
pub enum Node {
    Element(ElementNode),
    Text(TextNode),
}

impl Node {
    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextNode> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        match self {
            Node::Element(element) => element.parent,
            Node::Text(text) => text.parent,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }
}
