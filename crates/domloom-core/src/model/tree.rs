//! Tree arena and borrowed element views.

use std::collections::HashMap;
use std::ops::Deref;

use domloom_protocols::FrameKey;

use super::node::{ElementIdentity, ElementNode, Node, NodeId, TextNode};

/// Mutable arena used while a tree is under construction.
#[derive(Debug, Default)]
pub(crate) struct TreeArena {
    nodes: Vec<Node>,
    index: HashMap<ElementIdentity, NodeId>,
}

impl TreeArena {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert an element under `parent` (not yet appended to it).
    /// Returns the identity back when it is already taken.
    pub(crate) fn insert_element(
        &mut self,
        mut element: ElementNode,
        parent: Option<NodeId>,
    ) -> Result<NodeId, ElementIdentity> {
        let identity = element.identity();
        if self.index.contains_key(&identity) {
            return Err(identity);
        }
        let id = NodeId(self.nodes.len());
        element.parent = parent;
        self.nodes.push(Node::Element(element));
        self.index.insert(identity, id);
        Ok(id)
    }

    pub(crate) fn insert_text(&mut self, mut text: TextNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        text.parent = parent;
        self.nodes.push(Node::Text(text));
        id
    }

    /// Append `child` to `parent`, folding text leaves into the parent's
    /// aggregated text.
    pub(crate) fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let text = match self.nodes.get(child.0) {
            Some(Node::Text(text)) => Some(text.text.clone()),
            _ => None,
        };
        if let Some(Node::Element(element)) = self.nodes.get_mut(parent.0) {
            element.children.push(child);
            if let Some(text) = text {
                if !element.text_content.is_empty() {
                    element.text_content.push(' ');
                }
                element.text_content.push_str(&text);
            }
        }
    }

    pub(crate) fn checkpoint(&self) -> usize {
        self.nodes.len()
    }

    /// Drop every node inserted since `checkpoint`.
    ///
    /// Nodes below the checkpoint must not reference the dropped ones.
    pub(crate) fn rollback(&mut self, checkpoint: usize) {
        if checkpoint >= self.nodes.len() {
            return;
        }
        for node in self.nodes.drain(checkpoint..) {
            if let Node::Element(element) = node {
                self.index.remove(&element.identity());
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Freeze the arena. `root` must name an element.
    pub(crate) fn into_tree(self, root: NodeId) -> Option<DomTree> {
        match self.nodes.get(root.0) {
            Some(Node::Element(_)) => Some(DomTree {
                nodes: self.nodes,
                index: self.index,
                root,
            }),
            _ => None,
        }
    }
}

/// The unified, queryable tree of one page build.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
    index: HashMap<ElementIdentity, NodeId>,
    root: NodeId,
}

impl DomTree {
    /// The main document's root element.
    pub fn root(&self) -> Option<ElementRef<'_>> {
        ElementRef::new(self, self.root)
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn element_ref(&self, id: NodeId) -> Option<ElementRef<'_>> {
        ElementRef::new(self, id)
    }

    pub(crate) fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementNode> {
        match self.nodes.get_mut(id.0) {
            Some(Node::Element(element)) => Some(element),
            _ => None,
        }
    }

    /// Stable lookup by (frame key, backend id).
    pub fn element(&self, frame_key: &FrameKey, backend_node_id: i64) -> Option<ElementRef<'_>> {
        let identity = ElementIdentity::new(frame_key.clone(), backend_node_id);
        self.index
            .get(&identity)
            .and_then(|id| ElementRef::new(self, *id))
    }

    pub(crate) fn lookup(&self, frame_key: &FrameKey, backend_node_id: i64) -> Option<NodeId> {
        self.index
            .get(&ElementIdentity::new(frame_key.clone(), backend_node_id))
            .copied()
    }

    /// Number of arena nodes (elements and text).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Element ids in document order: pre-order, children in source order.
    pub(crate) fn element_ids(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if let Some(Node::Element(element)) = self.nodes.get(id.0) {
                out.push(id);
                stack.extend(element.children.iter().rev().copied());
            }
        }
        out
    }

    /// Frame keys in order of first appearance.
    pub fn frame_keys(&self) -> Vec<FrameKey> {
        let mut seen = Vec::<FrameKey>::new();
        for id in self.element_ids() {
            if let Some(Node::Element(element)) = self.nodes.get(id.0) {
                if !seen.contains(&element.frame_key) {
                    seen.push(element.frame_key.clone());
                }
            }
        }
        seen
    }
}

/// Borrowed view of one element together with its tree.
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    tree: &'a DomTree,
    id: NodeId,
    element: &'a ElementNode,
}

impl<'a> ElementRef<'a> {
    fn new(tree: &'a DomTree, id: NodeId) -> Option<Self> {
        match tree.nodes.get(id.0) {
            Some(Node::Element(element)) => Some(Self { tree, id, element }),
            _ => None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn element(&self) -> &'a ElementNode {
        self.element
    }

    pub fn parent(&self) -> Option<ElementRef<'a>> {
        self.element
            .parent
            .and_then(|id| ElementRef::new(self.tree, id))
    }

    /// Direct children, elements and text, in source order.
    pub fn children(&self) -> impl Iterator<Item = &'a Node> + 'a {
        let tree = self.tree;
        self.element
            .children
            .iter()
            .filter_map(move |id| tree.nodes.get(id.0))
    }

    pub fn child_elements(&self) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        let tree = self.tree;
        self.element
            .children
            .iter()
            .filter_map(move |id| ElementRef::new(tree, *id))
    }

    pub fn text_children(&self) -> impl Iterator<Item = &'a TextNode> + 'a {
        self.children().filter_map(Node::as_text)
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self) -> Vec<ElementRef<'a>> {
        let mut out = Vec::new();
        let mut current = self.parent();
        while let Some(ancestor) = current {
            current = ancestor.parent();
            out.push(ancestor);
        }
        out
    }

    pub fn is_root(&self) -> bool {
        self.id == self.tree.root
    }
}

impl Deref for ElementRef<'_> {
    type Target = ElementNode;

    fn deref(&self) -> &Self::Target {
        self.element
    }
}
