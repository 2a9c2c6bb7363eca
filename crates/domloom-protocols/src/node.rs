//! Raw document records and their closed decode.
//!
//! [`RawNode`] mirrors the loosely typed record returned by a full document
//! fetch (`DOM.getDocument` with `depth: -1, pierce: true`). Callers are
//! expected to call [`RawNode::decode`] once per node and branch on the
//! resulting [`RawNodeKind`] instead of probing optional fields.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Numeric node kinds used by the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i64)]
pub enum NodeType {
    Element = 1,
    Text = 3,
    Comment = 8,
    Document = 9,
    Doctype = 10,
    DocumentFragment = 11,
}

impl NodeType {
    pub fn from_raw(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::Element),
            3 => Some(Self::Text),
            8 => Some(Self::Comment),
            9 => Some(Self::Document),
            10 => Some(Self::Doctype),
            11 => Some(Self::DocumentFragment),
            _ => None,
        }
    }
}

/// Node record as it arrives on the wire.
///
/// Identity fields are optional here so a record without them can be reported
/// as a structural error instead of a generic deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    pub node_id: Option<i64>,
    pub backend_node_id: Option<i64>,
    #[serde(default)]
    pub node_type: i64,
    #[serde(default)]
    pub node_name: String,
    pub local_name: Option<String>,
    pub node_value: Option<String>,
    pub attributes: Option<Vec<String>>,
    pub children: Option<Vec<RawNode>>,
    pub shadow_roots: Option<Vec<RawNode>>,
    pub content_document: Option<Box<RawNode>>,
    #[serde(rename = "documentURL")]
    pub document_url: Option<String>,
    pub frame_id: Option<String>,
}

/// The two identifiers every node must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIds {
    /// Valid only within the response that produced it.
    pub node_id: i64,
    /// Stable for the node's lifetime within its frame.
    pub backend_node_id: i64,
}

/// Element payload of a decoded node.
#[derive(Debug, Clone)]
pub struct RawElement<'a> {
    pub ids: NodeIds,
    /// Lowercased tag name.
    pub tag: String,
    /// Attribute pairs in source order.
    pub attributes: Vec<(String, String)>,
    pub children: &'a [RawNode],
    pub shadow_roots: &'a [RawNode],
    pub content_document: Option<&'a RawNode>,
}

/// Closed decode of a [`RawNode`].
#[derive(Debug, Clone)]
pub enum RawNodeKind<'a> {
    Document {
        ids: NodeIds,
        document_url: Option<&'a str>,
        children: &'a [RawNode],
    },
    Doctype,
    Comment,
    Element(RawElement<'a>),
    Text {
        ids: NodeIds,
        value: &'a str,
    },
    ShadowRoot {
        ids: NodeIds,
        children: &'a [RawNode],
    },
    Unsupported {
        node_type: i64,
        node_name: &'a str,
    },
}

impl RawNode {
    /// Identity of this node, failing when either identifier is absent.
    pub fn ids(&self) -> Result<NodeIds, ProtocolError> {
        let node_id = self.node_id.ok_or_else(|| ProtocolError::MissingField {
            field: "nodeId",
            node_name: self.node_name.clone(),
        })?;
        let backend_node_id = self
            .backend_node_id
            .ok_or_else(|| ProtocolError::MissingField {
                field: "backendNodeId",
                node_name: self.node_name.clone(),
            })?;
        Ok(NodeIds {
            node_id,
            backend_node_id,
        })
    }

    /// Children in source order (empty when the field is absent).
    pub fn children(&self) -> &[RawNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Decode into the closed node kind.
    ///
    /// Identity is validated for every kind, including the ones the caller
    /// will drop, so a malformed response is detected wherever it occurs.
    pub fn decode(&self) -> Result<RawNodeKind<'_>, ProtocolError> {
        let ids = self.ids()?;

        let kind = match NodeType::from_raw(self.node_type) {
            Some(NodeType::Document) => RawNodeKind::Document {
                ids,
                document_url: self.document_url.as_deref(),
                children: self.children(),
            },
            Some(NodeType::Doctype) => RawNodeKind::Doctype,
            Some(NodeType::Comment) => RawNodeKind::Comment,
            Some(NodeType::Element) => RawNodeKind::Element(RawElement {
                ids,
                tag: self.node_name.to_lowercase(),
                attributes: attribute_pairs(self.attributes.as_deref().unwrap_or(&[])),
                children: self.children(),
                shadow_roots: self.shadow_roots.as_deref().unwrap_or(&[]),
                content_document: self.content_document.as_deref(),
            }),
            Some(NodeType::Text) => RawNodeKind::Text {
                ids,
                value: self.node_value.as_deref().unwrap_or(""),
            },
            Some(NodeType::DocumentFragment) => RawNodeKind::ShadowRoot {
                ids,
                children: self.children(),
            },
            None => RawNodeKind::Unsupported {
                node_type: self.node_type,
                node_name: &self.node_name,
            },
        };
        Ok(kind)
    }
}

/// Pair up a flat `[name, value, name, value, ...]` attribute array.
/// A trailing name without a value is ignored.
pub fn attribute_pairs(flat: &[String]) -> Vec<(String, String)> {
    flat.chunks_exact(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect()
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
