//! Pure decode of a columnar snapshot into per-element records.

use std::collections::HashMap;

use domloom_protocols::{CaptureSnapshot, DocumentSnapshot, NodeType};
use thiserror::Error;

use crate::model::BoundingBox;

/// A snapshot whose shape does not match what was requested.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnrichmentDecodeError {
    #[error("document {document}: node arrays differ in length ({types} types, {ids} ids)")]
    NodeArrays {
        document: usize,
        types: usize,
        ids: usize,
    },

    #[error("document {document}: layout entry {layout} points at missing node {node}")]
    LayoutNodeIndex {
        document: usize,
        layout: usize,
        node: i64,
    },

    #[error("document {document}: {section} has {actual} entries, expected {expected}")]
    ParallelArrays {
        document: usize,
        section: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("node {node}: style vector has {actual} values, expected {expected}")]
    StyleLength {
        node: i64,
        expected: usize,
        actual: usize,
    },

    #[error("node {node}: string index {index} out of range ({len} strings)")]
    StringIndex { node: i64, index: i64, len: usize },

    #[error("node {node}: bounds have {len} values, expected 4")]
    Bounds { node: i64, len: usize },
}

/// Snapshot data for one element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedNode {
    pub backend_node_id: i64,
    pub computed_styles: HashMap<String, String>,
    pub bounding_box: Option<BoundingBox>,
    pub paint_order: Option<i64>,
}

/// Decode every element of every document in `snapshot`.
///
/// Style vectors are positional: value `i` belongs to `styles[i]`. They are
/// read from `computedStyles` when the response carries it, otherwise from
/// the layout section. Negative string indices mean "no value".
pub fn decode_snapshot(
    snapshot: &CaptureSnapshot,
    styles: &[String],
) -> Result<Vec<DecodedNode>, EnrichmentDecodeError> {
    let mut decoded = Vec::new();
    for (index, document) in snapshot.documents.iter().enumerate() {
        decode_document(index, document, &snapshot.strings, styles, &mut decoded)?;
    }
    Ok(decoded)
}

fn decode_document(
    document_index: usize,
    document: &DocumentSnapshot,
    strings: &[String],
    styles: &[String],
    out: &mut Vec<DecodedNode>,
) -> Result<(), EnrichmentDecodeError> {
    let nodes = &document.nodes;
    let layout = &document.layout;
    let node_count = nodes.backend_node_id.len();

    if nodes.node_type.len() != node_count {
        return Err(EnrichmentDecodeError::NodeArrays {
            document: document_index,
            types: nodes.node_type.len(),
            ids: node_count,
        });
    }
    check_parallel(document_index, "layout.bounds", layout.node_index.len(), layout.bounds.len())?;
    if !layout.paint_orders.is_empty() {
        check_parallel(
            document_index,
            "layout.paintOrders",
            layout.node_index.len(),
            layout.paint_orders.len(),
        )?;
    }

    let mut layout_by_node = HashMap::with_capacity(layout.node_index.len());
    for (layout_index, node_index) in layout.node_index.iter().enumerate() {
        match usize::try_from(*node_index) {
            Ok(node) if node < node_count => {
                layout_by_node.entry(node).or_insert(layout_index);
            }
            _ => {
                return Err(EnrichmentDecodeError::LayoutNodeIndex {
                    document: document_index,
                    layout: layout_index,
                    node: *node_index,
                });
            }
        }
    }

    let style_vectors = style_vectors(document_index, document, &layout_by_node)?;

    for node in 0..node_count {
        if nodes.node_type[node] != NodeType::Element as i64 {
            continue;
        }
        let backend_node_id = nodes.backend_node_id[node];
        let mut record = DecodedNode {
            backend_node_id,
            ..DecodedNode::default()
        };

        if let Some(vector) = style_vectors.get(&node) {
            record.computed_styles = decode_styles(backend_node_id, vector, strings, styles)?;
        }

        if let Some(&layout_index) = layout_by_node.get(&node) {
            let bounds = &layout.bounds[layout_index];
            record.bounding_box = Some(BoundingBox::from_bounds(bounds).ok_or(
                EnrichmentDecodeError::Bounds {
                    node: backend_node_id,
                    len: bounds.len(),
                },
            )?);
            record.paint_order = layout.paint_orders.get(layout_index).copied();
        }

        out.push(record);
    }

    Ok(())
}

/// Node index to raw style vector, from whichever section the response carries.
fn style_vectors<'d>(
    document_index: usize,
    document: &'d DocumentSnapshot,
    layout_by_node: &HashMap<usize, usize>,
) -> Result<HashMap<usize, &'d [i64]>, EnrichmentDecodeError> {
    let mut vectors = HashMap::new();

    if let Some(computed) = &document.computed_styles {
        check_parallel(
            document_index,
            "computedStyles.value",
            computed.index.len(),
            computed.value.len(),
        )?;
        for (node, vector) in computed.index.iter().zip(&computed.value) {
            if let Ok(node) = usize::try_from(*node) {
                vectors.insert(node, vector.as_slice());
            }
        }
        return Ok(vectors);
    }

    let layout = &document.layout;
    if layout.styles.is_empty() {
        return Ok(vectors);
    }
    check_parallel(document_index, "layout.styles", layout.node_index.len(), layout.styles.len())?;
    for (&node, &layout_index) in layout_by_node {
        vectors.insert(node, layout.styles[layout_index].as_slice());
    }
    Ok(vectors)
}

fn decode_styles(
    backend_node_id: i64,
    vector: &[i64],
    strings: &[String],
    styles: &[String],
) -> Result<HashMap<String, String>, EnrichmentDecodeError> {
    if vector.len() != styles.len() {
        return Err(EnrichmentDecodeError::StyleLength {
            node: backend_node_id,
            expected: styles.len(),
            actual: vector.len(),
        });
    }

    let mut decoded = HashMap::with_capacity(styles.len());
    for (name, &index) in styles.iter().zip(vector) {
        if index < 0 {
            continue;
        }
        let value = usize::try_from(index)
            .ok()
            .and_then(|i| strings.get(i))
            .ok_or(EnrichmentDecodeError::StringIndex {
                node: backend_node_id,
                index,
                len: strings.len(),
            })?;
        decoded.insert(name.clone(), value.clone());
    }
    Ok(decoded)
}

fn check_parallel(
    document: usize,
    section: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), EnrichmentDecodeError> {
    if expected == actual {
        Ok(())
    } else {
        Err(EnrichmentDecodeError::ParallelArrays {
            document,
            section,
            expected,
            actual,
        })
    }
}
