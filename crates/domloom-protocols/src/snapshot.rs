//! Columnar layout/style snapshot records (`DOMSnapshot.captureSnapshot`).
//!
//! Every string in a snapshot is interned in [`CaptureSnapshot::strings`];
//! the per-document arrays carry indices into that table.

use serde::{Deserialize, Serialize};

/// Full snapshot response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptureSnapshot {
    #[serde(default)]
    pub documents: Vec<DocumentSnapshot>,
    /// Global interned string table.
    #[serde(default)]
    pub strings: Vec<String>,
}

/// Snapshot of one document (page or same-process iframe).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    /// Index of the document URL in the string table.
    #[serde(rename = "documentURL")]
    pub document_url: Option<i64>,
    #[serde(default)]
    pub nodes: NodeTreeSnapshot,
    #[serde(default)]
    pub layout: LayoutTreeSnapshot,
    /// Per-node style vectors, present in some response shapes.
    pub computed_styles: Option<ComputedStylesSnapshot>,
}

/// Parallel arrays indexed by node index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTreeSnapshot {
    #[serde(default)]
    pub parent_index: Vec<i64>,
    #[serde(default)]
    pub node_type: Vec<i64>,
    #[serde(default)]
    pub backend_node_id: Vec<i64>,
}

/// Parallel arrays indexed by layout index (rendered nodes only).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutTreeSnapshot {
    /// Node index of each layout entry.
    #[serde(default)]
    pub node_index: Vec<i64>,
    /// Style vector of each layout entry, positions into the string table.
    #[serde(default)]
    pub styles: Vec<Vec<i64>>,
    /// `[x, y, width, height]` of each layout entry.
    #[serde(default)]
    pub bounds: Vec<Vec<f64>>,
    #[serde(default)]
    pub paint_orders: Vec<i64>,
}

/// Style vectors keyed by node index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComputedStylesSnapshot {
    #[serde(default)]
    pub index: Vec<i64>,
    #[serde(default)]
    pub value: Vec<Vec<i64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_deserialize() {
        let json = r#"{
            "documents": [{
                "documentURL": 0,
                "nodes": {"backendNodeId": [1, 2], "nodeType": [9, 1], "parentIndex": [-1, 0]},
                "layout": {
                    "nodeIndex": [1],
                    "styles": [[1]],
                    "bounds": [[0, 0, 800, 600]],
                    "paintOrders": [3]
                }
            }],
            "strings": ["https://example.com/", "block"]
        }"#;
        let snapshot: CaptureSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.strings.len(), 2);
        let doc = &snapshot.documents[0];
        assert_eq!(doc.document_url, Some(0));
        assert_eq!(doc.nodes.backend_node_id, vec![1, 2]);
        assert_eq!(doc.layout.bounds[0][2], 800.0);
        assert_eq!(doc.layout.paint_orders, vec![3]);
        assert!(doc.computed_styles.is_none());
    }

    #[test]
    fn test_snapshot_missing_sections_default() {
        let snapshot: CaptureSnapshot = serde_json::from_str(r#"{"documents": [{}]}"#).unwrap();
        assert!(snapshot.strings.is_empty());
        assert!(snapshot.documents[0].layout.node_index.is_empty());
    }
}
