use super::*;
use serde_json::json;

fn raw(value: serde_json::Value) -> RawNode {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_node_type_from_raw() {
    assert_eq!(NodeType::from_raw(1), Some(NodeType::Element));
    assert_eq!(NodeType::from_raw(11), Some(NodeType::DocumentFragment));
    assert_eq!(NodeType::from_raw(7), None);
}

#[test]
fn test_decode_document() {
    let node = raw(json!({
        "nodeId": 1,
        "backendNodeId": 1,
        "nodeType": 9,
        "nodeName": "#document",
        "documentURL": "https://example.com/",
        "children": [
            {"nodeId": 2, "backendNodeId": 2, "nodeType": 10, "nodeName": "html"}
        ]
    }));

    match node.decode().unwrap() {
        RawNodeKind::Document {
            ids,
            document_url,
            children,
        } => {
            assert_eq!(ids.node_id, 1);
            assert_eq!(document_url, Some("https://example.com/"));
            assert_eq!(children.len(), 1);
        }
        other => panic!("Expected document, got {:?}", other),
    }
}

#[test]
fn test_decode_element_lowercases_and_pairs_attributes() {
    let node = raw(json!({
        "nodeId": 5,
        "backendNodeId": 50,
        "nodeType": 1,
        "nodeName": "BUTTON",
        "attributes": ["id", "go", "class", "btn primary"]
    }));

    match node.decode().unwrap() {
        RawNodeKind::Element(element) => {
            assert_eq!(element.tag, "button");
            assert_eq!(element.ids.backend_node_id, 50);
            assert_eq!(
                element.attributes,
                vec![
                    ("id".to_string(), "go".to_string()),
                    ("class".to_string(), "btn primary".to_string()),
                ]
            );
            assert!(element.children.is_empty());
            assert!(element.content_document.is_none());
        }
        other => panic!("Expected element, got {:?}", other),
    }
}

#[test]
fn test_decode_missing_backend_id_fails() {
    let node = raw(json!({"nodeId": 3, "nodeType": 1, "nodeName": "DIV"}));
    let err = node.decode().unwrap_err();
    match err {
        ProtocolError::MissingField { field, node_name } => {
            assert_eq!(field, "backendNodeId");
            assert_eq!(node_name, "DIV");
        }
        other => panic!("Expected MissingField, got {:?}", other),
    }
}

#[test]
fn test_decode_missing_node_id_fails_even_for_comments() {
    let node = raw(json!({"backendNodeId": 3, "nodeType": 8, "nodeName": "#comment"}));
    assert!(matches!(
        node.decode(),
        Err(ProtocolError::MissingField { field: "nodeId", .. })
    ));
}

#[test]
fn test_decode_shadow_root_and_unknown() {
    let fragment = raw(json!({
        "nodeId": 9, "backendNodeId": 90, "nodeType": 11, "nodeName": "#document-fragment",
        "children": [{"nodeId": 10, "backendNodeId": 100, "nodeType": 3, "nodeValue": "x"}]
    }));
    assert!(matches!(
        fragment.decode().unwrap(),
        RawNodeKind::ShadowRoot { children, .. } if children.len() == 1
    ));

    let cdata = raw(json!({"nodeId": 11, "backendNodeId": 110, "nodeType": 4, "nodeName": "#cdata"}));
    assert!(matches!(
        cdata.decode().unwrap(),
        RawNodeKind::Unsupported { node_type: 4, .. }
    ));
}

#[test]
fn test_attribute_pairs_ignores_trailing_name() {
    let flat = vec!["href".to_string(), "#".to_string(), "dangling".to_string()];
    let pairs = attribute_pairs(&flat);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].0, "href");
}

#[test]
fn test_inline_content_document_deserializes() {
    let node = raw(json!({
        "nodeId": 20, "backendNodeId": 200, "nodeType": 1, "nodeName": "IFRAME",
        "contentDocument": {
            "nodeId": 21, "backendNodeId": 201, "nodeType": 9, "nodeName": "#document",
            "documentURL": "https://example.com/frame"
        }
    }));
    match node.decode().unwrap() {
        RawNodeKind::Element(element) => {
            let inner = element.content_document.unwrap();
            assert_eq!(inner.document_url.as_deref(), Some("https://example.com/frame"));
        }
        other => panic!("Expected element, got {:?}", other),
    }
}
