use std::collections::HashMap;

use domloom_protocols::{FrameKey, NodeIds};
use serde_json::json;

use super::*;
use crate::model::{BoundingBox, ElementNode, Node, TextNode};

fn element(tag: &str, attrs: &[(&str, &str)], styles: &[(&str, &str)]) -> ElementNode {
    let ids = NodeIds {
        node_id: 1,
        backend_node_id: 1,
    };
    let attributes: HashMap<String, String> = attrs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let mut node = ElementNode::new(ids, FrameKey::from("https://a.example/"), tag, attributes);
    node.computed_styles = styles
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    node
}

fn with_box(mut node: ElementNode, width: f64, height: f64) -> ElementNode {
    node.bounding_box = Some(BoundingBox {
        x: 0.0,
        y: 0.0,
        width,
        height,
    });
    node
}

#[test]
fn test_visible_requires_positive_box() {
    assert!(element_is_visible(&with_box(element("div", &[], &[]), 10.0, 10.0)));
    assert!(!element_is_visible(&with_box(element("div", &[], &[]), 0.0, 10.0)));
    assert!(!element_is_visible(&element("div", &[], &[])));
}

#[test]
fn test_hidden_styles_override_box() {
    let none = with_box(element("div", &[], &[("display", "none")]), 100.0, 100.0);
    let hidden = with_box(element("div", &[], &[("visibility", "hidden")]), 100.0, 100.0);
    assert!(!element_is_visible(&none));
    assert!(!element_is_visible(&hidden));
}

#[test]
fn test_visible_reads_offset_rects() {
    let mut node = element("div", &[], &[]);
    node.computed_properties
        .insert("offsetRects".to_string(), json!([{"width": 0, "height": 5}, {"width": 3, "height": 4}]));
    assert!(element_is_visible(&node));
}

#[test]
fn test_text_nodes_are_neither() {
    let text = Node::Text(TextNode::new(
        NodeIds {
            node_id: 1,
            backend_node_id: 1,
        },
        FrameKey::from("https://a.example/"),
        "hi",
    ));
    assert!(!is_visible(&text));
    assert!(!is_interactive(&text));
}

#[test]
fn test_pointer_cursor_interactive_except_root() {
    assert!(element_is_interactive(&element("div", &[], &[("cursor", "pointer")])));
    assert!(!element_is_interactive(&element("html", &[], &[("cursor", "pointer")])));
}

#[test]
fn test_pointer_events_none_rejects_first() {
    let node = element(
        "button",
        &[("onclick", "go()")],
        &[("cursor", "pointer"), ("pointer-events", "none")],
    );
    assert!(!element_is_interactive(&node));
}

#[test]
fn test_links() {
    assert!(element_is_interactive(&element("a", &[("href", "/cart")], &[])));
    for href in ["", "#", "javascript:void(0)", "javascript:;"] {
        assert!(!interactive::is_link(&element("a", &[("href", href)], &[])));
    }
    assert!(!interactive::is_link(&element("a", &[], &[])));
    // Anchors are native controls, so an empty href still counts through the tag rule.
    assert!(element_is_interactive(&element("a", &[("href", "#")], &[])));
    assert!(!element_is_interactive(&element(
        "a",
        &[("href", "#")],
        &[("cursor", "not-allowed")]
    )));
}

#[test]
fn test_tabindex() {
    assert!(element_is_interactive(&element("div", &[("tabindex", "0")], &[])));
    assert!(!element_is_interactive(&element("div", &[("tabindex", "-1")], &[])));
    assert!(!element_is_interactive(&element("div", &[("tabindex", "abc")], &[])));
}

#[test]
fn test_native_controls_and_disabled() {
    assert!(element_is_interactive(&element("input", &[], &[])));
    assert!(!element_is_interactive(&element("input", &[("disabled", "")], &[])));
    assert!(!element_is_interactive(&element("textarea", &[("readonly", "true")], &[])));
    assert!(element_is_interactive(&element("input", &[("disabled", "false")], &[])));
    assert!(!element_is_interactive(&element("button", &[], &[("cursor", "wait")])));
}

#[test]
fn test_roles_and_editable() {
    assert!(element_is_interactive(&element("div", &[("role", "tab")], &[])));
    assert!(element_is_interactive(&element("div", &[("aria-role", "switch")], &[])));
    assert!(!element_is_interactive(&element("div", &[("role", "banner")], &[])));
    assert!(element_is_interactive(&element("div", &[("contenteditable", "true")], &[])));
    assert!(!element_is_interactive(&element(
        "div",
        &[("contenteditable", "true")],
        &[("user-select", "none")]
    )));
}

#[test]
fn test_class_and_data_markers() {
    assert!(element_is_interactive(&element("div", &[("class", "nav-button big")], &[])));
    assert!(element_is_interactive(&element("span", &[("data-toggle", "collapse")], &[])));
    assert!(element_is_interactive(&element("span", &[("aria-haspopup", "true")], &[])));
    assert!(element_is_interactive(&element("span", &[("data-track-click", "1")], &[])));
    assert!(!element_is_interactive(&element("span", &[("data-id", "7")], &[])));
}

#[test]
fn test_mouse_and_semantic_attributes() {
    assert!(element_is_interactive(&element("div", &[("onmousedown", "x()")], &[])));
    assert!(element_is_interactive(&element("div", &[("aria-label", "Close")], &[])));
    assert!(!element_is_interactive(&element("div", &[("title", "Close")], &[])));
}
