use serde_json::Value;

use crate::model::{ElementNode, Node};

/// False for text nodes; otherwise see [`element_is_visible`].
pub fn is_visible(node: &Node) -> bool {
    node.as_element().is_some_and(element_is_visible)
}

/// An element is visible when it is not `display: none` or
/// `visibility: hidden` and has a rectangle with positive width and height.
pub fn element_is_visible(element: &ElementNode) -> bool {
    if element.style("display") == Some("none") || element.style("visibility") == Some("hidden") {
        return false;
    }

    match element.computed_properties.get("offsetRects") {
        Some(Value::Array(rects)) => rects.iter().any(rect_has_area),
        _ => element.bounding_box.is_some_and(|bbox| bbox.has_area()),
    }
}

fn rect_has_area(rect: &Value) -> bool {
    let dimension = |key: &str| rect.get(key).and_then(Value::as_f64).unwrap_or(0.0);
    dimension("width") > 0.0 && dimension("height") > 0.0
}
