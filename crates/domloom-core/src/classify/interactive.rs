//! Interactivity heuristics: an ordered chain of accept rules behind two
//! reject gates (`pointer-events: none`, and disabled native controls).

use crate::model::{ElementNode, Node};

pub const INTERACTIVE_CURSORS: &[&str] = &[
    "pointer",
    "move",
    "text",
    "grab",
    "grabbing",
    "cell",
    "copy",
    "alias",
    "all-scroll",
    "col-resize",
    "context-menu",
    "crosshair",
    "e-resize",
    "ew-resize",
    "help",
    "n-resize",
    "ne-resize",
    "nesw-resize",
    "ns-resize",
    "nw-resize",
    "nwse-resize",
    "row-resize",
    "s-resize",
    "se-resize",
    "sw-resize",
    "vertical-text",
    "w-resize",
    "zoom-in",
    "zoom-out",
];

pub const NON_INTERACTIVE_CURSORS: &[&str] =
    &["not-allowed", "no-drop", "wait", "progress", "initial", "inherit"];

pub const INTERACTIVE_TAGS: &[&str] = &[
    "a", "button", "input", "select", "textarea", "details", "summary", "label", "option",
    "optgroup", "fieldset", "legend",
];

pub const INTERACTIVE_ARIA_ROLES: &[&str] = &[
    "button",
    "link",
    "menuitem",
    "menuitemradio",
    "menuitemcheckbox",
    "radio",
    "checkbox",
    "tab",
    "switch",
    "slider",
    "spinbutton",
    "combobox",
    "searchbox",
    "textbox",
    "listbox",
    "option",
    "scrollbar",
    "treeitem",
    "gridcell",
    "columnheader",
    "rowheader",
];

const DISABLING_ATTRIBUTES: &[&str] = &["disabled", "readonly"];
const MOUSE_EVENT_ATTRIBUTES: &[&str] = &["onclick", "onmousedown", "onmouseup", "ondblclick"];
const INTERACTIVE_CLASS_KEYWORDS: &[&str] = &["button", "dropdown-toggle"];
const INTERACTIVE_DATA_ATTRIBUTES: &[&str] =
    &["data-index", "data-toggle", "data-action", "data-onclick", "data-click"];
const DATA_ATTRIBUTE_KEYWORDS: &[&str] = &["click", "action", "toggle", "trigger", "handler"];
const SEMANTIC_ATTRIBUTES: &[&str] = &["aria-label", "aria-labelledby", "aria-describedby"];
const EMPTY_HREFS: &[&str] = &["", "#", "javascript:void(0)", "javascript:;"];

/// False for text nodes; otherwise see [`element_is_interactive`].
pub fn is_interactive(node: &Node) -> bool {
    node.as_element().is_some_and(element_is_interactive)
}

pub fn element_is_interactive(element: &ElementNode) -> bool {
    if element.style("pointer-events") == Some("none") {
        return false;
    }

    if has_interactive_cursor(element) || is_link(element) || has_focusable_tabindex(element) {
        return true;
    }

    if INTERACTIVE_TAGS.contains(&element.tag.as_str()) {
        let cursor = element.style("cursor").unwrap_or("");
        return !NON_INTERACTIVE_CURSORS.contains(&cursor) && !is_disabled(element);
    }

    has_interactive_role(element)
        || is_editable(element)
        || has_interactive_markers(element)
        || has_any(element, MOUSE_EVENT_ATTRIBUTES)
        || has_any(element, SEMANTIC_ATTRIBUTES)
}

/// Never true for the document root element.
fn has_interactive_cursor(element: &ElementNode) -> bool {
    element.tag != "html"
        && element
            .style("cursor")
            .is_some_and(|cursor| INTERACTIVE_CURSORS.contains(&cursor))
}

pub(super) fn is_link(element: &ElementNode) -> bool {
    element.tag == "a"
        && element
            .attribute("href")
            .is_some_and(|href| !EMPTY_HREFS.contains(&href))
}

fn has_focusable_tabindex(element: &ElementNode) -> bool {
    element
        .attribute("tabindex")
        .and_then(|value| value.trim().parse::<i64>().ok())
        .is_some_and(|tabindex| tabindex >= 0)
}

fn is_disabled(element: &ElementNode) -> bool {
    DISABLING_ATTRIBUTES.iter().any(|name| {
        element
            .attribute(name)
            .is_some_and(|value| value.is_empty() || value == "true")
    })
}

fn has_interactive_role(element: &ElementNode) -> bool {
    ["role", "aria-role"].iter().any(|name| {
        element
            .attribute(name)
            .is_some_and(|role| INTERACTIVE_ARIA_ROLES.contains(&role))
    })
}

fn is_editable(element: &ElementNode) -> bool {
    element.attribute("contenteditable") == Some("true")
        && element.style("user-select") != Some("none")
}

fn has_interactive_markers(element: &ElementNode) -> bool {
    let class = element.attribute("class").unwrap_or("");
    if INTERACTIVE_CLASS_KEYWORDS
        .iter()
        .any(|keyword| class.contains(keyword))
    {
        return true;
    }

    if has_any(element, INTERACTIVE_DATA_ATTRIBUTES)
        || element.attribute("data-toggle") == Some("dropdown")
        || element.attribute("aria-haspopup") == Some("true")
    {
        return true;
    }

    element.attributes.keys().any(|name| {
        let name = name.to_ascii_lowercase();
        name.starts_with("data-")
            && DATA_ATTRIBUTE_KEYWORDS
                .iter()
                .any(|keyword| name.contains(keyword))
    })
}

fn has_any(element: &ElementNode, names: &[&str]) -> bool {
    names
        .iter()
        .any(|name| element.attributes.contains_key(*name))
}
