use std::fmt::Write;

use super::ElementRecord;
use crate::model::ElementRef;

/// One line per element: `<tag bid=".." fid=".." p=".." aria=".." int>text</tag>`,
/// self-closing when the element has no text.
pub fn to_html(elements: &[ElementRef<'_>]) -> String {
    elements
        .iter()
        .map(|element| render(&ElementRecord::from_element(element)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render(record: &ElementRecord<'_>) -> String {
    let mut line = format!(
        "<{} bid=\"{}\" fid=\"{}\"",
        record.tag,
        record.backend_node_id,
        escape(record.frame_key)
    );
    if let Some(parent) = record.parent_backend_node_id {
        let _ = write!(line, " p=\"{}\"", parent);
    }
    if let Some(aria) = record.aria_label {
        let _ = write!(line, " aria=\"{}\"", escape(aria));
    }
    if record.interactive {
        line.push_str(" int");
    }

    if record.text.is_empty() {
        line.push_str(" />");
    } else {
        let _ = write!(line, ">{}</{}>", escape(record.text), record.tag);
    }
    line
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
