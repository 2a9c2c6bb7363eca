use super::ElementRecord;
use crate::model::ElementRef;

/// A `## tag` heading per element followed by a bullet list of its fields.
pub fn to_markdown(elements: &[ElementRef<'_>]) -> String {
    elements
        .iter()
        .map(|element| {
            let record = ElementRecord::from_element(element);
            let mut lines = vec![
                format!("## {}", record.tag),
                format!("- nid: {}", record.node_id),
                format!("- bid: {}", record.backend_node_id),
                format!("- fid: {}", record.frame_key),
            ];
            if let Some(parent) = record.parent_backend_node_id {
                lines.push(format!("- p: {}", parent));
            }
            if !record.text.is_empty() {
                lines.push(format!("- tx: {}", record.text.replace('\n', " ")));
            }
            if let Some(aria) = record.aria_label {
                lines.push(format!("- aria: {}", aria));
            }
            lines.push(format!("- int: {}", record.interactive));
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
