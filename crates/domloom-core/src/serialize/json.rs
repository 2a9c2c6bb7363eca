use serde::Serialize;

use super::ElementRecord;
use crate::error::DomError;
use crate::model::ElementRef;

#[derive(Serialize)]
struct JsonDocument<'a> {
    n: Vec<JsonNode<'a>>,
}

#[derive(Serialize)]
struct JsonNode<'a> {
    nid: i64,
    bid: i64,
    fid: &'a str,
    t: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    p: Option<i64>,
    #[serde(skip_serializing_if = "str::is_empty")]
    tx: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    aria: Option<&'a str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    int: bool,
}

/// `{"n":[...]}` with compact separators.
pub fn to_json(elements: &[ElementRef<'_>]) -> Result<String, DomError> {
    let n = elements
        .iter()
        .map(|element| {
            let record = ElementRecord::from_element(element);
            JsonNode {
                nid: record.node_id,
                bid: record.backend_node_id,
                fid: record.frame_key,
                t: record.tag,
                p: record.parent_backend_node_id,
                tx: record.text,
                aria: record.aria_label,
                int: record.interactive,
            }
        })
        .collect();
    Ok(serde_json::to_string(&JsonDocument { n })?)
}
