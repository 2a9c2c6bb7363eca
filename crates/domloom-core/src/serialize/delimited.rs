use csv::{QuoteStyle, Terminator, WriterBuilder};

use super::ElementRecord;
use crate::error::DomError;
use crate::model::ElementRef;

const HEADER: [&str; 8] = ["nid", "bid", "pid", "t", "tx", "aria", "int", "fid"];

/// Pipe-delimited rows under a `nid|bid|pid|t|tx|aria|int|fid` header.
pub fn to_csv(elements: &[ElementRef<'_>]) -> Result<String, DomError> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'|')
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for element in elements {
        let record = ElementRecord::from_element(element);
        writer.write_record([
            record.node_id.to_string(),
            record.backend_node_id.to_string(),
            record
                .parent_backend_node_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            sanitize(record.tag),
            sanitize(record.text),
            record.aria_label.map(sanitize).unwrap_or_default(),
            if record.interactive { "1" } else { "0" }.to_string(),
            sanitize(record.frame_key),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DomError::Serialization(e.to_string()))?;
    let mut out =
        String::from_utf8(bytes).map_err(|e| DomError::Serialization(e.to_string()))?;
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}

/// Keep a field on one line and inside its column.
fn sanitize(value: &str) -> String {
    value
        .replace(['|', '\n', '\r'], " ")
        .trim()
        .to_string()
}
