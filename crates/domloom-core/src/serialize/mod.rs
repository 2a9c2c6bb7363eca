//! Compact element-list encodings.
//!
//! All four projections take the same input (any element list produced by a
//! tree query) and emit the same fields per element: identity pair, tag,
//! parent identity, trimmed text, a distinct aria-label, the interactive flag
//! and the owning frame key.

mod delimited;
mod html;
mod json;
mod markdown;

use std::fmt;
use std::str::FromStr;

use crate::error::DomError;
use crate::model::ElementRef;

pub use delimited::to_csv;
pub use html::to_html;
pub use json::to_json;
pub use markdown::to_markdown;

/// Output encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Html,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "html" => Ok(Self::Html),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(DomError::InvalidOption(format!("unknown format '{}'", other))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Html => "html",
            Self::Markdown => "markdown",
        };
        f.write_str(name)
    }
}

/// Serialize `elements` in `format`.
pub fn serialize(format: OutputFormat, elements: &[ElementRef<'_>]) -> Result<String, DomError> {
    match format {
        OutputFormat::Json => to_json(elements),
        OutputFormat::Csv => to_csv(elements),
        OutputFormat::Html => Ok(to_html(elements)),
        OutputFormat::Markdown => Ok(to_markdown(elements)),
    }
}

/// Per-element projection shared by every encoding.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ElementRecord<'a> {
    pub node_id: i64,
    pub backend_node_id: i64,
    pub frame_key: &'a str,
    pub tag: &'a str,
    pub parent_backend_node_id: Option<i64>,
    pub text: &'a str,
    pub aria_label: Option<&'a str>,
    pub interactive: bool,
}

impl<'a> ElementRecord<'a> {
    pub(crate) fn from_element(element: &ElementRef<'a>) -> Self {
        let node = element.element();
        Self {
            node_id: node.node_id,
            backend_node_id: node.backend_node_id,
            frame_key: node.frame_key.as_str(),
            tag: &node.tag,
            parent_backend_node_id: element.parent().map(|parent| parent.backend_node_id),
            text: node.text_content.trim(),
            aria_label: node.distinct_aria_label(),
            interactive: node.is_interactive == Some(true),
        }
    }
}

#[cfg(test)]
#[path = "serialize_tests.rs"]
mod tests;
