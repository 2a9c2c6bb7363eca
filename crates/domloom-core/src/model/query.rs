//! Traversal-based element queries.
//!
//! Every query re-walks the tree from the root in document order; nothing is
//! cached between calls.

use std::collections::BTreeMap;
use std::str::FromStr;

use super::node::ElementNode;
use super::tree::{DomTree, ElementRef};
use crate::error::DomError;
use crate::serialize::{self, OutputFormat};

/// Named element selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementFilter {
    All,
    Visible,
    Interactive,
    WithBoundingBox,
    MinPaintOrder(i64),
}

impl ElementFilter {
    /// Parse a filter name; `min_paint_order` feeds the `paint` filter.
    pub fn parse(name: &str, min_paint_order: i64) -> Result<Self, DomError> {
        match name.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "visible" => Ok(Self::Visible),
            "interactive" => Ok(Self::Interactive),
            "bbox" | "bounding-box" => Ok(Self::WithBoundingBox),
            "paint" | "paint-order" => Ok(Self::MinPaintOrder(min_paint_order)),
            other => Err(DomError::InvalidOption(format!("unknown filter '{}'", other))),
        }
    }

    pub fn matches(&self, element: &ElementNode) -> bool {
        match self {
            Self::All => true,
            Self::Visible => element.is_visible == Some(true),
            Self::Interactive => element.is_interactive == Some(true),
            Self::WithBoundingBox => element.bounding_box.is_some(),
            Self::MinPaintOrder(min) => element.paint_order.is_some_and(|p| p >= *min),
        }
    }
}

impl FromStr for ElementFilter {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, 0)
    }
}

impl DomTree {
    /// Elements satisfying `predicate`, in document order.
    pub fn elements_matching<F>(&self, predicate: F) -> Vec<ElementRef<'_>>
    where
        F: Fn(&ElementNode) -> bool,
    {
        self.element_ids()
            .into_iter()
            .filter_map(|id| self.element_ref(id))
            .filter(|element| predicate(element))
            .collect()
    }

    pub fn all_elements(&self) -> Vec<ElementRef<'_>> {
        self.elements_matching(|_| true)
    }

    pub fn visible_elements(&self) -> Vec<ElementRef<'_>> {
        self.filter(ElementFilter::Visible)
    }

    pub fn interactive_elements(&self) -> Vec<ElementRef<'_>> {
        self.filter(ElementFilter::Interactive)
    }

    pub fn elements_with_bounding_box(&self) -> Vec<ElementRef<'_>> {
        self.filter(ElementFilter::WithBoundingBox)
    }

    pub fn elements_by_min_paint_order(&self, min_paint_order: i64) -> Vec<ElementRef<'_>> {
        self.filter(ElementFilter::MinPaintOrder(min_paint_order))
    }

    pub fn filter(&self, filter: ElementFilter) -> Vec<ElementRef<'_>> {
        self.elements_matching(|element| filter.matches(element))
    }

    /// First element, in document order, whose `id` attribute equals `id`.
    pub fn find_by_attribute_id(&self, id: &str) -> Option<ElementRef<'_>> {
        self.element_ids()
            .into_iter()
            .filter_map(|node| self.element_ref(node))
            .find(|element| element.attribute("id") == Some(id))
    }

    /// Interactive elements keyed by their per-response node id.
    pub fn interactive_selector_map(&self) -> BTreeMap<i64, ElementRef<'_>> {
        self.interactive_elements()
            .into_iter()
            .map(|element| (element.node_id, element))
            .collect()
    }

    /// Serialize the elements selected by `filter`.
    pub fn translate(&self, filter: ElementFilter, format: OutputFormat) -> Result<String, DomError> {
        serialize::serialize(format, &self.filter(filter))
    }
}
