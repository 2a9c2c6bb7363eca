//! Unified tree model.
//!
//! The tree is an arena of [`Node`]s addressed by [`NodeId`]. Children are
//! owned through index lists, parents are plain back-indices used for
//! ancestor walks only.

mod geometry;
mod node;
mod query;
mod tree;

pub use geometry::BoundingBox;
pub use node::{ElementIdentity, ElementNode, Node, NodeId, TextNode};
pub use query::ElementFilter;
pub use tree::{DomTree, ElementRef};

pub(crate) use tree::TreeArena;

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
