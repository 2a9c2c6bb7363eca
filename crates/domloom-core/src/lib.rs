//! # domloom Core
//!
//! Builds one queryable tree out of a live page's document, including
//! same-process and cross-process iframes and shadow roots, then decorates it
//! with layout and style data and derives visibility/interactivity flags.
//!
//! ## Pipeline
//!
//! 1. [`SessionCache`] opens (once per frame) the sessions the build needs.
//! 2. [`TreeBuilder`] walks the raw documents into a [`DomTree`] arena.
//! 3. [`Enricher`] decodes per-frame layout snapshots onto the tree and
//!    runs the [`classify`] functions.
//! 4. [`DomTree`] queries and [`serialize`] projections expose the result.
//!
//! [`DomService`] wires the steps together with the build timeouts.

pub mod builder;
pub mod classify;
pub mod enrichment;
pub mod error;
pub mod model;
pub mod serialize;
pub mod service;
pub mod session;

pub use builder::{BuildOutput, TreeBuilder};
pub use enrichment::{EnrichmentDecodeError, Enricher};
pub use error::{BuildWarning, DomError};
pub use model::{
    BoundingBox, DomTree, ElementFilter, ElementIdentity, ElementNode, ElementRef, Node, NodeId,
    TextNode,
};
pub use serialize::OutputFormat;
pub use service::{DomService, DomSnapshot};
pub use session::SessionCache;
