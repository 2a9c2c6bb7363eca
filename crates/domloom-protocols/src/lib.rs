//! # domloom Protocols
//!
//! The consumed-protocol seam of the domloom workspace.
//! Contains only wire records and interface definitions - no transport.
//!
//! ## Contents
//!
//! - [`RawNode`] - nested node record returned by a full document fetch
//! - [`RawNodeKind`] - closed decode of a [`RawNode`], produced at the boundary
//! - [`CaptureSnapshot`] - columnar layout/style capture
//! - [`DomSession`] - a protocol session scoped to one frame
//! - [`FrameResolver`] - finds live frames and opens sessions for them

pub mod error;
pub mod frame;
pub mod node;
pub mod session;
pub mod snapshot;

pub use error::ProtocolError;
pub use frame::{FrameInfo, FrameKey};
pub use node::{NodeIds, NodeType, RawElement, RawNode, RawNodeKind};
pub use session::{DomSession, FrameResolver};
pub use snapshot::{
    CaptureSnapshot, ComputedStylesSnapshot, DocumentSnapshot, LayoutTreeSnapshot,
    NodeTreeSnapshot,
};
