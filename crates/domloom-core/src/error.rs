//! Build errors and soft-failure warnings.

use std::time::Duration;

use domloom_protocols::{FrameKey, ProtocolError};
use thiserror::Error;

/// Fatal outcome of a build. Surfaces once from the top-level call.
#[derive(Debug, Error)]
pub enum DomError {
    /// A raw node lacked an identifying field.
    #[error("Malformed document: {0}")]
    Structural(#[source] ProtocolError),

    #[error("Build timed out after {0:?}")]
    BuildTimeout(Duration),

    #[error("Build cancelled")]
    Cancelled,

    #[error("Main document has no root element")]
    NoRootElement,

    /// A call outside iframe resolution failed (main document, snapshot setup).
    #[error("Protocol error: {0}")]
    Protocol(#[source] ProtocolError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An unknown output format or element filter name.
    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

impl From<ProtocolError> for DomError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::MissingField { .. } => DomError::Structural(err),
            other => DomError::Protocol(other),
        }
    }
}

impl From<serde_json::Error> for DomError {
    fn from(err: serde_json::Error) -> Self {
        DomError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for DomError {
    fn from(err: csv::Error) -> Self {
        DomError::Serialization(err.to_string())
    }
}

/// A soft failure recorded during a build. The build still succeeds.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildWarning {
    /// No session could be opened for a frame.
    #[error("no session for {frame_key}: {message}")]
    SessionResolution { frame_key: FrameKey, message: String },
    /// An iframe's content did not arrive within the per-iframe budget.
    #[error("iframe {frame_key} timed out after {timeout:?}")]
    IframeTimeout { frame_key: FrameKey, timeout: Duration },
    /// An iframe's document could not be fetched.
    #[error("iframe {frame_key} document fetch failed: {message}")]
    IframeFetch { frame_key: FrameKey, message: String },
    /// A frame's snapshot could not be captured.
    #[error("snapshot capture for {frame_key} failed: {message}")]
    SnapshotCapture { frame_key: FrameKey, message: String },
    /// A frame's snapshot was malformed; its elements stay unenriched.
    #[error("snapshot for {frame_key} not applied: {message}")]
    EnrichmentDecode { frame_key: FrameKey, message: String },
    /// A node repeated an identity already present in the tree.
    #[error("duplicate node {backend_node_id} in {frame_key} dropped")]
    DuplicateIdentity { frame_key: FrameKey, backend_node_id: i64 },
    /// An iframe sat deeper than the configured nesting limit.
    #[error("iframe {frame_key} skipped at depth {depth}")]
    DepthLimit { frame_key: FrameKey, depth: usize },
}

impl BuildWarning {
    pub fn frame_key(&self) -> &FrameKey {
        match self {
            BuildWarning::SessionResolution { frame_key, .. }
            | BuildWarning::IframeTimeout { frame_key, .. }
            | BuildWarning::IframeFetch { frame_key, .. }
            | BuildWarning::SnapshotCapture { frame_key, .. }
            | BuildWarning::EnrichmentDecode { frame_key, .. }
            | BuildWarning::DuplicateIdentity { frame_key, .. }
            | BuildWarning::DepthLimit { frame_key, .. } => frame_key,
        }
    }
}
