//! Session and frame-resolution traits.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ProtocolError;
use crate::frame::{FrameInfo, FrameKey};
use crate::node::RawNode;
use crate::snapshot::CaptureSnapshot;

/// A protocol session scoped to one frame's execution context.
#[async_trait]
pub trait DomSession: Send + Sync {
    /// Short human-readable label used in logs.
    fn label(&self) -> &str;

    /// Fetch the full document (all depths, piercing shadow roots).
    async fn get_document(&self) -> Result<RawNode, ProtocolError>;

    /// Capture a layout/style snapshot requesting `computed_styles` in order.
    async fn capture_snapshot(
        &self,
        computed_styles: &[String],
    ) -> Result<CaptureSnapshot, ProtocolError>;

    /// Release the session. Sessions that own nothing may keep the default.
    async fn detach(&self) -> Result<(), ProtocolError> {
        Ok(())
    }
}

/// Finds live frames and opens sessions scoped to them.
#[async_trait]
pub trait FrameResolver: Send + Sync {
    /// URL of the top-level page.
    async fn page_url(&self) -> Result<String, ProtocolError>;

    /// Currently live frames with resolvable URLs.
    async fn list_frames(&self) -> Result<Vec<FrameInfo>, ProtocolError>;

    /// Open a session for the frame identified by `frame_key`.
    async fn open_session(
        &self,
        frame_key: &FrameKey,
    ) -> Result<Arc<dyn DomSession>, ProtocolError>;
}
