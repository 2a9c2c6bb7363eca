//! A flattened CDP session scoped to one frame target.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use domloom_protocols::{CaptureSnapshot, DomSession, ProtocolError, RawNode};
use serde_json::json;
use tracing::debug;

use crate::client::CdpClient;
use crate::error::CdpError;

/// A session attached to a single page or iframe target.
pub struct FrameSession {
    client: Arc<CdpClient>,
    target_id: String,
    session_id: String,
    url: String,
    detached: AtomicBool,
}

impl FrameSession {
    /// Attach to `target_id` and wrap the resulting session.
    pub async fn attach(
        client: Arc<CdpClient>,
        target_id: &str,
        url: &str,
    ) -> Result<Self, CdpError> {
        let session_id = client.attach(target_id).await?;
        debug!("Attached session {} to {} ({})", session_id, target_id, url);
        Ok(Self {
            client,
            target_id: target_id.to_string(),
            session_id,
            url: url.to_string(),
            detached: AtomicBool::new(false),
        })
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DomSession for FrameSession {
    fn label(&self) -> &str {
        &self.url
    }

    async fn get_document(&self) -> Result<RawNode, ProtocolError> {
        let mut result = self
            .client
            .call_session(
                &self.session_id,
                "DOM.getDocument",
                Some(json!({"depth": -1, "pierce": true})),
            )
            .await?;

        match result.get_mut("root").map(serde_json::Value::take) {
            Some(root) => Ok(serde_json::from_value(root)?),
            None => Err(CdpError::InvalidResponse("DOM.getDocument returned no root".to_string()).into()),
        }
    }

    async fn capture_snapshot(
        &self,
        computed_styles: &[String],
    ) -> Result<CaptureSnapshot, ProtocolError> {
        let result = self
            .client
            .call_session(
                &self.session_id,
                "DOMSnapshot.captureSnapshot",
                Some(json!({
                    "computedStyles": computed_styles,
                    "includePaintOrder": true,
                    "includeDOMRects": true
                })),
            )
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Detach once; later calls are no-ops.
    async fn detach(&self) -> Result<(), ProtocolError> {
        if self.detached.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.client.detach(&self.session_id).await?;
        debug!("Detached session {} ({})", self.session_id, self.url);
        Ok(())
    }
}
