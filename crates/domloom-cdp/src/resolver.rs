//! Target discovery and session opening for frames.

use std::sync::Arc;

use async_trait::async_trait;
use domloom_protocols::{DomSession, FrameInfo, FrameKey, FrameResolver, ProtocolError};
use tracing::{debug, info};
use url::Url;

use crate::client::CdpClient;
use crate::error::CdpError;
use crate::protocol::TargetInfo;
use crate::session::FrameSession;

/// Resolves frame keys to browser targets for one top-level page.
pub struct CdpFrameResolver {
    client: Arc<CdpClient>,
    page_target_id: String,
}

impl CdpFrameResolver {
    pub fn new(client: Arc<CdpClient>, page_target_id: impl Into<String>) -> Self {
        Self {
            client,
            page_target_id: page_target_id.into(),
        }
    }

    /// Pick a page whose URL contains `filter` (the first page when `None`),
    /// attach to it, and return a resolver for it with its main session.
    pub async fn attach_page(
        client: Arc<CdpClient>,
        filter: Option<&str>,
    ) -> Result<(Self, FrameSession), CdpError> {
        let targets = client.get_targets().await?;
        let page = targets
            .iter()
            .filter(|t| t.is_page())
            .find(|t| filter.is_none_or(|f| t.url.contains(f)))
            .ok_or_else(|| CdpError::TargetNotFound(filter.unwrap_or("<any page>").to_string()))?;

        info!("Using page {} ({})", page.url, page.target_id);
        let session = FrameSession::attach(client.clone(), &page.target_id, &page.url).await?;
        Ok((Self::new(client, page.target_id.clone()), session))
    }

    pub fn client(&self) -> &Arc<CdpClient> {
        &self.client
    }

    /// The target backing `frame_key`. Out-of-process iframes win over pages
    /// with the same URL.
    fn find_target<'t>(targets: &'t [TargetInfo], frame_key: &FrameKey) -> Option<&'t TargetInfo> {
        let matching = || {
            targets
                .iter()
                .filter(|t| t.is_frame() && urls_match(&t.url, frame_key.as_str()))
        };
        matching()
            .find(|t| !t.is_page())
            .or_else(|| matching().next())
    }
}

#[async_trait]
impl FrameResolver for CdpFrameResolver {
    async fn page_url(&self) -> Result<String, ProtocolError> {
        let targets = self.client.get_targets().await?;
        targets
            .into_iter()
            .find(|t| t.target_id == self.page_target_id)
            .map(|t| t.url)
            .ok_or_else(|| ProtocolError::NoMatchingFrame(self.page_target_id.clone()))
    }

    async fn list_frames(&self) -> Result<Vec<FrameInfo>, ProtocolError> {
        let targets = self.client.get_targets().await?;
        Ok(targets
            .into_iter()
            .filter(|t| t.is_frame() && !t.url.is_empty())
            .map(|t| FrameInfo {
                frame_key: FrameKey::new(t.url),
                target_id: Some(t.target_id),
                kind: t.target_type,
            })
            .collect())
    }

    async fn open_session(
        &self,
        frame_key: &FrameKey,
    ) -> Result<Arc<dyn DomSession>, ProtocolError> {
        let targets = self.client.get_targets().await?;
        let target = Self::find_target(&targets, frame_key)
            .ok_or_else(|| ProtocolError::NoMatchingFrame(frame_key.to_string()))?;

        debug!("Opening session for {} on target {}", frame_key, target.target_id);
        let session = FrameSession::attach(self.client.clone(), &target.target_id, &target.url).await?;
        Ok(Arc::new(session))
    }
}

/// Whether two frame URLs name the same document. Falls back to exact string
/// comparison when either side does not parse.
pub fn urls_match(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    match (Url::parse(a), Url::parse(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
