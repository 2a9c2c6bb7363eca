//! Snapshot enrichment.
//!
//! For each frame present in the tree, capture one layout/style snapshot,
//! decode it, and apply the decoded records to the matching elements. A frame
//! either enriches completely or not at all; failures never spill over to
//! other frames. Classification runs afterwards on the enriched elements.

mod decode;

use std::time::Duration;

use domloom_config::EnrichmentConfig;
use domloom_protocols::FrameKey;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub use decode::{DecodedNode, EnrichmentDecodeError, decode_snapshot};

use crate::classify;
use crate::error::{BuildWarning, DomError};
use crate::model::DomTree;
use crate::session::SessionCache;

/// Applies per-frame snapshots to a built tree.
pub struct Enricher<'s> {
    cache: &'s SessionCache,
    config: &'s EnrichmentConfig,
    session_timeout: Duration,
}

impl<'s> Enricher<'s> {
    pub fn new(cache: &'s SessionCache, config: &'s EnrichmentConfig, session_timeout: Duration) -> Self {
        Self {
            cache,
            config,
            session_timeout,
        }
    }

    /// Enrich and classify `tree` in place. Safe to run more than once.
    pub async fn enrich(
        &self,
        tree: &mut DomTree,
        token: &CancellationToken,
    ) -> Result<Vec<BuildWarning>, DomError> {
        let mut warnings = Vec::new();
        let frame_keys = tree.frame_keys();
        info!("Enriching {} frame(s)", frame_keys.len());

        for frame_key in &frame_keys {
            if token.is_cancelled() {
                return Err(DomError::Cancelled);
            }
            match self.frame_records(frame_key).await {
                Ok(records) => {
                    let applied = apply(tree, frame_key, &records);
                    debug!("Applied {} snapshot records to {}", applied, frame_key);
                }
                Err(warning) => {
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        classify::classify_tree(tree);
        Ok(warnings)
    }

    /// Capture and decode one frame's snapshot.
    async fn frame_records(&self, frame_key: &FrameKey) -> Result<Vec<DecodedNode>, BuildWarning> {
        let session = match self.cache.get(frame_key) {
            Some(session) => session,
            None => {
                debug!("No cached session for {}, opening one", frame_key);
                self.cache
                    .get_or_open(frame_key, self.session_timeout)
                    .await
                    .map_err(|e| BuildWarning::SessionResolution {
                        frame_key: frame_key.clone(),
                        message: e.to_string(),
                    })?
            }
        };

        let timeout = self.config.snapshot_timeout();
        let snapshot = match tokio::time::timeout(
            timeout,
            session.capture_snapshot(&self.config.computed_styles),
        )
        .await
        {
            Ok(Ok(snapshot)) => snapshot,
            Ok(Err(e)) => {
                return Err(BuildWarning::SnapshotCapture {
                    frame_key: frame_key.clone(),
                    message: e.to_string(),
                });
            }
            Err(_) => {
                return Err(BuildWarning::SnapshotCapture {
                    frame_key: frame_key.clone(),
                    message: format!("snapshot exceeded {:?}", timeout),
                });
            }
        };

        decode_snapshot(&snapshot, &self.config.computed_styles).map_err(|e| {
            BuildWarning::EnrichmentDecode {
                frame_key: frame_key.clone(),
                message: e.to_string(),
            }
        })
    }
}

/// Write decoded records onto the elements of `frame_key`. Returns the
/// number of elements touched.
pub fn apply(tree: &mut DomTree, frame_key: &FrameKey, records: &[DecodedNode]) -> usize {
    let mut applied = 0;
    for record in records {
        let Some(id) = tree.lookup(frame_key, record.backend_node_id) else {
            continue;
        };
        let Some(element) = tree.element_mut(id) else {
            continue;
        };

        element.computed_styles = record.computed_styles.clone();
        element.bounding_box = record.bounding_box;
        element.paint_order = record.paint_order;
        match record.bounding_box {
            Some(bbox) => {
                element.computed_properties.insert(
                    "offsetRects".to_string(),
                    Value::Array(vec![json!({"width": bbox.width, "height": bbox.height})]),
                );
            }
            None => {
                element.computed_properties.remove("offsetRects");
            }
        }
        element.enriched = true;
        applied += 1;
    }
    applied
}

#[cfg(test)]
#[path = "enrichment_tests.rs"]
mod tests;
