//! Frame-key to session cache shared by the builder and the enricher.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use domloom_protocols::{DomSession, FrameKey, FrameResolver, ProtocolError};
use parking_lot::Mutex;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

type SessionCell = Arc<OnceCell<Arc<dyn DomSession>>>;

/// Single-flight session cache.
///
/// Concurrent lookups for the same frame key share one `open_session` call.
/// The map lock is only held to fetch a cell; session creation runs outside it.
pub struct SessionCache {
    resolver: Arc<dyn FrameResolver>,
    cells: Mutex<HashMap<FrameKey, SessionCell>>,
    main_key: FrameKey,
}

impl SessionCache {
    /// Create a cache seeded with the caller-owned main session.
    pub fn new(
        resolver: Arc<dyn FrameResolver>,
        main_key: FrameKey,
        main_session: Arc<dyn DomSession>,
    ) -> Self {
        let mut cells = HashMap::new();
        cells.insert(
            main_key.clone(),
            Arc::new(OnceCell::new_with(Some(main_session))),
        );
        Self {
            resolver,
            cells: Mutex::new(cells),
            main_key,
        }
    }

    pub fn main_key(&self) -> &FrameKey {
        &self.main_key
    }

    pub fn resolver(&self) -> &Arc<dyn FrameResolver> {
        &self.resolver
    }

    /// Session for `frame_key`, opening it when absent.
    ///
    /// A failed or timed-out open leaves the entry empty so a later call retries.
    pub async fn get_or_open(
        &self,
        frame_key: &FrameKey,
        timeout: Duration,
    ) -> Result<Arc<dyn DomSession>, ProtocolError> {
        let cell = {
            let mut cells = self.cells.lock();
            cells.entry(frame_key.clone()).or_default().clone()
        };

        let session = cell
            .get_or_try_init(|| async {
                debug!("Opening session for {}", frame_key);
                match tokio::time::timeout(timeout, self.resolver.open_session(frame_key)).await {
                    Ok(result) => result,
                    Err(_) => Err(ProtocolError::Timeout(format!(
                        "opening session for {} exceeded {:?}",
                        frame_key, timeout
                    ))),
                }
            })
            .await?;
        Ok(session.clone())
    }

    /// Already opened session for `frame_key`.
    pub fn get(&self, frame_key: &FrameKey) -> Option<Arc<dyn DomSession>> {
        let cells = self.cells.lock();
        cells.get(frame_key).and_then(|cell| cell.get().cloned())
    }

    /// Frame keys with an open session.
    pub fn open_frame_keys(&self) -> Vec<FrameKey> {
        let cells = self.cells.lock();
        let mut keys: Vec<FrameKey> = cells
            .iter()
            .filter(|(_, cell)| cell.initialized())
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    /// Detach every session this cache opened. The main session is kept.
    pub async fn release_all(&self) {
        let sessions: Vec<(FrameKey, Arc<dyn DomSession>)> = {
            let mut cells = self.cells.lock();
            let main = cells.remove(&self.main_key);
            let drained: Vec<_> = cells
                .drain()
                .filter_map(|(key, cell)| cell.get().cloned().map(|session| (key, session)))
                .collect();
            if let Some(main) = main {
                cells.insert(self.main_key.clone(), main);
            }
            drained
        };

        for (frame_key, session) in sessions {
            match session.detach().await {
                Ok(()) => debug!("Detached session {} for {}", session.label(), frame_key),
                Err(e) => warn!("Failed to detach session for {}: {}", frame_key, e),
            }
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
