//! Build orchestration: main document, tree, enrichment, session teardown.

use std::future::Future;
use std::sync::Arc;

use domloom_config::{BuildConfig, Config, EnrichmentConfig};
use domloom_protocols::{DomSession, FrameKey, FrameResolver, RawNode};
use parking_lot::Mutex;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::builder::{BuildOutput, TreeBuilder};
use crate::enrichment::Enricher;
use crate::error::{BuildWarning, DomError};
use crate::model::{DomTree, ElementFilter};
use crate::serialize::OutputFormat;
use crate::session::SessionCache;

/// A finished build: the tree, its main frame key and the soft failures met.
#[derive(Debug)]
pub struct DomSnapshot {
    pub frame_key: FrameKey,
    pub tree: DomTree,
    pub warnings: Vec<BuildWarning>,
}

impl DomSnapshot {
    pub fn translate(&self, filter: ElementFilter, format: OutputFormat) -> Result<String, DomError> {
        self.tree.translate(filter, format)
    }
}

/// Entry point for building page trees.
pub struct DomService {
    resolver: Arc<dyn FrameResolver>,
    main_session: Arc<dyn DomSession>,
    build: BuildConfig,
    enrichment: EnrichmentConfig,
    cached: Mutex<Option<Arc<DomSnapshot>>>,
}

impl DomService {
    pub fn new(
        resolver: Arc<dyn FrameResolver>,
        main_session: Arc<dyn DomSession>,
        build: BuildConfig,
        enrichment: EnrichmentConfig,
    ) -> Self {
        Self {
            resolver,
            main_session,
            build,
            enrichment,
            cached: Mutex::new(None),
        }
    }

    pub fn from_config(
        resolver: Arc<dyn FrameResolver>,
        main_session: Arc<dyn DomSession>,
        config: &Config,
    ) -> Self {
        Self::new(
            resolver,
            main_session,
            config.build.clone(),
            config.enrichment.clone(),
        )
    }

    /// Build a fresh snapshot and remember it.
    ///
    /// The whole operation runs under the overall build timeout. Every session
    /// opened for the build is released before returning, on success or failure.
    pub async fn snapshot(&self) -> Result<Arc<DomSnapshot>, DomError> {
        let token = CancellationToken::new();
        let deadline = Instant::now() + self.build.timeout();

        let (document, main_key) = self.within(deadline, &token, self.fetch_main()).await?;
        let cache = SessionCache::new(
            self.resolver.clone(),
            main_key,
            self.main_session.clone(),
        );

        let result = self
            .within(deadline, &token, self.build_and_enrich(&cache, &document, &token))
            .await;
        cache.release_all().await;

        let snapshot = Arc::new(result?);
        info!(
            elements = snapshot.tree.all_elements().len(),
            warnings = snapshot.warnings.len(),
            "Snapshot ready for {}",
            snapshot.frame_key
        );
        *self.cached.lock() = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// The last snapshot, building one when none is cached.
    pub async fn snapshot_cached(&self) -> Result<Arc<DomSnapshot>, DomError> {
        let cached = self.cached.lock().clone();
        if let Some(snapshot) = cached {
            debug!("Reusing cached snapshot for {}", snapshot.frame_key);
            return Ok(snapshot);
        }
        self.snapshot().await
    }

    /// Forget the cached snapshot.
    pub fn invalidate(&self) {
        *self.cached.lock() = None;
    }

    async fn within<T, F>(
        &self,
        deadline: Instant,
        token: &CancellationToken,
        fut: F,
    ) -> Result<T, DomError>
    where
        F: Future<Output = Result<T, DomError>>,
    {
        match tokio::time::timeout_at(deadline, fut).await {
            Ok(result) => result,
            Err(_) => {
                token.cancel();
                let timeout = self.build.timeout();
                error!("DOM build exceeded {:?}", timeout);
                Err(DomError::BuildTimeout(timeout))
            }
        }
    }

    /// Fetch the main document and pick the main frame key: the document URL,
    /// or the page URL when the document carries none.
    async fn fetch_main(&self) -> Result<(RawNode, FrameKey), DomError> {
        match self.resolver.list_frames().await {
            Ok(frames) => {
                for frame in &frames {
                    debug!(kind = %frame.kind, "Live frame {}", frame.frame_key);
                }
            }
            Err(e) => warn!("Could not list frames: {}", e),
        }

        let document = self.main_session.get_document().await?;
        let main_key = match document.document_url.as_deref().filter(|url| !url.is_empty()) {
            Some(url) => FrameKey::new(url),
            None => FrameKey::new(self.resolver.page_url().await?),
        };
        Ok((document, main_key))
    }

    async fn build_and_enrich(
        &self,
        cache: &SessionCache,
        document: &RawNode,
        token: &CancellationToken,
    ) -> Result<DomSnapshot, DomError> {
        let BuildOutput {
            mut tree,
            mut warnings,
        } = TreeBuilder::new(cache, &self.build)
            .build(document, token)
            .await?;

        if self.enrichment.enabled {
            let enricher = Enricher::new(cache, &self.enrichment, self.build.session_timeout());
            warnings.extend(enricher.enrich(&mut tree, token).await?);
        } else {
            debug!("Enrichment disabled");
        }

        Ok(DomSnapshot {
            frame_key: cache.main_key().clone(),
            tree,
            warnings,
        })
    }
}
