//! Recursive tree construction across frames and shadow roots.
//!
//! Traversal is depth-first, parent before children, children in source
//! order. Iframe documents from other sessions are spliced in as ordinary
//! children of their iframe element; shadow-root children are spliced into
//! their host.

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

use domloom_config::BuildConfig;
use domloom_protocols::{FrameKey, NodeType, RawElement, RawNode, RawNodeKind};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{BuildWarning, DomError};
use crate::model::{DomTree, ElementNode, NodeId, TextNode, TreeArena};
use crate::session::SessionCache;

type BuildFuture<'a> = Pin<Box<dyn Future<Output = Result<Option<NodeId>, DomError>> + Send + 'a>>;

/// Result of a successful build: the tree plus every soft failure met on the way.
#[derive(Debug)]
pub struct BuildOutput {
    pub tree: DomTree,
    pub warnings: Vec<BuildWarning>,
}

/// Per-build mutable state.
struct BuildContext {
    arena: TreeArena,
    visited_frames: HashSet<FrameKey>,
    warnings: Vec<BuildWarning>,
}

impl BuildContext {
    fn new(main_key: &FrameKey) -> Self {
        let mut visited_frames = HashSet::new();
        visited_frames.insert(main_key.clone());
        Self {
            arena: TreeArena::new(),
            visited_frames,
            warnings: Vec::new(),
        }
    }
}

/// Builds a [`DomTree`] from the main document, pulling iframe documents
/// through the session cache.
pub struct TreeBuilder<'s> {
    cache: &'s SessionCache,
    config: &'s BuildConfig,
}

impl<'s> TreeBuilder<'s> {
    pub fn new(cache: &'s SessionCache, config: &'s BuildConfig) -> Self {
        Self { cache, config }
    }

    /// Build the tree rooted at the main document's root element.
    ///
    /// The main frame key is taken from the cache and marked visited before
    /// traversal starts.
    pub async fn build(
        &self,
        document: &RawNode,
        token: &CancellationToken,
    ) -> Result<BuildOutput, DomError> {
        let main_key = self.cache.main_key().clone();
        let mut ctx = BuildContext::new(&main_key);
        info!("Building DOM tree for {}", main_key);

        let root = self
            .build_node(&mut ctx, document, &main_key, None, 0, token)
            .await?
            .ok_or(DomError::NoRootElement)?;

        let node_count = ctx.arena.len();
        let tree = ctx
            .arena
            .into_tree(root)
            .ok_or(DomError::NoRootElement)?;
        info!(
            nodes = node_count,
            warnings = ctx.warnings.len(),
            "DOM tree built for {}",
            main_key
        );

        Ok(BuildOutput {
            tree,
            warnings: ctx.warnings,
        })
    }

    /// Convert one raw node (boxed for recursion).
    fn build_node<'a>(
        &'a self,
        ctx: &'a mut BuildContext,
        raw: &'a RawNode,
        frame_key: &'a FrameKey,
        parent: Option<NodeId>,
        depth: usize,
        token: &'a CancellationToken,
    ) -> BuildFuture<'a> {
        Box::pin(async move {
            if token.is_cancelled() {
                return Err(DomError::Cancelled);
            }

            match raw.decode()? {
                RawNodeKind::Document { children, .. } => {
                    for child in children {
                        child.ids()?;
                    }
                    let first_element = children
                        .iter()
                        .find(|child| child.node_type == NodeType::Element as i64);
                    match first_element {
                        Some(element) => {
                            self.build_node(ctx, element, frame_key, parent, depth, token)
                                .await
                        }
                        None => {
                            debug!("Document in {} has no element child", frame_key);
                            Ok(None)
                        }
                    }
                }
                RawNodeKind::Doctype | RawNodeKind::Comment => Ok(None),
                RawNodeKind::Element(element) => {
                    self.build_element(ctx, element, frame_key, parent, depth, token)
                        .await
                }
                RawNodeKind::Text { ids, value } => {
                    let text = value.trim();
                    if text.is_empty() {
                        return Ok(None);
                    }
                    let node = TextNode::new(ids, frame_key.clone(), text);
                    Ok(Some(ctx.arena.insert_text(node, parent)))
                }
                RawNodeKind::ShadowRoot { ids, .. } => {
                    warn!(
                        "Dropping shadow root {} found outside a shadow-root list in {}",
                        ids.backend_node_id, frame_key
                    );
                    Ok(None)
                }
                RawNodeKind::Unsupported {
                    node_type,
                    node_name,
                } => {
                    debug!("Dropping unsupported node {} ({})", node_name, node_type);
                    Ok(None)
                }
            }
        })
    }

    async fn build_element(
        &self,
        ctx: &mut BuildContext,
        element: RawElement<'_>,
        frame_key: &FrameKey,
        parent: Option<NodeId>,
        depth: usize,
        token: &CancellationToken,
    ) -> Result<Option<NodeId>, DomError> {
        let RawElement {
            ids,
            tag,
            attributes,
            children,
            shadow_roots,
            content_document,
        } = element;

        let src = attributes
            .iter()
            .find(|(name, _)| name == "src")
            .map(|(_, value)| value.clone());
        let is_iframe = tag == "iframe";
        let node = ElementNode::new(ids, frame_key.clone(), tag, attributes.into_iter().collect());

        let id = match ctx.arena.insert_element(node, parent) {
            Ok(id) => id,
            Err(identity) => {
                warn!("Dropping node with duplicate identity {}", identity);
                ctx.warnings.push(BuildWarning::DuplicateIdentity {
                    frame_key: identity.frame_key,
                    backend_node_id: identity.backend_node_id,
                });
                return Ok(None);
            }
        };

        for child in children {
            self.append_built(ctx, id, child, frame_key, depth, token)
                .await?;
        }

        for shadow_root in shadow_roots {
            match shadow_root.decode()? {
                RawNodeKind::ShadowRoot { children, .. } => {
                    for child in children {
                        self.append_built(ctx, id, child, frame_key, depth, token)
                            .await?;
                    }
                }
                _ => {
                    self.append_built(ctx, id, shadow_root, frame_key, depth, token)
                        .await?
                }
            }
        }

        if is_iframe {
            self.expand_iframe(
                ctx,
                id,
                ids.backend_node_id,
                src.as_deref(),
                content_document,
                frame_key,
                depth,
                token,
            )
            .await?;
        }

        Ok(Some(id))
    }

    async fn append_built(
        &self,
        ctx: &mut BuildContext,
        parent: NodeId,
        raw: &RawNode,
        frame_key: &FrameKey,
        depth: usize,
        token: &CancellationToken,
    ) -> Result<(), DomError> {
        if let Some(child) = self
            .build_node(ctx, raw, frame_key, Some(parent), depth, token)
            .await?
        {
            ctx.arena.append_child(parent, child);
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    async fn expand_iframe(
        &self,
        ctx: &mut BuildContext,
        iframe: NodeId,
        backend_node_id: i64,
        src: Option<&str>,
        content_document: Option<&RawNode>,
        frame_key: &FrameKey,
        depth: usize,
        token: &CancellationToken,
    ) -> Result<(), DomError> {
        // A repeated iframe identity never reaches here: the arena rejects it on insert.
        if let Some(document) = content_document {
            debug!("Expanding inline iframe document in {}", frame_key);
            return self
                .append_built(ctx, iframe, document, frame_key, depth, token)
                .await;
        }

        let Some(child_key) = src.and_then(|src| resolve_frame_key(frame_key, src)) else {
            debug!("Iframe {} in {} has no src", backend_node_id, frame_key);
            return Ok(());
        };

        if ctx.visited_frames.contains(&child_key) {
            debug!("Frame {} already visited, not re-entering", child_key);
            return Ok(());
        }

        if depth >= self.config.max_iframe_depth {
            info!(
                "Skipping iframe {} at depth {} (limit {})",
                child_key, depth, self.config.max_iframe_depth
            );
            ctx.warnings.push(BuildWarning::DepthLimit {
                frame_key: child_key,
                depth,
            });
            return Ok(());
        }

        ctx.visited_frames.insert(child_key.clone());

        let checkpoint = ctx.arena.checkpoint();
        let iframe_token = token.child_token();
        let timeout = self.config.iframe_timeout();
        let fetch = self.fetch_iframe(ctx, iframe, &child_key, depth + 1, &iframe_token);

        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(DomError::Cancelled),
            result = tokio::time::timeout(timeout, fetch) => result,
        };

        match outcome {
            Ok(Ok(Ok(()))) => {}
            Ok(Ok(Err(warning))) => {
                ctx.arena.rollback(checkpoint);
                warn!("{}", warning);
                ctx.warnings.push(warning);
            }
            Ok(Err(fatal)) => return Err(fatal),
            Err(_) => {
                iframe_token.cancel();
                ctx.arena.rollback(checkpoint);
                let warning = BuildWarning::IframeTimeout {
                    frame_key: child_key,
                    timeout,
                };
                warn!("{}", warning);
                ctx.warnings.push(warning);
            }
        }

        Ok(())
    }

    /// Open a session for `frame_key`, fetch its document and splice it under
    /// `iframe`. Soft failures come back as the inner `Err`.
    async fn fetch_iframe(
        &self,
        ctx: &mut BuildContext,
        iframe: NodeId,
        frame_key: &FrameKey,
        depth: usize,
        token: &CancellationToken,
    ) -> Result<Result<(), BuildWarning>, DomError> {
        let session = match self
            .cache
            .get_or_open(frame_key, self.config.session_timeout())
            .await
        {
            Ok(session) => session,
            Err(e) => {
                return Ok(Err(BuildWarning::SessionResolution {
                    frame_key: frame_key.clone(),
                    message: e.to_string(),
                }));
            }
        };

        let timeout = self.config.document_timeout();
        let document = match tokio::time::timeout(timeout, session.get_document()).await {
            Ok(Ok(document)) => document,
            Ok(Err(e)) => {
                return Ok(Err(BuildWarning::IframeFetch {
                    frame_key: frame_key.clone(),
                    message: e.to_string(),
                }));
            }
            Err(_) => {
                return Ok(Err(BuildWarning::IframeFetch {
                    frame_key: frame_key.clone(),
                    message: format!("document fetch exceeded {:?}", timeout),
                }));
            }
        };

        debug!("Fetched document for {} via {}", frame_key, session.label());
        self.append_built(ctx, iframe, &document, frame_key, depth, token)
            .await?;
        Ok(Ok(()))
    }
}

/// Resolve an iframe `src` against the frame that contains it.
/// Empty sources resolve to nothing.
pub fn resolve_frame_key(base: &FrameKey, src: &str) -> Option<FrameKey> {
    let src = src.trim();
    if src.is_empty() {
        return None;
    }
    match Url::parse(base.as_str()).and_then(|base| base.join(src)) {
        Ok(url) => Some(FrameKey::new(url.to_string())),
        Err(_) => Some(FrameKey::new(src)),
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
