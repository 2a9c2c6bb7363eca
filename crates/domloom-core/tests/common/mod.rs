//! In-memory browser fakes and raw-document fixtures.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use domloom_protocols::{
    CaptureSnapshot, DomSession, FrameInfo, FrameKey, FrameResolver, ProtocolError, RawNode,
};
use serde_json::{Value, json};

pub fn doc(id: i64, url: &str, root: Value) -> Value {
    json!({
        "nodeId": id, "backendNodeId": id, "nodeType": 9, "nodeName": "#document",
        "documentURL": url,
        "children": [
            {"nodeId": id + 1000, "backendNodeId": id + 1000, "nodeType": 10, "nodeName": "html"},
            root
        ]
    })
}

pub fn el(id: i64, tag: &str, attrs: &[&str], children: Vec<Value>) -> Value {
    json!({
        "nodeId": id, "backendNodeId": id, "nodeType": 1,
        "nodeName": tag.to_uppercase(), "attributes": attrs, "children": children
    })
}

pub fn text(id: i64, value: &str) -> Value {
    json!({"nodeId": id, "backendNodeId": id, "nodeType": 3, "nodeName": "#text", "nodeValue": value})
}

/// `html > body > children`, with ids `base` and `base + 1`.
pub fn page(base: i64, url: &str, body_children: Vec<Value>) -> Value {
    doc(
        base - 1,
        url,
        el(base, "html", &[], vec![el(base + 1, "body", &[], body_children)]),
    )
}

/// A snapshot with one layout entry per listed element. Style values are
/// given in the order of the requested style list.
pub fn snapshot(elements: &[(i64, &[&str], [f64; 4])]) -> Value {
    let mut strings: Vec<String> = Vec::new();
    let mut intern = |value: &str| -> i64 {
        match strings.iter().position(|s| s == value) {
            Some(index) => index as i64,
            None => {
                strings.push(value.to_string());
                (strings.len() - 1) as i64
            }
        }
    };

    let mut backend_ids = Vec::new();
    let mut styles = Vec::new();
    let mut bounds = Vec::new();
    let mut node_index = Vec::new();
    let mut paint_orders = Vec::new();
    for (i, (backend_id, values, rect)) in elements.iter().enumerate() {
        backend_ids.push(*backend_id);
        node_index.push(i as i64);
        styles.push(values.iter().map(|v| intern(v)).collect::<Vec<_>>());
        bounds.push(rect.to_vec());
        paint_orders.push(i as i64 + 1);
    }

    json!({
        "strings": strings,
        "documents": [{
            "nodes": {"backendNodeId": backend_ids, "nodeType": vec![1; elements.len()]},
            "layout": {
                "nodeIndex": node_index,
                "styles": styles,
                "bounds": bounds,
                "paintOrders": paint_orders
            }
        }]
    })
}

pub fn empty_snapshot() -> Value {
    json!({"strings": [], "documents": []})
}

#[derive(Clone)]
pub struct FakeFrame {
    pub document: Value,
    pub snapshot: Value,
    pub delay: Duration,
}

impl FakeFrame {
    pub fn new(document: Value) -> Self {
        Self {
            document,
            snapshot: empty_snapshot(),
            delay: Duration::ZERO,
        }
    }

    pub fn with_snapshot(mut self, snapshot: Value) -> Self {
        self.snapshot = snapshot;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

pub struct FakeSession {
    label: String,
    frame: FakeFrame,
    detached: Arc<AtomicUsize>,
}

#[async_trait]
impl DomSession for FakeSession {
    fn label(&self) -> &str {
        &self.label
    }

    async fn get_document(&self) -> Result<RawNode, ProtocolError> {
        tokio::time::sleep(self.frame.delay).await;
        Ok(serde_json::from_value(self.frame.document.clone())?)
    }

    async fn capture_snapshot(&self, _styles: &[String]) -> Result<CaptureSnapshot, ProtocolError> {
        Ok(serde_json::from_value(self.frame.snapshot.clone())?)
    }

    async fn detach(&self) -> Result<(), ProtocolError> {
        self.detached.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A page plus its out-of-process frames, keyed by URL.
pub struct FakeBrowser {
    pub page_url: String,
    frames: HashMap<String, FakeFrame>,
    pub opened: Arc<AtomicUsize>,
    pub detached: Arc<AtomicUsize>,
    pub main_detached: Arc<AtomicUsize>,
}

impl FakeBrowser {
    pub fn new(page_url: &str, main: FakeFrame) -> Self {
        let mut frames = HashMap::new();
        frames.insert(page_url.to_string(), main);
        Self {
            page_url: page_url.to_string(),
            frames,
            opened: Arc::new(AtomicUsize::new(0)),
            detached: Arc::new(AtomicUsize::new(0)),
            main_detached: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_frame(mut self, url: &str, frame: FakeFrame) -> Self {
        self.frames.insert(url.to_string(), frame);
        self
    }

    pub fn main_session(&self) -> Arc<dyn DomSession> {
        Arc::new(FakeSession {
            label: "main".to_string(),
            frame: self.frames[&self.page_url].clone(),
            detached: self.main_detached.clone(),
        })
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn detached(&self) -> usize {
        self.detached.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FrameResolver for FakeBrowser {
    async fn page_url(&self) -> Result<String, ProtocolError> {
        Ok(self.page_url.clone())
    }

    async fn list_frames(&self) -> Result<Vec<FrameInfo>, ProtocolError> {
        Ok(self
            .frames
            .keys()
            .map(|url| FrameInfo {
                frame_key: FrameKey::from(url.as_str()),
                target_id: None,
                kind: if *url == self.page_url { "page" } else { "iframe" }.to_string(),
            })
            .collect())
    }

    async fn open_session(&self, frame_key: &FrameKey) -> Result<Arc<dyn DomSession>, ProtocolError> {
        let frame = self
            .frames
            .get(frame_key.as_str())
            .cloned()
            .ok_or_else(|| ProtocolError::NoMatchingFrame(frame_key.to_string()))?;
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(FakeSession {
            label: frame_key.to_string(),
            frame,
            detached: self.detached.clone(),
        }))
    }
}
