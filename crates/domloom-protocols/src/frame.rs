//! Frame identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The resolved URL identifying one isolated execution context
/// (main document, same-process iframe or cross-process frame).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameKey(String);

impl FrameKey {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FrameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FrameKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FrameKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A live frame reported by a [`FrameResolver`](crate::FrameResolver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInfo {
    pub frame_key: FrameKey,
    /// Protocol target backing this frame, when it has its own target.
    pub target_id: Option<String>,
    /// Target type as reported by the browser (`page`, `iframe`, ...).
    pub kind: String,
}
